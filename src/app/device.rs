//! The calculator board: registry, calculator and timers wired together.
//!
//! ```text
//!   edge(pin) ─┬─ WAKE_RX ──────────────▶ prolong
//!              └─ button ─▶ Registry ──▶ CalcAction ──▶ CalculatorUi ──▶ LedDisplay
//!                              └─ on success: prolong + wake pulse
//!
//!   poll(now) ─▶ TimedEventQueue ─┬─ NoResultFlash  ─▶ toggle result bank, re-que
//!                                 └─ WakePulseReset ─▶ drop wake line
//! ```
//!
//! `Device` owns every piece of mutable state; the run loop owns the
//! `Device`.  Nothing here reads a clock: every entry point takes `now`.

use embassy_time::{Duration, Instant};
use log::{debug, info};

use crate::app::display::{DisplayOutputs, LedDisplay};
use crate::app::ports::BinaryOutput;
use crate::calculator::Calculator;
use crate::calculator::ui::CalculatorUi;
use crate::config::DeviceConfig;
use crate::error::Result;
use crate::output_pin::OutputPinController;
use crate::pins;
use crate::queue::{EventKind, TimedEventQueue};
use crate::registry::{GpioAction, Registry};

/// Operand width of the board's calculator.
pub const CALC_BITS: u32 = 3;

/// Number of button bindings.
pub const BUTTON_COUNT: usize = 4;

// ═══════════════════════════════════════════════════════════════
//  Calculator panel and its button actions
// ═══════════════════════════════════════════════════════════════

/// Everything the button actions operate on.
pub struct CalcPanel<O: BinaryOutput> {
    pub calc: Calculator<CALC_BITS>,
    pub ui: CalculatorUi<CALC_BITS>,
    pub display: LedDisplay<O>,
}

impl<O: BinaryOutput> CalcPanel<O> {
    pub fn new(display: LedDisplay<O>) -> Self {
        Self { calc: Calculator::new(), ui: CalculatorUi::new(), display }
    }

    /// Push the full calculator state to the LEDs.
    pub fn refresh(&mut self) {
        self.ui.read_all(&self.calc, &mut self.display);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcAction {
    /// Cycle the UI state.  Owns the display across sleep.
    Rotate,
    ToggleBit0,
    ToggleBit1,
    ToggleBit2,
}

impl<O: BinaryOutput> GpioAction<CalcPanel<O>> for CalcAction {
    fn trigger(&mut self, p: &mut CalcPanel<O>) {
        match self {
            Self::Rotate => p.ui.rotate_behaviour(&mut p.calc, &mut p.display),
            Self::ToggleBit0 => p.ui.toggle_bit::<0>(&mut p.calc, &mut p.display),
            Self::ToggleBit1 => p.ui.toggle_bit::<1>(&mut p.calc, &mut p.display),
            Self::ToggleBit2 => p.ui.toggle_bit::<2>(&mut p.calc, &mut p.display),
        }
    }

    fn on_sleep(&mut self, p: &mut CalcPanel<O>) {
        if *self == Self::Rotate {
            p.display.sleep_all();
        }
    }

    fn on_wake(&mut self, p: &mut CalcPanel<O>) {
        if *self == Self::Rotate {
            p.refresh();
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Wake link
// ═══════════════════════════════════════════════════════════════

/// Outgoing wake line to the partner board.
pub struct WakeLink<O: BinaryOutput> {
    line: OutputPinController<O>,
}

impl<O: BinaryOutput> WakeLink<O> {
    pub fn new(output: O) -> Self {
        Self { line: OutputPinController::new(output) }
    }

    pub fn pulse(&mut self) {
        self.line.set(true);
    }

    pub fn reset(&mut self) {
        self.line.set(false);
    }

    pub const fn is_high(&self) -> bool {
        self.line.is_on()
    }

    pub fn line(&self) -> &OutputPinController<O> {
        &self.line
    }
}

// ═══════════════════════════════════════════════════════════════
//  Timers
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceTimer {
    NoResultFlash,
    WakePulseReset,
}

impl EventKind for DeviceTimer {
    const ALL: &'static [Self] = &[Self::NoResultFlash, Self::WakePulseReset];

    fn slot(self) -> usize {
        self as usize
    }
}

pub type DeviceTimers = TimedEventQueue<DeviceTimer, Instant, 2>;

// ═══════════════════════════════════════════════════════════════
//  Device
// ═══════════════════════════════════════════════════════════════

/// All outputs the board drives.
pub struct BoardOutputs<O> {
    pub display: DisplayOutputs<O>,
    pub wake_tx: O,
}

pub struct Device<O: BinaryOutput> {
    config: DeviceConfig,
    registry: Registry<CalcAction, BUTTON_COUNT>,
    panel: CalcPanel<O>,
    timers: DeviceTimers,
    wake_link: WakeLink<O>,
    sleep_deadline: Instant,
}

impl<O: BinaryOutput> Device<O> {
    /// Validate `config`, bind the buttons, initiate every output and show
    /// the initial calculator state.  The device starts awake.
    pub fn new(config: DeviceConfig, outputs: BoardOutputs<O>, now: Instant) -> Result<Self> {
        config.validate()?;

        let registry = Registry::<CalcAction, BUTTON_COUNT>::builder()
            .bind(pins::ROTATE_BUTTON_GPIO, CalcAction::Rotate)?
            .bind(pins::BIT0_BUTTON_GPIO, CalcAction::ToggleBit0)?
            .bind(pins::BIT1_BUTTON_GPIO, CalcAction::ToggleBit1)?
            .bind(pins::BIT2_BUTTON_GPIO, CalcAction::ToggleBit2)?
            .build();

        let mut panel = CalcPanel::new(LedDisplay::new(outputs.display));
        panel.refresh();

        let sleep_deadline = now + config.sleep_timeout();
        info!(
            "Device: ready, {} buttons, sleep after {} s",
            registry.len(),
            config.sleep_timeout_secs
        );

        let mut device = Self {
            config,
            registry,
            panel,
            timers: DeviceTimers::new(),
            wake_link: WakeLink::new(outputs.wake_tx),
            sleep_deadline,
        };
        device.sync_flash(now);
        Ok(device)
    }

    // ── Input ─────────────────────────────────────────────────

    /// Handle a rising edge on `pin`.  Returns false, with no side effects,
    /// if the pin is unbound.
    ///
    /// An edge on a bound pin while asleep wakes the device first.
    pub fn handle_edge(&mut self, pin: u8, now: Instant) -> bool {
        if pin != pins::WAKE_RX_GPIO && self.registry.action(pin).is_none() {
            debug!("Device: ignoring edge on unbound pin {}", pin);
            return false;
        }
        if self.registry.is_sleeping() {
            self.wake(now);
        }

        if pin == pins::WAKE_RX_GPIO {
            debug!("Device: wake request from partner");
            self.prolong(now);
            return true;
        }

        let timeout = self.config.sleep_timeout();
        let pulse = self.config.wake_pulse();
        let Self { registry, panel, timers, wake_link, sleep_deadline, .. } = self;
        let handled = registry.trigger_gpio_then(pin, panel, |_| {
            *sleep_deadline = now + timeout;
            wake_link.pulse();
            timers.que(DeviceTimer::WakePulseReset, now + pulse);
        });

        self.sync_flash(now);
        handled
    }

    /// Visit every pin that needs a rising-edge interrupt.
    pub fn for_each_input(&self, mut visitor: impl FnMut(u8)) {
        self.registry.for_each_input(&mut visitor);
        visitor(pins::WAKE_RX_GPIO);
    }

    // ── Timers ────────────────────────────────────────────────

    /// Fire due timers.  Returns the next pending deadline.
    pub fn poll(&mut self, now: Instant) -> Option<Instant> {
        let period = self.config.no_result_flash();
        let Self { timers, panel, wake_link, .. } = self;
        timers.execute_all(now, |q, timer, at| match timer {
            DeviceTimer::NoResultFlash => {
                panel.display.flash_toggle();
                q.que(DeviceTimer::NoResultFlash, at + period);
            }
            DeviceTimer::WakePulseReset => wake_link.reset(),
        });
        self.timers.next()
    }

    /// How long the run loop may idle before it must call back in.
    pub fn idle_budget(&self, now: Instant) -> Duration {
        let mut budget = self.config.input_poll();
        if let Some(next) = self.timers.next() {
            budget = budget.min(next.saturating_duration_since(now));
        }
        budget.min(self.sleep_deadline.saturating_duration_since(now))
    }

    // ── Power ─────────────────────────────────────────────────

    pub fn sleep_due(&self, now: Instant) -> bool {
        now >= self.sleep_deadline
    }

    /// Notify every action, cancel timers and drop the wake line.
    pub fn enter_sleep(&mut self) {
        if self.registry.is_sleeping() {
            return;
        }
        self.timers.unque(DeviceTimer::NoResultFlash);
        self.timers.unque(DeviceTimer::WakePulseReset);
        self.wake_link.reset();
        self.registry.sleep(&mut self.panel);
        info!("Device: sleeping");
    }

    /// Notify every action and restart the inactivity timeout.
    pub fn wake(&mut self, now: Instant) {
        self.prolong(now);
        if !self.registry.is_sleeping() {
            return;
        }
        self.registry.wake(&mut self.panel);
        self.sync_flash(now);
        info!("Device: awake");
    }

    pub const fn is_sleeping(&self) -> bool {
        self.registry.is_sleeping()
    }

    pub const fn sleep_deadline(&self) -> Instant {
        self.sleep_deadline
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn panel(&self) -> &CalcPanel<O> {
        &self.panel
    }

    pub fn wake_link(&self) -> &WakeLink<O> {
        &self.wake_link
    }

    pub fn timers(&self) -> &DeviceTimers {
        &self.timers
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    // ── Internals ─────────────────────────────────────────────

    fn prolong(&mut self, now: Instant) {
        self.sleep_deadline = now + self.config.sleep_timeout();
    }

    /// Start or stop result flashing to match the display.
    fn sync_flash(&mut self, now: Instant) {
        let queued = self.timers.is_queued(DeviceTimer::NoResultFlash);
        if self.panel.display.no_result() {
            if !queued {
                debug!("Device: no result, flashing");
                self.timers.que(DeviceTimer::NoResultFlash, now);
            }
        } else if queued {
            self.timers.unque(DeviceTimer::NoResultFlash);
        }
    }
}
