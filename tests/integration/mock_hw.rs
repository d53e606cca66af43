//! Mock outputs for integration tests.
//!
//! Every output shares one call log, so tests can assert on the full
//! command history across all pins without touching real GPIO registers.

use std::cell::RefCell;
use std::rc::Rc;

use mybuttons::app::device::BoardOutputs;
use mybuttons::app::display::DisplayOutputs;
use mybuttons::app::ports::BinaryOutput;
use mybuttons::pins;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    Initiate(u8),
    Disable(u8),
    On(u8),
    Off(u8),
}

impl OutputCall {
    pub fn pin(self) -> u8 {
        match self {
            Self::Initiate(p) | Self::Disable(p) | Self::On(p) | Self::Off(p) => p,
        }
    }
}

pub type CallLog = Rc<RefCell<Vec<OutputCall>>>;

// ── RecordingOutput ───────────────────────────────────────────

pub struct RecordingOutput {
    pin: u8,
    log: CallLog,
}

impl RecordingOutput {
    pub fn new(pin: u8, log: &CallLog) -> Self {
        Self { pin, log: Rc::clone(log) }
    }
}

impl BinaryOutput for RecordingOutput {
    fn initiate(&mut self) {
        self.log.borrow_mut().push(OutputCall::Initiate(self.pin));
    }

    fn disable(&mut self) {
        self.log.borrow_mut().push(OutputCall::Disable(self.pin));
    }

    fn set_on(&mut self) {
        self.log.borrow_mut().push(OutputCall::On(self.pin));
    }

    fn set_off(&mut self) {
        self.log.borrow_mut().push(OutputCall::Off(self.pin));
    }
}

// ── MockBoard ─────────────────────────────────────────────────

/// Shared call log plus helpers to read back pin levels.
pub struct MockBoard {
    pub log: CallLog,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self { log: Rc::new(RefCell::new(Vec::new())) }
    }

    /// Outputs for every board pin, all recording into this board's log.
    pub fn outputs(&self) -> BoardOutputs<RecordingOutput> {
        let out = |pin: u8| RecordingOutput::new(pin, &self.log);
        BoardOutputs {
            display: DisplayOutputs {
                lhs: pins::LHS_LED_GPIOS.map(out),
                rhs: pins::RHS_LED_GPIOS.map(out),
                result: pins::RESULT_LED_GPIOS.map(out),
                operator: pins::OPERATOR_LED_GPIOS.map(out),
            },
            wake_tx: out(pins::WAKE_TX_GPIO),
        }
    }

    pub fn calls(&self) -> Vec<OutputCall> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Last level driven on `pin`; low if never driven.
    pub fn level(&self, pin: u8) -> bool {
        self.log
            .borrow()
            .iter()
            .rev()
            .find_map(|c| match *c {
                OutputCall::On(p) if p == pin => Some(true),
                OutputCall::Off(p) if p == pin => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Value shown on a bank, least significant pin first.
    pub fn bank(&self, bank: &[u8]) -> u8 {
        bank.iter()
            .enumerate()
            .fold(0, |acc, (i, &pin)| acc | (u8::from(self.level(pin)) << i))
    }

    pub fn count(&self, call: OutputCall) -> usize {
        self.log.borrow().iter().filter(|&&c| c == call).count()
    }
}
