//! MyButtons firmware entry point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  GPIO ISR ──▶ EDGE_LATCH ──drain──▶ Device::handle_edge      │
//! │                                       │                      │
//! │                     Registry ─▶ CalcAction ─▶ LED banks      │
//! │                                                              │
//! │  SystemClock ──now──▶ Device::poll (flash, wake pulse)       │
//! │                                                              │
//! │  idle_budget ──▶ sleep ──▶ … ──▶ sleep_due ──▶ light sleep   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use mybuttons::adapters::time::SystemClock;
use mybuttons::app::device::{BoardOutputs, Device};
use mybuttons::app::display::DisplayOutputs;
use mybuttons::app::ports::Clock;
use mybuttons::config::DeviceConfig;
use mybuttons::drivers::gpio_output::GpioOutput;
use mybuttons::drivers::hw_init;
use mybuttons::events::EDGE_LATCH;
use mybuttons::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  MyButtons 3-bit calculator          ║");
    info!("╚══════════════════════════════════════╝");

    // ── 2. Outputs and calculator state ───────────────────────
    let clock = SystemClock::new();
    let config = DeviceConfig::default();
    let outputs = BoardOutputs {
        display: DisplayOutputs::board(),
        wake_tx: GpioOutput::new(pins::WAKE_TX_GPIO),
    };
    let mut device = Device::new(config, outputs, clock.now())?;

    // ── 3. Edge interrupts ────────────────────────────────────
    hw_init::install_isr_service()?;
    let mut armed = Ok(());
    device.for_each_input(|pin| {
        if armed.is_ok() {
            armed = hw_init::init_rising_input(pin).and_then(|()| hw_init::attach_edge_isr(pin));
        }
    });
    armed?;
    info!("Edge interrupts armed on {:?}", pins::INPUT_GPIOS);

    // ── 4. Run loop ───────────────────────────────────────────
    loop {
        device.wake(clock.now());

        loop {
            let now = clock.now();
            EDGE_LATCH.drain(|pin| {
                if !device.handle_edge(pin, now) {
                    warn!("Edge on unbound pin {}", pin);
                }
            });

            device.poll(now);
            if device.sleep_due(now) {
                break;
            }
            clock.sleep(device.idle_budget(now));
        }

        device.enter_sleep();
        if let Err(e) = hw_init::light_sleep_until_edge(&pins::INPUT_GPIOS) {
            warn!("Light sleep failed: {}", e);
            clock.sleep(device.config().input_poll());
        }
    }
}
