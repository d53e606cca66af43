//! Fuzz target: `Device` under arbitrary edge and clock sequences
//!
//! Each input byte pair is one step: a pin (any value, bound or not) and a
//! time advance.  The device must never panic, its operands must stay in
//! range, and an awake device must flash the result bank exactly while there
//! is no result.
//!
//! cargo fuzz run fuzz_button_sequence

#![no_main]

use embassy_time::{Duration, Instant};
use libfuzzer_sys::fuzz_target;
use mybuttons::app::device::{BoardOutputs, Device, DeviceTimer};
use mybuttons::app::display::DisplayOutputs;
use mybuttons::app::ports::BinaryOutput;
use mybuttons::config::DeviceConfig;

#[derive(Default)]
struct NullOutput;

impl BinaryOutput for NullOutput {
    fn initiate(&mut self) {}
    fn disable(&mut self) {}
    fn set_on(&mut self) {}
    fn set_off(&mut self) {}
}

fn outputs() -> BoardOutputs<NullOutput> {
    BoardOutputs {
        display: DisplayOutputs {
            lhs: Default::default(),
            rhs: Default::default(),
            result: Default::default(),
            operator: Default::default(),
        },
        wake_tx: NullOutput,
    }
}

fuzz_target!(|data: &[u8]| {
    let mut now = Instant::from_millis(0);
    let Ok(mut device) = Device::new(DeviceConfig::default(), outputs(), now) else {
        return;
    };

    for step in data.chunks_exact(2) {
        // 0..=255 s, so sleep timeouts are reachable
        now += Duration::from_millis(u64::from(step[1]) * 1_000 + u64::from(step[0] & 0x0f));
        device.poll(now);
        if device.sleep_due(now) {
            device.enter_sleep();
            assert_eq!(device.timers().pending(), 0);
        }
        device.handle_edge(step[0], now);

        let panel = device.panel();
        assert!(panel.calc.lhs() <= 7 && panel.calc.rhs() <= 7);
        if device.is_sleeping() {
            // Unbound pins leave a sleeping device alone.
            assert_eq!(device.timers().pending(), 0);
        } else {
            assert_eq!(
                device.timers().is_queued(DeviceTimer::NoResultFlash),
                !panel.calc.can_compute(),
            );
        }
    }
});
