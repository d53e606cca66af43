//! Registry lifecycle with owned output pins as actions.

use mybuttons::error::Error;
use mybuttons::output_pin::OutputPinController;
use mybuttons::registry::{NoSleepWake, Registry, RegistryError};

use crate::mock_hw::{MockBoard, OutputCall, RecordingOutput};

type Led = OutputPinController<RecordingOutput>;

fn led_registry(board: &MockBoard) -> Registry<Led, 3> {
    let led = |pin| OutputPinController::new(RecordingOutput::new(pin, &board.log));
    Registry::builder()
        .bind(20, led(20))
        .and_then(|b| b.bind(21, led(21)))
        .and_then(|b| b.bind(22, led(22)))
        .expect("distinct pins")
        .build()
}

#[test]
fn trigger_toggles_bound_output() {
    let board = MockBoard::new();
    let mut reg = led_registry(&board);
    board.clear();

    assert!(reg.trigger_gpio(21, &mut ()));
    assert!(reg.trigger_gpio(21, &mut ()));
    assert!(!reg.trigger_gpio(23, &mut ()));
    assert_eq!(board.calls(), [OutputCall::On(21), OutputCall::Off(21)]);
}

#[test]
fn sleep_turns_lit_outputs_off_once() {
    let board = MockBoard::new();
    let mut reg = led_registry(&board);
    reg.trigger_gpio(20, &mut ());
    reg.trigger_gpio(22, &mut ());
    board.clear();

    reg.sleep(&mut ());
    reg.sleep(&mut ());
    assert_eq!(board.calls(), [OutputCall::Off(20), OutputCall::Off(22)]);

    board.clear();
    reg.wake(&mut ());
    assert!(board.calls().is_empty());
    assert!(!reg.is_sleeping());
}

#[test]
fn dropping_registry_releases_every_output() {
    let board = MockBoard::new();
    let mut reg = led_registry(&board);
    reg.trigger_gpio(21, &mut ());
    board.clear();

    drop(reg);
    assert_eq!(
        board.calls(),
        [
            OutputCall::Disable(20),
            OutputCall::Off(21),
            OutputCall::Disable(21),
            OutputCall::Disable(22),
        ]
    );
}

#[test]
fn on_success_runs_only_for_bound_pins() {
    fn count(n: &mut u32) {
        *n += 1;
    }
    let mut reg = Registry::<NoSleepWake<fn(&mut u32)>, 2>::builder()
        .bind(16, NoSleepWake(count as fn(&mut u32)))
        .expect("one binding")
        .build();

    let mut n = 0u32;
    let mut successes = 0;
    reg.trigger_gpio_then(16, &mut n, |_| successes += 1);
    reg.trigger_gpio_then(17, &mut n, |_| successes += 1);
    assert_eq!((n, successes), (1, 1));
}

#[test]
fn duplicate_binding_surfaces_as_firmware_error() {
    fn noop(_: &mut ()) {}
    let err = Registry::<NoSleepWake<fn(&mut ())>, 2>::builder()
        .bind(10, NoSleepWake(noop as fn(&mut ())))
        .and_then(|b| b.bind(10, NoSleepWake(noop as fn(&mut ()))))
        .map(|_| ())
        .map_err(Error::from);
    assert_eq!(err, Err(Error::Registry(RegistryError::DuplicatePin(10))));
    assert_eq!(
        err.unwrap_err().to_string(),
        "registry: pin 10 bound twice"
    );
}
