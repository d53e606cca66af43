//! End-to-end tests for `Device` against recording outputs.

use embassy_time::Instant;
use mybuttons::app::device::{Device, DeviceTimer};
use mybuttons::calculator::Operator;
use mybuttons::calculator::ui::UiState;
use mybuttons::config::DeviceConfig;
use mybuttons::pins;

use crate::mock_hw::{MockBoard, OutputCall, RecordingOutput};

// ── Helpers ───────────────────────────────────────────────────

fn ms(v: u64) -> Instant {
    Instant::from_millis(v)
}

fn us(v: u64) -> Instant {
    Instant::from_micros(v)
}

fn setup() -> (MockBoard, Device<RecordingOutput>) {
    let board = MockBoard::new();
    let device = Device::new(DeviceConfig::default(), board.outputs(), ms(0)).expect("default config builds");
    (board, device)
}

fn press(device: &mut Device<RecordingOutput>, pin: u8, at: Instant) {
    assert!(device.handle_edge(pin, at), "pin {pin} should be bound");
}

// ── Construction ──────────────────────────────────────────────

#[test]
fn boot_initiates_every_output_with_all_leds_dark() {
    let (board, device) = setup();
    let initiated = board.calls().iter().filter(|c| matches!(c, OutputCall::Initiate(_))).count();
    assert_eq!(initiated, 15);
    assert_eq!(board.count(OutputCall::On(pins::RESULT_LED_GPIOS[0])), 0);
    assert!(!device.is_sleeping());
}

// ── Calculator UI ─────────────────────────────────────────────

#[test]
fn ui_walkthrough_drives_led_banks() {
    let (board, mut device) = setup();

    press(&mut device, pins::BIT0_BUTTON_GPIO, ms(1));
    assert_eq!(board.bank(&pins::RHS_LED_GPIOS), 1);
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 1);

    press(&mut device, pins::ROTATE_BUTTON_GPIO, ms(2));
    assert_eq!(device.panel().ui.state(), UiState::OperandHi);
    assert_eq!(board.bank(&pins::LHS_LED_GPIOS), 1);
    assert_eq!(board.bank(&pins::RHS_LED_GPIOS), 0);

    press(&mut device, pins::BIT1_BUTTON_GPIO, ms(3));
    assert_eq!(board.bank(&pins::RHS_LED_GPIOS), 2);
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 3);

    press(&mut device, pins::ROTATE_BUTTON_GPIO, ms(4));
    assert_eq!(device.panel().ui.state(), UiState::OpSelect);

    press(&mut device, pins::BIT1_BUTTON_GPIO, ms(5));
    assert_eq!(device.panel().calc.current_operator(), Operator::Multiply);
    assert_eq!(board.bank(&pins::OPERATOR_LED_GPIOS), 2);
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 2);

    press(&mut device, pins::BIT0_BUTTON_GPIO, ms(6));
    assert_eq!(device.panel().calc.current_operator(), Operator::Divide);
    assert_eq!(board.bank(&pins::OPERATOR_LED_GPIOS), 3);
    // 1 / 2: quotient 0, remainder 1
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 1);
}

#[test]
fn divide_by_zero_flashes_result_until_computable() {
    let (board, mut device) = setup();
    press(&mut device, pins::ROTATE_BUTTON_GPIO, ms(0));
    press(&mut device, pins::ROTATE_BUTTON_GPIO, ms(0));
    press(&mut device, pins::BIT0_BUTTON_GPIO, ms(0));
    assert!(!device.timers().is_queued(DeviceTimer::NoResultFlash));
    press(&mut device, pins::BIT1_BUTTON_GPIO, ms(0));
    assert!(device.timers().is_queued(DeviceTimer::NoResultFlash));

    device.poll(ms(0));
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 0b11_1111);

    device.poll(ms(999));
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 0b11_1111);
    device.poll(ms(1000));
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 0);
    assert_eq!(device.timers().deadline(DeviceTimer::NoResultFlash), Some(ms(2000)));
    device.poll(ms(2000));
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 0b11_1111);

    // divide -> multiply: 0 * 0 has a result again
    press(&mut device, pins::BIT0_BUTTON_GPIO, ms(2500));
    assert!(!device.timers().is_queued(DeviceTimer::NoResultFlash));
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 0);
    device.poll(ms(3000));
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 0);
}

// ── Wake link ─────────────────────────────────────────────────

#[test]
fn wake_pulse_resets_after_pulse_width() {
    let (board, mut device) = setup();
    press(&mut device, pins::BIT0_BUTTON_GPIO, ms(5));
    assert!(board.level(pins::WAKE_TX_GPIO));

    device.poll(us(5_099));
    assert!(board.level(pins::WAKE_TX_GPIO));
    device.poll(us(5_100));
    assert!(!board.level(pins::WAKE_TX_GPIO));
    assert_eq!(device.poll(us(5_200)), None);
}

#[test]
fn repeated_press_extends_wake_pulse() {
    let (board, mut device) = setup();
    press(&mut device, pins::BIT0_BUTTON_GPIO, us(5_000));
    press(&mut device, pins::BIT1_BUTTON_GPIO, us(5_050));
    assert_eq!(device.timers().deadline(DeviceTimer::WakePulseReset), Some(us(5_150)));

    device.poll(us(5_100));
    assert!(board.level(pins::WAKE_TX_GPIO));
    device.poll(us(5_150));
    assert!(!board.level(pins::WAKE_TX_GPIO));
}

#[test]
fn wake_rx_prolongs_without_sending() {
    let (board, mut device) = setup();
    board.clear();
    assert!(device.handle_edge(pins::WAKE_RX_GPIO, ms(1_000)));
    assert_eq!(device.sleep_deadline(), ms(301_000));
    assert!(board.calls().is_empty());
}

#[test]
fn unbound_pin_is_ignored() {
    let (board, mut device) = setup();
    board.clear();
    assert!(!device.handle_edge(2, ms(1_000)));
    assert_eq!(device.sleep_deadline(), ms(300_000));
    assert!(board.calls().is_empty());
}

// ── Sleep / wake ──────────────────────────────────────────────

#[test]
fn sleep_blanks_and_wake_restores() {
    let (board, mut device) = setup();
    press(&mut device, pins::BIT0_BUTTON_GPIO, ms(0));
    press(&mut device, pins::BIT2_BUTTON_GPIO, ms(0));
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 5);

    assert!(!device.sleep_due(ms(299_999)));
    assert!(device.sleep_due(ms(300_000)));

    device.enter_sleep();
    assert!(device.is_sleeping());
    for bank in [&pins::RHS_LED_GPIOS[..], &pins::RESULT_LED_GPIOS[..], &pins::LHS_LED_GPIOS[..]] {
        assert_eq!(board.bank(bank), 0);
    }
    assert!(!board.level(pins::WAKE_TX_GPIO));
    assert_eq!(device.timers().pending(), 0);

    board.clear();
    device.enter_sleep();
    assert!(board.calls().is_empty(), "second sleep must be a no-op");

    device.wake(ms(400_000));
    assert!(!device.is_sleeping());
    assert_eq!(board.bank(&pins::RHS_LED_GPIOS), 5);
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 5);
    assert_eq!(device.sleep_deadline(), ms(700_000));
}

#[test]
fn edge_while_asleep_wakes_then_acts() {
    let (board, mut device) = setup();
    device.enter_sleep();

    press(&mut device, pins::BIT0_BUTTON_GPIO, ms(10));
    assert!(!device.is_sleeping());
    assert_eq!(board.bank(&pins::RHS_LED_GPIOS), 1);
    assert!(board.level(pins::WAKE_TX_GPIO));
}

#[test]
fn unbound_edge_while_asleep_stays_asleep() {
    let (board, mut device) = setup();
    press(&mut device, pins::BIT0_BUTTON_GPIO, ms(0));
    device.enter_sleep();
    board.clear();

    assert!(!device.handle_edge(2, ms(10)));
    assert!(device.is_sleeping());
    assert!(board.calls().is_empty());
    assert_eq!(device.sleep_deadline(), ms(300_000));
}

#[test]
fn wake_rx_while_asleep_wakes_without_pulse() {
    let (board, mut device) = setup();
    device.enter_sleep();

    assert!(device.handle_edge(pins::WAKE_RX_GPIO, ms(20)));
    assert!(!device.is_sleeping());
    assert!(!board.level(pins::WAKE_TX_GPIO));
    assert_eq!(device.sleep_deadline(), ms(300_020));
}

#[test]
fn flashing_resumes_after_wake() {
    let (board, mut device) = setup();
    press(&mut device, pins::ROTATE_BUTTON_GPIO, ms(0));
    press(&mut device, pins::ROTATE_BUTTON_GPIO, ms(0));
    press(&mut device, pins::BIT0_BUTTON_GPIO, ms(0));
    press(&mut device, pins::BIT1_BUTTON_GPIO, ms(0));

    device.enter_sleep();
    assert!(!device.timers().is_queued(DeviceTimer::NoResultFlash));

    device.wake(ms(10_000));
    assert_eq!(device.timers().deadline(DeviceTimer::NoResultFlash), Some(ms(10_000)));
    device.poll(ms(10_000));
    assert_eq!(board.bank(&pins::RESULT_LED_GPIOS), 0b11_1111);
}

// ── Teardown ──────────────────────────────────────────────────

#[test]
fn drop_turns_off_then_disables_every_output_once() {
    let (board, mut device) = setup();
    press(&mut device, pins::BIT0_BUTTON_GPIO, ms(0));
    drop(device);

    let calls = board.calls();
    let disabled = calls.iter().filter(|c| matches!(c, OutputCall::Disable(_))).count();
    assert_eq!(disabled, 15);

    for pin in [pins::RHS_LED_GPIOS[0], pins::RESULT_LED_GPIOS[0], pins::WAKE_TX_GPIO] {
        let tail: Vec<OutputCall> = calls.iter().copied().filter(|c| c.pin() == pin).collect();
        assert_eq!(tail[tail.len() - 2..], [OutputCall::Off(pin), OutputCall::Disable(pin)]);
        assert_eq!(board.count(OutputCall::Disable(pin)), 1);
    }
}
