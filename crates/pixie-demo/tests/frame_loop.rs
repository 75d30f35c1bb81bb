use pixie_demo::controller::{DISPLAY_TEXT, TEXT_ORIGIN, WINDOW_HEIGHT, WINDOW_WIDTH};
use pixie_demo::{FrameLoopController, KeyBindings};
use pixie_engine::core::{AppControl, Headless};
use pixie_engine::coords::Rect;
use pixie_engine::input::Key;
use pixie_engine::scene::DrawCmd;

fn arrows() -> Headless<FrameLoopController> {
    Headless::start(FrameLoopController::new(KeyBindings::arrows()))
}

fn wasd() -> Headless<FrameLoopController> {
    Headless::start(FrameLoopController::new(KeyBindings::wasd()))
}

fn pos(h: &Headless<FrameLoopController>) -> (f32, f32) {
    let p = h.app().player();
    (p.x, p.y)
}

// ── startup ───────────────────────────────────────────────────────────────

#[test]
fn initial_state() {
    let h = arrows();
    let p = h.app().player();
    assert_eq!((p.x, p.y), (100.0, 100.0));
    assert_eq!(p.s, 40.0);
    assert_eq!(p.v, 200.0);
    assert_eq!(h.app().window_size(), (800.0, 600.0));
    assert_eq!(h.app().display(), DISPLAY_TEXT);
}

#[test]
fn startup_configures_fixed_window() {
    let h = arrows();
    let cfg = h.config();
    assert_eq!(cfg.initial_size.width, WINDOW_WIDTH as f64);
    assert_eq!(cfg.initial_size.height, WINDOW_HEIGHT as f64);
    assert!(!cfg.resizable);
}

#[test]
fn display_text_contains_emoji() {
    assert!(DISPLAY_TEXT.chars().any(|c| (c as u32) > 0xFFFF));
}

// ── update ────────────────────────────────────────────────────────────────

#[test]
fn single_direction_movement() {
    let mut h = arrows();
    h.press(Key::ArrowRight);
    assert_eq!(h.step(0.1), AppControl::Continue);
    assert_eq!(pos(&h), (120.0, 100.0));
}

#[test]
fn diagonal_movement_is_unnormalized() {
    let mut h = arrows();
    h.press(Key::ArrowRight);
    h.press(Key::ArrowUp);
    h.step(0.1);
    assert_eq!(pos(&h), (120.0, 80.0));
}

#[test]
fn no_input_keeps_position() {
    let mut h = arrows();
    for dt in [0.0, 0.016, 0.1, 0.25, 3.0] {
        h.step(dt);
        assert_eq!(pos(&h), (100.0, 100.0));
    }
}

#[test]
fn unbound_keys_do_not_move() {
    let mut h = arrows();
    h.press(Key::W);
    h.press(Key::D);
    h.step(0.1);
    assert_eq!(pos(&h), (100.0, 100.0));
}

#[test]
fn position_is_unbounded() {
    let mut h = arrows();
    h.press(Key::ArrowLeft);
    for _ in 0..10 {
        h.step(0.1);
    }
    let (x, y) = pos(&h);
    assert!(x < 0.0, "x = {x}");
    assert_eq!(y, 100.0);
}

#[test]
fn position_can_exceed_window() {
    let mut h = arrows();
    h.press(Key::ArrowDown);
    for _ in 0..40 {
        h.step(0.1);
    }
    assert!(pos(&h).1 > WINDOW_HEIGHT);
}

#[test]
fn wasd_preset_moves_the_same_way() {
    let mut h = wasd();
    h.press(Key::D);
    h.press(Key::W);
    h.step(0.1);
    assert_eq!(pos(&h), (120.0, 80.0));

    h.release(Key::W);
    h.press(Key::S);
    h.press(Key::A);
    h.release(Key::D);
    h.step(0.1);
    assert_eq!(pos(&h), (100.0, 100.0));
}

#[test]
fn released_key_stops_movement() {
    let mut h = arrows();
    h.press(Key::ArrowDown);
    h.step(0.1);
    h.release(Key::ArrowDown);
    h.step(0.1);
    assert_eq!(pos(&h), (100.0, 120.0));
}

// ── draw ──────────────────────────────────────────────────────────────────

#[test]
fn draw_emits_text_then_square() {
    let mut h = arrows();
    h.press(Key::ArrowRight);
    h.step(0.1);

    let items = h.draw_list().items();
    assert_eq!(items.len(), 2);

    let DrawCmd::Text(text) = &items[0] else { panic!("expected text first") };
    assert_eq!(text.text, DISPLAY_TEXT);
    assert_eq!(text.origin, TEXT_ORIGIN);

    let DrawCmd::Rect(rect) = &items[1] else { panic!("expected rect second") };
    assert_eq!(rect.rect, Rect::new(120.0, 100.0, 40.0, 40.0));
}
