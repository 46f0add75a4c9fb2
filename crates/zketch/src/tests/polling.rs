use super::{open, setup};
use crate::event::{EventKind, KeyEventKind, MouseButton, MouseEventKind, WindowEventKind};
use crate::geometry::{Point, Size};
use crate::keyboard::KeyCode;
use crate::message::{codes, make_param, NativeMessage, WindowHandle};
use approx::assert_relative_eq;

#[test]
fn test_posted_messages_keep_arrival_order() {
    let (app, host) = setup();
    let window = open(&app, "order");
    let handle = window.handle();

    host.post_message(NativeMessage::new(handle, codes::WM_KEYDOWN, 0x41, 0));
    host.post_message(NativeMessage::new(handle, codes::WM_CLOSE, 0, 0));
    host.post_message(NativeMessage::new(handle, codes::WM_LBUTTONUP, 0, make_param(3, 4)));

    let key = app.poll_event().expect("key event");
    assert_eq!(
        key.key_data().map(|k| (k.kind(), k.code())),
        Some((KeyEventKind::Down, KeyCode::A))
    );
    assert_eq!(host.pending_messages(), 0);

    // The translator and the dispatch callback both report the close request.
    for _ in 0..2 {
        let close = app.poll_event().expect("close event");
        assert_eq!(close.window_data().map(|w| w.kind()), Some(WindowEventKind::Close));
        assert_eq!(close.handle(), handle);
    }

    let up = app.poll_event().expect("mouse event");
    let data = up.mouse_data().expect("mouse payload");
    assert_eq!(data.kind(), MouseEventKind::Up);
    assert_eq!(data.button(), MouseButton::Left);
    assert_eq!(data.position(), Point::new(3, 4));

    assert_eq!(app.poll_event(), None);
    // Close is handled by the application, so the window survives it.
    assert!(host.is_live(handle));
    assert!(window.is_valid());
}

#[test]
fn test_queued_events_are_served_before_pumping() {
    let (app, host) = setup();
    let window = open(&app, "tiers");

    host.post_message(NativeMessage::new(window.handle(), codes::WM_KEYUP, 0x1B, 0));
    app.push_event(crate::event::Event::default());

    assert_eq!(app.poll_event().map(|e| e.kind()), Some(EventKind::None));
    assert_eq!(host.pending_messages(), 1);
    assert_eq!(
        app.poll_event().and_then(|e| e.key_data().map(|k| k.code())),
        Some(KeyCode::Escape)
    );
}

#[test]
fn test_sent_resize_reaches_queue() {
    let (app, host) = setup();
    let window = open(&app, "resize");

    host.resize(window.handle(), Size::new(1024, 768));
    assert_eq!(host.pending_messages(), 0);

    let event = app.peek_event().expect("resize queued by the callback");
    let data = event.window_data().expect("window payload");
    assert_eq!(data.kind(), WindowEventKind::Resize);
    assert_eq!(data.size(), Size::new(1024, 768));
    assert_eq!(window.client_bound().map(|r| (r.width(), r.height())), Some((1024, 768)));
}

#[test]
fn test_unrecognized_messages_are_dispatched_but_not_queued() {
    let (app, host) = setup();
    let window = open(&app, "ignored");

    host.post_message(NativeMessage::new(window.handle(), 0x000F, 0, 0));
    assert_eq!(app.poll_event(), None);
    assert_eq!(host.default_processed().last().map(|m| m.code), Some(0x000F));
}

#[test]
fn test_events_iterator_drains_everything() {
    let (app, host) = setup();
    let window = open(&app, "iterator");
    let handle = window.handle();

    host.post_message(NativeMessage::new(handle, codes::WM_MOUSEMOVE, 0, make_param(7, 9)));
    let wheel_param = (-120i16 as u16 as usize) << 16;
    host.post_message(NativeMessage::new(handle, codes::WM_MOUSEWHEEL, wheel_param, 0));
    host.post_message(NativeMessage::new(WindowHandle::NULL, 0x0113, 0, 0));

    let events: Vec<_> = app.events().collect();
    assert_eq!(events.len(), 2);

    let wheel = events[1].mouse_data().expect("wheel payload");
    assert_eq!(wheel.kind(), MouseEventKind::Wheel);
    assert_relative_eq!(wheel.wheel_delta(), -120.0);
    assert_eq!(wheel.position(), Point::new(0, 0));
}

#[test]
fn test_clear_drops_pending_events() {
    let (app, host) = setup();
    let window = open(&app, "clear");

    host.resize(window.handle(), Size::new(10, 10));
    host.resize(window.handle(), Size::new(20, 20));
    app.clear_event();

    assert_eq!(app.peek_event(), None);
    assert_eq!(app.poll_event(), None);
}
