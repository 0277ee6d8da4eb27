use super::*;
use crate::{
    foundation::error::CardResult,
    present::{audio::RecordingSink, director::DirectorState},
};

fn presented(id: u64, text: &str) -> PresentedMessage {
    PresentedMessage {
        id: MessageId(id),
        image_url: format!("data:image/jpeg;base64,{id}"),
        text: text.to_string(),
    }
}

fn first_item(p: &mut Presentation, now: Millis) -> EntityId {
    p.tick(now);
    p.director()
        .falling_items()
        .find(|e| {
            matches!(
                e.kind,
                crate::present::director::EntityKind::FallingItem { clicked: false, .. }
            )
        })
        .map(|e| e.id)
        .unwrap()
}

fn session() -> CardResult<Presentation> {
    Presentation::new(
        "Happy Birthday",
        vec![presented(1, "Hi"), presented(2, "Bye")],
        Some("blob:greetcard/9".to_string()),
        DirectorOpts::default(),
    )
}

#[test]
fn reveal_popup_then_close_updates_center_text() {
    let mut p = session().unwrap();
    let mut sink = RecordingSink::new();
    assert_eq!(p.title(), "Happy Birthday");
    assert_eq!(p.center_text(), INITIAL_CENTER_TEXT);

    p.start(Millis(0));
    let item = first_item(&mut p, Millis(1_200));
    assert_eq!(p.click_item(item, Point::new(5.0, 5.0), Millis(1_300), &mut sink), Some(0));
    assert!(p.popup().is_none());
    p.tick(Millis(1_800));
    assert_eq!(p.popup().unwrap().text, "Hi");
    assert_eq!(p.popup().unwrap().image_url, "data:image/jpeg;base64,1");

    let closed = p.close_popup().unwrap();
    assert_eq!(closed.text, "Hi");
    assert_eq!(p.center_text(), "Hi");
    assert!(p.popup().is_none());
    assert!(p.close_popup().is_none());

    let item = first_item(&mut p, Millis(2_400));
    assert_eq!(p.click_item(item, Point::ZERO, Millis(2_500), &mut sink), Some(1));
    p.tick(Millis(3_000));
    assert_eq!(p.popup().unwrap().text, "Bye");
    p.close_popup();
    assert_eq!(p.center_text(), "Bye");
}

#[test]
fn first_click_unlocks_audio_once() {
    let mut p = session().unwrap();
    let mut sink = RecordingSink::new();
    p.click_surface(&mut sink);
    p.click_surface(&mut sink);
    assert_eq!(sink.plays, vec![("blob:greetcard/9".to_string(), true)]);
    assert!(!p.audio().is_armed());
}

#[test]
fn item_clicks_are_blocked_while_popup_is_open() {
    let mut p = session().unwrap();
    let mut sink = RecordingSink::new();
    p.start(Millis(0));
    let a = first_item(&mut p, Millis(1_200));
    p.click_item(a, Point::ZERO, Millis(1_200), &mut sink);
    p.tick(Millis(1_700));
    assert!(p.popup().is_some());

    let b = first_item(&mut p, Millis(2_400));
    assert_eq!(p.click_item(b, Point::ZERO, Millis(2_400), &mut sink), None);
    assert_eq!(p.director().cursor().peek(), 1);
}

#[test]
fn leave_tears_down() {
    let mut p = session().unwrap();
    p.start(Millis(0));
    p.tick(Millis(5_000));
    p.leave();
    assert_eq!(p.director().state(), DirectorState::Idle);
    assert!(p.director().entities().is_empty());
    assert!(!p.audio().is_armed());
}
