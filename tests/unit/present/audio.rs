use super::*;
use crate::foundation::error::CardError;

struct FailingSink;

impl AudioSink for FailingSink {
    fn is_paused(&self) -> bool {
        true
    }

    fn play(&mut self, _source: &str, _looping: bool) -> CardResult<()> {
        Err(CardError::validation("autoplay blocked"))
    }
}

#[test]
fn first_click_starts_looping_playback_once() {
    let mut gate = AudioGate::new(Some("blob:greetcard/3".to_string()));
    let mut sink = RecordingSink::new();

    assert!(gate.fire(&mut sink));
    assert!(!gate.is_armed());
    assert!(!gate.fire(&mut sink));
    assert_eq!(sink.plays, vec![("blob:greetcard/3".to_string(), true)]);
    assert!(sink.is_playing());
}

#[test]
fn gate_without_track_detaches_silently() {
    let mut gate = AudioGate::new(None);
    let mut sink = RecordingSink::new();
    assert!(!gate.fire(&mut sink));
    assert!(!gate.is_armed());
    assert!(sink.plays.is_empty());
}

#[test]
fn playback_failure_is_swallowed_and_detaches() {
    let mut gate = AudioGate::new(Some("x".to_string()));
    assert!(!gate.fire(&mut FailingSink));
    assert!(!gate.is_armed());
}

#[test]
fn disposed_gate_never_plays() {
    let mut gate = AudioGate::new(Some("x".to_string()));
    gate.dispose();
    let mut sink = RecordingSink::new();
    assert!(!gate.fire(&mut sink));
    assert!(sink.plays.is_empty());
}
