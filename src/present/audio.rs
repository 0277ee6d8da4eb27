use crate::foundation::error::CardResult;

/// Playback target for the background track.
pub trait AudioSink {
    fn is_paused(&self) -> bool;
    /// Start playing `source`, optionally looping.
    fn play(&mut self, source: &str, looping: bool) -> CardResult<()>;
}

/// Sink that records play requests; for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Every accepted `(source, looping)` request, in order.
    pub plays: Vec<(String, bool)>,
    playing: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl AudioSink for RecordingSink {
    fn is_paused(&self) -> bool {
        !self.playing
    }

    fn play(&mut self, source: &str, looping: bool) -> CardResult<()> {
        self.plays.push((source.to_string(), looping));
        self.playing = true;
        Ok(())
    }
}

/// One-shot subscription that starts the background track on the first user click.
///
/// Playback may only begin after a user gesture, so the gate stays armed until the first click
/// on the viewing surface and then detaches itself for the rest of the session, whether or not a
/// track is present or playback succeeds.
#[derive(Debug)]
pub struct AudioGate {
    source: Option<String>,
    armed: bool,
}

impl AudioGate {
    pub fn new(source: Option<String>) -> Self {
        Self {
            source,
            armed: true,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Handle a click. Returns `true` if playback was started by this call.
    pub fn fire(&mut self, sink: &mut dyn AudioSink) -> bool {
        if !self.armed {
            return false;
        }
        self.armed = false;

        let Some(source) = self.source.as_deref() else {
            return false;
        };
        if !sink.is_paused() {
            return false;
        }
        match sink.play(source, true) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "background audio playback failed");
                false
            }
        }
    }

    /// Detach without playing.
    pub fn dispose(&mut self) {
        self.armed = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/audio.rs"]
mod tests;
