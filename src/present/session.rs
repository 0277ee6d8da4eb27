use crate::{
    foundation::{
        core::{MessageId, Millis, Point},
        error::CardResult,
    },
    present::{
        audio::{AudioGate, AudioSink},
        director::{AnimationDirector, DirectorEvent, DirectorOpts, EntityId},
    },
};

/// Center panel text before any message has been read.
pub const INITIAL_CENTER_TEXT: &str = "Click on the falling items to see your wishes!";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// A displayable message with a resolved, viewable image source.
pub struct PresentedMessage {
    pub id: MessageId,
    /// Local preview handle or embedded `data:` URI.
    pub image_url: String,
    pub text: String,
}

/// One viewing session: title, center panel, popup, falling items and background audio.
#[derive(Debug)]
pub struct Presentation {
    title: String,
    messages: Vec<PresentedMessage>,
    center_text: String,
    popup: Option<PresentedMessage>,
    director: AnimationDirector,
    audio: AudioGate,
}

impl Presentation {
    pub fn new(
        title: impl Into<String>,
        messages: Vec<PresentedMessage>,
        audio_source: Option<String>,
        opts: DirectorOpts,
    ) -> CardResult<Self> {
        let director = AnimationDirector::new(messages.len(), opts)?;
        Ok(Self {
            title: title.into(),
            messages,
            center_text: INITIAL_CENTER_TEXT.to_string(),
            popup: None,
            director,
            audio: AudioGate::new(audio_source),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[PresentedMessage] {
        &self.messages
    }

    pub fn center_text(&self) -> &str {
        &self.center_text
    }

    pub fn popup(&self) -> Option<&PresentedMessage> {
        self.popup.as_ref()
    }

    pub fn director(&self) -> &AnimationDirector {
        &self.director
    }

    pub fn audio(&self) -> &AudioGate {
        &self.audio
    }

    pub fn start(&mut self, now: Millis) {
        self.director.start(now);
    }

    /// Advance the presentation clock. Due reveals open the popup.
    pub fn tick(&mut self, now: Millis) -> Vec<DirectorEvent> {
        let events = self.director.tick(now);
        for event in &events {
            if let DirectorEvent::Revealed { message_index, .. } = event
                && let Some(msg) = self.messages.get(*message_index)
            {
                self.popup = Some(msg.clone());
            }
        }
        events
    }

    /// A click anywhere on the viewing surface.
    pub fn click_surface(&mut self, sink: &mut dyn AudioSink) {
        self.audio.fire(sink);
    }

    /// A click on a falling item. While the popup is open its overlay covers the items, so only
    /// the surface click registers.
    ///
    /// Returns the index of the message that will be revealed.
    pub fn click_item(
        &mut self,
        id: EntityId,
        at: Point,
        now: Millis,
        sink: &mut dyn AudioSink,
    ) -> Option<usize> {
        self.click_surface(sink);
        if self.popup.is_some() {
            return None;
        }
        self.director.click_item(id, at, now)
    }

    /// Dismiss the popup; its caption stays in the center panel.
    pub fn close_popup(&mut self) -> Option<PresentedMessage> {
        let closed = self.popup.take()?;
        self.center_text = closed.text.clone();
        Some(closed)
    }

    /// Tear down the viewing session.
    pub fn leave(&mut self) {
        self.director.stop();
        self.audio.dispose();
        self.popup = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/session.rs"]
mod tests;
