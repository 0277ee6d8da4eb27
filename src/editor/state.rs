use crate::{
    assets::{handles::LocalHandles, image_codec::ImageCodecOpts},
    card::{
        model::{AudioTrack, Card, LocalImage, MAX_MESSAGES, Message},
        payload::SharedPayload,
        share::{ShareLink, ShareOpts, card_param, encode_card},
    },
    foundation::{
        core::{IdAllocator, MessageId},
        error::CardResult,
    },
    present::{
        director::DirectorOpts,
        session::{PresentedMessage, Presentation},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Editing,
    Presenting,
}

/// A single-field edit of one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageUpdate {
    /// Replace (or clear) the picked image file.
    Image(Option<LocalImage>),
    /// Replace the caption.
    Text(String),
}

/// The single active editing session of a card.
///
/// Owns the card and every local preview handle created for it. Handles are released when their
/// message is removed, its image is replaced, or the session ends.
#[derive(Debug)]
pub struct Editor {
    card: Card,
    ids: IdAllocator,
    handles: LocalHandles,
    audio_handle: Option<String>,
    mode: Mode,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// A fresh editing session with the default title and no messages.
    pub fn new() -> Self {
        Self {
            card: Card::default(),
            ids: IdAllocator::starting_at(1),
            handles: LocalHandles::new(),
            audio_handle: None,
            mode: Mode::Editing,
        }
    }

    /// Start a session presenting a card loaded from a link. Messages get fresh ids and carry only
    /// their embedded image source.
    pub fn from_shared(payload: SharedPayload) -> Self {
        let mut editor = Self::new();
        editor.card.title = payload.title;
        for shared in payload.messages.into_iter().take(MAX_MESSAGES) {
            let id = editor.ids.next_id();
            editor.card.messages.push(Message {
                id,
                image: None,
                image_url: Some(shared.image_url),
                text: shared.text,
            });
        }
        editor.mode = Mode::Presenting;
        editor
    }

    /// Open the session for `location` (a URL or query string).
    ///
    /// A valid `card` parameter opens the card in presentation mode. A missing or undecodable one
    /// yields a fresh editing session; decode failures are logged, never surfaced.
    #[tracing::instrument(skip(location))]
    pub fn boot(location: &str) -> Self {
        let Some(token) = card_param(location) else {
            return Self::new();
        };
        match SharedPayload::decode_token(&token) {
            Ok(payload) => {
                tracing::info!(
                    messages = payload.messages.len(),
                    "loaded card from link"
                );
                Self::from_shared(payload)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load card from link; starting a fresh card");
                Self::new()
            }
        }
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn handles(&self) -> &LocalHandles {
        &self.handles
    }

    fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    /// Replace the title. Returns `false` (and changes nothing) while presenting.
    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.card.title = title.into();
        true
    }

    /// Replace the background track, releasing the previous track's handle. Returns `false` (and
    /// changes nothing) while presenting.
    pub fn set_audio(&mut self, audio: Option<AudioTrack>) -> bool {
        if !self.is_editing() {
            return false;
        }
        if let Some(handle) = self.audio_handle.take() {
            self.handles.revoke(&handle);
        }
        self.card.audio = audio;
        true
    }

    /// Append an empty message. Returns `None` once the card holds [`MAX_MESSAGES`], or while
    /// presenting.
    pub fn add_message(&mut self) -> Option<MessageId> {
        if !self.is_editing() || self.card.messages.len() >= MAX_MESSAGES {
            return None;
        }
        let id = self.ids.next_id();
        self.card.messages.push(Message::empty(id));
        Some(id)
    }

    /// Apply `update` to message `id`. Returns `false` if no such message exists or the card is
    /// being presented.
    pub fn update_message(&mut self, id: MessageId, update: MessageUpdate) -> bool {
        if !self.is_editing() {
            return false;
        }
        let Some(msg) = self.card.message_mut(id) else {
            return false;
        };
        match update {
            MessageUpdate::Text(text) => msg.text = text,
            MessageUpdate::Image(image) => {
                if let Some(old) = msg.image_url.take()
                    && LocalHandles::is_local(&old)
                {
                    self.handles.revoke(&old);
                }
                msg.image = image;
            }
        }
        true
    }

    /// Remove message `id`, releasing its preview handle. Returns `false` if absent or while
    /// presenting, since a live presentation may still show that handle.
    pub fn remove_message(&mut self, id: MessageId) -> bool {
        if !self.is_editing() {
            return false;
        }
        let Some(pos) = self.card.messages.iter().position(|m| m.id == id) else {
            return false;
        };
        let removed = self.card.messages.remove(pos);
        if let Some(url) = removed.image_url
            && LocalHandles::is_local(&url)
        {
            self.handles.revoke(&url);
        }
        true
    }

    /// Whether preview and share are available (at least one displayable message).
    pub fn can_share(&self) -> bool {
        self.card.has_displayable()
    }

    /// Resolve pending local images to preview handles and switch to presentation mode.
    ///
    /// Only handles are cached on the card; titles, captions and files are left untouched.
    pub fn finalize(&mut self, opts: DirectorOpts) -> CardResult<Presentation> {
        for msg in &mut self.card.messages {
            if msg.image_url.is_none()
                && let Some(image) = &msg.image
            {
                let handle = self.handles.create(image.bytes.clone(), image.mime());
                msg.image_url = Some(handle);
            }
        }
        if self.audio_handle.is_none()
            && let Some(audio) = &self.card.audio
        {
            self.audio_handle = Some(self.handles.create(audio.bytes.clone(), audio.mime()));
        }

        let messages: Vec<PresentedMessage> = self
            .card
            .displayable()
            .filter_map(|m| {
                m.image_url.as_ref().map(|url| PresentedMessage {
                    id: m.id,
                    image_url: url.clone(),
                    text: m.text.clone(),
                })
            })
            .collect();

        let presentation = Presentation::new(
            self.card.title.clone(),
            messages,
            self.audio_handle.clone(),
            opts,
        )?;
        self.mode = Mode::Presenting;
        Ok(presentation)
    }

    /// Encode the card into a share link. The editor is never modified, so the user can adjust
    /// the card and retry after an error.
    pub fn share(&self, codec: &ImageCodecOpts, share: &ShareOpts) -> CardResult<ShareLink> {
        encode_card(&self.card, codec, share)
    }

    /// Leave presentation mode. The caller is expected to drop the [`Presentation`] and clear the
    /// `card` parameter from its location (see [`crate::clear_card_param`]).
    pub fn back_to_editor(&mut self) {
        self.mode = Mode::Editing;
    }

    /// Release every outstanding local handle. Returns how many were released.
    pub fn end_session(&mut self) -> usize {
        self.audio_handle = None;
        for msg in &mut self.card.messages {
            if msg
                .image_url
                .as_deref()
                .is_some_and(LocalHandles::is_local)
            {
                msg.image_url = None;
            }
        }
        let released = self.handles.revoke_all();
        if released > 0 {
            tracing::debug!(released, "released local handles");
        }
        released
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        self.end_session();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/state.rs"]
mod tests;
