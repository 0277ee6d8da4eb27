use std::{path::Path, sync::Arc};

use crate::foundation::{
    core::MessageId,
    error::{CardError, CardResult},
};

/// Maximum number of image+caption messages on a card.
pub const MAX_MESSAGES: usize = 5;

/// Title a fresh card starts with.
pub const DEFAULT_TITLE: &str = "Chúc mừng ngày 20/10";

#[derive(Clone, Debug, PartialEq, Eq)]
/// An image file picked by the user. Never serialized; only its re-encoded form is shared.
pub struct LocalImage {
    /// Original file name, for display only.
    pub file_name: String,
    /// Raw file bytes in whatever format the user supplied.
    pub bytes: Arc<Vec<u8>>,
}

impl LocalImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: Arc::new(bytes),
        }
    }

    /// Read an image file from disk. Read failures are decode errors.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| CardError::decode(format!("read image '{}': {e}", path.display())))?;
        Ok(Self::new(file_name_of(path), bytes))
    }

    /// Media type sniffed from the file content.
    pub fn mime(&self) -> &'static str {
        image::guess_format(&self.bytes)
            .map(|f| f.to_mime_type())
            .unwrap_or("application/octet-stream")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Optional looping background music for the presentation.
pub struct AudioTrack {
    /// Original file name.
    pub file_name: String,
    /// Raw audio bytes.
    pub bytes: Arc<Vec<u8>>,
}

impl AudioTrack {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: Arc::new(bytes),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| CardError::decode(format!("read audio '{}': {e}", path.display())))?;
        Ok(Self::new(file_name_of(path), bytes))
    }

    /// Media type derived from the file extension.
    pub fn mime(&self) -> &'static str {
        let ext = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("mp3") => "audio/mpeg",
            Some("ogg" | "oga") => "audio/ogg",
            Some("wav") => "audio/wav",
            Some("m4a" | "aac") => "audio/mp4",
            Some("flac") => "audio/flac",
            Some("webm") => "audio/webm",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One image+caption slot of a card.
pub struct Message {
    /// Identifier, unique within the owning editor session.
    pub id: MessageId,
    /// Local image file, if the user picked one in this session.
    pub image: Option<LocalImage>,
    /// Already-resolved image source: a local preview handle, or the embedded data URI of a card
    /// loaded from a link.
    pub image_url: Option<String>,
    /// Caption revealed with the image.
    pub text: String,
}

impl Message {
    pub fn empty(id: MessageId) -> Self {
        Self {
            id,
            image: None,
            image_url: None,
            text: String::new(),
        }
    }

    pub fn has_image_source(&self) -> bool {
        self.image.is_some() || self.image_url.is_some()
    }

    /// A message is shown and shared only with an image source and a non-blank caption.
    pub fn is_displayable(&self) -> bool {
        self.has_image_source() && !self.text.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The full editable greeting composition.
pub struct Card {
    /// Headline shown in the center panel.
    pub title: String,
    /// Ordered messages, at most [`MAX_MESSAGES`].
    pub messages: Vec<Message>,
    /// Optional background music.
    pub audio: Option<AudioTrack>,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            messages: Vec::new(),
            audio: None,
        }
    }
}

impl Card {
    pub fn displayable(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_displayable())
    }

    pub fn has_displayable(&self) -> bool {
        self.displayable().next().is_some()
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub(crate) fn message_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/card/model.rs"]
mod tests;
