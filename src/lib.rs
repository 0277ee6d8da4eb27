//! greetcard composes greeting cards and plays them back.
//!
//! A card is a title, up to five image+caption messages and an optional background track. It can
//! be shared as a single self-contained link (and a scannable code of that link); opening the link
//! reconstructs the card and starts an animated presentation in which falling items reveal the
//! messages one click at a time.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: [`Editor`] holds the card and the local preview handles of picked files.
//! 2. **Share**: [`Editor::share`] re-encodes images with [`encode_image`], projects the card to a
//!    [`SharedPayload`] and embeds its token in a link ([`ShareLink`]).
//! 3. **Load**: [`Editor::boot`] reads the `card` parameter of a location and opens the card in
//!    presentation mode, or falls back to a fresh card.
//! 4. **Present**: [`Editor::finalize`] yields a [`Presentation`], driven by
//!    [`Presentation::tick`] and click handlers. Visuals are a declarative list of [`Entity`]
//!    values that any rendering layer can draw.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No ambient state**: randomness, counters and the reveal cursor are owned by the session.
//! - **Caller-driven time**: the presentation never reads a clock; the caller passes [`Millis`].
#![forbid(unsafe_code)]

mod assets;
mod card;
mod config;
mod editor;
mod foundation;
mod present;

pub use assets::data_uri::{DataUri, decode_data_uri_image, format_data_uri, parse_data_uri};
pub use assets::handles::{HANDLE_PREFIX, LocalHandles};
pub use assets::image_codec::{
    ImageCodecOpts, MAX_SURFACE_PIXELS, encode_image, encode_image_file, fit_within,
};
pub use card::escape::{decode_uri_component, encode_uri_component};
pub use card::model::{AudioTrack, Card, DEFAULT_TITLE, LocalImage, MAX_MESSAGES, Message};
pub use card::payload::{SharedMessage, SharedPayload};
pub use card::share::{
    CARD_PARAM, ShareLink, ShareOpts, card_param, clear_card_param, encode_card, qr_request_url,
    render_qr_svg, share_url,
};
pub use config::GreetcardConfig;
pub use editor::state::{Editor, MessageUpdate, Mode};
pub use foundation::core::{IdAllocator, MessageId, Millis, Point, Vec2, Viewport};
pub use foundation::error::{CardError, CardResult};
pub use present::audio::{AudioGate, AudioSink, RecordingSink};
pub use present::decor::{HEART_GLYPHS, Icon};
pub use present::director::{
    AnimationDirector, DirectorEvent, DirectorOpts, DirectorState, Entity, EntityId, EntityKind,
    RevealCursor,
};
pub use present::session::{INITIAL_CENTER_TEXT, PresentedMessage, Presentation};
