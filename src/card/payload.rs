use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::{
    assets::{handles::LocalHandles, image_codec::{ImageCodecOpts, encode_image}},
    card::{
        escape::{decode_uri_component, encode_uri_component},
        model::{Card, MAX_MESSAGES},
    },
    foundation::error::{CardError, CardResult},
};

/// Token alphabet matches the browser `btoa`/`atob` pair; decoding tolerates missing padding.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One shared image+caption pair.
pub struct SharedMessage {
    /// Caption text.
    pub text: String,
    /// Embedded image as a `data:` URI.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Serialization-safe projection of a [`Card`] carried inside a share link.
pub struct SharedPayload {
    /// Card title.
    pub title: String,
    /// Displayable messages in card order.
    pub messages: Vec<SharedMessage>,
}

impl SharedPayload {
    /// Project `card` to its shareable form.
    ///
    /// Non-displayable messages are dropped. Local image files are re-encoded through the image
    /// codec; messages already carrying an embedded image source keep it verbatim.
    #[tracing::instrument(skip(card), fields(messages = card.messages.len()))]
    pub fn from_card(card: &Card, opts: &ImageCodecOpts) -> CardResult<Self> {
        let mut messages = Vec::new();
        for msg in card.displayable() {
            let image_url = match (&msg.image, &msg.image_url) {
                (Some(local), _) => encode_image(&local.bytes, opts)?,
                (None, Some(url)) if !LocalHandles::is_local(url) => url.clone(),
                (None, _) => {
                    tracing::warn!(id = msg.id.0, "message has no shareable image source");
                    continue;
                }
            };
            messages.push(SharedMessage {
                text: msg.text.clone(),
                image_url,
            });
        }

        Ok(Self {
            title: card.title.clone(),
            messages,
        })
    }

    /// Check the invariants every decoded payload must satisfy.
    pub fn validate(&self) -> CardResult<()> {
        if self.title.is_empty() {
            return Err(CardError::decode("payload title is empty"));
        }
        if self.messages.len() > MAX_MESSAGES {
            return Err(CardError::decode(format!(
                "payload carries {} messages, at most {MAX_MESSAGES} are allowed",
                self.messages.len()
            )));
        }
        Ok(())
    }

    /// Serialize to a link-safe token: compact JSON, percent-escaped, then base64.
    pub fn encode_token(&self) -> CardResult<String> {
        let json = serde_json::to_string(self)
            .map_err(|e| CardError::validation(format!("serialize card payload: {e}")))?;
        Ok(TOKEN_ENGINE.encode(encode_uri_component(&json)))
    }

    /// Parse a token produced by [`SharedPayload::encode_token`] (or the browser equivalent).
    ///
    /// Spaces are read back as `+`, since form-style query decoding turns one into the other.
    #[tracing::instrument(skip(token), fields(token_len = token.len()))]
    pub fn decode_token(token: &str) -> CardResult<Self> {
        let normalized: String = token
            .trim()
            .chars()
            .map(|c| if c == ' ' { '+' } else { c })
            .collect();
        if normalized.is_empty() {
            return Err(CardError::decode("card token is empty"));
        }

        let escaped = TOKEN_ENGINE
            .decode(normalized.as_bytes())
            .map_err(|e| CardError::decode(format!("card token is not valid base64: {e}")))?;
        let escaped = String::from_utf8(escaped)
            .map_err(|_| CardError::decode("card token does not decode to text"))?;
        let json = decode_uri_component(&escaped)?;

        let payload: SharedPayload = serde_json::from_str(&json)
            .map_err(|e| CardError::decode(format!("card payload JSON is invalid: {e}")))?;
        payload.validate()?;
        Ok(payload)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/payload.rs"]
mod tests;
