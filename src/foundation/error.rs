/// Convenience result type used across greetcard.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by codec, editor and presentation APIs.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Malformed or unreadable token, data URI or image.
    #[error("decode error: {0}")]
    Decode(String),

    /// The encoded share link exceeds the configured length budget.
    #[error("payload too large: share link is {len} characters, limit is {limit}")]
    PayloadTooLarge {
        /// Length of the rejected link in characters.
        len: usize,
        /// Configured maximum link length.
        limit: usize,
    },

    /// A raster surface could not be acquired for re-encoding.
    #[error("resource acquisition error: {0}")]
    ResourceAcquisition(String),

    /// Invalid user-provided options or card data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CardError::PayloadTooLarge`] value.
    pub fn payload_too_large(len: usize, limit: usize) -> Self {
        Self::PayloadTooLarge { len, limit }
    }

    /// Build a [`CardError::ResourceAcquisition`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::ResourceAcquisition(msg.into())
    }

    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the error should be shown to the user as a blocking notice with a retry hint
    /// (fewer or smaller images) rather than a generic failure.
    pub fn is_size_related(&self) -> bool {
        matches!(self, Self::PayloadTooLarge { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
