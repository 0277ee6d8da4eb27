pub(crate) mod data_uri;
pub(crate) mod handles;
pub(crate) mod image_codec;
