use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    assets::image_codec::ImageCodecOpts,
    card::share::ShareOpts,
    foundation::error::{CardError, CardResult},
    present::director::DirectorOpts,
};

/// All tunables in one JSON document. Every section and field is optional and falls back to its
/// default.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GreetcardConfig {
    /// Image re-encoding for share links.
    pub image: ImageCodecOpts,
    /// Share link template and length budget.
    pub share: ShareOpts,
    /// Presentation timing and geometry.
    pub director: DirectorOpts,
}

impl GreetcardConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| CardError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open config JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> CardResult<()> {
        self.image.validate()?;
        self.director.validate()?;
        self.share.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
