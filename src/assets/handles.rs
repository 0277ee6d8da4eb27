use std::{collections::BTreeMap, sync::Arc};

/// Prefix of every handle string produced by [`LocalHandles`].
pub const HANDLE_PREFIX: &str = "blob:greetcard/";

#[derive(Clone, Debug)]
struct LocalBlob {
    mime: String,
    bytes: Arc<Vec<u8>>,
}

/// Registry of transient in-memory references backing preview image sources and the audio track.
///
/// Every handle created here must eventually be revoked; the owning editor session does so when a
/// message is removed, an image is replaced, or the session ends.
#[derive(Debug, Default)]
pub struct LocalHandles {
    next: u64,
    live: BTreeMap<String, LocalBlob>,
}

impl LocalHandles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` and return a fresh handle string.
    pub fn create(&mut self, bytes: Arc<Vec<u8>>, mime: impl Into<String>) -> String {
        let handle = format!("{HANDLE_PREFIX}{}", self.next);
        self.next += 1;
        self.live.insert(
            handle.clone(),
            LocalBlob {
                mime: mime.into(),
                bytes,
            },
        );
        tracing::trace!(%handle, live = self.live.len(), "created local handle");
        handle
    }

    /// Look up a live handle, returning its mime type and bytes.
    pub fn resolve(&self, handle: &str) -> Option<(&str, Arc<Vec<u8>>)> {
        self.live
            .get(handle)
            .map(|b| (b.mime.as_str(), Arc::clone(&b.bytes)))
    }

    /// Release a handle. Returns `false` if it was not live.
    pub fn revoke(&mut self, handle: &str) -> bool {
        let removed = self.live.remove(handle).is_some();
        if removed {
            tracing::trace!(%handle, live = self.live.len(), "revoked local handle");
        }
        removed
    }

    /// Release every live handle, returning how many were released.
    pub fn revoke_all(&mut self) -> usize {
        let n = self.live.len();
        self.live.clear();
        n
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_local(handle: &str) -> bool {
        handle.starts_with(HANDLE_PREFIX)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/handles.rs"]
mod tests;
