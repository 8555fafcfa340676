use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Prefix of every handle URL created by a [`BlobStore`].
pub const BLOB_SCHEME: &str = "blob:folio/";

/// Binary content registered under a handle URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    media_type: String,
    bytes: Arc<[u8]>,
}

impl Blob {
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A registry of ephemeral, revocable binary handles.
///
/// Each handle is a `blob:folio/<n>` URL that stays resolvable through
/// [`Self::get`] until it is [revoked](Self::revoke). Handles created while
/// inlining a chapter are owned by the resulting
/// [`InlinedChapter`](super::InlinedChapter), which revokes them on release.
///
/// A store is shared through an [`Arc`] and may be used from several
/// threads at once.
///
/// # Examples
/// ```
/// # use folio::inline::BlobStore;
/// let store = BlobStore::new();
/// let url = store.create(vec![1u8, 2, 3], "image/png");
///
/// assert!(url.starts_with("blob:folio/"));
/// assert_eq!("image/png", store.get(&url).unwrap().media_type());
///
/// assert!(store.revoke(&url));
/// assert!(store.get(&url).is_none());
/// assert!(store.is_empty());
/// ```
#[derive(Default)]
pub struct BlobStore {
    next_id: AtomicU64,
    blobs: Mutex<HashMap<String, Blob>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bytes` and returns the handle URL referring to them.
    pub fn create(&self, bytes: impl Into<Arc<[u8]>>, media_type: &str) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("{BLOB_SCHEME}{id}");
        let blob = Blob {
            media_type: media_type.to_owned(),
            bytes: bytes.into(),
        };

        self.lock().insert(url.clone(), blob);
        url
    }

    /// The content behind `url`, or [`None`] if unknown or revoked.
    pub fn get(&self, url: &str) -> Option<Blob> {
        self.lock().get(url).cloned()
    }

    /// Frees the handle at `url`.
    ///
    /// Returns `false` if the handle was unknown or already revoked.
    pub fn revoke(&self, url: &str) -> bool {
        self.lock().remove(url).is_some()
    }

    /// The number of outstanding handles.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Blob>> {
        // The map is never left partially updated
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for BlobStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStore")
            .field("outstanding", &self.len())
            .finish()
    }
}
