//! Page assets: scanned page images and recitation audio.
//!
//! Assets live in a flat directory keyed by page number:
//! - `{page}.jpg` for page images
//! - `{page}.ogg` for recitation audio
//!
//! There is no manifest; a file's existence is the only metadata. A missing
//! or unreadable file resolves to `None` and is never an error.

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

/// Pages with a scanned image.
pub const IMAGE_PAGES: RangeInclusive<u32> = 1..=620;

/// Pages with recitation audio. The audio set follows the standard 604-page
/// layout and is intentionally narrower than [`IMAGE_PAGES`].
pub const AUDIO_PAGES: RangeInclusive<u32> = 1..=604;

/// A page number that has been checked against a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(u32);

impl PageNumber {
    /// Accept `n` only if it lies inside `range`.
    pub fn within(n: u32, range: &RangeInclusive<u32>) -> Option<Self> {
        range.contains(&n).then_some(Self(n))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of page asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Audio,
}

impl AssetKind {
    pub fn extension(self) -> &'static str {
        match self {
            AssetKind::Image => "jpg",
            AssetKind::Audio => "ogg",
        }
    }

    /// Store key for a page, e.g. `45.jpg`.
    pub fn file_name(self, page: PageNumber) -> String {
        format!("{page}.{}", self.extension())
    }
}

/// Loaded asset content.
#[derive(Clone, PartialEq, Eq)]
pub struct Asset {
    pub kind: AssetKind,
    pub page: PageNumber,
    pub bytes: Vec<u8>,
}

impl Asset {
    pub fn file_name(&self) -> String {
        self.kind.file_name(self.page)
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asset")
            .field("kind", &self.kind)
            .field("page", &self.page)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Looks up page assets.
///
/// Implementations hold no shared mutable state; concurrent calls for
/// different pages never wait on each other.
#[async_trait]
pub trait AssetResolver: Send + Sync {
    /// Load the asset, or `None` when it is absent or unreadable.
    async fn resolve(&self, kind: AssetKind, page: PageNumber) -> Option<Asset>;
}

/// Directory-backed asset store.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path for a page asset.
    pub fn path_for(&self, kind: AssetKind, page: PageNumber) -> PathBuf {
        self.root.join(kind.file_name(page))
    }
}

#[async_trait]
impl AssetResolver for FsAssetStore {
    async fn resolve(&self, kind: AssetKind, page: PageNumber) -> Option<Asset> {
        let path = self.path_for(kind, page);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Some(Asset { kind, page, bytes }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Asset not found");
                None
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Asset unreadable, treating as absent");
                None
            }
        }
    }
}

/// In-memory asset store, filled once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    assets: HashMap<(AssetKind, u32), Vec<u8>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset. Page numbers are stored unchecked so that tests can
    /// plant files outside the served ranges.
    pub fn with(mut self, kind: AssetKind, page: u32, bytes: impl Into<Vec<u8>>) -> Self {
        self.assets.insert((kind, page), bytes.into());
        self
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[async_trait]
impl AssetResolver for MemoryAssetStore {
    async fn resolve(&self, kind: AssetKind, page: PageNumber) -> Option<Asset> {
        self.assets.get(&(kind, page.get())).map(|bytes| Asset {
            kind,
            page,
            bytes: bytes.clone(),
        })
    }
}
