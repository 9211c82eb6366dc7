//! Two-tier favicon cache
//!
//! Lookups try memory, then disk (promoting hits into memory), and finally
//! fall back to a generated placeholder. Stores write through to disk only.
//! Nothing here surfaces an error to the caller; the outcome types record
//! which path was taken instead.

use std::path::PathBuf;
use std::sync::Arc;

use super::config::FaviconConfig;
use super::default_icon::{self, DefaultIcon};
use super::disk::{DiskCache, DiskStats};
use super::memory::{MemoryCache, MemoryStats};
use crate::bitmap::{Bitmap, BitmapFormat};
use crate::network::{UrlParser, UrlValidator};
use crate::utils::FavicacheError;

/// Which tier served a cached favicon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTier {
    Memory,
    Disk,
}

/// Result of a favicon lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// A stored favicon was found
    Found { bitmap: Bitmap, tier: CacheTier },
    /// Nothing cached; a placeholder was generated
    Defaulted(DefaultIcon),
}

impl LookupOutcome {
    pub fn bitmap(&self) -> &Bitmap {
        match self {
            Self::Found { bitmap, .. } => bitmap,
            Self::Defaulted(icon) => &icon.bitmap,
        }
    }

    pub fn into_bitmap(self) -> Bitmap {
        match self {
            Self::Found { bitmap, .. } => bitmap,
            Self::Defaulted(icon) => icon.bitmap,
        }
    }

    pub fn tier(&self) -> Option<CacheTier> {
        match self {
            Self::Found { tier, .. } => Some(*tier),
            Self::Defaulted(_) => None,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// Why a store had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InvalidUrl,
    EncodeFailed,
    WriteFailed,
    TaskFailed,
}

/// Result of storing a favicon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Favicon written to the given file
    Persisted(PathBuf),
    Skipped(SkipReason),
}

impl StoreOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }
}

struct Shared {
    memory: MemoryCache<String, Bitmap>,
    disk: DiskCache,
    validator: Box<dyn UrlValidator>,
    icon_size: u32,
}

/// Favicon cache handle
///
/// Cloning is cheap and every clone shares the same tiers.
#[derive(Clone)]
pub struct FaviconCache {
    shared: Arc<Shared>,
}

impl FaviconCache {
    /// Create a cache using the `url` crate for validation
    pub fn new(config: FaviconConfig) -> Self {
        Self::with_validator(config, UrlParser)
    }

    /// Create a cache with a custom URL validator
    pub fn with_validator(config: FaviconConfig, validator: impl UrlValidator + 'static) -> Self {
        let memory = MemoryCache::new(config.memory_budget_bytes).with_eviction_callback(Box::new(
            |url: &String, bitmap: &Bitmap| {
                log::debug!("Evicted {} byte favicon for {}", bitmap.byte_size(), url);
            },
        ));
        Self::from_parts(config, memory, validator)
    }

    /// Create a cache around an already configured memory tier
    pub fn from_parts(
        config: FaviconConfig,
        memory: MemoryCache<String, Bitmap>,
        validator: impl UrlValidator + 'static,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                memory,
                disk: DiskCache::new(config.cache_dir),
                validator: Box::new(validator),
                icon_size: config.icon_size,
            }),
        }
    }

    /// Look up the favicon for `url`, falling back to a placeholder for `title`
    pub async fn lookup(&self, url: &str, title: Option<&str>) -> LookupOutcome {
        let cache = self.clone();
        let url_owned = url.to_string();
        let title_owned = title.map(str::to_string);
        let task = tokio::task::spawn_blocking(move || {
            cache.lookup_blocking(&url_owned, title_owned.as_deref())
        });
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Favicon lookup for {} failed: {}", url, FavicacheError::from(e));
                LookupOutcome::Defaulted(self.default_icon(title))
            }
        }
    }

    /// Look up several favicons concurrently; results keep request order
    pub async fn lookup_all(&self, requests: &[(&str, Option<&str>)]) -> Vec<LookupOutcome> {
        let futures: Vec<_> = requests
            .iter()
            .map(|(url, title)| self.lookup(url, *title))
            .collect();
        futures::future::join_all(futures).await
    }

    /// Synchronous lookup; performs blocking disk I/O
    pub fn lookup_blocking(&self, url: &str, title: Option<&str>) -> LookupOutcome {
        let Some(uri) = self.shared.validator.validate(url) else {
            log::debug!("Invalid favicon URL {:?}, using default icon", url);
            return LookupOutcome::Defaulted(self.default_icon(title));
        };

        let key = url.to_string();
        if let Some(bitmap) = self.shared.memory.get(&key) {
            log::debug!("Favicon memory hit for {}", url);
            return LookupOutcome::Found {
                bitmap,
                tier: CacheTier::Memory,
            };
        }

        match self.shared.disk.read(&uri.host) {
            Ok(Some(bitmap)) => {
                log::debug!("Favicon disk hit for {} ({})", url, uri.host);
                self.shared.memory.insert(key, bitmap.clone());
                return LookupOutcome::Found {
                    bitmap,
                    tier: CacheTier::Disk,
                };
            }
            Ok(None) => log::debug!("No cached favicon for {}", uri.host),
            Err(e) => log::warn!("Unreadable favicon for {}: {}", uri.host, e),
        }

        LookupOutcome::Defaulted(self.default_icon(title))
    }

    /// Persist `bitmap` as the favicon for the host of `url`
    pub async fn store(&self, bitmap: Bitmap, url: &str) -> StoreOutcome {
        let cache = self.clone();
        let url_owned = url.to_string();
        let task = tokio::task::spawn_blocking(move || cache.store_blocking(&bitmap, &url_owned));
        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Favicon store for {} failed: {}", url, FavicacheError::from(e));
                StoreOutcome::Skipped(SkipReason::TaskFailed)
            }
        }
    }

    /// Synchronous store; performs blocking disk I/O.
    ///
    /// The memory tier is left untouched, so the next lookup reads the new
    /// file through from disk.
    pub fn store_blocking(&self, bitmap: &Bitmap, url: &str) -> StoreOutcome {
        let Some(uri) = self.shared.validator.validate(url) else {
            return StoreOutcome::Skipped(SkipReason::InvalidUrl);
        };

        let png = match bitmap.encode(BitmapFormat::Png) {
            Ok(png) => png,
            Err(e) => {
                log::warn!("Could not encode favicon for {}: {}", uri.host, e);
                return StoreOutcome::Skipped(SkipReason::EncodeFailed);
            }
        };

        match self.shared.disk.write_encoded(&uri.host, &png) {
            Ok(path) => StoreOutcome::Persisted(path),
            Err(e) => {
                log::warn!("Could not write favicon for {}: {}", uri.host, e);
                StoreOutcome::Skipped(SkipReason::WriteFailed)
            }
        }
    }

    /// Placeholder icon for `title` at the configured size
    pub fn default_icon(&self, title: Option<&str>) -> DefaultIcon {
        default_icon::render(title, self.shared.icon_size)
    }

    /// Disk file backing `url`, if the URL is valid
    pub fn disk_path_for(&self, url: &str) -> Option<PathBuf> {
        let uri = self.shared.validator.validate(url)?;
        Some(self.shared.disk.path_for_host(&uri.host))
    }

    pub fn memory_stats(&self) -> MemoryStats {
        self.shared.memory.stats()
    }

    pub fn disk_stats(&self) -> DiskStats {
        self.shared.disk.stats()
    }

    /// Drop every in-memory entry; disk files are kept
    pub fn clear_memory(&self) {
        self.shared.memory.clear();
    }
}
