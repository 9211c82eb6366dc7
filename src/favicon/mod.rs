//! Favicon caching
//!
//! Implements a two-tier favicon store:
//! - Byte-bounded LRU memory tier keyed by full URL
//! - One PNG file per host on disk
//! - Generated letter placeholders when nothing is cached

mod cache;
mod config;
mod default_icon;
mod disk;
mod glyphs;
mod memory;

pub use cache::{CacheTier, FaviconCache, LookupOutcome, SkipReason, StoreOutcome};
pub use config::{DEFAULT_ICON_SIZE, DEFAULT_MEMORY_BUDGET, FaviconConfig};
pub use default_icon::{
    DefaultIcon, FALLBACK_LETTER, first_letter, letter_color, render as render_default_icon,
};
pub use disk::{DiskCache, DiskStats, string_hash};
pub use memory::{EvictionCallback, MemoryCache, MemoryStats, Weighted};
