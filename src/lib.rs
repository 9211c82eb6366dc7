//! # favicache - Favicon caching for browser front-ends
//!
//! Supplies a bitmap for every (url, title) pair a tab strip or bookmark list
//! needs to draw, preferring a real favicon over a generated placeholder.
//!
//! ## Architecture
//!
//! - **favicon**: the two-tier cache (memory LRU + per-host PNG files) and
//!   the letter placeholder generator
//! - **bitmap**: opaque decoded image with encode/decode
//! - **network**: URL validation and connectivity observable
//! - **search**: built-in search engine descriptors
//! - **bookmarks**: bookmark import seam
//! - **utils**: Shared utilities and error types

pub mod bitmap;
pub mod bookmarks;
pub mod favicon;
pub mod network;
pub mod search;
pub mod utils;

// Re-export main types for convenience
pub use bitmap::{Bitmap, BitmapFormat};
pub use favicon::{FaviconCache, FaviconConfig, LookupOutcome, StoreOutcome};
pub use utils::error::{FavicacheError, Result};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "favicache";
