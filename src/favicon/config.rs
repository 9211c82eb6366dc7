//! Favicon cache configuration

use std::path::PathBuf;

/// Default in-memory budget: 1 MiB of decoded pixels
pub const DEFAULT_MEMORY_BUDGET: usize = 1024 * 1024;

/// Default edge length of generated placeholder icons, in pixels
pub const DEFAULT_ICON_SIZE: u32 = 64;

/// Favicon cache configuration
#[derive(Debug, Clone)]
pub struct FaviconConfig {
    /// Directory holding one `<hash>.png` per host
    pub cache_dir: PathBuf,
    /// Upper bound on decoded bytes kept in memory
    pub memory_budget_bytes: usize,
    /// Edge length of default icons
    pub icon_size: u32,
}

impl FaviconConfig {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_memory_budget(mut self, bytes: usize) -> Self {
        self.memory_budget_bytes = bytes;
        self
    }

    pub fn with_icon_size(mut self, size: u32) -> Self {
        self.icon_size = size.max(1);
        self
    }
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            cache_dir: std::env::temp_dir().join("favicache"),
            memory_budget_bytes: DEFAULT_MEMORY_BUDGET,
            icon_size: DEFAULT_ICON_SIZE,
        }
    }
}
