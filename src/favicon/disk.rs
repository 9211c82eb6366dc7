//! On-disk favicon tier
//!
//! One PNG file per host, named after the signed 32-bit string hash of the
//! host. There is no index: a file's presence is the cache entry. Writes are
//! not coordinated, so two stores for the same host race and the last writer
//! wins.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bitmap::{Bitmap, BitmapFormat};
use crate::utils::Result;

/// Java-compatible `String.hashCode` over UTF-16 code units
pub fn string_hash(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Disk I/O counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskStats {
    /// Files opened for reading
    pub reads: u64,
    /// Files successfully written
    pub writes: u64,
}

#[derive(Debug)]
pub struct DiskCache {
    dir: PathBuf,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    /// File that holds the favicon for `host`
    pub fn path_for_host(&self, host: &str) -> PathBuf {
        self.dir.join(format!(
            "{}.{}",
            string_hash(host),
            BitmapFormat::Png.extension()
        ))
    }

    /// Read and decode the favicon for `host`. `Ok(None)` if no file exists.
    pub fn read(&self, host: &str) -> Result<Option<Bitmap>> {
        let path = self.path_for_host(host);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(Some(Bitmap::decode(&bytes)?))
    }

    /// Write an already encoded PNG for `host`, replacing any previous file
    pub fn write_encoded(&self, host: &str, png: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for_host(host);
        fs::write(&path, png)?;
        self.writes.fetch_add(1, Ordering::Relaxed);
        log::debug!("Wrote {} byte favicon for {} to {}", png.len(), host, path.display());
        Ok(path)
    }

    /// Encode `bitmap` as PNG and write it for `host`
    pub fn write(&self, host: &str, bitmap: &Bitmap) -> Result<PathBuf> {
        let png = bitmap.encode(BitmapFormat::Png)?;
        self.write_encoded(host, &png)
    }

    pub fn stats(&self) -> DiskStats {
        DiskStats {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_string_hash_matches_java() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("abc"), 96354);
        // Overflows i32 and wraps negative
        assert_eq!(string_hash("example.com"), -1_944_013_059);
    }

    #[test]
    fn test_path_uses_host_hash() {
        let disk = DiskCache::new("/cache");
        assert_eq!(disk.path_for_host("abc"), PathBuf::from("/cache/96354.png"));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let disk = DiskCache::new(dir.path());
        assert!(disk.read("nothing.here").unwrap().is_none());
        assert_eq!(disk.stats().reads, 0);
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let disk = DiskCache::new(dir.path().join("nested"));
        let bmp = Bitmap::solid(3, 5, [10, 20, 30, 255]);

        let path = disk.write("example.org", &bmp).unwrap();
        assert!(path.exists());
        assert_eq!(disk.read("example.org").unwrap(), Some(bmp));
        assert_eq!(disk.stats(), DiskStats { reads: 1, writes: 1 });
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let disk = DiskCache::new(dir.path());
        disk.write_encoded("bad.example", b"garbage").unwrap();
        assert!(disk.read("bad.example").is_err());
    }
}
