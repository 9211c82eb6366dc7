//! Network-facing collaborators for the favicon cache
//!
//! URL validation decides which requests may reach the disk tier; the
//! connectivity observable tells callers whether a network fetch is worth
//! attempting before falling back to the cache.

mod connectivity;
mod uri;

pub use connectivity::{ConnectivityMonitor, ConnectivitySource};
pub use uri::{UrlParser, UrlValidator, ValidUri};

#[cfg(test)]
pub use uri::MockUrlValidator;
