use std::fmt;
use std::path::PathBuf;

use url::Url;

/// Where the downloadable asset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Remote(Url),
    Local(PathBuf),
}

impl AssetSource {
    /// `http`/`https` URLs are fetched over the network; anything else is a
    /// filesystem path.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => AssetSource::Remote(url),
            _ => AssetSource::Local(PathBuf::from(location)),
        }
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetSource::Remote(url) => write!(f, "{}", url),
            AssetSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
