use std::path::PathBuf;

use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use thiserror::Error;
use tokio::io::AsyncReadExt;

use super::models::AssetSource;

const LOCAL_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Asset request failed: {0}")]
    Status(String),

    #[error("Failed to read asset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ApiError>;

pub type AssetStream = BoxStream<'static, Result<Bytes>>;

/// Opens the asset as a byte stream. The content is never inspected.
#[derive(Clone, Default)]
pub struct AssetClient {
    http: Client,
}

impl AssetClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns (total_size, stream)
    pub async fn open(&self, source: &AssetSource) -> Result<(Option<u64>, AssetStream)> {
        match source {
            AssetSource::Remote(url) => self.open_remote(url.as_str()).await,
            AssetSource::Local(path) => open_local(path.clone()).await,
        }
    }

    async fn open_remote(&self, url: &str) -> Result<(Option<u64>, AssetStream)> {
        let response = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ApiError::Status(e.to_string()))?;

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(ApiError::RequestError);

        Ok((total_size, stream.boxed()))
    }
}

async fn open_local(path: PathBuf) -> Result<(Option<u64>, AssetStream)> {
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|source| ApiError::Read {
            path: path.clone(),
            source,
        })?;
    let total_size = file.metadata().await.ok().map(|m| m.len());

    let stream = futures::stream::unfold(Some((file, path)), |state| async move {
        let (mut file, path) = state?;
        let mut buf = BytesMut::with_capacity(LOCAL_CHUNK_SIZE);
        match file.read_buf(&mut buf).await {
            Ok(0) => None,
            Ok(_) => Some((Ok(buf.freeze()), Some((file, path)))),
            Err(source) => Some((Err(ApiError::Read { path, source }), None)),
        }
    });

    Ok((total_size, stream.boxed()))
}
