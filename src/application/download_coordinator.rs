use std::path::PathBuf;

use futures::{stream::BoxStream, StreamExt};
use tokio::io::AsyncWriteExt;

use crate::{
    api::{client::AssetStream, AssetClient, AssetSource},
    domain::{AppError, SaveRequest},
};

#[derive(Debug, Clone)]
pub enum DownloadEvent {
    Started { path: PathBuf, total: Option<u64> },
    /// Bytes written so far.
    Transferred(u64),
    Completed(PathBuf),
    Failed(AppError),
}

/// Where saved assets end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDestination {
    /// Ask with the native save dialog.
    Prompt,
    Directory(PathBuf),
}

/// Fulfils "save resource R under suggested name N" requests.
#[derive(Clone)]
pub struct DownloadCoordinator {
    asset_client: AssetClient,
    destination: SaveDestination,
}

impl DownloadCoordinator {
    pub fn new(asset_client: AssetClient, destination: SaveDestination) -> Self {
        Self {
            asset_client,
            destination,
        }
    }

    pub async fn choose_save_path(&self, suggested_filename: String) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_file_name(&suggested_filename)
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    pub async fn resolve_destination(&self, file_name: &str) -> Result<PathBuf, AppError> {
        match &self.destination {
            SaveDestination::Directory(dir) => {
                tokio::fs::create_dir_all(dir).await.map_err(|e| {
                    AppError::Io(format!("Failed to create {}: {}", dir.display(), e))
                })?;
                Ok(dir.join(file_name))
            }
            SaveDestination::Prompt => self
                .choose_save_path(file_name.to_string())
                .await
                .ok_or(AppError::Cancelled),
        }
    }

    /// Resolves the destination and opens both ends of the transfer. The
    /// destination file is created only once the asset is readable.
    async fn begin(
        &self,
        request: &SaveRequest,
    ) -> Result<(PathBuf, Option<u64>, AssetStream, tokio::fs::File), AppError> {
        let path = self.resolve_destination(&request.file_name).await?;

        let source = AssetSource::parse(&request.location);
        let (total, stream) = self
            .asset_client
            .open(&source)
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        let file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

        Ok((path, total, stream, file))
    }

    pub fn download_stream(&self, request: SaveRequest) -> BoxStream<'static, DownloadEvent> {
        futures::stream::unfold(
            DownloadRuntimeState::Start {
                coordinator: self.clone(),
                request,
            },
            |state| async move {
                let (event, next) = match state {
                    DownloadRuntimeState::Start {
                        coordinator,
                        request,
                    } => match coordinator.begin(&request).await {
                        Ok((path, total, stream, file)) => (
                            DownloadEvent::Started {
                                path: path.clone(),
                                total,
                            },
                            DownloadRuntimeState::Downloading {
                                file,
                                stream,
                                written: 0,
                                path,
                            },
                        ),
                        Err(e) => failed(e),
                    },
                    DownloadRuntimeState::Downloading {
                        mut file,
                        mut stream,
                        written,
                        path,
                    } => match stream.next().await {
                        Some(Ok(chunk)) => match file.write_all(&chunk).await {
                            Ok(()) => {
                                let written = written + chunk.len() as u64;
                                (
                                    DownloadEvent::Transferred(written),
                                    DownloadRuntimeState::Downloading {
                                        file,
                                        stream,
                                        written,
                                        path,
                                    },
                                )
                            }
                            Err(e) => failed(AppError::Io(format!("Write error: {}", e))),
                        },
                        Some(Err(e)) => failed(AppError::Fetch(e.to_string())),
                        None => match file.sync_all().await {
                            Ok(()) => (
                                DownloadEvent::Completed(path),
                                DownloadRuntimeState::Finished,
                            ),
                            Err(e) => failed(AppError::Io(format!("Failed to sync file: {}", e))),
                        },
                    },
                    DownloadRuntimeState::Finished => return None,
                };
                Some((event, next))
            },
        )
        .boxed()
    }
}

fn failed(error: AppError) -> (DownloadEvent, DownloadRuntimeState) {
    (DownloadEvent::Failed(error), DownloadRuntimeState::Finished)
}

enum DownloadRuntimeState {
    Start {
        coordinator: DownloadCoordinator,
        request: SaveRequest,
    },
    Downloading {
        file: tokio::fs::File,
        stream: AssetStream,
        written: u64,
        path: PathBuf,
    },
    Finished,
}
