use std::fmt;

/// What the presenter asks the save capability to do: fetch `location` and
/// store it under `file_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub location: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Preparing,
    Downloading,
    Completed,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Spinner,
    Bounce,
    Check,
    Warning,
}

impl StatusIcon {
    pub fn glyph(self, frame: usize) -> &'static str {
        const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];
        match self {
            StatusIcon::Spinner => SPINNER[frame % SPINNER.len()],
            StatusIcon::Bounce => "⬇",
            StatusIcon::Check => "✔",
            StatusIcon::Warning => "⚠",
        }
    }

    /// Vertical offset in pixels for the given animation frame.
    pub fn lift(self, frame: usize) -> f32 {
        match self {
            StatusIcon::Bounce if frame % 2 == 1 => 6.0,
            _ => 0.0,
        }
    }

    /// Spinner and bounce need animation frames.
    pub fn is_animated(self) -> bool {
        matches!(self, StatusIcon::Spinner | StatusIcon::Bounce)
    }
}

impl DownloadStatus {
    pub fn icon(self) -> StatusIcon {
        match self {
            DownloadStatus::Preparing => StatusIcon::Spinner,
            DownloadStatus::Downloading => StatusIcon::Bounce,
            DownloadStatus::Completed => StatusIcon::Check,
            DownloadStatus::Error => StatusIcon::Warning,
        }
    }

    pub fn message(self, progress: u8) -> String {
        match self {
            DownloadStatus::Preparing => "Preparing your ACES Mobile App...".to_string(),
            DownloadStatus::Downloading => {
                format!("Downloading ACES Mobile App... {}%", progress)
            }
            DownloadStatus::Completed => "ACES Mobile App downloaded successfully!".to_string(),
            DownloadStatus::Error => "Download failed. Please try again.".to_string(),
        }
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DownloadStatus::Preparing => "preparing",
            DownloadStatus::Downloading => "downloading",
            DownloadStatus::Completed => "completed",
            DownloadStatus::Error => "error",
        };
        f.write_str(name)
    }
}
