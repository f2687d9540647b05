pub mod error;
pub mod model;
pub mod simulation;

pub use error::AppError;
pub use model::{DownloadStatus, SaveRequest};
pub use simulation::{IncrementSource, ProgressSimulation, RandomIncrements, TickOutcome};
