pub mod client;
pub mod models;

pub use client::AssetClient;
pub use models::AssetSource;
