//! Top headlines from the GNews API.

pub mod client;
pub mod types;

pub use client::NewsClient;
pub use types::NewsArticle;
