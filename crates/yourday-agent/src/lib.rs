//! Daily summary generation for YourDay.
//!
//! Builds the generation prompt from weather and news, invokes the hosted
//! model and publishes the result to the vault.

pub mod model;
pub mod prompt;
pub mod workflow;

pub use model::BedrockModel;
pub use prompt::build_summary_prompt;
pub use workflow::{
    summary_path, DailySummaryAgent, NewsSource, SummaryDocument, SummaryModel, VaultWriter,
    WeatherSource, NEWS_LIMIT, VAULT_FOLDER,
};
