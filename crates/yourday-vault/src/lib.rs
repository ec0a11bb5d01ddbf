//! Publishing notes to an Obsidian vault through the Local REST API plugin.

pub mod client;

pub use client::VaultClient;
