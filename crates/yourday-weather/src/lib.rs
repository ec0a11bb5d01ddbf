//! Weather lookup for YourDay
//!
//! Resolves a place name through Open-Meteo geocoding and reads the current
//! conditions from the Open-Meteo forecast API.

pub mod geocode;
pub mod provider;
pub mod types;

pub use provider::WeatherProvider;
pub use types::*;
