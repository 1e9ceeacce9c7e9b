//! Gemini - Google Gemini API provider
//!
//! Talks to `generateContent` either on Google AI Studio (API key) or on a
//! Vertex AI regional endpoint (bearer token).

mod config;
mod convert;
mod provider;
mod schema;
mod security;
mod types;

#[cfg(test)]
mod tests;

pub use config::{GeminiAuth, GeminiConfig, DEFAULT_LOCATION, DEFAULT_MODEL, MODELS};
pub use provider::GeminiProvider;
