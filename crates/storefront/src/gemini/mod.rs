//! Google Gemini integration for catalog generation.
//!
//! # Features
//!
//! - Single-turn `generateContent` calls with structured JSON output
//! - API key sent as the `x-goog-api-key` header (never logged)
//! - Error bodies parsed into [`GeminiError::Api`]
//!
//! # Example
//!
//! ```rust,ignore
//! let client = GeminiClient::new(&config.gemini)?;
//! let text = client
//!     .generate_json("List three fruits", serde_json::json!({"type": "ARRAY"}))
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
