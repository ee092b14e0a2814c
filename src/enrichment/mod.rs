//! AI-assisted metadata lookup and recommendation generation.
//!
//! Strictly best-effort: the gateway never writes to the catalog, and every
//! failure degrades to an absent or empty result. Nothing here retries
//! automatically; the UI asks the user to try again instead.

mod gemini;

pub use gemini::{EnrichmentError, GeminiClient};
