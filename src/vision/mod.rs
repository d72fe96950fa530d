//! Vision-language module.
//!
//! * [`VisionAnalyzer`]: async trait implemented by multimodal backends.
//! * [`GroqVisionClient`]: OpenAI-compatible chat-completions client that
//!   sends one user message with a text part and an inline image part.
//! * [`DOCTOR_PERSONA`] / [`build_query`]: the fixed persona prompt and the
//!   query assembly rule.
//! * [`VisionError`]: error variants for analysis calls.

pub mod client;
pub mod prompt;

pub use client::{GroqVisionClient, VisionAnalyzer, VisionError};
pub use prompt::{build_query, DOCTOR_PERSONA};
