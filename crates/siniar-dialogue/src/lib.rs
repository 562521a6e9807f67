//! Dialogue generation for the siniar pipeline.
//!
//! A fixed instructional prompt is sent to a generative text model, and the
//! model's free-text reply is coerced into a [`Dialogue`]. The reply is never
//! trusted to be pure JSON: the coercion step isolates the first
//! array-of-objects literal and parses only that.
//!
//! The model itself sits behind the [`TextGenerator`] trait so the coercion
//! and prompting logic can be exercised without a live service.
//!
//! [`Dialogue`]: siniar_types::Dialogue

pub mod coerce;
pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompt;

pub use coerce::{coerce_dialogue, locate_array};
pub use config::{GeminiConfig, SamplingParams};
pub use error::DialogueError;
pub use gemini::GeminiClient;
pub use generator::{DialogueGenerator, TextGenerator};
pub use prompt::PromptTemplate;
