//! # recall-llm
//!
//! Generation collaborator boundary for the Recall memory engine.
//!
//! The engine talks to an LLM-like text completion service through exactly
//! one operation: [`GenerationProvider::complete`]. The same operation
//! serves chat replies, structured summarization calls, and fact
//! classification — the request carries an optional output schema when a
//! structured result is expected.
//!
//! Failures are a closed [`GenerationError`] kind enumeration. The engine
//! treats every kind uniformly as a failed call; the richer kinds exist so
//! the surrounding application can present them differently.

#![deny(unsafe_code)]

pub mod provider;

pub use provider::{Completion, CompletionRequest, GenerationError, GenerationProvider};
