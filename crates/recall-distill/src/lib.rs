//! # recall-distill
//!
//! Conversation distillation: collapses arbitrarily long message histories
//! into bounded [`ConversationSummary`] records.
//!
//! - **Strategy selection**: empty → fixed placeholder; short histories →
//!   single-pass; long histories → chunked map-reduce with a bounded chunk
//!   count
//! - **Chunking**: contiguous fixed-size slices in original order, capped
//!   so distillation cost stays bounded no matter the history length
//! - **Topic deduplication**: containment-chain filtering of the final
//!   topic list
//!
//! The generation collaborator is the only failure source here; its errors
//! surface as [`DistillError`] and callers retry later. Malformed
//! collaborator *output* never fails — it is defaulted locally.
//!
//! [`ConversationSummary`]: recall_core::ConversationSummary

#![deny(unsafe_code)]

pub mod chunker;
pub mod constants;
pub mod parse;
pub mod prompts;
pub mod snippets;
pub mod summarizer;
pub mod topics;
pub mod transcript;

pub use chunker::split_into_chunks;
pub use summarizer::{ChunkedSummarizer, DistillConfig, DistillError};
pub use topics::dedupe_topics;
