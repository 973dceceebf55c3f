//! # recall-facts
//!
//! Fact gating, deduplication, and background extraction.
//!
//! - **Gate**: an ordered pipeline of labeled rejection rules that decides
//!   whether a user utterance is worth a classification call at all —
//!   questions, filler, commands, reactions, hypotheticals, and hearsay
//!   are filtered before any model call happens
//! - **Dedupe**: similarity check against the existing fact set (exact,
//!   containment, word-overlap)
//! - **Store**: serialized in-memory fact list; append + duplicate-check
//!   run under one write lock so late-resolving background extractions
//!   dedupe against the latest state
//! - **Extractor**: gate → classify → clamp/default → dedupe/store,
//!   fire-and-forget off the message-send path

#![deny(unsafe_code)]

pub mod dedupe;
pub mod extractor;
pub mod gate;
pub mod store;

pub use dedupe::{is_duplicate, is_near_match};
pub use extractor::{ExtractError, FactExtractor};
pub use gate::{FactGate, GateThresholds};
pub use store::FactStore;
