//! # recall-core
//!
//! Foundation types, branded IDs, and utilities for the Recall memory engine.
//!
//! This crate provides the shared vocabulary that all other Recall crates
//! depend on:
//!
//! - **Branded IDs**: `ConversationId`, `MessageId`, `FactId` as newtypes for
//!   type safety
//! - **Messages**: `Message` record with a `Sender` (user, agent, or named
//!   participant) and UTC timestamp
//! - **Facts**: durable user-scoped statements with category, confidence,
//!   provenance, and verification state
//! - **Summaries**: `ConversationSummary` produced by distillation, plus the
//!   stored `SummaryEntry` and `ConversationMeta` records
//! - **Storage boundary**: the read-only [`MemoryStore`] trait the engine
//!   consumes
//! - **Text utilities**: char-boundary-safe and word-capped truncation

#![deny(unsafe_code)]

pub mod fact;
pub mod ids;
pub mod logging;
pub mod message;
pub mod store;
pub mod summary;
pub mod text;

pub use fact::{Fact, FactCategory, FactProvenance};
pub use ids::{ConversationId, FactId, MessageId};
pub use message::{Message, Sender};
pub use store::{MemoryStore, StoreError};
pub use summary::{ConversationMeta, ConversationSummary, SummaryEntry};
