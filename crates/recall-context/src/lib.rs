//! # recall-context
//!
//! Token budgeting and four-layer context assembly.
//!
//! - **Token estimator**: chars/4 approximation, round-up everywhere a
//!   fits-check happens
//! - **Context budget**: total ceiling, output reservation, per-layer
//!   sub-allocations
//! - **Context assembler**: session metadata → durable facts →
//!   prior-conversation summaries → sliding-window current conversation
//! - **Context service**: pulls inputs through the storage collaborator
//!   and assembles
//!
//! Assembly is synchronous, pure, and infallible — any input state
//! (including all-empty) produces a valid prompt by dropping content,
//! never by erroring.

#![deny(unsafe_code)]

pub mod assembler;
pub mod budget;
pub mod constants;
pub mod service;
pub mod token_estimator;

pub use assembler::{AssembledContext, ContextAssembler};
pub use budget::ContextBudget;
pub use service::ContextService;
