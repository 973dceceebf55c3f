//! Chunked conversation summarizer.
//!
//! [`ChunkedSummarizer`] turns a message history into a
//! [`ConversationSummary`] through the generation collaborator:
//!
//! - empty history → fixed placeholder, no collaborator call
//! - at most one chunk's worth of messages → **single-pass**: one
//!   structured call over the whole transcript
//! - longer → **chunked map-reduce**: each chunk summarized independently
//!   and strictly sequentially, then one merge call over the numbered
//!   concatenation
//!
//! Collaborator failures surface as [`DistillError`] — summarization is
//! best-effort and callers retry later. Partial chunk summaries from a
//! failed run are discarded; there is no resumable checkpointing.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, trace};

use recall_core::{ConversationSummary, Message};
use recall_llm::{CompletionRequest, GenerationError, GenerationProvider};
use recall_settings::DistillSettings;

use crate::chunker::split_into_chunks;
use crate::constants::{
    CHUNK_SIZE, MAX_CHUNKS, MAX_SNIPPETS, MIN_MESSAGES_FOR_SUMMARY, SNIPPET_MAX_WORDS,
};
use crate::parse::parse_structured_summary;
use crate::prompts::{
    SUMMARY_SYSTEM_PROMPT, build_chunk_prompt, build_merge_prompt, build_single_pass_prompt,
    summary_schema,
};
use crate::snippets::extract_snippets;
use crate::topics::dedupe_topics;
use crate::transcript::format_transcript;

// =============================================================================
// Errors
// =============================================================================

/// Errors from summarization.
///
/// The only failure source is the generation collaborator; malformed
/// collaborator output is defaulted locally and never errors.
#[derive(Debug, thiserror::Error)]
pub enum DistillError {
    /// The generation collaborator failed.
    #[error("summarization call failed: {0}")]
    Generation(#[from] GenerationError),
}

// =============================================================================
// Config
// =============================================================================

/// Tunables for the summarizer.
#[derive(Clone, Copy, Debug)]
pub struct DistillConfig {
    /// Messages per chunk; also the single-pass/chunked strategy cutoff.
    pub chunk_size: usize,
    /// Maximum chunks per conversation.
    pub max_chunks: usize,
    /// Maximum user-message snippets kept on a summary.
    pub max_snippets: usize,
    /// Word cap per snippet.
    pub snippet_max_words: usize,
    /// Minimum message count before a conversation is worth summarizing.
    pub min_messages_for_summary: usize,
}

impl DistillConfig {
    /// Build a config from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &DistillSettings) -> Self {
        Self {
            chunk_size: settings.chunk_size as usize,
            max_chunks: settings.max_chunks as usize,
            max_snippets: settings.max_snippets as usize,
            snippet_max_words: settings.snippet_max_words as usize,
            min_messages_for_summary: settings.min_messages_for_summary as usize,
        }
    }

    /// Whether a conversation of `message_count` messages warrants a
    /// summary at all. The host app checks this before scheduling
    /// summarization on navigate-away.
    #[must_use]
    pub fn worth_summarizing(&self, message_count: usize) -> bool {
        message_count >= self.min_messages_for_summary
    }
}

impl Default for DistillConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            max_chunks: MAX_CHUNKS,
            max_snippets: MAX_SNIPPETS,
            snippet_max_words: SNIPPET_MAX_WORDS,
            min_messages_for_summary: MIN_MESSAGES_FOR_SUMMARY,
        }
    }
}

// =============================================================================
// ChunkedSummarizer
// =============================================================================

/// Map-reduce conversation summarizer over a generation collaborator.
pub struct ChunkedSummarizer {
    provider: Arc<dyn GenerationProvider>,
    config: DistillConfig,
}

impl ChunkedSummarizer {
    /// Create a summarizer with default tunables.
    #[must_use]
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self::with_config(provider, DistillConfig::default())
    }

    /// Create a summarizer with explicit tunables.
    #[must_use]
    pub fn with_config(provider: Arc<dyn GenerationProvider>, config: DistillConfig) -> Self {
        Self { provider, config }
    }

    /// The summarizer's tunables.
    #[must_use]
    pub fn config(&self) -> &DistillConfig {
        &self.config
    }

    /// Summarize a message history.
    pub async fn summarize(
        &self,
        messages: &[Message],
    ) -> Result<ConversationSummary, DistillError> {
        if messages.is_empty() {
            return Ok(ConversationSummary::empty());
        }

        #[allow(clippy::cast_possible_truncation)]
        let message_count = messages.len() as u32;

        let mut summary = if messages.len() <= self.config.chunk_size {
            self.single_pass(messages).await?
        } else {
            self.chunked(messages).await?
        };

        summary.message_count = message_count;
        summary.snippets =
            extract_snippets(messages, self.config.max_snippets, self.config.snippet_max_words);
        summary.topics = dedupe_topics(&summary.topics);

        debug!(
            message_count,
            chunked = summary.was_chunked(),
            topics = summary.topics.len(),
            "conversation summarized"
        );

        Ok(summary)
    }

    /// Single-pass strategy: one structured call over the full transcript.
    async fn single_pass(&self, messages: &[Message]) -> Result<ConversationSummary, DistillError> {
        let transcript = format_transcript(messages);
        let request = CompletionRequest::structured(
            SUMMARY_SYSTEM_PROMPT,
            build_single_pass_prompt(&transcript),
            summary_schema(),
        );
        let completion = self.provider.complete(&request).await?;
        let parsed = parse_structured_summary(&completion.text);

        Ok(ConversationSummary {
            title: parsed.title,
            summary: parsed.summary,
            topics: parsed.topics,
            snippets: Vec::new(),
            participants: parsed.participants,
            message_count: 0,
            chunk_summaries: None,
            generated_at: Utc::now(),
        })
    }

    /// Chunked map-reduce strategy.
    ///
    /// Chunks are summarized strictly sequentially — chunk *i+1* is not
    /// started until chunk *i* resolved. The resulting order is
    /// load-bearing for the `Part N` labels in the merge prompt.
    async fn chunked(&self, messages: &[Message]) -> Result<ConversationSummary, DistillError> {
        let chunks = split_into_chunks(messages, self.config.chunk_size, self.config.max_chunks);

        let mut chunk_summaries: Vec<String> = Vec::with_capacity(chunks.len());
        let mut participants: Vec<String> = Vec::new();

        for (index, chunk) in chunks.iter().enumerate() {
            let transcript = format_transcript(chunk);
            let request = CompletionRequest::structured(
                SUMMARY_SYSTEM_PROMPT,
                build_chunk_prompt(index + 1, &transcript),
                summary_schema(),
            );
            let completion = self.provider.complete(&request).await?;
            let parsed = parse_structured_summary(&completion.text);

            trace!(chunk = index + 1, total = chunks.len(), "chunk summarized");

            for name in parsed.participants {
                if !participants.contains(&name) {
                    participants.push(name);
                }
            }
            chunk_summaries.push(parsed.summary);
        }

        let merge_request = CompletionRequest::structured(
            SUMMARY_SYSTEM_PROMPT,
            build_merge_prompt(&chunk_summaries),
            summary_schema(),
        );
        let completion = self.provider.complete(&merge_request).await?;
        let merged = parse_structured_summary(&completion.text);

        Ok(ConversationSummary {
            title: merged.title,
            summary: merged.summary,
            topics: merged.topics,
            snippets: Vec::new(),
            participants,
            message_count: 0,
            chunk_summaries: Some(chunk_summaries),
            generated_at: Utc::now(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
