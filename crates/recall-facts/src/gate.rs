//! The fact gate: should this utterance go to the classifier at all?
//!
//! An ordered pipeline of labeled rejection rules, evaluated short-circuit
//! — the first matching rule rejects the utterance. Precedence is part of
//! the contract: later rules are narrower and length-gated so that
//! accepted utterances skew toward unambiguous, lasting, first-person
//! statements. `"I'm confused"` is rejected as temporary state, while
//! `"I'm confused about quantum computing and want to learn more"` passes
//! the same rule because the brevity gate no longer applies.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use recall_settings::FactGateSettings;

// =============================================================================
// Phrase tables
// =============================================================================

/// Interrogative/request openers (rule: interrogative).
static INTERROGATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(what|how|why|when|where|who|which)\b|^(can|could|would|will|do|does|should)\s+you\b")
        .expect("valid regex")
});

/// Generalized non-first-person openers (rule: generalized).
static GENERALIZED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(people|everyone|everybody|most|nobody|usually|generally|always)\b")
        .expect("valid regex")
});

/// Hypothetical framings (rule: hypothetical).
static HYPOTHETICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bif i (were|was|had)\b|\bi might\b|\bi could see\b").expect("valid regex")
});

/// Conversational filler openers, rejected only when the utterance is short.
const FILLER_PREFIXES: &[&str] = &[
    "thanks", "thank you", "ok", "okay", "yes", "no", "yeah", "yep", "nope", "sure", "got it",
    "sounds good", "great", "cool", "nice", "perfect", "awesome", "alright", "hmm", "oh",
];

/// Commands and requests aimed at the agent.
const COMMAND_PREFIXES: &[&str] = &[
    "please", "can we", "let's", "lets", "show me", "tell me", "give me", "write", "make",
    "create", "explain", "help", "stop", "continue", "try", "go ahead",
];

/// Reactions to the conversation itself, rejected only when short.
const REACTION_PREFIXES: &[&str] = &["that's", "that is", "this is", "it's", "it is", "wow", "interesting"];

/// Temporary mental states, rejected only when short — an elaborated
/// statement using the same words is extractable.
const TEMPORARY_STATE_PREFIXES: &[&str] = &[
    "i'm confused",
    "i am confused",
    "i'm stuck",
    "i am stuck",
    "i don't understand",
    "i do not understand",
    "i'm not sure",
    "i am not sure",
    "i'm lost",
    "i forget",
    "i forgot",
];

/// Emotional reactions to the conversation, rejected at any length.
const EMOTIONAL_REACTION_PREFIXES: &[&str] = &[
    "i love this",
    "i love it",
    "i like this",
    "i like it",
    "i hate this",
    "i hate it",
    "i enjoy this",
    "this is great",
    "this is awesome",
    "this is amazing",
    "this is helpful",
    "i appreciate",
];

/// Quoted or attributed third-party statements.
const THIRD_PARTY_PHRASES: &[&str] = &[
    "my friend said",
    "my friend says",
    "someone told me",
    "someone said",
    "i heard",
    "they said",
    "she said",
    "he said",
    "according to",
];

/// Meta-conversation references.
const META_CONVERSATION_PHRASES: &[&str] = &[
    "as i mentioned",
    "as i said",
    "like i said",
    "as we discussed",
    "to clarify",
    "to rephrase",
    "in other words",
    "going back to",
];

/// First-person markers used by the external-opinion heuristic.
const FIRST_PERSON_WORDS: &[&str] = &["i", "i'm", "im", "i've", "i'd", "i'll", "my", "me", "mine"];

// =============================================================================
// Utterance view
// =============================================================================

/// Precomputed view of one utterance, shared by all rules.
#[derive(Debug)]
struct Utterance {
    lower: String,
    words: Vec<String>,
    char_len: usize,
}

impl Utterance {
    fn new(text: &str) -> Self {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();
        let words = lower
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'').to_owned())
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            lower,
            words,
            char_len: trimmed.chars().count(),
        }
    }

    fn has_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Prefix match on a whole phrase — the next char (if any) must not
    /// extend the last word, so `"no"` does not match `"november"`.
    fn starts_with_phrase(&self, phrase: &str) -> bool {
        self.lower
            .strip_prefix(phrase)
            .is_some_and(|rest| rest.chars().next().is_none_or(|c| !c.is_alphanumeric()))
    }

    fn starts_with_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|phrase| self.starts_with_phrase(phrase))
    }

    fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|phrase| self.lower.contains(phrase))
    }
}

// =============================================================================
// Rules
// =============================================================================

/// Brevity thresholds for the length-gated rules.
#[derive(Clone, Copy, Debug)]
pub struct GateThresholds {
    /// Minimum character length an utterance needs to carry a durable fact.
    pub min_fact_chars: usize,
    /// Length under which the brevity-gated rules apply.
    pub short_utterance_chars: usize,
}

impl GateThresholds {
    /// Build thresholds from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &FactGateSettings) -> Self {
        Self {
            min_fact_chars: settings.min_fact_chars as usize,
            short_utterance_chars: settings.short_utterance_chars as usize,
        }
    }
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self::from_settings(&FactGateSettings::default())
    }
}

type RulePredicate = fn(&Utterance, &GateThresholds) -> bool;

/// One labeled rejection rule.
struct GateRule {
    label: &'static str,
    rejects: RulePredicate,
}

/// The rule pipeline, in precedence order. A rule higher in the list
/// always wins; several patterns overlap deliberately.
fn rules() -> Vec<GateRule> {
    vec![
        GateRule {
            label: "empty",
            rejects: |u, _| u.lower.is_empty(),
        },
        GateRule {
            label: "interrogative",
            rejects: |u, _| u.lower.ends_with('?') || INTERROGATIVE_RE.is_match(&u.lower),
        },
        GateRule {
            label: "too-short",
            rejects: |u, t| u.char_len < t.min_fact_chars,
        },
        GateRule {
            label: "filler",
            rejects: |u, t| {
                u.char_len < t.short_utterance_chars && u.starts_with_any(FILLER_PREFIXES)
            },
        },
        GateRule {
            label: "command",
            rejects: |u, _| u.starts_with_any(COMMAND_PREFIXES),
        },
        GateRule {
            label: "reaction",
            rejects: |u, t| {
                u.char_len < t.short_utterance_chars && u.starts_with_any(REACTION_PREFIXES)
            },
        },
        GateRule {
            label: "temporary-state",
            rejects: |u, t| {
                u.char_len < t.short_utterance_chars
                    && u.starts_with_any(TEMPORARY_STATE_PREFIXES)
            },
        },
        GateRule {
            label: "emotional-reaction",
            rejects: |u, _| u.starts_with_any(EMOTIONAL_REACTION_PREFIXES),
        },
        GateRule {
            label: "acknowledgment",
            rejects: |u, _| u.lower.contains("makes sense"),
        },
        GateRule {
            label: "hypothetical",
            rejects: |u, _| {
                HYPOTHETICAL_RE.is_match(&u.lower)
                    || (u.lower.contains("i would") && u.has_word("if"))
            },
        },
        GateRule {
            label: "third-party",
            rejects: |u, _| u.contains_any(THIRD_PARTY_PHRASES),
        },
        GateRule {
            label: "generalized",
            rejects: |u, _| GENERALIZED_RE.is_match(&u.lower),
        },
        GateRule {
            label: "meta-conversation",
            rejects: |u, _| u.contains_any(META_CONVERSATION_PHRASES),
        },
        GateRule {
            label: "external-opinion",
            rejects: |u, t| {
                let has_copula = u.has_word("is") || u.has_word("are");
                let first_person = FIRST_PERSON_WORDS.iter().any(|w| u.has_word(w));
                has_copula && !first_person && u.char_len < t.short_utterance_chars
            },
        },
    ]
}

// =============================================================================
// FactGate
// =============================================================================

/// Decides whether an utterance is worth a classification call.
pub struct FactGate {
    rules: Vec<GateRule>,
    thresholds: GateThresholds,
}

impl FactGate {
    /// Create a gate with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_thresholds(GateThresholds::default())
    }

    /// Create a gate with explicit thresholds.
    #[must_use]
    pub fn with_thresholds(thresholds: GateThresholds) -> Self {
        Self {
            rules: rules(),
            thresholds,
        }
    }

    /// Create a gate from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &FactGateSettings) -> Self {
        Self::with_thresholds(GateThresholds::from_settings(settings))
    }

    /// Whether the utterance should be sent for fact extraction.
    #[must_use]
    pub fn should_extract(&self, text: &str) -> bool {
        self.rejection(text).is_none()
    }

    /// The label of the first rejecting rule, or `None` when accepted.
    #[must_use]
    pub fn rejection(&self, text: &str) -> Option<&'static str> {
        let utterance = Utterance::new(text);
        let label = self
            .rules
            .iter()
            .find(|rule| (rule.rejects)(&utterance, &self.thresholds))
            .map(|rule| rule.label);
        if let Some(label) = label {
            trace!(label, "utterance rejected by gate");
        }
        label
    }
}

impl Default for FactGate {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
