//! Code generation context state machine

use serde::{Deserialize, Serialize};

/// States of a [`CodeGenerationContext`](crate::CodeGenerationContext)
///
/// State transitions:
/// ```text
/// Discovered → MessagesParsed → Filtered → Ordered
///      ↑              │             │         │
///      └──────────────┴─────────────┴─────────┘ (package added)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextState {
    /// Packages are known but their messages have not been parsed
    #[default]
    Discovered,
    /// Every available package has been parsed
    MessagesParsed,
    /// The mandatory package set has been determined
    Filtered,
    /// A build sequence has been computed
    Ordered,
}

impl ContextState {
    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: ContextState) -> bool {
        use ContextState::*;
        matches!(
            (self, target),
            // Forward pipeline
            (Discovered, MessagesParsed)
                | (MessagesParsed, Filtered)
                | (Filtered, Ordered)
                // Filtering or ordering again
                | (Filtered, Filtered)
                | (Ordered, Filtered)
                | (Ordered, Ordered)
                // Package set mutated
                | (MessagesParsed, Discovered)
                | (Filtered, Discovered)
                | (Ordered, Discovered)
        )
    }

    /// Check if message descriptors are available in this state
    pub fn has_parsed_messages(&self) -> bool {
        *self >= ContextState::MessagesParsed
    }

    /// Check if a build sequence can be requested in this state
    pub fn can_order(&self) -> bool {
        *self >= ContextState::Filtered
    }
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextState::Discovered => write!(f, "Discovered"),
            ContextState::MessagesParsed => write!(f, "MessagesParsed"),
            ContextState::Filtered => write!(f, "Filtered"),
            ContextState::Ordered => write!(f, "Ordered"),
        }
    }
}
