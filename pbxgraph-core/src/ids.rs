//! Object identifiers and the generator that mints them.
//!
//! Identifiers follow the project-document convention: 24 upper-case hex
//! characters. They are opaque to everything except the registry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of a minted identifier, in characters.
pub const ID_LEN: usize = 24;

// ---------------------------------------------------------------------------
// Newtype
// ---------------------------------------------------------------------------

/// Opaque identifier of an object held by the [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// How new identifiers are minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IdStrategy {
    /// 24 hex chars cut from a v4 UUID.
    #[default]
    Random,
    /// `prefix` followed by a zero-padded decimal counter. Deterministic.
    Sequential {
        #[serde(default)]
        prefix: String,
    },
}

/// Mints identifiers according to an [`IdStrategy`].
#[derive(Debug, Clone)]
pub struct IdGenerator {
    strategy: IdStrategy,
    counter: u64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy, counter: 0 }
    }

    pub fn strategy(&self) -> &IdStrategy {
        &self.strategy
    }

    /// Mint the next identifier, skipping any candidate for which `is_taken`
    /// returns true.
    pub fn next(&mut self, is_taken: impl Fn(&ObjectId) -> bool) -> ObjectId {
        loop {
            let candidate = self.candidate();
            if !is_taken(&candidate) {
                return candidate;
            }
            tracing::debug!(id = %candidate, "identifier collision, minting again");
        }
    }

    fn candidate(&mut self) -> ObjectId {
        match &self.strategy {
            IdStrategy::Random => {
                let hex = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
                ObjectId(hex[..ID_LEN].to_owned())
            }
            IdStrategy::Sequential { prefix } => {
                self.counter += 1;
                let width = ID_LEN.saturating_sub(prefix.len());
                ObjectId(format!("{prefix}{:0width$}", self.counter, width = width))
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
