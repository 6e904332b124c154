//! Reaction kinds and counters.
//!
//! A snippet carries three independent engagement counters. The client
//! treats them as monotonically non-decreasing: a successful reaction
//! call bumps the local counter by exactly one, and the authoritative
//! value is re-fetched from the server afterwards. No per-user
//! deduplication exists on either side; repeated reactions count
//! repeatedly (at-least-once, unsynchronized).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three fixed engagement signals.
///
/// The wire form (`useful`, `smart`, `refactored`) doubles as the value
/// of the `type` query parameter on the reaction endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    /// "This helped me."
    Useful,
    /// "Clever approach."
    Smart,
    /// "I'd refactor it this way."
    Refactored,
}

impl ReactionKind {
    /// All kinds in display order.
    pub const ALL: [Self; 3] = [Self::Useful, Self::Smart, Self::Refactored];

    /// Returns the wire name used in the reaction query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Useful => "useful",
            Self::Smart => "smart",
            Self::Refactored => "refactored",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "useful" => Ok(Self::Useful),
            "smart" => Ok(Self::Smart),
            "refactored" => Ok(Self::Refactored),
            other => Err(format!(
                "unknown reaction '{other}' (expected useful, smart, or refactored)"
            )),
        }
    }
}

/// The three reaction counters of a snippet.
///
/// Flattened into the snippet payload, so the JSON shape stays
/// `{"useful": 3, "smart": 1, "refactored": 0, ...}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    /// Count of `useful` reactions.
    #[serde(default)]
    pub useful: u64,
    /// Count of `smart` reactions.
    #[serde(default)]
    pub smart: u64,
    /// Count of `refactored` reactions.
    #[serde(default)]
    pub refactored: u64,
}

impl ReactionCounts {
    /// Returns the counter for one kind.
    #[must_use]
    pub const fn get(&self, kind: ReactionKind) -> u64 {
        match kind {
            ReactionKind::Useful => self.useful,
            ReactionKind::Smart => self.smart,
            ReactionKind::Refactored => self.refactored,
        }
    }

    /// Increments the counter for one kind by exactly one.
    ///
    /// This is the optimistic local update applied after a successful
    /// reaction call; it never runs on failure.
    pub const fn bump(&mut self, kind: ReactionKind) {
        match kind {
            ReactionKind::Useful => self.useful = self.useful.saturating_add(1),
            ReactionKind::Smart => self.smart = self.smart.saturating_add(1),
            ReactionKind::Refactored => self.refactored = self.refactored.saturating_add(1),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for kind in ReactionKind::ALL {
            assert_eq!(kind.as_str().parse::<ReactionKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("loved".parse::<ReactionKind>().is_err());
        assert!("Useful".parse::<ReactionKind>().is_err());
    }

    #[test]
    fn bump_increments_only_the_given_kind() {
        let mut counts = ReactionCounts {
            useful: 41,
            smart: 7,
            refactored: 0,
        };
        counts.bump(ReactionKind::Useful);
        assert_eq!(counts.useful, 42);
        assert_eq!(counts.smart, 7);
        assert_eq!(counts.refactored, 0);
    }

    #[test]
    fn bump_is_not_deduplicated() {
        let mut counts = ReactionCounts::default();
        counts.bump(ReactionKind::Smart);
        counts.bump(ReactionKind::Smart);
        assert_eq!(counts.get(ReactionKind::Smart), 2);
    }

    #[test]
    fn counts_flatten_to_plain_fields() {
        let counts = ReactionCounts {
            useful: 1,
            smart: 2,
            refactored: 3,
        };
        let json = serde_json::to_string(&counts).ok();
        assert_eq!(
            json.as_deref(),
            Some(r#"{"useful":1,"smart":2,"refactored":3}"#)
        );
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let counts: Option<ReactionCounts> = serde_json::from_str("{}").ok();
        assert_eq!(counts, Some(ReactionCounts::default()));
    }
}
