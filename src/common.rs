//! Traits and types shared among modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Silicon revision of the counter tile.
///
/// Both revisions run the same state machine; they differ only in which pads
/// carry the control lines and the load payload, and in how the output pads
/// are gated. See [`crate::counter::Counter`] for the mappings.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[must_use]
pub enum Revision {
    A,
    #[default]
    B,
}

impl Revision {
    pub const fn as_slice() -> &'static [Self] {
        &[Revision::A, Revision::B]
    }

    #[must_use]
    pub fn is_rev_a(&self) -> bool {
        self == &Self::A
    }

    #[must_use]
    pub fn is_rev_b(&self) -> bool {
        self == &Self::B
    }
}

impl AsRef<str> for Revision {
    fn as_ref(&self) -> &str {
        match self {
            Self::A => "rev-a",
            Self::B => "rev-b",
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl TryFrom<&str> for Revision {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "a" | "A" | "rev-a" => Ok(Self::A),
            "b" | "B" | "rev-b" => Ok(Self::B),
            _ => Err(Error::InvalidConfig {
                field: "revision",
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for Revision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[must_use]
pub enum ResetKind {
    /// The synchronous reset line (`reset_n` held low over a clock edge).
    Soft,
    /// A power cycle. Register contents return to their power-up state and
    /// are unspecified until the next soft reset.
    Hard,
}

pub trait Reset {
    fn reset(&mut self, _kind: ResetKind) {}
}

pub trait Clock {
    /// Advances the component one rising clock edge, returning the number of
    /// cycles consumed.
    fn clock(&mut self) -> usize {
        0
    }
}
