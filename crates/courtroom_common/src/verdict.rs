//! The four community verdicts.
//!
//! A closed set: every post resolves to exactly one of these, and no other
//! value is legal anywhere in the system.

use crate::error::CourtroomError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A verdict on an AITA post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// The poster is at fault.
    #[serde(rename = "YTA")]
    Yta,
    /// The poster did nothing wrong.
    #[serde(rename = "NTA")]
    Nta,
    /// Every party involved is at fault.
    #[serde(rename = "ESH")]
    Esh,
    /// No party is at fault.
    #[serde(rename = "NAH")]
    Nah,
}

impl Verdict {
    /// All four verdicts, in display order.
    pub const ALL: [Verdict; 4] = [Verdict::Yta, Verdict::Nta, Verdict::Esh, Verdict::Nah];

    /// The short community code.
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Yta => "YTA",
            Verdict::Nta => "NTA",
            Verdict::Esh => "ESH",
            Verdict::Nah => "NAH",
        }
    }

    /// Human-readable expansion of the code.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Yta => "You're the Asshole",
            Verdict::Nta => "Not the Asshole",
            Verdict::Esh => "Everyone Sucks Here",
            Verdict::Nah => "No Assholes Here",
        }
    }

    /// One-line explanation shown alongside the label.
    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Yta => "The person is clearly in the wrong",
            Verdict::Nta => "The person did nothing wrong",
            Verdict::Esh => "Everyone involved is at fault",
            Verdict::Nah => "No one is at fault, just a misunderstanding",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Verdict {
    type Err = CourtroomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "YTA" => Ok(Verdict::Yta),
            "NTA" => Ok(Verdict::Nta),
            "ESH" => Ok(Verdict::Esh),
            "NAH" => Ok(Verdict::Nah),
            other => Err(CourtroomError::UnknownVerdict(other.to_string())),
        }
    }
}
