use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Opportunity taxonomy label.
///
/// Declaration order is significant: it is the priority order the classifier
/// uses to break ties between domains with the same keyword hit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Research,
    Fellowship,
    Internship,
    Scholarship,
    Conference,
    Competition,
    Grant,
    Other,
}

impl Domain {
    pub const ALL: [Domain; 8] = [
        Self::Research,
        Self::Fellowship,
        Self::Internship,
        Self::Scholarship,
        Self::Conference,
        Self::Competition,
        Self::Grant,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Fellowship => "fellowship",
            Self::Internship => "internship",
            Self::Scholarship => "scholarship",
            Self::Conference => "conference",
            Self::Competition => "competition",
            Self::Grant => "grant",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

impl FromStr for Domain {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == normalized)
            .ok_or(ParseLabelError {
                kind: "domain",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Domain {
    type Error = ParseLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OpportunityStatus {
    #[default]
    Open,
    Closed,
    Upcoming,
}

impl OpportunityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Upcoming => "upcoming",
        }
    }
}

impl FromStr for OpportunityStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "upcoming" => Ok(Self::Upcoming),
            _ => Err(ParseLabelError {
                kind: "opportunity status",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for OpportunityStatus {
    type Error = ParseLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Time window of a leaderboard view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardPeriod {
    Weekly,
    Monthly,
    #[default]
    AllTime,
}

impl LeaderboardPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::AllTime => "all_time",
        }
    }
}

impl FromStr for LeaderboardPeriod {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "all_time" => Ok(Self::AllTime),
            _ => Err(ParseLabelError {
                kind: "leaderboard period",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LeaderboardPeriod {
    type Error = ParseLabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
