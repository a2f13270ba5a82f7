//! Memory categories.

use serde::Serialize;

use super::error::NeuronError;

/// The closed set of user-memory categories. Each tag backs exactly one
/// tree node whose id is the lowercase tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MemoryTag {
    Family,
    Friends,
    Work,
    Health,
    Education,
    Entertainment,
    Other,
}

impl MemoryTag {
    /// All tags in declaration order.
    pub const ALL: [MemoryTag; 7] = [
        Self::Family,
        Self::Friends,
        Self::Work,
        Self::Health,
        Self::Education,
        Self::Entertainment,
        Self::Other,
    ];

    /// Return the display name of this tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Family => "Family",
            Self::Friends => "Friends",
            Self::Work => "Work",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }

    /// The id of the tree node backing this tag.
    pub fn node_id(&self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Friends => "friends",
            Self::Work => "work",
            Self::Health => "health",
            Self::Education => "education",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
        }
    }

    /// Parse a tag from its name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|tag| tag.node_id() == lower)
    }
}

impl std::fmt::Display for MemoryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for MemoryTag {
    type Err = NeuronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| NeuronError::UnknownTag(s.to_string()))
    }
}
