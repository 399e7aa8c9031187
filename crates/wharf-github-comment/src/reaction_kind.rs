use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reaction content accepted by the GitHub reactions API.
///
/// Unknown values are kept as `Other` and sent unchanged; GitHub rejects them.
pub enum ReactionKind {
    PlusOne,
    MinusOne,
    Laugh,
    Confused,
    Heart,
    Hooray,
    Rocket,
    Eyes,
    Other(String),
}

impl ReactionKind {
    pub const SUPPORTED: [&'static str; 8] = [
        "+1", "-1", "laugh", "confused", "heart", "hooray", "rocket", "eyes",
    ];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "+1" => Self::PlusOne,
            "-1" => Self::MinusOne,
            "laugh" => Self::Laugh,
            "confused" => Self::Confused,
            "heart" => Self::Heart,
            "hooray" => Self::Hooray,
            "rocket" => Self::Rocket,
            "eyes" => Self::Eyes,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PlusOne => "+1",
            Self::MinusOne => "-1",
            Self::Laugh => "laugh",
            Self::Confused => "confused",
            Self::Heart => "heart",
            Self::Hooray => "hooray",
            Self::Rocket => "rocket",
            Self::Eyes => "eyes",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
