use std::fmt;

use crate::error::CommentError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Owner/name pair addressing a GitHub repository.
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Normalizes `owner/repo`, `github.com/owner/repo`,
    /// `https://github.com/owner/repo` and `https://github.com/owner/repo.git`
    /// to the same pair.
    pub fn parse(raw: &str) -> Result<Self, CommentError> {
        let mut remainder = raw.strip_suffix(".git").unwrap_or(raw);
        remainder = remainder.strip_prefix("https://").unwrap_or(remainder);
        remainder = remainder.strip_prefix("http://").unwrap_or(remainder);
        remainder = remainder.strip_prefix("github.com/").unwrap_or(remainder);

        let segments = remainder.split('/').collect::<Vec<_>>();
        match segments.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self::new(*owner, *name)),
            _ => Err(CommentError::InvalidRepository {
                input: raw.to_string(),
            }),
        }
    }

    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
