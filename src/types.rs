use serde::{Deserialize, Serialize};

pub type PostId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(rename = "user")]
    pub author: String,
    pub text: String,
    pub likes: u64,
    pub loves: u64,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
}

impl Post {
    pub fn new(id: PostId, author: impl Into<String>, text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id,
            author: author.into(),
            text: text.into(),
            likes: 0,
            loves: 0,
            timestamp,
        }
    }

    pub fn apply(&mut self, reaction: Reaction) {
        match reaction {
            Reaction::Like => self.likes = self.likes.saturating_add(1),
            Reaction::Love => self.loves = self.loves.saturating_add(1),
        }
    }

    pub fn count(&self, reaction: Reaction) -> u64 {
        match reaction {
            Reaction::Like => self.likes,
            Reaction::Love => self.loves,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reaction {
    Like,
    Love,
}

impl Reaction {
    pub const ALL: [Reaction; 2] = [Reaction::Like, Reaction::Love];

    pub fn emoji(self) -> &'static str {
        match self {
            Reaction::Like => "👍",
            Reaction::Love => "❤️",
        }
    }
}
