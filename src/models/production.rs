//! Productions, their comments and listing entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A comment left under a production.
///
/// Two comments are the same comment when content, vote and author all match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    /// Comment body text
    pub content: String,

    /// Vote label (`rulez`, `sucks`, ...); empty when the author did not vote
    pub vote: String,

    /// Author nickname
    pub author: String,
}

impl Comment {
    pub fn new(
        content: impl Into<String>,
        vote: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            vote: vote.into(),
            author: author.into(),
        }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vote = if self.vote.is_empty() {
            "piggy"
        } else {
            &self.vote
        };
        write!(f, "{} [{}]: {}", self.author, vote, self.content)
    }
}

/// A production as shown on its detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Production {
    /// Site identifier (the `which` query parameter of `link`)
    pub id: String,

    /// Display name
    pub name: String,

    /// Canonical URL of the detail page
    pub link: String,

    /// Main download URL
    pub download_link: String,

    /// Comments, oldest first
    pub comments: Vec<Comment>,
}

impl Production {
    /// Newest comment, if any.
    pub fn last_comment(&self) -> Option<&Comment> {
        self.comments.last()
    }
}

/// One `(name, link)` row of a group or platform listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub link: String,
}

/// The first results page of a group or platform listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Raw `<title>` of the listing page
    pub page_title: String,

    /// Productions in page order
    pub entries: Vec<ListingEntry>,
}
