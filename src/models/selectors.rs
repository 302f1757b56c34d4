// src/models/selectors.rs

//! CSS selectors for scraping pouet.net pages.

use serde::{Deserialize, Serialize};

/// CSS selectors for the production detail page and the listing pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageSelectors {
    /// Element holding the production name
    pub prod_title: String,

    /// Anchor of the main download link
    pub download_link: String,

    /// Each comment block, in document order
    pub comment: String,

    /// Comment body within a comment block
    pub comment_content: String,

    /// Vote label within a comment block
    pub comment_vote: String,

    /// Author link within a comment block
    pub comment_author: String,

    /// Production anchors on group/platform listings
    pub listing_entry: String,

    /// HTML attribute name for extracting links (usually "href")
    pub attr_name: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            prod_title: "#prod-title".to_string(),
            download_link: "#mainDownloadLink".to_string(),
            comment: "div.comment".to_string(),
            comment_content: "div.content".to_string(),
            comment_vote: "div.foot > span".to_string(),
            comment_author: "div.foot a.user".to_string(),
            listing_entry: "span.prod > a".to_string(),
            attr_name: "href".to_string(),
        }
    }
}

impl PageSelectors {
    /// All selectors with their field names, for validation.
    pub fn named(&self) -> [(&'static str, &str); 7] {
        [
            ("prod_title", self.prod_title.as_str()),
            ("download_link", self.download_link.as_str()),
            ("comment", self.comment.as_str()),
            ("comment_content", self.comment_content.as_str()),
            ("comment_vote", self.comment_vote.as_str()),
            ("comment_author", self.comment_author.as_str()),
            ("listing_entry", self.listing_entry.as_str()),
        ]
    }
}
