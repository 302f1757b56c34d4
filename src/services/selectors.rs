//! Compiled CSS selectors.
//!
//! Selector strings come from configuration; they are parsed once per run
//! so a typo fails before any page is fetched.

use scraper::Selector;

use crate::error::{AppError, Result};
use crate::models::PageSelectors;

/// Parsed form of [`PageSelectors`].
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub prod_title: Selector,
    pub download_link: Selector,
    pub comment: Selector,
    pub comment_content: Selector,
    pub comment_vote: Selector,
    pub comment_author: Selector,
    pub listing_entry: Selector,
    pub attr_name: String,
}

impl CompiledSelectors {
    /// Parse every selector of `selectors`.
    pub fn compile(selectors: &PageSelectors) -> Result<Self> {
        Ok(Self {
            prod_title: parse_selector(&selectors.prod_title)?,
            download_link: parse_selector(&selectors.download_link)?,
            comment: parse_selector(&selectors.comment)?,
            comment_content: parse_selector(&selectors.comment_content)?,
            comment_vote: parse_selector(&selectors.comment_vote)?,
            comment_author: parse_selector(&selectors.comment_author)?,
            listing_entry: parse_selector(&selectors.listing_entry)?,
            attr_name: selectors.attr_name.clone(),
        })
    }
}

/// Parse a single CSS selector.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
