//! Reportable observations about a production.

use std::fmt;

use crate::models::Production;

/// One thing worth looking at, rendered as a Markdown line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// The newest comment differs from the one seen last run
    NewComment(Production),

    /// The download link did not answer HEAD with a plain 200
    DeadDownloadLink(Production),

    /// The production was not in the platform listing last run
    NewProduction(Production),
}

impl Finding {
    /// The production this finding is about.
    pub fn production(&self) -> &Production {
        match self {
            Finding::NewComment(prod)
            | Finding::DeadDownloadLink(prod)
            | Finding::NewProduction(prod) => prod,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prod = self.production();
        let name = escape_markdown(&prod.name);
        match self {
            Finding::NewComment(_) => {
                write!(f, "[{}]({}) has at least one new comment", name, prod.link)?;
                match prod.last_comment() {
                    Some(comment) => {
                        write!(f, " ({}).", escape_markdown(&comment.to_string()))
                    }
                    None => write!(f, "."),
                }
            }
            Finding::DeadDownloadLink(_) => {
                write!(f, "[{}]({}) has a dead download link.", name, prod.link)
            }
            Finding::NewProduction(_) => write!(f, "[{}]({}) is a new prod.", name, prod.link),
        }
    }
}

/// Characters Markdown reads as inline syntax, entities or raw HTML.
const MARKDOWN_SPECIAL: &[char] = &[
    '\\', '`', '*', '_', '[', ']', '(', ')', '<', '>', '&', '!', '~', '#', '|',
];

/// Backslash-escape scraped text so it renders literally.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
