// src/pipeline/report.rs

//! Report building and rendering.
//!
//! Findings are grouped per tracked platform/group, rendered to Markdown,
//! then converted to a standalone HTML page.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use pulldown_cmark::{Event, Parser, html};

use crate::error::Result;
use crate::models::Finding;

/// Findings for one tracked platform or group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Platform name or group display name
    pub title: String,
    pub findings: Vec<Finding>,
}

impl Section {
    pub fn new(title: impl Into<String>, findings: Vec<Finding>) -> Self {
        Self {
            title: title.into(),
            findings,
        }
    }
}

/// Ordered list of sections making up one run's report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    sections: Vec<Section>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Total number of findings across all sections.
    pub fn finding_count(&self) -> usize {
        self.sections.iter().map(|s| s.findings.len()).sum()
    }

    /// Markdown source of the report.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            let _ = writeln!(out, "# {} checks\n", section.title);
            if section.findings.is_empty() {
                out.push_str("Everything seems good.\n\n");
            } else {
                out.push_str("You have few things to checks.\n\n");
                for finding in &section.findings {
                    let _ = writeln!(out, " - {finding}");
                }
                out.push('\n');
            }
        }
        out
    }

    /// Standalone HTML page of the report.
    ///
    /// Raw HTML in the Markdown is emitted as text, never as markup.
    pub fn to_html(&self) -> String {
        let markdown = self.to_markdown();
        let events = Parser::new(&markdown).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        let mut body = String::new();
        html::push_html(&mut body, events);

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>pouetspy report</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
        )
    }

    /// Write the HTML page to `path`, replacing any previous report.
    pub fn write_html(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_html())?;
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}
