//! In-memory fakes for pipeline tests.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{Comment, Listing, ListingEntry, Production};
use crate::services::{LinkChecker, LinkStatus, SiteScraper};

pub fn prod(id: &str, name: &str, comments: Vec<Comment>) -> Production {
    Production {
        id: id.into(),
        name: name.into(),
        link: format!("https://www.pouet.net/prod.php?which={id}"),
        download_link: format!("https://files.example.org/{id}.zip"),
        comments,
    }
}

pub fn listing(page_title: &str, prods: &[&Production]) -> Listing {
    Listing {
        page_title: page_title.into(),
        entries: prods
            .iter()
            .map(|p| ListingEntry {
                name: p.name.clone(),
                link: p.link.clone(),
            })
            .collect(),
    }
}

/// Site whose pages are fixed records.
#[derive(Default)]
pub struct FakeSite {
    prods: HashMap<String, Production>,
    groups: HashMap<String, Listing>,
    platforms: HashMap<String, Listing>,
    pub production_loads: usize,
}

impl FakeSite {
    pub fn with_prod(mut self, prod: Production) -> Self {
        self.prods.insert(prod.link.clone(), prod);
        self
    }

    pub fn with_group(mut self, id: &str, listing: Listing) -> Self {
        self.groups.insert(id.into(), listing);
        self
    }

    pub fn with_platform(mut self, name: &str, listing: Listing) -> Self {
        self.platforms.insert(name.into(), listing);
        self
    }
}

impl SiteScraper for FakeSite {
    fn production(&mut self, link: &str) -> Result<Production> {
        self.production_loads += 1;
        self.prods
            .get(link)
            .cloned()
            .ok_or_else(|| AppError::not_found("production title", link))
    }

    fn group_listing(&mut self, group_id: &str) -> Result<Listing> {
        self.groups
            .get(group_id)
            .cloned()
            .ok_or_else(|| AppError::crawl(group_id, "unknown group"))
    }

    fn platform_listing(&mut self, platform: &str) -> Result<Listing> {
        self.platforms
            .get(platform)
            .cloned()
            .ok_or_else(|| AppError::crawl(platform, "unknown platform"))
    }
}

/// Every link answers 200 unless told otherwise.
#[derive(Default)]
pub struct FakeLinks {
    statuses: HashMap<String, LinkStatus>,
}

impl FakeLinks {
    pub fn with_status(mut self, url: &str, status: LinkStatus) -> Self {
        self.statuses.insert(url.into(), status);
        self
    }
}

impl LinkChecker for FakeLinks {
    fn probe(&self, url: &str) -> LinkStatus {
        self.statuses
            .get(url)
            .cloned()
            .unwrap_or(LinkStatus::Status(200))
    }
}
