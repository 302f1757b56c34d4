// src/pipeline/check.rs

//! Per-target checks.
//!
//! Each check scrapes the current state, compares it with the snapshot
//! store, records the current state back into the store and returns the
//! findings worth reporting.

use crate::error::Result;
use crate::models::Finding;
use crate::pipeline::diff::has_new_comment;
use crate::pipeline::report::Section;
use crate::services::{LinkChecker, SiteScraper};
use crate::storage::SnapshotStore;
use crate::utils::url::title_before_separator;

/// Check one production of a tracked group for a new comment and a dead
/// download link.
pub fn check_production<S, L>(
    scraper: &mut S,
    links: &L,
    store: &mut SnapshotStore,
    link: &str,
) -> Result<Vec<Finding>>
where
    S: SiteScraper + ?Sized,
    L: LinkChecker + ?Sized,
{
    let current = scraper.production(link)?;
    let mut findings = Vec::new();

    let previous = store.last_comment(&current.id)?;
    if has_new_comment(previous.as_ref(), current.last_comment()) {
        log::info!("New comment on {}", current.name);
        findings.push(Finding::NewComment(current.clone()));
    }
    // Rewritten even when unchanged.
    store.set_last_comment(&current.id, current.last_comment())?;

    let status = links.probe(&current.download_link);
    if !status.is_alive() {
        log::info!(
            "Dead download link on {}: {} ({:?})",
            current.name,
            current.download_link,
            status
        );
        findings.push(Finding::DeadDownloadLink(current));
    }

    Ok(findings)
}

/// Check every production listed on a group page.
pub fn check_group<S, L>(
    scraper: &mut S,
    links: &L,
    store: &mut SnapshotStore,
    group_id: &str,
) -> Result<Section>
where
    S: SiteScraper + ?Sized,
    L: LinkChecker + ?Sized,
{
    let listing = scraper.group_listing(group_id)?;
    let title = match title_before_separator(&listing.page_title) {
        "" => format!("group {group_id}"),
        name => name.to_string(),
    };

    let total = listing.entries.len();
    log::info!("Checking {total} prod(s) of {title}");

    let mut findings = Vec::new();
    for (i, entry) in listing.entries.iter().enumerate() {
        log::info!("[{}/{}] {}", i + 1, total, entry.link);
        findings.extend(check_production(scraper, links, store, &entry.link)?);
    }

    Ok(Section::new(title, findings))
}

/// Report every production of a platform listing not seen before.
pub fn check_platform<S>(
    scraper: &mut S,
    store: &mut SnapshotStore,
    platform: &str,
) -> Result<Section>
where
    S: SiteScraper + ?Sized,
{
    let listing = scraper.platform_listing(platform)?;

    let total = listing.entries.len();
    log::info!("Checking {total} prod(s) of {platform}");

    let mut findings = Vec::new();
    for (i, entry) in listing.entries.iter().enumerate() {
        if !store.is_known_production(&entry.link) {
            log::info!("[{}/{}] new: {}", i + 1, total, entry.link);
            let prod = scraper.production(&entry.link)?;
            findings.push(Finding::NewProduction(prod));
        }
        store.remember_production(&entry.link, &entry.name)?;
    }

    Ok(Section::new(platform, findings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Comment, Listing};
    use crate::pipeline::testing::{FakeLinks, FakeSite, listing, prod};
    use crate::services::LinkStatus;
    use tempfile::TempDir;

    fn store(tmp: &TempDir) -> SnapshotStore {
        SnapshotStore::open(tmp.path().join("previous.json")).unwrap()
    }

    #[test]
    fn test_first_comment_then_unchanged() {
        let tmp = TempDir::new().unwrap();
        let mut store = store(&tmp);
        let p = prod("1", "Climax", vec![Comment::new("wow", "rulez", "ced")]);
        let mut site = FakeSite::default().with_prod(p.clone());
        let links = FakeLinks::default();

        let findings = check_production(&mut site, &links, &mut store, &p.link).unwrap();
        assert_eq!(findings, vec![Finding::NewComment(p.clone())]);

        let findings = check_production(&mut site, &links, &mut store, &p.link).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_changed_comment_fires_once() {
        let tmp = TempDir::new().unwrap();
        let mut store = store(&tmp);
        let links = FakeLinks::default();

        let before = prod("1", "Climax", vec![Comment::new("wow", "rulez", "ced")]);
        store.set_last_comment("1", before.last_comment()).unwrap();

        let after = prod(
            "1",
            "Climax",
            vec![
                Comment::new("wow", "rulez", "ced"),
                Comment::new("wow", "sucks", "ced"),
            ],
        );
        let mut site = FakeSite::default().with_prod(after.clone());

        let findings = check_production(&mut site, &links, &mut store, &after.link).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0], Finding::NewComment(_)));
        assert_eq!(store.last_comment("1").unwrap(), after.last_comment().cloned());
    }

    #[test]
    fn test_no_comment_stores_null_without_finding() {
        let tmp = TempDir::new().unwrap();
        let mut store = store(&tmp);
        let p = prod("7", "Silent", vec![]);
        let mut site = FakeSite::default().with_prod(p.clone());

        let findings =
            check_production(&mut site, &FakeLinks::default(), &mut store, &p.link).unwrap();
        assert!(findings.is_empty());
        assert!(store.contains("lastComment/7"));
        assert_eq!(store.last_comment("7").unwrap(), None);
    }

    #[test]
    fn test_deleted_last_comment_fires() {
        let tmp = TempDir::new().unwrap();
        let mut store = store(&tmp);
        store
            .set_last_comment("1", Some(&Comment::new("old", "rulez", "ced")))
            .unwrap();
        let p = prod("1", "Climax", vec![]);
        let mut site = FakeSite::default().with_prod(p.clone());
        let links = FakeLinks::default();

        let findings = check_production(&mut site, &links, &mut store, &p.link).unwrap();
        assert_eq!(findings, vec![Finding::NewComment(p.clone())]);
        assert_eq!(store.last_comment("1").unwrap(), None);

        let findings = check_production(&mut site, &links, &mut store, &p.link).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_dead_link_on_any_non_200() {
        let tmp = TempDir::new().unwrap();
        let mut store = store(&tmp);
        let p = prod("1", "Climax", vec![]);
        let mut site = FakeSite::default().with_prod(p.clone());

        for status in [
            LinkStatus::Status(301),
            LinkStatus::Status(404),
            LinkStatus::Status(500),
            LinkStatus::Unreachable("timed out".into()),
        ] {
            let links = FakeLinks::default().with_status(&p.download_link, status);
            let findings = check_production(&mut site, &links, &mut store, &p.link).unwrap();
            assert_eq!(findings, vec![Finding::DeadDownloadLink(p.clone())]);
        }

        let links = FakeLinks::default().with_status(&p.download_link, LinkStatus::Status(200));
        let findings = check_production(&mut site, &links, &mut store, &p.link).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_group_section_title_and_order() {
        let tmp = TempDir::new().unwrap();
        let mut store = store(&tmp);
        let a = prod("1", "A", vec![Comment::new("x", "", "u")]);
        let b = prod("2", "B", vec![Comment::new("y", "", "v")]);
        let mut site = FakeSite::default()
            .with_prod(a.clone())
            .with_prod(b.clone())
            .with_group("253", listing("Benediction :: pouet.net", &[&a, &b]));

        let section = check_group(&mut site, &FakeLinks::default(), &mut store, "253").unwrap();
        assert_eq!(section.title, "Benediction");
        assert_eq!(
            section.findings,
            vec![Finding::NewComment(a), Finding::NewComment(b)]
        );
    }

    #[test]
    fn test_group_without_title_falls_back_to_id() {
        let tmp = TempDir::new().unwrap();
        let mut store = store(&tmp);
        let mut site = FakeSite::default().with_group("9", Listing::default());

        let section = check_group(&mut site, &FakeLinks::default(), &mut store, "9").unwrap();
        assert_eq!(section.title, "group 9");
        assert!(section.findings.is_empty());
    }

    #[test]
    fn test_new_production_once() {
        let tmp = TempDir::new().unwrap();
        let mut store = store(&tmp);
        let p = prod("5", "Fresh", vec![]);
        let mut site = FakeSite::default()
            .with_prod(p.clone())
            .with_platform("Amstrad CPC", listing("", &[&p, &p]));

        let section = check_platform(&mut site, &mut store, "Amstrad CPC").unwrap();
        assert_eq!(section.title, "Amstrad CPC");
        assert_eq!(section.findings, vec![Finding::NewProduction(p.clone())]);
        assert!(store.is_known_production(&p.link));

        let section = check_platform(&mut site, &mut store, "Amstrad CPC").unwrap();
        assert!(section.findings.is_empty());
        assert_eq!(site.production_loads, 1);
    }

    #[test]
    fn test_known_production_name_is_refreshed() {
        let tmp = TempDir::new().unwrap();
        let mut store = store(&tmp);
        let p = prod("5", "Renamed", vec![]);
        store.remember_production(&p.link, "Old").unwrap();
        let mut site = FakeSite::default().with_platform("Commodore 64", listing("", &[&p]));

        let section = check_platform(&mut site, &mut store, "Commodore 64").unwrap();
        assert!(section.findings.is_empty());
        assert_eq!(
            store.known_production_name(&p.link).unwrap().as_deref(),
            Some("Renamed")
        );
    }

    #[test]
    fn test_scrape_failure_propagates() {
        let tmp = TempDir::new().unwrap();
        let mut store = store(&tmp);
        let p = prod("1", "Gone", vec![]);
        let mut site = FakeSite::default().with_group("1", listing("G :: pouet.net", &[&p]));

        assert!(check_group(&mut site, &FakeLinks::default(), &mut store, "1").is_err());
    }
}
