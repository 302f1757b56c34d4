// src/pipeline/run.rs

//! One full run: open the store, check every target, flush the store.

use crate::error::Result;
use crate::models::{Config, Fetcher};
use crate::pipeline::check::{check_group, check_platform};
use crate::pipeline::report::Report;
use crate::services::{
    CompiledSelectors, HttpLinkChecker, HttpPageSource, LinkChecker, PageSource, PouetScraper,
    SiteScraper,
};
use crate::storage::SnapshotStore;
use crate::utils::dirs;

/// What to watch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    /// Platform names, e.g. `Amstrad CPC`
    pub platforms: Vec<String>,
    /// Group ids, e.g. `253`
    pub groups: Vec<String>,
}

impl Targets {
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty() && self.groups.is_empty()
    }
}

/// Check every target in order (platforms first, then groups) and collect
/// one report section per target.
pub fn run_checks<S, L>(
    scraper: &mut S,
    links: &L,
    store: &mut SnapshotStore,
    targets: &Targets,
) -> Result<Report>
where
    S: SiteScraper + ?Sized,
    L: LinkChecker + ?Sized,
{
    let mut report = Report::new();

    for platform in &targets.platforms {
        report.push(check_platform(scraper, store, platform)?);
    }
    for group in &targets.groups {
        report.push(check_group(scraper, links, store, group)?);
    }

    log::info!(
        "{} finding(s) over {} target(s)",
        report.finding_count(),
        report.sections().len()
    );
    Ok(report)
}

/// Run every check against the live site.
///
/// The store is flushed only once all checks have succeeded.
pub fn run(config: &Config, targets: &Targets) -> Result<Report> {
    if targets.is_empty() {
        log::info!("No platform or group given, nothing to check");
        return Ok(Report::new());
    }

    let selectors = CompiledSelectors::compile(&config.selectors)?;
    let base_url = config.site.base_url()?;
    let mut store = SnapshotStore::open(dirs::store_path(&config.storage)?)?;
    log::info!("Using snapshot {}", store.path().display());

    let links = HttpLinkChecker::new(&config.http)?;
    let report = {
        let mut scraper = PouetScraper::new(page_source(config)?, base_url, selectors);
        run_checks(&mut scraper, &links, &mut store, targets)?
    };

    store.flush()?;
    Ok(report)
}

fn page_source(config: &Config) -> Result<Box<dyn PageSource>> {
    match config.site.fetcher {
        Fetcher::Http => Ok(Box::new(HttpPageSource::new(&config.http)?)),
        #[cfg(feature = "browser")]
        Fetcher::Chrome => Ok(Box::new(crate::services::ChromePageSource::launch()?)),
        #[cfg(not(feature = "browser"))]
        Fetcher::Chrome => Err(crate::error::AppError::config(
            "site.fetcher = \"chrome\" requires building with the `browser` feature",
        )),
    }
}
