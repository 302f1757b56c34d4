// src/services/chrome.rs

//! Headless Chrome page source.

use std::sync::Arc;

use headless_chrome::{Browser, LaunchOptions, Tab};
use url::Url;

use crate::error::{AppError, Result};
use crate::services::{Page, PageSource};

/// Page source driving one headless Chrome session for the whole run.
///
/// The browser process is killed when this value is dropped, so it is
/// released on every exit path including `?` early returns.
pub struct ChromePageSource {
    // Dropped in declaration order: tab, then browser.
    tab: Arc<Tab>,
    _browser: Browser,
}

impl ChromePageSource {
    /// Launch a headless browser and open a single tab.
    pub fn launch() -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(AppError::browser)?;
        let browser = Browser::new(options).map_err(AppError::browser)?;
        let tab = browser.new_tab().map_err(AppError::browser)?;
        log::info!("Headless browser started");

        Ok(Self {
            tab,
            _browser: browser,
        })
    }
}

impl PageSource for ChromePageSource {
    fn load(&mut self, url: &Url) -> Result<Page> {
        log::debug!("Navigate {url}");
        self.tab
            .navigate_to(url.as_str())
            .map_err(AppError::browser)?
            .wait_until_navigated()
            .map_err(AppError::browser)?;

        let html = self.tab.get_content().map_err(AppError::browser)?;
        let final_url = Url::parse(&self.tab.get_url()).unwrap_or_else(|_| url.clone());
        Ok(Page::parse(final_url, &html))
    }
}

impl Drop for ChromePageSource {
    fn drop(&mut self) {
        log::info!("Closing headless browser");
    }
}
