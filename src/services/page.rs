// src/services/page.rs

//! Page sources: where rendered HTML comes from.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::error::Result;
use crate::models::HttpConfig;
use crate::utils::{http, normalize_whitespace};

/// A loaded and parsed page.
pub struct Page {
    /// URL the page was finally served from
    pub url: Url,
    pub document: Html,
}

impl Page {
    pub fn new(url: Url, document: Html) -> Self {
        Self { url, document }
    }

    /// Parse `html` as if it had been served from `url`.
    pub fn parse(url: Url, html: &str) -> Self {
        Self::new(url, Html::parse_document(html))
    }

    /// Text of the `<title>` element, or an empty string.
    pub fn title(&self) -> String {
        let Ok(selector) = Selector::parse("title") else {
            return String::new();
        };
        self.document
            .select(&selector)
            .next()
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default()
    }
}

/// Something that can turn a URL into a rendered document.
pub trait PageSource {
    fn load(&mut self, url: &Url) -> Result<Page>;
}

impl<P: PageSource + ?Sized> PageSource for Box<P> {
    fn load(&mut self, url: &Url) -> Result<Page> {
        (**self).load(url)
    }
}

/// Plain HTTP GET page source.
pub struct HttpPageSource {
    client: Client,
    delay: Duration,
    last_request: Option<Instant>,
}

impl HttpPageSource {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            delay: Duration::from_millis(config.request_delay_ms),
            last_request: None,
        })
    }

    fn throttle(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                std::thread::sleep(self.delay - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }
}

impl PageSource for HttpPageSource {
    fn load(&mut self, url: &Url) -> Result<Page> {
        self.throttle();
        log::debug!("GET {url}");
        let (final_url, document) = http::fetch_page(&self.client, url.as_str())?;
        Ok(Page::new(Url::parse(&final_url)?, document))
    }
}
