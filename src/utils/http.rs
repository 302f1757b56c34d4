// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use scraper::Html;

use crate::error::Result;
use crate::models::HttpConfig;

/// Create a configured blocking HTTP client for page loads.
pub fn create_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Create a client for download-link probes.
///
/// Redirects are not followed: a 3xx answer is reported as is.
pub fn create_probe_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(Policy::none())
        .build()?;
    Ok(client)
}

/// Fetch a page and parse it as HTML, returning the final URL as well.
pub fn fetch_page(client: &Client, url: &str) -> Result<(String, Html)> {
    let response = client.get(url).send()?.error_for_status()?;
    let final_url = response.url().to_string();
    let text = response.text()?;
    Ok((final_url, Html::parse_document(&text)))
}
