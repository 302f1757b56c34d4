// src/services/pouet.rs

//! pouet.net scraper.
//!
//! Turns detail and listing pages into [`Production`] and [`Listing`]
//! records. Only the first page of a listing is read.

use scraper::ElementRef;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Comment, Listing, ListingEntry, Production};
use crate::services::{CompiledSelectors, Page, PageSource};
use crate::utils::{extract_prod_id, normalize_whitespace, resolve_url};

/// Extraction interface over the site layout.
pub trait SiteScraper {
    /// Full detail of the production at `link`.
    fn production(&mut self, link: &str) -> Result<Production>;

    /// Productions listed on a group page.
    fn group_listing(&mut self, group_id: &str) -> Result<Listing>;

    /// Productions listed for a platform.
    fn platform_listing(&mut self, platform: &str) -> Result<Listing>;
}

/// [`SiteScraper`] for pouet.net, reading pages from any [`PageSource`].
pub struct PouetScraper<P> {
    source: P,
    base_url: Url,
    selectors: CompiledSelectors,
}

impl<P: PageSource> PouetScraper<P> {
    pub fn new(source: P, base_url: Url, selectors: CompiledSelectors) -> Self {
        Self {
            source,
            base_url,
            selectors,
        }
    }

    /// `groups.php?which=<id>`
    pub fn group_url(&self, group_id: &str) -> Result<Url> {
        let mut url = self.base_url.join("groups.php")?;
        url.query_pairs_mut().append_pair("which", group_id);
        Ok(url)
    }

    /// `prodlist.php?platform[]=<name>`
    pub fn platform_url(&self, platform: &str) -> Result<Url> {
        let mut url = self.base_url.join("prodlist.php")?;
        url.query_pairs_mut().append_pair("platform[]", platform);
        Ok(url)
    }
}

impl<P: PageSource> SiteScraper for PouetScraper<P> {
    fn production(&mut self, link: &str) -> Result<Production> {
        log::debug!("Extract {link}");
        let page = self.source.load(&Url::parse(link)?)?;
        parse_production(&page, link, &self.selectors)
    }

    fn group_listing(&mut self, group_id: &str) -> Result<Listing> {
        let url = self.group_url(group_id)?;
        let page = self.source.load(&url)?;
        Ok(parse_listing(&page, &self.selectors))
    }

    fn platform_listing(&mut self, platform: &str) -> Result<Listing> {
        let url = self.platform_url(platform)?;
        let page = self.source.load(&url)?;
        Ok(parse_listing(&page, &self.selectors))
    }
}

/// Extract a production from its detail page.
///
/// `link` is the URL the production was requested under; it becomes the
/// production's canonical link and carries its id.
pub fn parse_production(
    page: &Page,
    link: &str,
    selectors: &CompiledSelectors,
) -> Result<Production> {
    let id = extract_prod_id(link)
        .ok_or_else(|| AppError::crawl(link, "production link has no `which` parameter"))?;

    let name = page
        .document
        .select(&selectors.prod_title)
        .next()
        .map(element_text)
        .ok_or_else(|| AppError::not_found("production title", &page.url))?;

    let download_link = page
        .document
        .select(&selectors.download_link)
        .next()
        .and_then(|el| el.value().attr(&selectors.attr_name))
        .map(|href| resolve_url(&page.url, href))
        .ok_or_else(|| AppError::not_found("main download link", &page.url))?;

    let comments = page
        .document
        .select(&selectors.comment)
        .map(|el| parse_comment(el, selectors, &page.url))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("{name}: {} comment(s)", comments.len());

    Ok(Production {
        id,
        name,
        link: link.to_string(),
        download_link,
        comments,
    })
}

fn parse_comment(
    el: ElementRef<'_>,
    selectors: &CompiledSelectors,
    url: &Url,
) -> Result<Comment> {
    let content = el
        .select(&selectors.comment_content)
        .next()
        .map(element_text)
        .ok_or_else(|| AppError::not_found("comment content", url))?;
    let author = el
        .select(&selectors.comment_author)
        .next()
        .map(element_text)
        .ok_or_else(|| AppError::not_found("comment author", url))?;
    let vote = el
        .select(&selectors.comment_vote)
        .next()
        .map(element_text)
        .unwrap_or_default();

    Ok(Comment {
        content,
        vote,
        author,
    })
}

/// Extract the `(name, link)` rows of a listing page, in page order.
pub fn parse_listing(page: &Page, selectors: &CompiledSelectors) -> Listing {
    let entries = page
        .document
        .select(&selectors.listing_entry)
        .filter_map(|el| {
            let href = el.value().attr(&selectors.attr_name)?;
            Some(ListingEntry {
                name: element_text(el),
                link: resolve_url(&page.url, href),
            })
        })
        .collect();

    Listing {
        page_title: page.title(),
        entries,
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    normalize_whitespace(&el.text().collect::<String>())
}
