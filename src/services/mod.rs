//! Service layer for pouetspy.
//!
//! - Page loading (`PageSource`: `HttpPageSource`, `ChromePageSource`)
//! - Record extraction (`SiteScraper`: `PouetScraper`)
//! - Download-link probing (`LinkChecker`: `HttpLinkChecker`)

#[cfg(feature = "browser")]
mod chrome;
mod links;
mod page;
mod pouet;
mod selectors;

#[cfg(feature = "browser")]
pub use chrome::ChromePageSource;
pub use links::{HttpLinkChecker, LinkChecker, LinkStatus};
pub use page::{HttpPageSource, Page, PageSource};
pub use pouet::{PouetScraper, SiteScraper, parse_listing, parse_production};
pub use selectors::{CompiledSelectors, parse_selector};
