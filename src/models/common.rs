//! Common types shared across Freshdesk API models.
//!
//! This module defines pagination, list wrappers, and other
//! shared types used by multiple API endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::FreshdeskError;

/// Deserializes an explicit JSON `null` as the type's default.
///
/// Freshdesk sends `null` instead of `[]` or `{}` for some collections.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Default page size used by Freshdesk list endpoints.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Largest page size Freshdesk accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Page selection for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageParams {
    /// 1-based page number.
    pub page: u32,

    /// Number of records per page (1..=100).
    pub per_page: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageParams {
    /// Builds page parameters from optional tool input, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Validation` if the page is 0 or the page size
    /// is outside 1..=100.
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Result<Self, FreshdeskError> {
        let params = Self {
            page: page.unwrap_or(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE),
        };

        if params.page < 1 {
            return Err(FreshdeskError::validation(
                "page number must be greater than 0",
            ));
        }
        if params.per_page < 1 || params.per_page > MAX_PER_PAGE {
            return Err(FreshdeskError::validation(format!(
                "page size must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }

        Ok(params)
    }
}

/// Neighbouring pages advertised by the `Link` response header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Next page number, if there is one.
    pub next: Option<u32>,

    /// Previous page number, if there is one.
    pub prev: Option<u32>,
}

impl Pagination {
    /// Parses a `Link` header such as
    /// `<https://acme.freshdesk.com/api/v2/tickets?page=2>; rel="next"`.
    ///
    /// Entries without a recognizable URL, relation or `page` parameter are
    /// skipped. Relations other than `next` and `prev` are ignored.
    pub fn from_link_header(header: &str) -> Self {
        let mut pagination = Self::default();

        for link in header.split(',') {
            let Some((target, params)) = link.split_once(';') else {
                continue;
            };

            let target = target.trim();
            let Some(target) = target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
                continue;
            };

            let rel = params.split(';').find_map(|param| {
                let (key, value) = param.trim().split_once('=')?;
                (key.trim() == "rel").then(|| value.trim().trim_matches('"'))
            });

            let page = Url::parse(target).ok().and_then(|url| {
                url.query_pairs()
                    .find(|(key, _)| key == "page")
                    .and_then(|(_, value)| value.parse::<u32>().ok())
            });

            match (rel, page) {
                (Some("next"), Some(page)) => pagination.next = Some(page),
                (Some("prev"), Some(page)) => pagination.prev = Some(page),
                _ => {}
            }
        }

        pagination
    }
}

/// One page of a list endpoint together with its pagination info.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Records on this page.
    pub items: Vec<T>,

    /// The page that was requested.
    pub current_page: u32,

    /// The page size that was requested.
    pub per_page: u32,

    /// Neighbouring pages, from the `Link` header.
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Response body of the `/search/*` endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SearchResults<T> {
    /// Matching records (at most 30 per page).
    #[serde(default)]
    pub results: Vec<T>,

    /// Total number of matches across all pages.
    #[serde(default)]
    pub total: u64,
}
