//! Minimal Wikipedia API client.
//!
//! This crate provides a focused client for the three endpoints needed to
//! surface article content:
//! - Random article title (REST `page/random/title`)
//! - Page summary (REST `page/summary/{title}`)
//! - Category member enumeration (Action API `generator=categorymembers`,
//!   paginated via `gcmcontinue`)

use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

const REST_BASE: &str = "https://en.wikipedia.org/api/rest_v1";
const ACTION_BASE: &str = "https://en.wikipedia.org/w/api.php";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Page size for category enumeration (the Action API maximum).
const CATEGORY_PAGE_LIMIT: &str = "500";

/// Errors that can occur when querying Wikipedia.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Provider returned an empty result set")]
    Empty,

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    Url(String),
}

/// A page summary with the fields needed to build a displayable fact.
#[derive(Debug, Clone)]
pub struct PageSummary {
    pub title: String,
    pub extract: String,
    pub description: Option<String>,
    /// Canonical desktop URL for attribution.
    pub url: Option<String>,
    pub categories: Vec<String>,
}

/// Wikipedia client.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    rest_base: String,
    action_base: String,
}

impl Client {
    /// Create a new client for English Wikipedia with conservative timeouts.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            rest_base: REST_BASE.to_string(),
            action_base: ACTION_BASE.to_string(),
        }
    }

    /// Override the REST endpoint base (useful for tests or other wikis).
    pub fn with_rest_base(mut self, base: impl Into<String>) -> Self {
        self.rest_base = base.into();
        self
    }

    /// Override the Action API endpoint (useful for tests or other wikis).
    pub fn with_action_base(mut self, base: impl Into<String>) -> Self {
        self.action_base = base.into();
        self
    }

    /// Fetch one random article title.
    pub async fn random_title(&self) -> Result<String, Error> {
        let url = format!("{}/page/random/title", self.rest_base);
        let body = self.get_text(&url).await?;
        parse_random_title(&body)
    }

    /// Fetch the summary of a page by title.
    ///
    /// The title is percent-encoded as a single path segment, so titles
    /// containing spaces, slashes, or non-ASCII characters are safe.
    pub async fn summary(&self, title: &str) -> Result<PageSummary, Error> {
        let mut url =
            Url::parse(&self.rest_base).map_err(|e| Error::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| Error::Url(format!("cannot be a base: {}", self.rest_base)))?
            .extend(["page", "summary", title]);

        let body = self.get_text(url.as_str()).await?;
        parse_summary(&body)
    }

    /// Enumerate the member page titles of a category, following the
    /// continuation token until the provider reports no more pages.
    ///
    /// `category` may be given with or without the `Category:` prefix.
    pub async fn category_members(&self, category: &str) -> Result<Vec<String>, Error> {
        let gcmtitle = if category.starts_with("Category:") {
            category.to_string()
        } else {
            format!("Category:{category}")
        };

        let mut members = Vec::new();
        let mut gcmcontinue: Option<String> = None;

        loop {
            let mut url =
                Url::parse(&self.action_base).map_err(|e| Error::Url(e.to_string()))?;
            {
                let mut pairs = url.query_pairs_mut();
                pairs
                    .append_pair("action", "query")
                    .append_pair("generator", "categorymembers")
                    .append_pair("gcmtitle", &gcmtitle)
                    .append_pair("gcmlimit", CATEGORY_PAGE_LIMIT)
                    .append_pair("format", "json");
                if let Some(token) = &gcmcontinue {
                    pairs.append_pair("gcmcontinue", token);
                }
            }

            let body = self.get_text(url.as_str()).await?;
            let (page, next) = parse_category_page(&body)?;
            members.extend(page);

            match next {
                Some(token) => gcmcontinue = Some(token),
                None => break,
            }
        }

        if members.is_empty() {
            return Err(Error::Empty);
        }
        Ok(members)
    }

    async fn get_text(&self, url: &str) -> Result<String, Error> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        response.text().await.map_err(|e| Error::Network(e.to_string()))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_random_title(body: &str) -> Result<String, Error> {
    let api: ApiRandomTitle =
        serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;
    api.items
        .into_iter()
        .next()
        .map(|item| item.title)
        .ok_or(Error::Empty)
}

fn parse_summary(body: &str) -> Result<PageSummary, Error> {
    let api: ApiSummary = serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;
    Ok(PageSummary {
        title: api.title,
        extract: api.extract,
        description: api.description,
        url: api.content_urls.and_then(|c| c.desktop).map(|d| d.page),
        categories: api.categories,
    })
}

fn parse_category_page(body: &str) -> Result<(Vec<String>, Option<String>), Error> {
    let api: ApiCategoryResponse =
        serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;
    let titles = api
        .query
        .map(|q| q.pages.into_values().map(|p| p.title).collect())
        .unwrap_or_default();
    let next = api.cont.and_then(|c| c.gcmcontinue);
    Ok((titles, next))
}

// ============================================================================
// Internal API types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiRandomTitle {
    #[serde(default)]
    items: Vec<ApiTitleItem>,
}

#[derive(Debug, Deserialize)]
struct ApiTitleItem {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiSummary {
    title: String,
    #[serde(default)]
    extract: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content_urls: Option<ApiContentUrls>,
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiContentUrls {
    #[serde(default)]
    desktop: Option<ApiDesktopUrls>,
}

#[derive(Debug, Deserialize)]
struct ApiDesktopUrls {
    page: String,
}

#[derive(Debug, Deserialize)]
struct ApiCategoryResponse {
    #[serde(rename = "continue")]
    cont: Option<ApiContinue>,
    query: Option<ApiCategoryQuery>,
}

#[derive(Debug, Deserialize)]
struct ApiContinue {
    gcmcontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCategoryQuery {
    #[serde(default)]
    pages: HashMap<String, ApiCategoryPage>,
}

#[derive(Debug, Deserialize)]
struct ApiCategoryPage {
    title: String,
}
