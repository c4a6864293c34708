//! Paginated help-center client

use std::time::Duration;

use docsync_core::{ContentSource, Item, SourceConfig};
use reqwest::blocking::Client;

use crate::{Article, ArticlePage, Result, SourceError};

/// Blocking client for the help-center articles endpoint.
///
/// No retries: a failed page fails the whole fetch.
#[derive(Debug, Clone)]
pub struct HelpCenterClient {
    http: Client,
    config: SourceConfig,
}

impl HelpCenterClient {
    pub fn new(config: SourceConfig) -> Result<Self> {
        if config.per_page == 0 {
            return Err(SourceError::Config("per_page must be at least 1".into()));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("docsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn articles_url(&self) -> String {
        format!(
            "{}/api/v2/help_center/{}/articles.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.locale
        )
    }

    /// Fetch a single page, 1-based.
    pub fn fetch_page(&self, page: u32) -> Result<ArticlePage> {
        let url = self.articles_url();
        tracing::debug!(%url, page, "fetching article page");

        let response = self
            .http
            .get(&url)
            .query(&[("page", page), ("per_page", self.config.per_page)])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json()?)
    }

    /// Fetch every article, honouring `max_articles`.
    pub fn fetch_articles(&self) -> Result<Vec<Article>> {
        collect_pages(|page| self.fetch_page(page), self.config.max_articles)
    }
}

/// Walk pages from 1 until one is empty, has no `next_page`, or the
/// article limit is reached. `max_articles == 0` means no limit.
pub fn collect_pages(
    mut fetch_page: impl FnMut(u32) -> Result<ArticlePage>,
    max_articles: usize,
) -> Result<Vec<Article>> {
    let mut all = Vec::new();
    let mut page = 1;

    loop {
        let ArticlePage {
            articles,
            next_page,
        } = fetch_page(page)?;
        if articles.is_empty() {
            break;
        }
        all.extend(articles);

        if max_articles > 0 && all.len() >= max_articles {
            all.truncate(max_articles);
            break;
        }
        if next_page.is_none() {
            break;
        }
        page += 1;
    }

    tracing::info!(articles = all.len(), pages = page, "fetched help-center articles");
    Ok(all)
}

/// [`ContentSource`] backed by a [`HelpCenterClient`].
#[derive(Debug, Clone)]
pub struct HelpCenterSource {
    client: HelpCenterClient,
}

impl HelpCenterSource {
    pub fn new(client: HelpCenterClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Ok(Self::new(HelpCenterClient::new(config.clone())?))
    }
}

impl ContentSource for HelpCenterSource {
    type Error = SourceError;

    fn fetch(&mut self) -> Result<Vec<Item>> {
        self.client
            .fetch_articles()?
            .iter()
            .map(Article::to_item)
            .collect()
    }
}
