//! Help-center API payloads

use docsync_core::Item;
use serde::Deserialize;

use crate::{Result, html_to_markdown, slugify};

/// Title used when an article has none
pub const UNTITLED: &str = "untitled";

/// One article as returned by the help-center API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Article {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    /// HTML body
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// One page of the articles listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePage {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub next_page: Option<String>,
}

impl Article {
    /// Trimmed title, `untitled` when missing or blank
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
    }

    /// Slug of the title, or the numeric id when the slug comes out empty
    pub fn identifier(&self) -> String {
        let slug = slugify(self.display_title());
        if slug.is_empty() {
            self.id.to_string()
        } else {
            slug
        }
    }

    /// Render the cached markdown document for this article.
    pub fn to_markdown(&self) -> Result<String> {
        let body = html_to_markdown(self.body.as_deref().unwrap_or(""))?;
        Ok(format!(
            "# {}\n\n{}\n\n---\n[Article URL]({})\n",
            self.display_title(),
            body,
            self.html_url.as_deref().unwrap_or("")
        ))
    }

    pub fn to_item(&self) -> Result<Item> {
        Ok(Item::new(self.identifier(), self.to_markdown()?))
    }
}
