//! Help-center article source for docsync
//!
//! Pages through a Zendesk-style help-center API, converts each article body
//! to markdown and hands the result to the core as
//! [`Item`](docsync_core::Item)s.

pub mod article;
pub mod client;
pub mod error;
pub mod markdown;
pub mod slug;

pub use article::{Article, ArticlePage};
pub use client::{HelpCenterClient, HelpCenterSource};
pub use error::{Result, SourceError};
pub use markdown::html_to_markdown;
pub use slug::slugify;
