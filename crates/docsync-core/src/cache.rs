//! Local markdown mirror of the fetched articles

use std::path::PathBuf;

use docsync_fs::io;

use crate::{Error, Item, Result};

/// Directory holding one `<identifier>.md` file per article.
///
/// Only Added and Updated items are written; unchanged files are left alone.
#[derive(Debug, Clone)]
pub struct ArticleCache {
    dir: PathBuf,
}

impl ArticleCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File name used for `identifier` in the cache and in the remote index
    pub fn file_name(identifier: &str) -> Result<String> {
        validate_identifier(identifier)?;
        Ok(format!("{}.md", identifier))
    }

    pub fn path_for(&self, identifier: &str) -> Result<PathBuf> {
        Ok(self.dir.join(Self::file_name(identifier)?))
    }

    /// Write `item` to its cache file, replacing any previous version.
    pub fn write(&self, item: &Item) -> Result<PathBuf> {
        let path = self.path_for(&item.identifier)?;
        io::write_text(&path, &item.content)?;
        tracing::debug!(path = %path.display(), "cached article");
        Ok(path)
    }
}

fn validate_identifier(identifier: &str) -> Result<()> {
    let reason = if identifier.is_empty() {
        Some("identifier is empty")
    } else if identifier == "." || identifier == ".." {
        Some("identifier is a relative path component")
    } else if identifier.contains(['/', '\\', '\0']) {
        Some("identifier contains a path separator")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidIdentifier {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
