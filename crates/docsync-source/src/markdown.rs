//! HTML article bodies to markdown-flavoured text
//!
//! Shallow conversion: code blocks become fences and block-level
//! elements become line breaks. Everything else is reduced to its text.

use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str};

use crate::Result;

const DROPPED_ELEMENTS: &[&str] = &["script", "style", "head", "noscript"];

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "blockquote", "h1", "h2", "h3", "h4",
    "h5", "h6", "ul", "ol", "li", "table", "tr", "dl", "dt", "dd", "figure", "figcaption", "hr",
];

/// Convert an article body to markdown-like text.
pub fn html_to_markdown(html: &str) -> Result<String> {
    let mut handlers = Vec::new();
    for tag in DROPPED_ELEMENTS {
        handlers.push(element!(*tag, |el| {
            el.remove();
            Ok(())
        }));
    }
    handlers.push(element!("pre", |el| {
        el.before("\n```\n", ContentType::Text);
        el.after("\n```\n", ContentType::Text);
        Ok(())
    }));
    handlers.push(element!("br", |el| {
        el.replace("\n", ContentType::Text);
        Ok(())
    }));
    for tag in BLOCK_ELEMENTS {
        handlers.push(element!(*tag, |el| {
            el.before("\n", ContentType::Text);
            el.after("\n", ContentType::Text);
            Ok(())
        }));
    }
    // Unwrap everything last so the handlers above still see their elements
    handlers.push(element!("*", |el| {
        if !el.removed() {
            el.remove_and_keep_content();
        }
        Ok(())
    }));

    let text = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::default()
        },
    )?;

    Ok(tidy(&html_escape::decode_html_entities(&text)))
}

/// Strip trailing whitespace and collapse runs of blank lines into one.
fn tidy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paragraphs_become_separate_lines() {
        let md = html_to_markdown("<p>First <b>bold</b> line</p><p>Second</p>").unwrap();
        assert_eq!(md, "First bold line\n\nSecond");
    }

    #[test]
    fn pre_blocks_become_fences() {
        let md = html_to_markdown("<p>Run:</p><pre><code>npm install\nnpm start</code></pre>")
            .unwrap();
        assert!(md.starts_with("Run:"), "got: {:?}", md);
        assert!(md.contains("```\nnpm install\nnpm start\n```"), "got: {:?}", md);
    }

    #[test]
    fn entities_are_decoded() {
        let md = html_to_markdown("<p>Fish &amp; chips &lt;3</p>").unwrap();
        assert_eq!(md, "Fish & chips <3");
    }

    #[test]
    fn scripts_and_styles_are_dropped() {
        let md = html_to_markdown("<style>p{}</style><p>kept</p><script>alert(1)</script>").unwrap();
        assert_eq!(md, "kept");
    }

    #[test]
    fn line_breaks_are_preserved() {
        let md = html_to_markdown("line one<br>line two").unwrap();
        assert_eq!(md, "line one\nline two");
    }

    #[test]
    fn empty_body_is_empty() {
        assert_eq!(html_to_markdown("").unwrap(), "");
    }

    #[test]
    fn tidy_collapses_blank_runs() {
        assert_eq!(tidy("\n\na  \n\n\n\nb\n\n"), "a\n\nb");
    }
}
