//! Title to identifier mapping

use deunicode::deunicode;

/// Convert an article title to a file-safe slug.
///
/// Transliterates to ASCII, lowercases, and turns every run of
/// non-alphanumeric characters (apostrophes included) into a single dash.
/// Leading and trailing dashes are removed. State files written by the
/// python-slugify based tooling use the same identifiers.
pub fn slugify(title: &str) -> String {
    let ascii = deunicode(title);
    let mut result = String::with_capacity(ascii.len());
    let mut last_was_dash = true; // Start true to skip leading dashes

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}
