//! Helpers for HTML text extraction, log formatting and output directories.

use scraper::{ElementRef, Node};
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// The element's text when it has exactly one child carrying a string.
///
/// A single text child yields that text, and so does a single comment child
/// (its text without the `<!--`/`-->` markers). A single element child is
/// followed down recursively. No children or several children yield `None`.
///
/// # Examples
///
/// ```ignore
/// // <h1>Sale!</h1>           -> Some("Sale!")
/// // <h1><b>Sale!</b></h1>    -> Some("Sale!")
/// // <h1><!--Sale!--></h1>    -> Some("Sale!")
/// // <h1>Big <b>Sale</b></h1> -> None
/// ```
pub fn element_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }

    match only.value() {
        Node::Text(text) => {
            let text: &str = text;
            Some(text.to_owned())
        }
        Node::Comment(comment) => {
            let comment: &str = comment;
            Some(comment.to_owned())
        }
        Node::Element(_) => ElementRef::wrap(only).and_then(element_string),
        _ => None,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary) with
/// `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a scratch file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let scratch_path = path.join("..__write_check__");
    match stdfs::File::create(&scratch_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first_h1(html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let selector = Selector::parse("h1").unwrap();
        let h1 = document.select(&selector).next().unwrap();
        element_string(h1)
    }

    #[test]
    fn test_element_string_single_text() {
        assert_eq!(first_h1("<h1>Sale!</h1>"), Some("Sale!".to_string()));
    }

    #[test]
    fn test_element_string_follows_single_child() {
        assert_eq!(
            first_h1("<h1><a href=\"/x\"><b>Deep</b></a></h1>"),
            Some("Deep".to_string())
        );
    }

    #[test]
    fn test_element_string_mixed_content_is_none() {
        assert_eq!(first_h1("<h1>Big <b>Sale</b></h1>"), None);
    }

    #[test]
    fn test_element_string_lone_comment() {
        assert_eq!(first_h1("<h1><!--Sale!--></h1>"), Some("Sale!".to_string()));
    }

    #[test]
    fn test_element_string_comment_beside_text_is_none() {
        assert_eq!(first_h1("<h1><!--x-->Sale!</h1>"), None);
    }

    #[test]
    fn test_element_string_empty_is_none() {
        assert_eq!(first_h1("<h1></h1>"), None);
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let result = truncate_for_log("héllo", 2);
        assert_eq!(result, "h…(+5 bytes)");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("Data").join("out");
        ensure_writable_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert!(!nested.join("..__write_check__").exists());
    }
}
