//! Legacy shared-post markup.
//!
//! Older clients share a post into a chat by sending a single text message:
//!
//! ```text
//! [img]https://cdn.example/p/42.jpg[/img]
//! [faint]Sunset view (Original sunset caption)[/faint]
//! Comment: Beautiful!
//! ```
//!
//! Already-stored messages use this shape, so the scanner here must keep
//! matching exactly what those clients matched. New messages should use
//! [`crate::ChatPayload`] instead.
//!
//! # Matching rules
//!
//! Each marker is located independently with its own first-match scan over
//! the whole message; markers may appear in any order and later duplicates are
//! ignored. A wildcard never crosses a line break (`\n`, `\r`, U+2028,
//! U+2029). A message is a post comment only when all three markers are
//! present; anything else is plain text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Timestamp shown on every parsed post preview.
///
/// Legacy messages carry no timestamp; readers have always displayed this
/// fixed string.
pub const TIMESTAMP_PLACEHOLDER: &str = "2 days ago";

/// Separator between the caption and the original caption in the `[faint]`
/// section.
const CAPTION_SEPARATOR: &str = " (";

static IMAGE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\[img\]([^\n\r\x{2028}\x{2029}]*?)\[/img\]"));

static DETAILS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\[faint\]([^\n\r\x{2028}\x{2029}]*?)\[/faint\]"));

static COMMENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"Comment: ([^\n\r\x{2028}\x{2029}]*)"));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invariant: markup patterns are valid regular expressions")
}

/// Shared post extracted from a message. Borrows from the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SharedPost<'a> {
    /// Image URL from the `[img]` section.
    pub image: &'a str,
    /// Caption written by the sharer.
    pub caption: &'a str,
    /// Caption of the original post. Equals `caption` when the message has
    /// none.
    pub original_caption: &'a str,
    /// Always [`TIMESTAMP_PLACEHOLDER`].
    pub timestamp: &'static str,
}

/// Result of scanning one chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkupPreview<'a> {
    /// Ordinary message, rendered as-is.
    Plain {
        /// The original message text.
        text: &'a str,
    },
    /// Shared post with the sharer's comment.
    PostComment {
        /// The shared post.
        post: SharedPost<'a>,
        /// Free-text comment (everything after `Comment: ` up to the line
        /// end, whitespace preserved).
        comment: &'a str,
    },
}

impl<'a> MarkupPreview<'a> {
    /// Whether the message carried a shared post.
    #[must_use]
    pub fn is_post_comment(&self) -> bool {
        matches!(self, Self::PostComment { .. })
    }

    /// The shared post. `None` for plain messages.
    #[must_use]
    pub fn post(&self) -> Option<&SharedPost<'a>> {
        match self {
            Self::PostComment { post, .. } => Some(post),
            Self::Plain { .. } => None,
        }
    }

    /// The sharer's comment. `None` for plain messages.
    #[must_use]
    pub fn comment(&self) -> Option<&'a str> {
        match self {
            Self::PostComment { comment, .. } => Some(comment),
            Self::Plain { .. } => None,
        }
    }
}

/// Scan a chat message for an embedded shared post.
///
/// Total and pure: any input, including empty text, unbalanced or repeated
/// markers, yields a well-formed preview.
#[must_use]
pub fn parse(text: &str) -> MarkupPreview<'_> {
    if text.is_empty() {
        return MarkupPreview::Plain { text };
    }

    let (Some(image), Some(details), Some(comment)) = (
        first_capture(&IMAGE_MARKER, text),
        first_capture(&DETAILS_MARKER, text),
        first_capture(&COMMENT_MARKER, text),
    ) else {
        return MarkupPreview::Plain { text };
    };

    let (caption, original_caption) = split_details(details);

    MarkupPreview::PostComment {
        post: SharedPost { image, caption, original_caption, timestamp: TIMESTAMP_PLACEHOLDER },
        comment,
    }
}

/// Render a shared post and comment in the legacy markup.
///
/// The inverse of [`parse`] for inputs that contain no markers, line breaks,
/// or `" ("` inside the caption.
#[must_use]
pub fn render(image: &str, caption: &str, original_caption: &str, comment: &str) -> String {
    format!(
        "[img]{image}[/img]\n[faint]{caption}{CAPTION_SEPARATOR}{original_caption})[/faint]\nComment: {comment}"
    )
}

fn first_capture<'t>(marker: &Regex, text: &'t str) -> Option<&'t str> {
    marker.captures(text)?.get(1).map(|m| m.as_str())
}

/// Split `"caption (original)"` at the first separator.
fn split_details(details: &str) -> (&str, &str) {
    match details.split_once(CAPTION_SEPARATOR) {
        Some((caption, rest)) => (caption, rest.strip_suffix(')').unwrap_or(rest)),
        None => (details, details),
    }
}
