//! Fuzz target for the legacy shared-post markup scanner
//!
//! # Strategy
//!
//! - Raw text: arbitrary UTF-8, including every line terminator
//! - Marker soup: fragments of the three markers glued together in any order
//!
//! # Invariants
//!
//! - NEVER panic
//! - Every extracted field borrows from the input
//! - No extracted field spans a line break
//! - A plain result echoes the input unchanged

#![no_main]

use arbitrary::Arbitrary;
use feeda_proto::{markup, MarkupPreview};
use libfuzzer_sys::fuzz_target;

const LINE_BREAKS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

#[derive(Debug, Clone, Arbitrary)]
enum Input {
    Raw(String),
    Soup(Vec<Fragment>),
}

#[derive(Debug, Clone, Arbitrary)]
enum Fragment {
    ImgOpen,
    ImgClose,
    FaintOpen,
    FaintClose,
    CommentPrefix,
    Separator,
    CloseParen,
    LineBreak(u8),
    Text(String),
}

impl Fragment {
    fn push_to(&self, out: &mut String) {
        match self {
            Self::ImgOpen => out.push_str("[img]"),
            Self::ImgClose => out.push_str("[/img]"),
            Self::FaintOpen => out.push_str("[faint]"),
            Self::FaintClose => out.push_str("[/faint]"),
            Self::CommentPrefix => out.push_str("Comment: "),
            Self::Separator => out.push_str(" ("),
            Self::CloseParen => out.push(')'),
            Self::LineBreak(n) => out.push(LINE_BREAKS[usize::from(*n) % LINE_BREAKS.len()]),
            Self::Text(text) => out.push_str(text),
        }
    }
}

fn check_field(text: &str, field: &str) {
    let start = text.as_ptr() as usize;
    let at = field.as_ptr() as usize;
    assert!(at >= start && at + field.len() <= start + text.len(), "field not borrowed from input");
    assert!(!field.contains(LINE_BREAKS), "field spans a line break: {field:?}");
}

fuzz_target!(|input: Input| {
    let text = match input {
        Input::Raw(text) => text,
        Input::Soup(fragments) => {
            let mut text = String::new();
            for fragment in &fragments {
                fragment.push_to(&mut text);
            }
            text
        },
    };

    match markup::parse(&text) {
        MarkupPreview::Plain { text: echoed } => assert_eq!(echoed, text),
        MarkupPreview::PostComment { post, comment } => {
            check_field(&text, post.image);
            check_field(&text, post.caption);
            check_field(&text, post.original_caption);
            check_field(&text, comment);
            assert_eq!(post.timestamp, feeda_proto::TIMESTAMP_PLACEHOLDER);
        },
    }
});
