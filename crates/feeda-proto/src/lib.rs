//! Chat message formats for Feeda.
//!
//! Chat messages travel as plain text. A "shared post" is embedded in that
//! text with a small legacy markup (`[img]…[/img]`, `[faint]…[/faint]`,
//! `Comment: …`) that older clients produce and every client must keep
//! reading. This crate owns both sides of that format and the typed envelope
//! that supersedes it.
//!
//! # Components
//!
//! - [`markup::parse`]: total, pure scanner for the legacy markup
//! - [`MarkupPreview`]: borrowed view of a parsed message
//! - [`ChatPayload`]: typed, CBOR-encoded envelope for new messages

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod markup;
mod payload;

pub use errors::{ProtocolError, Result};
pub use markup::{MarkupPreview, SharedPost, TIMESTAMP_PLACEHOLDER};
pub use payload::ChatPayload;
