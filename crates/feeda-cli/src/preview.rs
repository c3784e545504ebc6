//! Output formats for the `parse` subcommand.

use feeda_proto::{ChatPayload, MarkupPreview, markup};

/// How a parsed message is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Preview as JSON.
    #[default]
    Json,
    /// Preview as Rust debug output.
    Debug,
    /// Upgraded typed payload as JSON.
    Payload,
    /// Upgraded typed payload as hex-encoded CBOR.
    Cbor,
}

/// Errors from formatting a preview.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// JSON serialization failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    /// Envelope encoding failed.
    #[error(transparent)]
    Protocol(#[from] feeda_proto::ProtocolError),
}

/// Parse `text` and format the result.
pub fn render(text: &str, format: Format) -> Result<String, PreviewError> {
    let output = match format {
        Format::Json => serde_json::to_string_pretty(&markup::parse(text))?,
        Format::Debug => format!("{:#?}", markup::parse(text)),
        Format::Payload => serde_json::to_string_pretty(&ChatPayload::from_legacy(text))?,
        Format::Cbor => hex(&ChatPayload::from_legacy(text).encode()?),
    };
    Ok(output)
}

/// Short human summary, for logging.
pub fn summary(preview: &MarkupPreview<'_>) -> &'static str {
    if preview.is_post_comment() { "post_comment" } else { "plain" }
}

fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHARED: &str = "[img]https://x/a.jpg[/img]\n[faint]Sunset (Orig)[/faint]\nComment: wow";

    #[test]
    fn json_preview_is_tagged() {
        let output = render(SHARED, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["kind"], "post_comment");
        assert_eq!(value["post"]["caption"], "Sunset");
        assert_eq!(value["post"]["timestamp"], "2 days ago");
        assert_eq!(value["comment"], "wow");
    }

    #[test]
    fn plain_text_payload() {
        let output = render("hello", Format::Payload).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["kind"], "text");
        assert_eq!(value["text"], "hello");
    }

    #[test]
    fn cbor_output_is_hex() {
        let output = render("hello", Format::Cbor).unwrap();
        assert!(output.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(output.len() % 2, 0);
    }

    #[test]
    fn summary_names_variant() {
        assert_eq!(summary(&markup::parse(SHARED)), "post_comment");
        assert_eq!(summary(&markup::parse("hi")), "plain");
    }
}
