//! Typed chat payload envelope.
//!
//! Replaces the legacy markup for new messages. The variant is carried in an
//! explicit `kind` field so readers never have to guess from the text.
//! Legacy messages are upgraded with [`ChatPayload::from_legacy`].

use serde::{Deserialize, Serialize};

use crate::{
    MarkupPreview,
    errors::{ProtocolError, Result},
    markup,
};

/// Chat message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatPayload {
    /// Plain text message.
    Text {
        /// Message text.
        text: String,
    },
    /// Shared post with the sharer's comment.
    PostComment {
        /// Image URL of the shared post.
        image: String,
        /// Caption written by the sharer.
        caption: String,
        /// Caption of the original post.
        original_caption: String,
        /// The sharer's comment.
        comment: String,
    },
}

impl ChatPayload {
    /// Maximum encoded envelope size accepted by [`ChatPayload::decode`].
    pub const MAX_SIZE: usize = 64 * 1024;

    /// Upgrade a legacy text message.
    #[must_use]
    pub fn from_legacy(text: &str) -> Self {
        match markup::parse(text) {
            MarkupPreview::Plain { text } => Self::Text { text: text.to_owned() },
            MarkupPreview::PostComment { post, comment } => Self::PostComment {
                image: post.image.to_owned(),
                caption: post.caption.to_owned(),
                original_caption: post.original_caption.to_owned(),
                comment: comment.to_owned(),
            },
        }
    }

    /// Render as legacy text for clients that only read the markup.
    #[must_use]
    pub fn to_legacy(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            Self::PostComment { image, caption, original_caption, comment } => {
                markup::render(image, caption, original_caption, comment)
            },
        }
    }

    /// Encode as CBOR.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::CborEncode` if serialization fails
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(self, &mut buf)
            .map_err(|e| ProtocolError::CborEncode(e.to_string()))?;
        Ok(buf)
    }

    /// Decode from CBOR.
    ///
    /// The size check runs before any parsing.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::PayloadTooLarge` if `bytes` exceed [`Self::MAX_SIZE`]
    /// - `ProtocolError::CborDecode` if the bytes are not a valid envelope
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > Self::MAX_SIZE {
            return Err(ProtocolError::PayloadTooLarge { size: bytes.len(), max: Self::MAX_SIZE });
        }

        ciborium::de::from_reader(bytes).map_err(|e| ProtocolError::CborDecode(e.to_string()))
    }
}
