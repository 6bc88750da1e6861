//! Serialization layer. Defaults to JSON via serde_json.
//!
//! Implement [`Serializer`] if the document should be stored some other way.

use crate::document::Document;
use serde_json::error::Category;

/// Converts a [`Document`] to and from bytes for persistence.
pub trait Serializer: Send + Sync {
    /// Encode the document.
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>, String>;

    /// Decode bytes back into a document.
    fn deserialize(&self, bytes: &[u8]) -> Result<Document, String>;
}

/// JSON serializer with optional pretty-printing.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact JSON (single line, no extra whitespace).
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// `true` if output is indented.
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, doc: &Document) -> Result<Vec<u8>, String> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(doc)
        } else {
            serde_json::to_vec(doc)
        };
        bytes.map_err(|e| e.to_string())
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Document, String> {
        serde_json::from_slice(bytes).map_err(|e| match e.classify() {
            Category::Syntax | Category::Eof => format!("not valid JSON: {e}"),
            Category::Data => format!("unexpected document shape: {e}"),
            Category::Io => e.to_string(),
        })
    }
}
