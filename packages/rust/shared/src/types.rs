//! Core domain types for mdsite documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A fetched document, held in memory only for the current view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Physical resource name the text was fetched from (e.g. `introduction.md`).
    pub resource: String,
    /// Raw UTF-8 markup text.
    pub text: String,
    /// When the document was fetched.
    pub fetched_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// VersionEntry
// ---------------------------------------------------------------------------

/// A changelog version derived from one second-level heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Full heading text as written.
    pub title: String,
    /// Slug identifier, deterministic from the title. Duplicate headings
    /// collide; that is accepted, not corrected.
    pub id: String,
    /// Extracted semantic-version token, when the title carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Extracted `YYYY.M.D` date prefix, when the title carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// True only for the first entry encountered in the document.
    pub is_new: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_entry_serialization_skips_empty_fields() {
        let entry = VersionEntry {
            title: "2024.5.1-v1.2.0 First Stable".into(),
            id: "202451-v120-first-stable".into(),
            version: Some("v1.2.0 First Stable".into()),
            date: Some("2024.5.1".into()),
            is_new: true,
        };
        let json = serde_json::to_string(&entry).expect("serialize");
        let parsed: VersionEntry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, entry);

        let bare = VersionEntry {
            title: "Unreleased".into(),
            id: "unreleased".into(),
            version: None,
            date: None,
            is_new: false,
        };
        let json = serde_json::to_string(&bare).expect("serialize");
        assert!(!json.contains("version"));
        assert!(!json.contains("date"));
    }

    #[test]
    fn document_roundtrip() {
        let doc = Document {
            resource: "introduction.md".into(),
            text: "# Hello".into(),
            fetched_at: Utc::now(),
        };
        let json = serde_json::to_string(&doc).expect("serialize");
        let parsed: Document = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.resource, "introduction.md");
    }
}
