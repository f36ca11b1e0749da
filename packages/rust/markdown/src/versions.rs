//! Version extraction from changelog documents.
//!
//! Every second-level heading in a changelog is a release entry. Titles
//! optionally carry a `YYYY.M.D-` date prefix and a `vX.Y.Z` version token
//! somewhere in the text; both are pulled out when present.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use mdsite_shared::VersionEntry;

use crate::anchors::slugify;

static HEADINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").expect("valid regex"));

static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(v\d+\.\d+\.\d+.*?)$").expect("valid regex"));

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}\.\d{1,2}\.\d{1,2})-").expect("valid regex"));

/// Scan changelog text for release entries, in document order.
///
/// Only the first entry is flagged as new; a document with no level-2
/// headings yields an empty list.
pub fn extract_versions(text: &str) -> Vec<VersionEntry> {
    let entries: Vec<VersionEntry> = HEADINGS
        .captures_iter(text)
        .enumerate()
        .map(|(index, captures)| {
            let title = captures[1].trim().to_string();
            VersionEntry {
                id: slugify(&title),
                version: version_token(&title),
                date: date_prefix(&title),
                is_new: index == 0,
                title,
            }
        })
        .collect();

    debug!(count = entries.len(), "extracted changelog versions");
    entries
}

/// The `vX.Y.Z...` tail of a title, when present.
pub fn version_token(title: &str) -> Option<String> {
    VERSION_TOKEN
        .captures(title)
        .map(|c| c[1].trim().to_string())
}

/// The leading `YYYY.M.D` date of a title, when present.
pub fn date_prefix(title: &str) -> Option<String> {
    DATE_PREFIX.captures(title).map(|c| c[1].to_string())
}

/// Append an explicit `{#slug}` anchor to every release heading so rendered
/// ids line up with the sidebar entries from [`extract_versions`].
pub fn annotate_headings(text: &str) -> String {
    HEADINGS
        .replace_all(text, |captures: &regex::Captures<'_>| {
            let title = captures[1].trim();
            format!("## {} {{#{}}}", &captures[1], slugify(title))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANGELOG: &str = "\
# Changelog

## 2024.5.1-v1.2.0 First Stable

- shipped

## 2024.3.12-v1.1.0 Beta

- earlier

## Unreleased ideas

- someday
";

    #[test]
    fn extracts_entries_in_document_order() {
        let entries = extract_versions(CHANGELOG);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title, "2024.5.1-v1.2.0 First Stable");
        assert_eq!(entries[2].title, "Unreleased ideas");
    }

    #[test]
    fn only_first_entry_is_new() {
        let entries = extract_versions(CHANGELOG);
        assert!(entries[0].is_new);
        assert!(entries.iter().skip(1).all(|e| !e.is_new));
    }

    #[test]
    fn version_and_date_extracted_when_present() {
        let entries = extract_versions(CHANGELOG);
        assert_eq!(entries[0].version.as_deref(), Some("v1.2.0 First Stable"));
        assert_eq!(entries[0].date.as_deref(), Some("2024.5.1"));
        assert!(entries[2].version.is_none());
        assert!(entries[2].date.is_none());
    }

    #[test]
    fn ids_follow_the_slug_rule() {
        let entries = extract_versions(CHANGELOG);
        assert_eq!(entries[0].id, "202451-v120-first-stable");
        assert_eq!(entries[2].id, "unreleased-ideas");
    }

    #[test]
    fn other_heading_levels_are_ignored() {
        let entries = extract_versions("# Top\n\n### Deep\n\n## Only This\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Only This");
    }

    #[test]
    fn empty_document_yields_no_entries() {
        assert!(extract_versions("").is_empty());
        assert!(extract_versions("no headings here").is_empty());
    }

    #[test]
    fn version_token_requires_full_triple() {
        assert!(version_token("v1.2 Short").is_none());
        assert_eq!(
            version_token("Release v2.0.1-rc.1"),
            Some("v2.0.1-rc.1".into())
        );
    }

    #[test]
    fn date_prefix_requires_leading_position() {
        assert!(date_prefix("released 2024.5.1-today").is_none());
        assert_eq!(date_prefix("2024.12.31-eve"), Some("2024.12.31".into()));
    }

    #[test]
    fn duplicate_titles_collide_on_id() {
        let entries = extract_versions("## Hotfix\n\ntext\n\n## Hotfix\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, entries[1].id);
    }

    #[test]
    fn annotate_headings_appends_matching_anchors() {
        let annotated = annotate_headings("## Unreleased ideas\n\nbody\n");
        assert!(annotated.contains("## Unreleased ideas {#unreleased-ideas}"));
        // body untouched
        assert!(annotated.contains("\nbody\n"));
    }

    #[test]
    fn annotate_headings_ids_match_extraction() {
        let entries = extract_versions(CHANGELOG);
        let annotated = annotate_headings(CHANGELOG);
        for entry in entries {
            assert!(annotated.contains(&format!("{{#{}}}", entry.id)));
        }
    }
}
