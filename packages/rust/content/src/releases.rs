//! Release notes view data.
//!
//! The releases page is driven entirely by one changelog document: version
//! entries for the sidebar come from its level-2 headings, and the rendered
//! body gets explicit anchors so sidebar links land on the right section.

use tracing::instrument;

use mdsite_markdown::{annotate_headings, extract_versions};
use mdsite_shared::{Document, Result, VersionEntry};

use crate::fetcher::ContentClient;

/// Physical resource the changelog is served from.
pub const CHANGELOG_RESOURCE: &str = "changelogs.md";

/// Vertical probe offset added to the scroll position before matching
/// headings, so a section activates slightly before it reaches the top.
const SCROLL_PROBE_OFFSET: f64 = 100.0;

/// Everything the releases view needs.
#[derive(Debug)]
pub struct ReleasesData {
    /// The fetched changelog, with anchors appended to release headings.
    pub document: Document,
    /// Sidebar entries in document order.
    pub versions: Vec<VersionEntry>,
}

impl ReleasesData {
    /// Fetch and prepare the changelog.
    #[instrument(skip(client))]
    pub async fn load(client: &ContentClient) -> Result<ReleasesData> {
        let mut document = client.fetch(CHANGELOG_RESOURCE).await?;
        let versions = extract_versions(&document.text);
        document.text = annotate_headings(&document.text);
        Ok(ReleasesData { document, versions })
    }

    /// The initially active sidebar entry: the first version, if any.
    pub fn initial_active(&self) -> Option<&str> {
        self.versions.first().map(|v| v.id.as_str())
    }
}

/// Which version heading the viewport is currently inside.
///
/// `offsets` pairs each version id with its heading's vertical offset, in
/// document order. An entry wins when the probe position sits between its
/// offset and the next entry's; the last entry also wins whenever nothing
/// later brackets the probe, so scrolling past the end keeps it active.
pub fn active_version(offsets: &[(String, f64)], scroll_top: f64) -> Option<&str> {
    let probe = scroll_top + SCROLL_PROBE_OFFSET;

    for (index, (id, offset)) in offsets.iter().enumerate() {
        match offsets.get(index + 1) {
            None => return Some(id),
            Some((_, next_offset)) => {
                if *offset <= probe && *next_offset > probe {
                    return Some(id);
                }
            }
        }
    }
    None
}
