//! Document resolution.
//!
//! A static table maps logical document paths onto the physical `.md`
//! resources that serve them. The mapping is explicit rather than derived
//! from the filesystem so that logical paths and file layout can diverge
//! (and so unfinished sections can simply be left out).

use tracing::warn;

use mdsite_shared::{MdsiteError, Result, UnmappedPolicy};

/// Logical path to physical resource name.
///
/// `basic-features` itself has no entry on purpose: the section landing
/// page does not exist yet.
const DOC_MAP: &[(&str, &str)] = &[
    ("introduction", "introduction.md"),
    ("quick-start", "quick-start.md"),
    ("basic-features/api-modeling", "basic-features/api-modeling.md"),
    ("basic-features/openapi", "basic-features/openapi.md"),
    ("basic-features/jsonschema", "basic-features/jsonschema.md"),
    ("basic-features/storage", "basic-features/storage.md"),
    ("basic-features/auth", "basic-features/auth.md"),
    ("basic-features/dashboard", "basic-features/dashboard.md"),
    ("basic-features/mock", "basic-features/mock.md"),
    ("basic-features/statics", "basic-features/statics.md"),
    ("basic-features/report", "basic-features/report.md"),
    ("environments", "environments.md"),
    ("plugins", "plugins.md"),
    ("openapi", "openapi.md"),
    ("advanced-features/custom-converter", "advanced-features/converter.md"),
    ("advanced-features/cli", "advanced-features/cli.md"),
    ("advanced-features/parallel", "advanced-features/parallel.md"),
    ("advanced-features/hooks", "advanced-features/hooks.md"),
    ("advanced-features/middlewares", "advanced-features/middlewares.md"),
    ("advanced-features/stream", "advanced-features/stream.md"),
    ("advanced-features/platform", "advanced-features/platform.md"),
];

/// Fallback resource used under [`UnmappedPolicy::Fallback`].
const FALLBACK_RESOURCE: &str = "introduction.md";

/// Exact-match lookup of a logical path.
pub fn lookup(doc_path: &str) -> Option<&'static str> {
    DOC_MAP
        .iter()
        .find(|(path, _)| *path == doc_path)
        .map(|(_, resource)| *resource)
}

/// Resolve a logical document path to a physical resource name.
///
/// Unmapped paths either substitute the fallback resource or surface as an
/// error, depending on policy.
pub fn resolve(doc_path: &str, policy: UnmappedPolicy) -> Result<&'static str> {
    if let Some(resource) = lookup(doc_path) {
        return Ok(resource);
    }

    match policy {
        UnmappedPolicy::Fallback => {
            warn!(doc_path, "unmapped document path, serving fallback");
            Ok(FALLBACK_RESOURCE)
        }
        UnmappedPolicy::NotFound => Err(MdsiteError::UnmappedDocument {
            path: doc_path.to_string(),
        }),
    }
}

/// All known logical paths, in table order. Used for sidebar generation.
pub fn known_paths() -> impl Iterator<Item = &'static str> {
    DOC_MAP.iter().map(|(path, _)| *path)
}
