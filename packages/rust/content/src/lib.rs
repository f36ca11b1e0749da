//! Content pipeline for mdsite: routing, document resolution, fetching,
//! and release notes data.

pub mod fetcher;
pub mod releases;
pub mod resolver;
pub mod router;

pub use fetcher::{ContentClient, DocSession, DocView, Ticket};
pub use releases::{CHANGELOG_RESOURCE, ReleasesData, active_version};
pub use resolver::{lookup, resolve};
pub use router::Route;
