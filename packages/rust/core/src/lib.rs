//! Site assembly for mdsite: page shells and the route-to-HTML pipeline.

pub mod pages;
pub mod pipeline;

pub use pages::{Page, document_shell};
pub use pipeline::Site;
