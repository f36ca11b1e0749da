//! HTML rendering for mdsite: tree-to-HTML with syntax highlighting and
//! the out-of-band diagram lifecycle.

pub mod diagram;
pub mod highlight;
pub mod html;

pub use diagram::{CancelHandle, DiagramEngine, DiagramSlot, DiagramState, MermaidClientEngine};
pub use highlight::highlight_block;
pub use html::{RenderedHtml, escape_html, render_tree};
