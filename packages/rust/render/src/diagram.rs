//! Diagram rendering lifecycle.
//!
//! Diagram code blocks are rendered out-of-band: the HTML renderer emits a
//! placeholder and a [`DiagramSlot`], and the page pipeline drives each slot
//! to a terminal [`DiagramState`]. Rendering starts after a short settle
//! delay and can be cancelled (a navigated-away page abandons its slots);
//! a cancelled slot produces no output at all, while a failed engine never
//! fails the page, it degrades to a labeled box showing the escaped source.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};
use uuid::Uuid;

use mdsite_shared::Result;

use crate::html::escape_html;

/// Settle delay before the engine runs.
const RENDER_DELAY: Duration = Duration::from_millis(100);

/// Terminal outcome of driving a diagram slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramState {
    /// Engine output, ready to splice into the page.
    Rendered(String),
    /// Engine failed; fallback markup instead.
    Fallback(String),
    /// Cancelled before or during rendering. No markup of any kind: the
    /// slot's placeholder must simply disappear.
    Cancelled,
}

/// Cooperative cancellation for an in-flight diagram.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Renders diagram source to display markup.
///
/// Engines are used generically, never boxed, so the async method needs no
/// Send bound plumbing.
#[allow(async_fn_in_trait)]
pub trait DiagramEngine {
    async fn render(&self, id: &str, source: &str) -> Result<String>;
}

/// One diagram awaiting rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSlot {
    /// Unique element id, also passed to the engine.
    pub id: String,
    /// Raw diagram source from the code block.
    pub source: String,
}

impl DiagramSlot {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            id: format!("diagram-{}", Uuid::now_v7()),
            source: source.into(),
        }
    }

    /// Placeholder the HTML renderer emits in place of the diagram.
    pub fn placeholder(&self) -> String {
        format!("<div class=\"diagram\" id=\"{}\"></div>", self.id)
    }

    /// Drive the slot to a terminal state.
    ///
    /// Cancellation is checked after the settle delay and again after the
    /// engine returns. A cancelled slot publishes nothing: not the engine
    /// output, not the fallback box, not an error.
    pub async fn run<E: DiagramEngine>(&self, engine: &E, cancel: &CancelHandle) -> DiagramState {
        sleep(RENDER_DELAY).await;
        if cancel.is_cancelled() {
            debug!(id = %self.id, "diagram cancelled before rendering");
            return DiagramState::Cancelled;
        }

        match engine.render(&self.id, &self.source).await {
            Ok(_) | Err(_) if cancel.is_cancelled() => {
                debug!(id = %self.id, "diagram cancelled during rendering");
                DiagramState::Cancelled
            }
            Ok(markup) => DiagramState::Rendered(markup),
            Err(error) => {
                warn!(id = %self.id, %error, "diagram rendering failed, using fallback");
                DiagramState::Fallback(self.fallback_markup())
            }
        }
    }

    /// Labeled box carrying the escaped source, shown when rendering is
    /// impossible. The document itself still renders normally.
    pub fn fallback_markup(&self) -> String {
        format!(
            "<div class=\"diagram-fallback\">\
             <div class=\"diagram-fallback-message\">Diagram could not be rendered; showing source:</div>\
             <pre class=\"diagram-source\">{}</pre>\
             </div>",
            escape_html(&self.source)
        )
    }
}

/// Engine that defers actual drawing to the client: emits the source inside
/// a `<pre class="mermaid">` for in-browser hydration. Rejects source whose
/// first word is not a known diagram kind, so malformed blocks degrade to
/// the fallback box instead of breaking hydration.
#[derive(Debug, Default, Clone)]
pub struct MermaidClientEngine;

const DIAGRAM_KINDS: &[&str] = &[
    "graph",
    "flowchart",
    "sequenceDiagram",
    "classDiagram",
    "stateDiagram",
    "stateDiagram-v2",
    "erDiagram",
    "gantt",
    "pie",
    "journey",
    "gitGraph",
    "mindmap",
    "timeline",
];

impl DiagramEngine for MermaidClientEngine {
    async fn render(&self, id: &str, source: &str) -> Result<String> {
        let first_word = source.split_whitespace().next().unwrap_or("");
        if !DIAGRAM_KINDS.contains(&first_word) {
            return Err(mdsite_shared::MdsiteError::Render(format!(
                "unknown diagram kind '{first_word}'"
            )));
        }
        Ok(format!(
            "<pre class=\"mermaid\" id=\"{id}\">{}</pre>",
            escape_html(source)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn valid_source_renders() {
        let slot = DiagramSlot::new("graph TD\n  A --> B");
        let state = slot.run(&MermaidClientEngine, &CancelHandle::default()).await;

        let DiagramState::Rendered(markup) = state else {
            panic!("expected rendered state, got {state:?}");
        };
        assert!(markup.contains("class=\"mermaid\""));
        assert!(markup.contains(&slot.id));
        // Source is escaped inside the markup.
        assert!(markup.contains("A --&gt; B"));
    }

    #[tokio::test]
    async fn invalid_source_degrades_to_fallback() {
        let slot = DiagramSlot::new("<script>not a diagram</script>");
        let state = slot.run(&MermaidClientEngine, &CancelHandle::default()).await;

        let DiagramState::Fallback(markup) = state else {
            panic!("expected fallback state, got {state:?}");
        };
        assert!(markup.contains("diagram-fallback"));
        assert!(markup.contains("&lt;script&gt;"));
        assert!(!markup.contains("<script>"));
    }

    #[tokio::test]
    async fn cancellation_before_delay_produces_no_output() {
        let slot = DiagramSlot::new("graph TD\n  A --> B");
        let cancel = CancelHandle::default();
        cancel.cancel();

        let state = slot.run(&MermaidClientEngine, &cancel).await;
        // No markup of any kind, not even the fallback box.
        assert_eq!(state, DiagramState::Cancelled);
    }

    /// Engine that flips the cancel flag while its render is in flight,
    /// standing in for a page torn down mid-render.
    struct CancellingEngine(CancelHandle);

    impl DiagramEngine for CancellingEngine {
        async fn render(&self, id: &str, source: &str) -> mdsite_shared::Result<String> {
            self.0.cancel();
            Ok(format!("<pre id=\"{id}\">{}</pre>", escape_html(source)))
        }
    }

    #[tokio::test]
    async fn cancellation_during_render_discards_engine_output() {
        let slot = DiagramSlot::new("graph TD\n  A --> B");
        let cancel = CancelHandle::default();
        let engine = CancellingEngine(cancel.clone());

        let state = slot.run(&engine, &cancel).await;
        assert_eq!(state, DiagramState::Cancelled);
    }

    #[test]
    fn slot_ids_are_unique() {
        let a = DiagramSlot::new("graph TD");
        let b = DiagramSlot::new("graph TD");
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("diagram-"));
    }

    #[test]
    fn placeholder_carries_the_slot_id() {
        let slot = DiagramSlot::new("graph TD");
        assert_eq!(
            slot.placeholder(),
            format!("<div class=\"diagram\" id=\"{}\"></div>", slot.id)
        );
    }
}
