//! The page pipeline: route -> resolve -> fetch -> parse -> render.
//!
//! Fetch and render failures never escape as errors; they become error
//! panels inside an otherwise normal page, matching how the site degrades
//! per-view rather than per-process.

use tracing::{info, instrument};

use mdsite_content::{ContentClient, ReleasesData, Route, resolve};
use mdsite_markdown::parse_document;
use mdsite_render::{CancelHandle, DiagramState, MermaidClientEngine, RenderedHtml, render_tree};
use mdsite_shared::{MdsiteError, Result, SiteConfig};

use crate::pages::{self, Page};

/// One site instance: configuration plus the clients derived from it.
#[derive(Debug, Clone)]
pub struct Site {
    config: SiteConfig,
    client: ContentClient,
    engine: MermaidClientEngine,
}

impl Site {
    pub fn new(config: SiteConfig) -> Self {
        let client = ContentClient::new(&config.content);
        Self {
            config,
            client,
            engine: MermaidClientEngine,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Render whatever lives at a navigation path.
    #[instrument(skip(self))]
    pub async fn render_path(&self, path: &str) -> Page {
        match Route::parse(path) {
            Route::Home => pages::home(),
            Route::Features => pages::features(),
            Route::Blog => pages::blog(),
            Route::Community => pages::community(),
            Route::Releases => self.render_releases().await,
            Route::Docs { doc_id, rest } => {
                let doc_path =
                    Route::doc_path(&doc_id, &rest, &self.config.content.default_doc);
                self.render_doc(&doc_path).await
            }
            Route::NotFound { path } => pages::not_found(&path),
        }
    }

    async fn render_doc(&self, doc_path: &str) -> Page {
        match self.try_render_doc(doc_path).await {
            Ok(body) => {
                info!(doc_path, "document rendered");
                Page::new(doc_path, body)
            }
            // An unmapped id under the not-found policy is a missing page,
            // not a degraded one.
            Err(MdsiteError::UnmappedDocument { path }) => pages::not_found(&path),
            Err(error) => Page::new(doc_path, pages::error_panel(&error)),
        }
    }

    async fn try_render_doc(&self, doc_path: &str) -> Result<String> {
        let resource = resolve(doc_path, self.config.content.unmapped)?;
        let document = self.client.fetch(resource).await?;
        let tree = parse_document(&document.text);
        let rendered = render_tree(&tree)?;
        Ok(self.settle_diagrams(rendered).await)
    }

    async fn render_releases(&self) -> Page {
        let mut page = match self.try_render_releases().await {
            Ok(body) => Page::new("Releases", body),
            Err(error) => Page::new("Releases", pages::error_panel(&error)),
        };
        page.show_reload = true;
        page
    }

    async fn try_render_releases(&self) -> Result<String> {
        let data = ReleasesData::load(&self.client).await?;
        let tree = parse_document(&data.document.text);
        let rendered = render_tree(&tree)?;
        let content = self.settle_diagrams(rendered).await;
        Ok(pages::releases_body(&data.versions, &content))
    }

    /// Drive every diagram slot to a terminal state and splice the result
    /// over its placeholder.
    async fn settle_diagrams(&self, rendered: RenderedHtml) -> String {
        self.settle_diagrams_with(rendered, &CancelHandle::default())
            .await
    }

    async fn settle_diagrams_with(&self, rendered: RenderedHtml, cancel: &CancelHandle) -> String {
        let mut html = rendered.html;
        for slot in rendered.diagrams {
            let markup = match slot.run(&self.engine, cancel).await {
                DiagramState::Rendered(markup) | DiagramState::Fallback(markup) => markup,
                // A cancelled slot leaves nothing behind, not even the box.
                DiagramState::Cancelled => String::new(),
            };
            html = html.replace(&slot.placeholder(), &markup);
        }
        html
    }
}
