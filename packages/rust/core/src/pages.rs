//! Page shells and chrome.
//!
//! The non-document pages carry fixed marketing copy; documents and
//! releases get their bodies from the pipeline. Everything funnels through
//! [`document_shell`] for the final HTML document.

use mdsite_render::escape_html;
use mdsite_shared::{MdsiteError, VersionEntry};

/// A renderable page: body markup plus the chrome it needs.
#[derive(Debug)]
pub struct Page {
    pub title: String,
    pub body: String,
    /// Only the releases page offers an explicit reload control.
    pub show_reload: bool,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            show_reload: false,
        }
    }
}

/// Fixed shells for the marketing pages.
pub fn home() -> Page {
    Page::new(
        "Home",
        "<section class=\"hero\">\
         <h1>API testing that stays in sync</h1>\
         <p>Model, mock, and verify your HTTP APIs from one place.</p>\
         <a href=\"/docs\" data-route class=\"cta\">Get started</a>\
         </section>",
    )
}

pub fn features() -> Page {
    Page::new(
        "Features",
        "<section class=\"features\">\
         <h1>Features</h1>\
         <p>API modeling, OpenAPI import, mock servers, storage, and reporting.</p>\
         </section>",
    )
}

pub fn blog() -> Page {
    Page::new(
        "Blog",
        "<section class=\"blog\"><h1>Blog</h1><p>No posts yet.</p></section>",
    )
}

pub fn community() -> Page {
    Page::new(
        "Community",
        "<section class=\"community\">\
         <h1>Community</h1>\
         <p>Questions, discussions, and contributions are welcome.</p>\
         </section>",
    )
}

/// Catch-all for paths no route matches.
pub fn not_found(path: &str) -> Page {
    Page::new(
        "Not Found",
        format!(
            "<section class=\"not-found\">\
             <h1>404</h1>\
             <p>No page at <code>{}</code>.</p>\
             <a href=\"/\" data-route>Back home</a>\
             </section>",
            escape_html(path)
        ),
    )
}

/// Error panel shown in place of document content. The message carries the
/// error's display form verbatim, status code included.
pub fn error_panel(error: &MdsiteError) -> String {
    format!(
        "<div class=\"error-panel\">\
         <h3>Could not load this page</h3>\
         <p>{}</p>\
         <p>Try refreshing, or come back later.</p>\
         </div>",
        escape_html(&error.to_string())
    )
}

/// Releases body: version sidebar plus the rendered changelog.
pub fn releases_body(versions: &[VersionEntry], content: &str) -> String {
    let mut nav = String::from("<nav class=\"version-nav\"><ul>");
    for entry in versions {
        nav.push_str(&format!(
            "<li><a href=\"#{}\" data-route>{}</a>",
            entry.id,
            escape_html(&entry.title)
        ));
        if let Some(version) = &entry.version {
            nav.push_str(&format!(
                "<span class=\"version-pill\">{}</span>",
                escape_html(version)
            ));
        }
        if let Some(date) = &entry.date {
            nav.push_str(&format!(
                "<span class=\"version-date\">{}</span>",
                escape_html(date)
            ));
        }
        if entry.is_new {
            nav.push_str("<span class=\"badge-new\">NEW</span>");
        }
        nav.push_str("</li>");
    }
    nav.push_str("</ul></nav>");

    format!("{nav}<div class=\"releases-content\">{content}</div>")
}

/// Wrap a page body in a complete HTML document. Dark mode is a class on
/// the root element so styling stays in CSS.
pub fn document_shell(page: &Page, dark_mode: bool) -> String {
    let theme_class = if dark_mode { " class=\"dark\"" } else { "" };
    let reload = if page.show_reload {
        "<button class=\"reload\" data-action=\"reload\">Reload</button>"
    } else {
        ""
    };
    format!(
        "<!doctype html>\
         <html lang=\"en\"{theme_class}>\
         <head><meta charset=\"utf-8\"><title>{}</title></head>\
         <body><main>{}</main>{reload}</body>\
         </html>",
        escape_html(&page.title),
        page.body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_panel_carries_status_and_reason() {
        let err = MdsiteError::Http {
            status: 404,
            reason: "Not Found".into(),
        };
        let panel = error_panel(&err);
        assert!(panel.contains("404"));
        assert!(panel.contains("Not Found"));
        assert!(panel.contains("error-panel"));
    }

    #[test]
    fn not_found_escapes_the_path() {
        let page = not_found("/<script>");
        assert!(page.body.contains("&lt;script&gt;"));
    }

    #[test]
    fn releases_body_marks_only_new_entries() {
        let versions = vec![
            VersionEntry {
                title: "2024.5.1-v1.2.0 Stable".into(),
                id: "202451-v120-stable".into(),
                version: Some("v1.2.0 Stable".into()),
                date: Some("2024.5.1".into()),
                is_new: true,
            },
            VersionEntry {
                title: "Older".into(),
                id: "older".into(),
                version: None,
                date: None,
                is_new: false,
            },
        ];
        let body = releases_body(&versions, "<p>log</p>");
        assert_eq!(body.matches("badge-new").count(), 1);
        assert!(body.contains("href=\"#202451-v120-stable\""));
        assert!(body.contains("version-pill"));
        assert!(body.contains("<p>log</p>"));
    }

    #[test]
    fn shell_toggles_dark_class_and_reload() {
        let mut page = Page::new("T", "<p>b</p>");
        let light = document_shell(&page, false);
        assert!(!light.contains("class=\"dark\""));
        assert!(!light.contains("data-action=\"reload\""));

        page.show_reload = true;
        let dark = document_shell(&page, true);
        assert!(dark.contains("<html lang=\"en\" class=\"dark\">"));
        assert!(dark.contains("data-action=\"reload\""));
    }
}
