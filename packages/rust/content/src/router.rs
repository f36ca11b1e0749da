//! Path routing.
//!
//! Maps a navigation path onto one of the site's views. Documentation paths
//! carry a primary segment plus an optional rest path that together form the
//! logical document identifier.

/// A parsed navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Features,
    Blog,
    Community,
    Releases,
    /// `/docs`, `/docs/<id>`, or `/docs/<id>/<rest...>`.
    Docs {
        doc_id: Option<String>,
        rest: Option<String>,
    },
    /// Anything that matches no other pattern.
    NotFound { path: String },
}

impl Route {
    /// Parse a site-relative path. Trailing slashes are ignored; matching is
    /// case-sensitive.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" | "/" => return Route::Home,
            "/features" => return Route::Features,
            "/blog" => return Route::Blog,
            "/community" => return Route::Community,
            "/releases" => return Route::Releases,
            "/docs" => {
                return Route::Docs {
                    doc_id: None,
                    rest: None,
                };
            }
            _ => {}
        }

        if let Some(tail) = trimmed.strip_prefix("/docs/") {
            let mut segments = tail.splitn(2, '/');
            let doc_id = segments.next().filter(|s| !s.is_empty());
            let rest = segments.next().filter(|s| !s.is_empty());
            return Route::Docs {
                doc_id: doc_id.map(str::to_string),
                rest: rest.map(str::to_string),
            };
        }

        Route::NotFound {
            path: path.to_string(),
        }
    }

    /// The logical document identifier for a docs route: the primary segment
    /// joined with the rest path when both are present, or the configured
    /// default when the index is requested.
    pub fn doc_path(doc_id: &Option<String>, rest: &Option<String>, default_doc: &str) -> String {
        match (doc_id, rest) {
            (Some(id), Some(rest)) => format!("{id}/{rest}"),
            (Some(id), None) => id.clone(),
            (None, _) => default_doc.to_string(),
        }
    }
}
