//! HTML rendering of the markdown tree.
//!
//! A straight tree walk with a substitution table at its heart: admonitions
//! become labeled boxes with icons, fenced code becomes highlighted blocks
//! (or diagram placeholders), internal links stay in-app while external
//! links open in a new tab, and h1-h3 pick up explicit `{#anchor}` ids.

use mdsite_markdown::{Alignment, Node, Tree, split_anchor};
use mdsite_shared::Result;

use crate::diagram::DiagramSlot;
use crate::highlight::highlight_block;

/// Rendered page body plus the diagrams still awaiting resolution.
#[derive(Debug)]
pub struct RenderedHtml {
    pub html: String,
    pub diagrams: Vec<DiagramSlot>,
}

/// Icon shown in an admonition heading, by label. Unknown labels get no
/// icon but still render as admonitions.
fn admonition_icon(label: &str) -> Option<&'static str> {
    match label {
        "WARNING" => Some("\u{26a0}\u{fe0f}"),
        "IMPORTANT" => Some("\u{2757}"),
        "CAUTION" => Some("\u{1f525}"),
        "NOTE" => Some("\u{2139}\u{fe0f}"),
        "TIP" => Some("\u{1f4a1}"),
        _ => None,
    }
}

/// Render a document tree to HTML.
pub fn render_tree(tree: &Tree) -> Result<RenderedHtml> {
    let mut renderer = Renderer::default();
    renderer.render_nodes(&tree.children)?;
    Ok(RenderedHtml {
        html: renderer.out,
        diagrams: renderer.diagrams,
    })
}

#[derive(Default)]
struct Renderer {
    out: String,
    diagrams: Vec<DiagramSlot>,
}

impl Renderer {
    fn render_nodes(&mut self, nodes: &[Node]) -> Result<()> {
        for node in nodes {
            self.render_node(node)?;
        }
        Ok(())
    }

    fn render_node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Paragraph { children } => {
                self.out.push_str("<p>");
                self.render_nodes(children)?;
                self.out.push_str("</p>");
            }
            Node::Heading { level, children } => self.render_heading(*level, children)?,
            Node::BlockQuote { children } => {
                self.out.push_str("<blockquote>");
                self.render_nodes(children)?;
                self.out.push_str("</blockquote>");
            }
            Node::Admonition { label, children } => self.render_admonition(label, children)?,
            Node::AdmonitionHeading { .. } | Node::AdmonitionContent { .. } => {
                // Only reachable via Admonition, which renders them itself.
            }
            Node::CodeBlock { language, code } => self.render_code_block(language.as_deref(), code)?,
            Node::List { start, children } => {
                match start {
                    Some(n) => self.out.push_str(&format!("<ol start=\"{n}\">")),
                    None => self.out.push_str("<ul>"),
                }
                self.render_nodes(children)?;
                self.out
                    .push_str(if start.is_some() { "</ol>" } else { "</ul>" });
            }
            Node::Item { children } => {
                self.out.push_str("<li>");
                self.render_nodes(children)?;
                self.out.push_str("</li>");
            }
            Node::Table {
                alignments,
                children,
            } => self.render_table(alignments, children)?,
            Node::TableHead { .. } | Node::TableRow { .. } | Node::TableCell { .. } => {
                // Only reachable via Table.
            }
            Node::Rule => self.out.push_str("<hr/>"),
            Node::Html(raw) => self.out.push_str(raw),
            Node::Text(text) => self.out.push_str(&escape_html(text)),
            Node::Emphasis { children } => {
                self.out.push_str("<em>");
                self.render_nodes(children)?;
                self.out.push_str("</em>");
            }
            Node::Strong { children } => {
                self.out.push_str("<strong>");
                self.render_nodes(children)?;
                self.out.push_str("</strong>");
            }
            Node::Strikethrough { children } => {
                self.out.push_str("<del>");
                self.render_nodes(children)?;
                self.out.push_str("</del>");
            }
            Node::InlineCode(code) => {
                self.out.push_str("<code class=\"inline-code\">");
                self.out.push_str(&escape_html(code));
                self.out.push_str("</code>");
            }
            Node::Link {
                url,
                title,
                children,
            } => self.render_link(url, title, children)?,
            Node::Image { url, title, alt } => {
                self.out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\"",
                    escape_html(url),
                    escape_html(alt)
                ));
                if !title.is_empty() {
                    self.out
                        .push_str(&format!(" title=\"{}\"", escape_html(title)));
                }
                self.out.push_str("/>");
            }
            Node::SoftBreak => self.out.push('\n'),
            Node::HardBreak => self.out.push_str("<br/>"),
        }
        Ok(())
    }

    /// h1-h3 honor an explicit `{#anchor}` marker in their text; deeper
    /// levels render as-is.
    fn render_heading(&mut self, level: u8, children: &[Node]) -> Result<()> {
        let mut inner = Renderer::default();
        inner.render_nodes(children)?;
        self.diagrams.append(&mut inner.diagrams);

        if level <= 3 {
            let (text, anchor) = split_anchor(&inner.out);
            match anchor {
                Some(id) => self
                    .out
                    .push_str(&format!("<h{level} id=\"{id}\">{text}</h{level}>")),
                None => self.out.push_str(&format!("<h{level}>{text}</h{level}>")),
            }
        } else {
            self.out
                .push_str(&format!("<h{level}>{}</h{level}>", inner.out));
        }
        Ok(())
    }

    fn render_admonition(&mut self, label: &str, children: &[Node]) -> Result<()> {
        self.out.push_str(&format!(
            "<div class=\"admonition admonition-{}\">",
            label.to_lowercase()
        ));

        self.out.push_str("<div class=\"admonition-heading\">");
        if let Some(icon) = admonition_icon(label) {
            self.out
                .push_str(&format!("<span class=\"admonition-icon\">{icon}</span>"));
        }
        self.out.push_str("</div>");

        self.out.push_str("<div class=\"admonition-content\">");
        for child in children {
            if let Node::AdmonitionContent { children } = child {
                self.render_nodes(children)?;
            }
        }
        self.out.push_str("</div></div>");
        Ok(())
    }

    /// The substitution table's code arm: `mermaid` becomes a diagram
    /// placeholder, a known language becomes a highlighted block, and a
    /// bare fence renders as inline-style code.
    fn render_code_block(&mut self, language: Option<&str>, code: &str) -> Result<()> {
        let code = code.strip_suffix('\n').unwrap_or(code);

        match language {
            Some("mermaid") => {
                let slot = DiagramSlot::new(code);
                self.out.push_str(&slot.placeholder());
                self.diagrams.push(slot);
            }
            Some(lang) => self.out.push_str(&highlight_block(code, lang)?),
            None => {
                self.out.push_str("<code class=\"inline-code\">");
                self.out.push_str(&escape_html(code));
                self.out.push_str("</code>");
            }
        }
        Ok(())
    }

    /// Internal targets (leading `/` or `#`) stay in-app; everything else
    /// opens in a new tab without an opener reference.
    fn render_link(&mut self, url: &str, title: &str, children: &[Node]) -> Result<()> {
        let internal = url.starts_with('/') || url.starts_with('#');
        self.out
            .push_str(&format!("<a href=\"{}\"", escape_html(url)));
        if !title.is_empty() {
            self.out
                .push_str(&format!(" title=\"{}\"", escape_html(title)));
        }
        if internal {
            self.out.push_str(" data-route");
        } else {
            self.out
                .push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
        }
        self.out.push_str(" class=\"link\">");
        self.render_nodes(children)?;
        self.out.push_str("</a>");
        Ok(())
    }

    fn render_table(&mut self, alignments: &[Alignment], children: &[Node]) -> Result<()> {
        self.out.push_str("<table>");
        for child in children {
            match child {
                Node::TableHead { children } => {
                    self.out.push_str("<thead><tr>");
                    self.render_cells(alignments, children, "th")?;
                    self.out.push_str("</tr></thead><tbody>");
                }
                Node::TableRow { children } => {
                    self.out.push_str("<tr>");
                    self.render_cells(alignments, children, "td")?;
                    self.out.push_str("</tr>");
                }
                _ => {}
            }
        }
        self.out.push_str("</tbody></table>");
        Ok(())
    }

    fn render_cells(&mut self, alignments: &[Alignment], cells: &[Node], tag: &str) -> Result<()> {
        for (column, cell) in cells.iter().enumerate() {
            let Node::TableCell { children } = cell else {
                continue;
            };
            let style = match alignments.get(column) {
                Some(Alignment::Left) => " style=\"text-align:left\"",
                Some(Alignment::Center) => " style=\"text-align:center\"",
                Some(Alignment::Right) => " style=\"text-align:right\"",
                _ => "",
            };
            self.out.push_str(&format!("<{tag}{style}>"));
            self.render_nodes(children)?;
            self.out.push_str(&format!("</{tag}>"));
        }
        Ok(())
    }
}

/// Minimal HTML escaping for text and attribute content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdsite_markdown::parse_document;

    fn render(md: &str) -> RenderedHtml {
        render_tree(&parse_document(md)).expect("render")
    }

    #[test]
    fn paragraph_and_inline_markup() {
        let page = render("Some **bold** and *em* text.");
        assert_eq!(
            page.html,
            "<p>Some <strong>bold</strong> and <em>em</em> text.</p>"
        );
    }

    #[test]
    fn heading_with_anchor_gets_an_id() {
        let page = render("## Quick Start {#quick-start}");
        assert_eq!(page.html, "<h2 id=\"quick-start\">Quick Start</h2>");
    }

    #[test]
    fn heading_without_anchor_has_no_id() {
        let page = render("# Title");
        assert_eq!(page.html, "<h1>Title</h1>");
    }

    #[test]
    fn deep_headings_keep_anchor_text_verbatim() {
        let page = render("#### Deep {#nope}");
        assert!(page.html.contains("{#nope}"));
        assert!(!page.html.contains("id="));
    }

    #[test]
    fn internal_link_is_routed() {
        let page = render("[intro](/docs/introduction)");
        assert!(page.html.contains("<a href=\"/docs/introduction\" data-route"));
        assert!(!page.html.contains("target="));
    }

    #[test]
    fn fragment_link_is_internal() {
        let page = render("[jump](#section)");
        assert!(page.html.contains("data-route"));
    }

    #[test]
    fn external_link_opens_new_tab() {
        let page = render("[site](https://example.com)");
        assert!(page.html.contains("target=\"_blank\""));
        assert!(page.html.contains("rel=\"noopener noreferrer\""));
        assert!(!page.html.contains("data-route"));
    }

    #[test]
    fn mermaid_block_becomes_placeholder_slot() {
        let page = render("```mermaid\ngraph TD\n  A --> B\n```");
        assert_eq!(page.diagrams.len(), 1);
        let slot = &page.diagrams[0];
        assert!(page.html.contains(&slot.placeholder()));
        assert_eq!(slot.source, "graph TD\n  A --> B");
    }

    #[test]
    fn code_block_with_language_is_highlighted() {
        let page = render("```rust\nfn main() {}\n```");
        assert!(page.html.contains("code-block"));
        assert!(page.html.contains("line-number"));
        assert!(page.diagrams.is_empty());
    }

    #[test]
    fn bare_fence_renders_as_inline_code() {
        let page = render("```\nplain\n```");
        assert!(page.html.contains("<code class=\"inline-code\">plain</code>"));
    }

    #[test]
    fn inline_code_is_escaped() {
        let page = render("run `a < b`");
        assert!(page.html.contains("<code class=\"inline-code\">a &lt; b</code>"));
    }

    #[test]
    fn admonition_renders_icon_and_content() {
        let page = render("> [!warning] Mind the gap.");
        assert!(page
            .html
            .contains("<div class=\"admonition admonition-warning\">"));
        assert!(page.html.contains("admonition-icon"));
        assert!(page.html.contains("\u{26a0}\u{fe0f}"));
        assert!(page.html.contains("Mind the gap."));
    }

    #[test]
    fn unknown_admonition_label_has_no_icon() {
        let page = render("> [!custom] Something.");
        assert!(page
            .html
            .contains("<div class=\"admonition admonition-custom\">"));
        assert!(!page.html.contains("admonition-icon"));
    }

    #[test]
    fn table_with_alignment_styles() {
        let page = render("| a | b |\n| :-- | --: |\n| 1 | 2 |\n");
        assert!(page.html.contains("<th style=\"text-align:left\">"));
        assert!(page.html.contains("<td style=\"text-align:right\">"));
    }

    #[test]
    fn raw_html_passes_through() {
        let page = render("<div class=\"custom\">kept</div>");
        assert!(page.html.contains("<div class=\"custom\">kept</div>"));
    }

    #[test]
    fn text_is_escaped() {
        let page = render("a \\< b & c");
        assert!(page.html.contains("&lt;"));
        assert!(page.html.contains("&amp;"));
    }

    #[test]
    fn escape_html_covers_attribute_characters() {
        assert_eq!(
            escape_html("a<b>\"c\"&'d'"),
            "a&lt;b&gt;&quot;c&quot;&amp;&#39;d&#39;"
        );
    }
}
