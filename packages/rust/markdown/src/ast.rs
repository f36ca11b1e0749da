//! Syntax tree produced by parsing document text.
//!
//! An ordered tree of typed nodes, rebuilt on every document change. The
//! admonition transform and the HTML renderer both operate on this shape
//! rather than on any parser-specific representation.

/// Column alignment for table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl From<pulldown_cmark::Alignment> for Alignment {
    fn from(a: pulldown_cmark::Alignment) -> Self {
        match a {
            pulldown_cmark::Alignment::None => Self::None,
            pulldown_cmark::Alignment::Left => Self::Left,
            pulldown_cmark::Alignment::Center => Self::Center,
            pulldown_cmark::Alignment::Right => Self::Right,
        }
    }
}

/// A single node in the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Paragraph {
        children: Vec<Node>,
    },
    Heading {
        level: u8,
        children: Vec<Node>,
    },
    BlockQuote {
        children: Vec<Node>,
    },
    /// A blockquote rewritten by the admonition transform. Children are
    /// always exactly `[AdmonitionHeading, AdmonitionContent]`.
    Admonition {
        label: String,
        children: Vec<Node>,
    },
    AdmonitionHeading {
        children: Vec<Node>,
    },
    AdmonitionContent {
        children: Vec<Node>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    List {
        start: Option<u64>,
        children: Vec<Node>,
    },
    Item {
        children: Vec<Node>,
    },
    Table {
        alignments: Vec<Alignment>,
        children: Vec<Node>,
    },
    TableHead {
        children: Vec<Node>,
    },
    TableRow {
        children: Vec<Node>,
    },
    TableCell {
        children: Vec<Node>,
    },
    Rule,
    Html(String),
    Text(String),
    Emphasis {
        children: Vec<Node>,
    },
    Strong {
        children: Vec<Node>,
    },
    Strikethrough {
        children: Vec<Node>,
    },
    InlineCode(String),
    Link {
        url: String,
        title: String,
        children: Vec<Node>,
    },
    Image {
        url: String,
        title: String,
        alt: String,
    },
    SoftBreak,
    HardBreak,
}

impl Node {
    /// Child nodes, empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::BlockQuote { children }
            | Node::Admonition { children, .. }
            | Node::AdmonitionHeading { children }
            | Node::AdmonitionContent { children }
            | Node::List { children, .. }
            | Node::Item { children }
            | Node::Table { children, .. }
            | Node::TableHead { children }
            | Node::TableRow { children }
            | Node::TableCell { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Strikethrough { children }
            | Node::Link { children, .. } => children,
            _ => &[],
        }
    }

    /// Mutable child nodes, empty for leaves.
    pub fn children_mut(&mut self) -> &mut [Node] {
        match self {
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::BlockQuote { children }
            | Node::Admonition { children, .. }
            | Node::AdmonitionHeading { children }
            | Node::AdmonitionContent { children }
            | Node::List { children, .. }
            | Node::Item { children }
            | Node::Table { children, .. }
            | Node::TableHead { children }
            | Node::TableRow { children }
            | Node::TableCell { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Strikethrough { children }
            | Node::Link { children, .. } => children,
            _ => &mut [],
        }
    }

    /// Concatenated plain text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) | Node::InlineCode(t) => out.push_str(t),
            Node::SoftBreak => out.push(' '),
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Root of a parsed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    /// Top-level block nodes in document order.
    pub children: Vec<Node>,
}
