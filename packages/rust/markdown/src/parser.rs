//! Markdown event stream parser.
//!
//! Converts pulldown-cmark's event stream into the [`Tree`] shape with an
//! explicit builder stack. GFM tables and strikethrough are enabled to match
//! the extended syntax the documents use.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::ast::{Node, Tree};

/// Parse raw document text into a syntax tree.
pub fn parse(text: &str) -> Tree {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut builder = TreeBuilder::default();

    for event in Parser::new_ext(text, options) {
        builder.process(event);
    }

    builder.finish()
}

/// Builder state: a stack of open container nodes.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Node>,
    root: Vec<Node>,
}

impl TreeBuilder {
    fn process(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag_end) => self.end(tag_end),
            Event::Text(text) => self.text(text.to_string()),
            Event::Code(code) => self.attach(Node::InlineCode(code.to_string())),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.attach(Node::Html(html.to_string()));
            }
            Event::SoftBreak => self.attach(Node::SoftBreak),
            Event::HardBreak => self.attach(Node::HardBreak),
            Event::Rule => self.attach(Node::Rule),
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                self.attach(Node::InlineCode(math.to_string()));
            }
            Event::FootnoteReference(_) | Event::TaskListMarker(_) => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let node = match tag {
            Tag::Paragraph => Node::Paragraph { children: vec![] },
            Tag::Heading { level, .. } => Node::Heading {
                level: level as u8,
                children: vec![],
            },
            Tag::BlockQuote(_) => Node::BlockQuote { children: vec![] },
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                Node::CodeBlock {
                    language,
                    code: String::new(),
                }
            }
            Tag::List(start) => Node::List {
                start,
                children: vec![],
            },
            Tag::Item => Node::Item { children: vec![] },
            Tag::Table(alignments) => Node::Table {
                alignments: alignments.into_iter().map(Into::into).collect(),
                children: vec![],
            },
            Tag::TableHead => Node::TableHead { children: vec![] },
            Tag::TableRow => Node::TableRow { children: vec![] },
            Tag::TableCell => Node::TableCell { children: vec![] },
            Tag::Emphasis => Node::Emphasis { children: vec![] },
            Tag::Strong => Node::Strong { children: vec![] },
            Tag::Strikethrough => Node::Strikethrough { children: vec![] },
            Tag::Link {
                dest_url, title, ..
            } => Node::Link {
                url: dest_url.to_string(),
                title: title.to_string(),
                children: vec![],
            },
            Tag::Image {
                dest_url, title, ..
            } => Node::Image {
                url: dest_url.to_string(),
                title: title.to_string(),
                alt: String::new(),
            },
            // Containers we don't model: their inline content attaches to
            // the enclosing node directly.
            _ => return,
        };

        self.stack.push(node);
    }

    fn end(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image => {
                if let Some(node) = self.stack.pop() {
                    self.attach(node);
                }
            }
            _ => {}
        }
    }

    /// Text events fill the literal fields of code blocks and images;
    /// everywhere else they become text nodes.
    fn text(&mut self, text: String) {
        match self.stack.last_mut() {
            Some(Node::CodeBlock { code, .. }) => code.push_str(&text),
            Some(Node::Image { alt, .. }) => alt.push_str(&text),
            _ => self.attach_text(text),
        }
    }

    /// Adjacent text events coalesce into one text node. pulldown-cmark
    /// splits a run of text into several events around constructs like
    /// brackets that fail to form links, while downstream passes match
    /// against whole text nodes.
    fn attach_text(&mut self, text: String) {
        let merged = match self.stack.last_mut() {
            Some(parent) => match parent.children_mut().last_mut() {
                Some(Node::Text(existing)) => {
                    existing.push_str(&text);
                    true
                }
                _ => false,
            },
            None => match self.root.last_mut() {
                Some(Node::Text(existing)) => {
                    existing.push_str(&text);
                    true
                }
                _ => false,
            },
        };
        if !merged {
            self.attach(Node::Text(text));
        }
    }

    fn attach(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => push_child(parent, node),
            None => self.root.push(node),
        }
    }

    fn finish(mut self) -> Tree {
        // Unbalanced input never reaches here via pulldown-cmark, but drain
        // defensively so nothing is silently lost.
        while let Some(node) = self.stack.pop() {
            self.attach(node);
        }
        Tree {
            children: self.root,
        }
    }
}

fn push_child(parent: &mut Node, node: Node) {
    match parent {
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
        | Node::Link { children, .. } => children.push(node),
        _ => {}
    }
}
