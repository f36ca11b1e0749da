//! Admonition rewrite pass.
//!
//! Blockquotes whose first paragraph opens with `[!TAG]` become typed
//! admonitions. The marker line is stripped from the text, the tag becomes
//! an uppercased label, and the node is restructured into a heading part
//! and a content part so the renderer can style them independently.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::ast::{Node, Tree};

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[!(.+?)\]").expect("valid regex"));

static MARKER_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[!.+?\]\s*").expect("valid regex"));

/// Rewrite every marked blockquote in the tree, at any depth.
///
/// Traversal uses an explicit worklist so rewritten nodes are never
/// revisited within the same pass. Running the pass twice is a no-op:
/// admonition children no longer start with a marker.
pub fn transform(tree: &mut Tree) {
    let mut stack: Vec<&mut Node> = tree.children.iter_mut().collect();

    while let Some(node) = stack.pop() {
        if let Node::BlockQuote { .. } = node {
            rewrite(node);
        }
        stack.extend(node.children_mut().iter_mut());
    }
}

/// Rewrite a single blockquote in place when it carries a marker.
fn rewrite(node: &mut Node) {
    let Node::BlockQuote { children } = node else {
        return;
    };

    let Some(label) = marker_label(children) else {
        return;
    };
    trace!(label = %label, "rewriting admonition blockquote");

    strip_marker(children);

    let content = std::mem::take(children);
    *node = Node::Admonition {
        label,
        children: vec![
            Node::AdmonitionHeading { children: vec![] },
            Node::AdmonitionContent { children: content },
        ],
    };
}

/// Uppercased tag from the first text of the first paragraph, if the
/// blockquote opens with a `[!TAG]` marker.
fn marker_label(children: &[Node]) -> Option<String> {
    let Some(Node::Paragraph {
        children: para_children,
    }) = children.first()
    else {
        return None;
    };
    let Some(Node::Text(text)) = para_children.first() else {
        return None;
    };
    let captures = MARKER.captures(text)?;
    Some(captures[1].to_uppercase())
}

/// Remove the marker from the leading paragraph. If nothing remains of
/// its first text node, the node is dropped; if the whole paragraph then
/// becomes empty, the paragraph is dropped too.
fn strip_marker(children: &mut Vec<Node>) {
    let Some(Node::Paragraph {
        children: para_children,
    }) = children.first_mut()
    else {
        return;
    };

    if let Some(Node::Text(text)) = para_children.first_mut() {
        let stripped = MARKER_STRIP.replace(text, "").into_owned();
        if stripped.is_empty() {
            para_children.remove(0);
        } else {
            *text = stripped;
        }
    }

    if para_children.is_empty() {
        children.remove(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn first_admonition(tree: &Tree) -> (&str, &[Node]) {
        for node in &tree.children {
            if let Node::Admonition { label, children } = node {
                return (label, children);
            }
        }
        panic!("no admonition in tree");
    }

    #[test]
    fn marked_blockquote_becomes_admonition() {
        let mut tree = parse("> [!warning] Do not do this.");
        transform(&mut tree);

        let (label, children) = first_admonition(&tree);
        assert_eq!(label, "WARNING");
        assert!(matches!(children[0], Node::AdmonitionHeading { .. }));

        let Node::AdmonitionContent {
            children: content, ..
        } = &children[1]
        else {
            panic!("expected content part");
        };
        let Node::Paragraph { children: para } = &content[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(para[0], Node::Text("Do not do this.".into()));
    }

    #[test]
    fn tag_is_uppercased() {
        let mut tree = parse("> [!note] remember");
        transform(&mut tree);
        assert_eq!(first_admonition(&tree).0, "NOTE");
    }

    #[test]
    fn unknown_tags_still_rewrite() {
        let mut tree = parse("> [!bazinga] anything goes");
        transform(&mut tree);
        assert_eq!(first_admonition(&tree).0, "BAZINGA");
    }

    #[test]
    fn plain_blockquote_untouched() {
        let mut tree = parse("> just a quote");
        transform(&mut tree);
        assert!(matches!(tree.children[0], Node::BlockQuote { .. }));
    }

    #[test]
    fn marker_not_at_start_is_ignored() {
        let mut tree = parse("> see [!note] mid-sentence");
        transform(&mut tree);
        assert!(matches!(tree.children[0], Node::BlockQuote { .. }));
    }

    #[test]
    fn marker_only_paragraph_is_dropped() {
        let mut tree = parse("> [!tip]\n>\n> The actual advice.");
        transform(&mut tree);

        let (_, children) = first_admonition(&tree);
        let Node::AdmonitionContent {
            children: content, ..
        } = &children[1]
        else {
            panic!("expected content part");
        };
        // The marker-only paragraph is gone; only the advice remains.
        assert_eq!(content.len(), 1);
        let Node::Paragraph { children: para } = &content[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(para[0], Node::Text("The actual advice.".into()));
    }

    #[test]
    fn nested_blockquotes_are_rewritten() {
        let mut tree = parse("- item\n\n  > [!caution] nested inside a list\n");
        transform(&mut tree);

        let mut found = false;
        let mut stack: Vec<&Node> = tree.children.iter().collect();
        while let Some(node) = stack.pop() {
            if let Node::Admonition { label, .. } = node {
                assert_eq!(label, "CAUTION");
                found = true;
            }
            stack.extend(node.children());
        }
        assert!(found, "nested admonition was not rewritten");
    }

    #[test]
    fn transform_is_idempotent() {
        let mut tree = parse("> [!important] Read me.\n\nAnd a paragraph.");
        transform(&mut tree);
        let once = tree.clone();
        transform(&mut tree);
        assert_eq!(tree, once);
    }

    #[test]
    fn multiple_admonitions_in_one_document() {
        let mut tree = parse("> [!note] first\n\ntext\n\n> [!tip] second\n");
        transform(&mut tree);

        let labels: Vec<&str> = tree
            .children
            .iter()
            .filter_map(|n| match n {
                Node::Admonition { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["NOTE", "TIP"]);
    }
}
