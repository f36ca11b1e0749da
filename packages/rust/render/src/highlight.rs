//! Syntax highlighting for fenced code blocks.
//!
//! Uses syntect's bundled syntax and theme sets, loaded once. Output is a
//! `<pre>` with inline styles and a line-number gutter.

use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use mdsite_shared::{MdsiteError, Result};

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Dark theme for code blocks, regardless of site theme.
const CODE_THEME: &str = "base16-eighties.dark";

/// Highlight a code block into HTML with line numbers.
///
/// Unknown languages fall back to plain-text highlighting rather than
/// erroring; the block still gets the gutter and dark background.
pub fn highlight_block(code: &str, language: &str) -> Result<String> {
    let syntax = SYNTAXES
        .find_syntax_by_token(language)
        .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text());
    let theme = THEMES
        .themes
        .get(CODE_THEME)
        .ok_or_else(|| MdsiteError::Render(format!("missing bundled theme {CODE_THEME}")))?;

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = String::from("<pre class=\"code-block\"><code>");

    for (index, line) in LinesWithEndings::from(code).enumerate() {
        let ranges = highlighter
            .highlight_line(line, &SYNTAXES)
            .map_err(|e| MdsiteError::Render(e.to_string()))?;
        let html = styled_line_to_highlighted_html(&ranges, IncludeBackground::No)
            .map_err(|e| MdsiteError::Render(e.to_string()))?;
        out.push_str(&format!(
            "<span class=\"line-number\">{}</span>{html}",
            index + 1
        ));
    }

    out.push_str("</code></pre>");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_block_gets_line_numbers() {
        let html = highlight_block("fn main() {}\nlet x = 1;", "rust").expect("highlight");
        assert!(html.starts_with("<pre class=\"code-block\">"));
        assert!(html.contains("<span class=\"line-number\">1</span>"));
        assert!(html.contains("<span class=\"line-number\">2</span>"));
    }

    #[test]
    fn unknown_language_falls_back_to_plain_text() {
        let html = highlight_block("hello world", "no-such-lang").expect("highlight");
        assert!(html.contains("hello world"));
    }

    #[test]
    fn markup_in_code_is_escaped() {
        let html = highlight_block("<script>alert(1)</script>", "html").expect("highlight");
        assert!(!html.contains("<script>alert"));
    }
}
