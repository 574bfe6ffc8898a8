//! Line-oriented Markdown builder

use crate::registry::EntityId;

/// Indentation used for each nesting level of a list
const LIST_INDENT: &str = "    ";

/// An entry of an unordered list, optionally with a nested list
#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Text(String),
    Nested(String, Vec<ListItem>),
}

/// Builds Markdown as a sequence of lines
#[derive(Debug, Clone, Default)]
pub struct MarkdownBuilder {
    lines: Vec<String>,
}

impl MarkdownBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `#`-style header of the given level (clamped to 1..=6)
    pub fn header(&mut self, text: &str, level: usize) -> &mut Self {
        let hashes = "#".repeat(level.clamp(1, 6));
        self.lines.push(format!("{} {}", hashes, text));
        self
    }

    pub fn empty_line(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Plain text; embedded newlines become separate lines
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.lines.extend(text.lines().map(str::to_string));
        self
    }

    /// Append already built lines
    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Fenced code block followed by an empty line
    pub fn code(&mut self, code: &[String], language: &str) -> &mut Self {
        self.lines.push(format!("```{}", language));
        self.lines.extend(code.iter().cloned());
        self.lines.push("```".to_string());
        self.lines.push(String::new());
        self
    }

    /// Quoted block, one `>` per line
    pub fn blockquote(&mut self, text: &str) -> &mut Self {
        self.lines.extend(text.lines().map(|l| {
            if l.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", l)
            }
        }));
        self
    }

    pub fn unordered_list(&mut self, items: &[ListItem]) -> &mut Self {
        write_list(&mut self.lines, items, 0);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn finish(self) -> Vec<String> {
        self.lines
    }
}

fn write_list(out: &mut Vec<String>, items: &[ListItem], depth: usize) {
    let indent = LIST_INDENT.repeat(depth);
    for item in items {
        match item {
            ListItem::Text(text) => out.push(format!("{}- {}", indent, text)),
            ListItem::Nested(text, children) => {
                out.push(format!("{}- {}", indent, text));
                write_list(out, children, depth + 1);
            }
        }
    }
}

/// Reference-style link whose target is an entity ID: `[text][id]`
pub fn link(text: &str, id: &EntityId) -> String {
    format!("[{}][{}]", text, id)
}

/// Link definition resolving a reference-style link: `[id]: target`
pub fn link_definition(id: &EntityId, target: &str) -> String {
    format!("[{}]: {}", id, target)
}

/// Inline code span, widening the fence when the text contains backticks
pub fn inline_code(text: &str) -> String {
    if text.contains('`') {
        format!("`` {} ``", text)
    } else {
        format!("`{}`", text)
    }
}

/// Anchor slug of a heading, as rendered by common Markdown hosts
///
/// Lower-cases, drops everything except word characters, `-` and whitespace,
/// turns whitespace into `-` and trims trailing dashes.
pub fn heading_to_anchor(heading: &str) -> String {
    let slug: String = heading
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_alphanumeric() || c == '_' || c == '-' {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_to_anchor() {
        assert_eq!(heading_to_anchor("qux"), "qux");
        assert_eq!(heading_to_anchor("Table of contents"), "table-of-contents");
        assert_eq!(heading_to_anchor("  Foo.bar()  "), "foobar");
        assert_eq!(heading_to_anchor("get_value<T>"), "get_valuet");
        assert_eq!(heading_to_anchor("trailing -"), "trailing");
    }

    #[test]
    fn test_links() {
        let id = EntityId::from("type:Bar");
        assert_eq!(link("Bar", &id), "[Bar][type:Bar]");
        assert_eq!(link_definition(&id, "bar.md#bar"), "[type:Bar]: bar.md#bar");
    }

    #[test]
    fn test_builder_output() {
        let mut md = MarkdownBuilder::new();
        md.header("foo", 2)
            .empty_line()
            .code(&["function foo(): void".to_string()], "typescript")
            .blockquote("Deprecated.\n\nUse bar.");

        assert_eq!(
            md.finish(),
            vec![
                "## foo",
                "",
                "```typescript",
                "function foo(): void",
                "```",
                "",
                "> Deprecated.",
                ">",
                "> Use bar.",
            ]
        );
    }

    #[test]
    fn test_nested_list() {
        let mut md = MarkdownBuilder::new();
        md.unordered_list(&[ListItem::Nested(
            "Baz".to_string(),
            vec![ListItem::Nested(
                "Methods".to_string(),
                vec![ListItem::Text("qux".to_string())],
            )],
        )]);

        assert_eq!(md.finish(), vec!["- Baz", "    - Methods", "        - qux"]);
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(inline_code("a"), "`a`");
        assert_eq!(inline_code("a`b"), "`` a`b ``");
    }
}
