//! Parsed documentation comments
//!
//! Supports the block-tag style used by most API extractors:
//! a summary paragraph, free description, then `@tag` lines.

use indexmap::IndexMap;

/// Parsed documentation comment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocComment {
    /// Brief summary (first paragraph)
    pub summary: String,
    /// Everything after the first blank line and before the first tag
    pub description: Option<String>,
    /// `@param name description`, in declaration order
    pub params: IndexMap<String, String>,
    /// `@returns description`
    pub returns: Option<String>,
    /// `@deprecated [reason]`; an empty reason is still deprecated
    pub deprecated: Option<String>,
    /// `@beta`
    pub beta: bool,
    /// `@internal`
    pub internal: bool,
    /// `@see reference`
    pub see_also: Vec<String>,
    /// Bodies of `@example` blocks, fences stripped
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum Block {
    Summary,
    Description,
    Param(String),
    Returns,
    Deprecated,
    See,
    Example,
    Ignored,
}

impl DocComment {
    /// Parse a doc comment from raw text
    pub fn parse(text: &str) -> Self {
        let mut doc = DocComment::default();
        let mut block = Block::Summary;
        let mut summary_lines: Vec<&str> = Vec::new();
        let mut description_lines: Vec<&str> = Vec::new();
        let mut buffer: Vec<String> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();

            if let Some(tag_line) = trimmed.strip_prefix('@') {
                doc.finish_block(&block, &mut buffer);
                let (tag, rest) = tag_line
                    .split_once(char::is_whitespace)
                    .map_or((tag_line, ""), |(t, r)| (t, r.trim()));
                block = match tag {
                    "param" => {
                        let (name, desc) = rest
                            .split_once(char::is_whitespace)
                            .map_or((rest, ""), |(n, d)| (n, d.trim()));
                        let desc = desc.strip_prefix("- ").unwrap_or(desc);
                        push_non_empty(&mut buffer, desc);
                        Block::Param(name.to_string())
                    }
                    "returns" | "return" => {
                        push_non_empty(&mut buffer, rest);
                        Block::Returns
                    }
                    "deprecated" => {
                        push_non_empty(&mut buffer, rest);
                        Block::Deprecated
                    }
                    "see" => {
                        push_non_empty(&mut buffer, rest);
                        Block::See
                    }
                    "example" => Block::Example,
                    "beta" => {
                        doc.beta = true;
                        Block::Ignored
                    }
                    "internal" => {
                        doc.internal = true;
                        Block::Ignored
                    }
                    _ => Block::Ignored,
                };
                continue;
            }

            match block {
                Block::Summary => {
                    if trimmed.is_empty() {
                        if !summary_lines.is_empty() {
                            block = Block::Description;
                        }
                    } else {
                        summary_lines.push(trimmed);
                    }
                }
                Block::Description => description_lines.push(trimmed),
                Block::Example => {
                    if !trimmed.starts_with("```") {
                        buffer.push(line.to_string());
                    }
                }
                Block::Ignored => {}
                _ => push_non_empty(&mut buffer, trimmed),
            }
        }
        doc.finish_block(&block, &mut buffer);

        doc.summary = summary_lines.join(" ");
        let desc = description_lines.join("\n").trim().to_string();
        if !desc.is_empty() {
            doc.description = Some(desc);
        }

        doc
    }

    fn finish_block(&mut self, block: &Block, buffer: &mut Vec<String>) {
        let lines = std::mem::take(buffer);
        match block {
            Block::Param(name) => {
                self.params.insert(name.clone(), lines.join(" "));
            }
            Block::Returns => self.returns = Some(lines.join(" ")),
            Block::Deprecated => self.deprecated = Some(lines.join(" ")),
            Block::See => {
                if !lines.is_empty() {
                    self.see_also.push(lines.join(" "));
                }
            }
            Block::Example => {
                let example = lines.join("\n").trim_matches('\n').to_string();
                if !example.trim().is_empty() {
                    self.examples.push(example);
                }
            }
            Block::Summary | Block::Description | Block::Ignored => {}
        }
    }

    /// Check if the doc comment is empty
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.description.is_none()
            && self.params.is_empty()
            && self.returns.is_none()
            && self.deprecated.is_none()
            && self.examples.is_empty()
    }

    /// Description of one parameter, if documented
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }
}

fn push_non_empty(buffer: &mut Vec<String>, text: &str) {
    if !text.is_empty() {
        buffer.push(text.to_string());
    }
}
