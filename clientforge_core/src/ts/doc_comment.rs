use super::writer::{BasicBuilder, Writer};

/// A `/** ... */` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    lines: Vec<String>,
}

impl DocComment {
    /// Builds a comment from free text. Common indentation is stripped and
    /// blank lines at either end are dropped.
    pub fn new(text: &str) -> Self {
        let mut comment = DocComment::default();
        comment.add_text(text);
        comment
    }

    pub fn add_text(&mut self, text: &str) -> &mut Self {
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.iter().position(|l| !l.trim().is_empty());
        let end = lines.iter().rposition(|l| !l.trim().is_empty());
        let (Some(start), Some(end)) = (start, end) else {
            return self;
        };
        let lines = &lines[start..=end];

        let indent = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start().len())
            .min()
            .unwrap_or(0);

        self.lines.extend(lines.iter().map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                line.get(indent..)
                    .unwrap_or_else(|| line.trim_start())
                    .trim_end()
                    .to_string()
            }
        }));
        self
    }

    pub fn add_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl BasicBuilder for DocComment {
    fn write(&self, writer: &mut Writer) {
        if self.lines.is_empty() {
            return;
        }
        writer.write_line("/**");
        for line in &self.lines {
            if line.is_empty() {
                writer.write_line(" *");
            } else {
                // Comment terminators inside user documentation would close the block early.
                writer.write_line(&format!(" * {}", line.replace("*/", "*\\/")));
            }
        }
        writer.write_line(" */");
    }
}
