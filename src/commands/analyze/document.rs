use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Block {
    Heading { level: usize, text: String },
    Paragraph(String),
    Bullets(Vec<String>),
    Table(Table),
    Rule,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Append-only sequence of report blocks, serialized to markdown at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, level: usize, text: impl Into<String>) {
        self.blocks.push(Block::Heading {
            level,
            text: text.into(),
        });
    }

    pub fn paragraph(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Paragraph(text.into()));
    }

    pub fn bullets(&mut self, items: Vec<String>) {
        self.blocks.push(Block::Bullets(items));
    }

    pub fn table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn rule(&mut self) {
        self.blocks.push(Block::Rule);
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for (index, block) in self.blocks.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            write_block(&mut out, block);
        }
        out
    }
}

fn write_block(out: &mut String, block: &Block) {
    // Writing into a String cannot fail.
    match block {
        Block::Heading { level, text } => {
            let _ = writeln!(out, "{} {text}", "#".repeat((*level).clamp(1, 6)));
        }
        Block::Paragraph(text) => {
            let _ = writeln!(out, "{text}");
        }
        Block::Bullets(items) => {
            for item in items {
                let _ = writeln!(out, "- {item}");
            }
        }
        Block::Table(table) => {
            let _ = writeln!(out, "| {} |", table.headers.join(" | "));
            let separators = table
                .headers
                .iter()
                .map(|header| "-".repeat(header.chars().count().max(3)))
                .collect::<Vec<String>>();
            let _ = writeln!(out, "|-{}-|", separators.join("-|-"));
            for row in &table.rows {
                let _ = writeln!(out, "| {} |", row.join(" | "));
            }
        }
        Block::Rule => {
            let _ = writeln!(out, "---");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, Table};

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        let mut document = Document::new();
        document.heading(1, "Title");
        document.bullets(vec!["one".to_string(), "two".to_string()]);
        document.rule();

        assert_eq!(document.to_markdown(), "# Title\n\n- one\n- two\n\n---\n");
    }

    #[test]
    fn table_renders_header_separator_and_rows() {
        let mut table = Table::new(["Size", "ef"]);
        table.push_row(vec!["full".to_string(), "64".to_string()]);

        let mut document = Document::new();
        document.table(table);

        assert_eq!(
            document.to_markdown(),
            "| Size | ef |\n|------|-----|\n| full | 64 |\n"
        );
    }
}
