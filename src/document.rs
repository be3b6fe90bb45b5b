/// One table-like grid: its flattened text plus rows of cell texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Whole visible text of the table, as rendered.
    pub text: String,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(text: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Table { text: text.into(), rows }
    }

    /// Builds a table from rows alone; the text is the cells joined by tabs, rows by newlines.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let text = rows.iter().map(|row| row.join("\t")).collect::<Vec<_>>().join("\n");
        Table { text, rows }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Every row after the header.
    pub fn data_rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }
}

/// A rendered page or frame, already materialised by whoever drove the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContext {
    /// Frame URL, used to decide whether this is a grades view.
    pub locator: String,
    /// Visible text of the page, one entry per line.
    pub lines: Vec<String>,
    pub tables: Vec<Table>,
}

impl DocumentContext {
    pub fn new(locator: impl Into<String>) -> Self {
        DocumentContext { locator: locator.into(), ..Default::default() }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.lines = text.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect();
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }
}
