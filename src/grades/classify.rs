use crate::config::ExtractorConfig;
use crate::document::Table;

/// Role a table plays in a course frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableKind {
    /// Banner opening a grading category, e.g. "Homework". Carries the derived category name.
    CategoryHeader(String),
    /// Table whose header row has an "Assignment" column.
    AssignmentTable,
    Unrecognized,
}

#[derive(Debug, Clone, Copy)]
enum Cue {
    CategoryKeyword,
    AssignmentColumn,
}

// A category banner can also carry assignment-like cells, so the keyword check goes first.
const PRIORITY: [Cue; 2] = [Cue::CategoryKeyword, Cue::AssignmentColumn];

/// Classifies a table from its flattened text and its header cells.
///
/// The category name is the last whitespace token of the text, so multi-word
/// banners collapse to their last word ("Homework Assignments" becomes
/// "assignments").
pub fn classify<S: AsRef<str>>(table_text: &str, header: &[S], config: &ExtractorConfig) -> TableKind {
    let text = table_text.trim().to_lowercase();

    for cue in PRIORITY {
        match cue {
            Cue::CategoryKeyword => {
                if config.category_keywords.iter().any(|k| text.contains(k.as_str())) {
                    if let Some(name) = text.split_whitespace().last() {
                        return TableKind::CategoryHeader(name.to_string());
                    }
                }
            }
            Cue::AssignmentColumn => {
                if header.iter().any(|cell| cell.as_ref().trim().to_lowercase() == "assignment") {
                    return TableKind::AssignmentTable;
                }
            }
        }
    }

    TableKind::Unrecognized
}

pub fn classify_table(table: &Table, config: &ExtractorConfig) -> TableKind {
    classify(&table.text, table.header().unwrap_or_default(), config)
}
