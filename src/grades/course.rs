use log::{debug, error};

use crate::config::{ExtractorConfig, RepeatedCategory};
use crate::document::{DocumentContext, Table};
use crate::error::TableError;
use crate::grades::classify::{classify_table, TableKind};
use crate::grades::rows::{interpret, RowEffect};
use crate::models::{Category, CourseInfo, CourseRecord};

/// Result of feeding one table to the course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// A category header opened (or reopened) this category.
    Category(String),
    /// An assignment table; `applied` counts rows that changed the record.
    Rows { applied: usize },
    Skipped,
}

/// Accumulates one course record, table by table, in document order.
#[derive(Debug)]
pub struct CourseBuilder<'a> {
    config: &'a ExtractorConfig,
    record: CourseRecord,
    current_category: Option<String>,
}

impl<'a> CourseBuilder<'a> {
    pub fn new(course_info: CourseInfo, config: &'a ExtractorConfig) -> Self {
        CourseBuilder { config, record: CourseRecord::new(course_info), current_category: None }
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn apply_table(&mut self, table: &Table) -> Result<TableOutcome, TableError> {
        match classify_table(table, self.config) {
            TableKind::CategoryHeader(name) => {
                self.open_category(&name);
                Ok(TableOutcome::Category(name))
            }
            TableKind::AssignmentTable => {
                let mut applied = 0;
                for row in table.data_rows() {
                    let effect = interpret(row, self.current_category.as_deref());
                    if self.apply_effect(effect)? {
                        applied += 1;
                    }
                }
                Ok(TableOutcome::Rows { applied })
            }
            TableKind::Unrecognized => Ok(TableOutcome::Skipped),
        }
    }

    fn open_category(&mut self, name: &str) {
        self.current_category = Some(name.to_string());
        let existing = self.record.categories.contains_key(name);
        if existing && self.config.repeated_category == RepeatedCategory::Merge {
            return;
        }
        if existing {
            debug!("Category `{}` reopened, dropping its earlier rows", name);
        }
        // IndexMap keeps the original slot on re-insert, so order follows first appearance.
        self.record.categories.insert(name.to_string(), Category::new(name));
    }

    /// Returns whether the effect changed the record.
    fn apply_effect(&mut self, effect: RowEffect) -> Result<bool, TableError> {
        match effect {
            RowEffect::Skip | RowEffect::Ignored => Ok(false),
            RowEffect::TermGrade(grade) => {
                self.record.term_grade = Some(grade);
                Ok(true)
            }
            RowEffect::CategoryAverage(average) => {
                self.active_category()?.category_average = Some(average);
                Ok(true)
            }
            RowEffect::NewAssignment(assignment) => {
                self.active_category()?.assignments.push(assignment);
                Ok(true)
            }
        }
    }

    fn active_category(&mut self) -> Result<&mut Category, TableError> {
        let name = self.current_category.as_deref().unwrap_or_default();
        self.record
            .categories
            .get_mut(name)
            .ok_or_else(|| TableError::UnknownCategory(name.to_string()))
    }

    /// The finished record, or `None` when nothing was found.
    pub fn finish(self) -> Option<CourseRecord> {
        if self.record.is_empty() { None } else { Some(self.record) }
    }
}

/// Builds the course record for one frame. A failing table is logged and skipped.
pub fn extract_course(context: &DocumentContext, config: &ExtractorConfig) -> Option<CourseRecord> {
    // Course, teacher and term come from the first three lines of the frame.
    let course_info = CourseInfo::from_lines(&context.lines);
    let mut builder = CourseBuilder::new(course_info, config);

    // Feeds every table in page order; a failing table is logged and the rest still count.
    for (index, table) in context.tables.iter().enumerate() {
        match builder.apply_table(table) {
            Ok(outcome) => debug!("Table {} of {}: {:?}", index, context.locator, outcome),
            Err(e) => error!("Error processing table {} of {}: {}", index, context.locator, e),
        }
    }

    // Keeps the course only if it found a category or a term grade.
    builder.finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::TermGrade;

    fn header(text: &str) -> Table {
        Table::new(text, vec![vec![text.to_string()]])
    }

    fn assignments(rows: &[&[&str]]) -> Table {
        let mut all = vec![vec!["Assignment", "Pts", "Max", "Pct", "Status", "Due"]];
        all.extend(rows.iter().map(|r| r.to_vec()));
        Table::from_rows(all)
    }

    fn course() -> DocumentContext {
        DocumentContext::new("https://portal/grades.cfm?class=12")
            .with_text("Algebra I\nMs. Rivera\nTerm 1\nHomework")
    }

    #[test]
    fn builds_categories_and_term_grade() {
        let ctx = course()
            .with_table(header("Homework"))
            .with_table(assignments(&[
                &["HW 1", "9", "10", "", "Graded", "09/01"],
                &["", "", "", "", "", ""],
                &["Category Average", "90"],
            ]))
            .with_table(header("Tests"))
            .with_table(assignments(&[&["Unit 1", "45", "50", "", "Graded"], &["Term Grade", "91", "A-"]]));

        let record = extract_course(&ctx, &ExtractorConfig::default()).unwrap();
        assert_eq!(record.course_info.course_name, "Algebra I");
        assert_eq!(record.course_info.teacher_name, "Ms. Rivera");
        assert_eq!(record.course_info.term, "Term 1");
        assert_eq!(record.categories.keys().collect::<Vec<_>>(), ["homework", "tests"]);

        let homework = &record.categories["homework"];
        assert_eq!(homework.name, "homework");
        assert_eq!(homework.assignments.len(), 1);
        assert_eq!(homework.assignments[0].percentage.as_deref(), Some("90.0"));
        assert_eq!(homework.category_average.as_deref(), Some("90"));

        let tests = &record.categories["tests"];
        assert_eq!(tests.assignments[0].percentage.as_deref(), Some("90.0"));
        assert_eq!(tests.assignments[0].due_date, None);
        assert_eq!(record.term_grade, Some(TermGrade { score: "91".into(), letter: "A-".into() }));
    }

    #[test]
    fn short_text_leaves_fields_empty() {
        let ctx = DocumentContext::new("x").with_text("Biology").with_table(assignments(&[&["Term Grade", "88"]]));
        let record = extract_course(&ctx, &ExtractorConfig::default()).unwrap();
        assert_eq!(record.course_info, CourseInfo { course_name: "Biology".into(), ..Default::default() });
        assert!(record.categories.is_empty());
        assert_eq!(record.term_grade, Some(TermGrade { score: "88".into(), letter: String::new() }));
    }

    #[test]
    fn rows_before_any_category_are_dropped() {
        let ctx = course()
            .with_table(assignments(&[&["HW 0", "5", "5", "", "Graded"], &["Category Average", "100"]]))
            .with_table(header("Quizzes"));
        let record = extract_course(&ctx, &ExtractorConfig::default()).unwrap();
        assert!(record.categories["quizzes"].assignments.is_empty());
        assert_eq!(record.categories["quizzes"].category_average, None);
    }

    #[test]
    fn nothing_recognised_yields_none() {
        let ctx = course()
            .with_table(Table::from_rows(vec![vec!["Attendance", "Absent"], vec!["09/01", "1"]]))
            .with_table(Table::default());
        assert_eq!(extract_course(&ctx, &ExtractorConfig::default()), None);
        assert_eq!(extract_course(&DocumentContext::default(), &ExtractorConfig::default()), None);
    }

    #[test]
    fn empty_category_still_counts() {
        let ctx = course().with_table(header("Classwork"));
        let record = extract_course(&ctx, &ExtractorConfig::default()).unwrap();
        assert_eq!(record.categories.len(), 1);
        assert_eq!(record.term_grade, None);
    }

    fn repeated() -> DocumentContext {
        course()
            .with_table(header("Homework"))
            .with_table(assignments(&[&["HW 1", "9", "10", "", "Graded"]]))
            .with_table(header("Tests"))
            .with_table(assignments(&[&["Test 1", "40", "50", "", "Graded"]]))
            .with_table(header("Homework"))
            .with_table(assignments(&[&["HW 2", "8", "10", "", "Graded"]]))
    }

    #[test]
    fn repeated_header_resets_category_in_place() {
        let record = extract_course(&repeated(), &ExtractorConfig::default()).unwrap();
        assert_eq!(record.categories.keys().collect::<Vec<_>>(), ["homework", "tests"]);
        let names: Vec<_> = record.categories["homework"].assignments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["HW 2"]);
    }

    #[test]
    fn repeated_header_merges_when_configured() {
        let config = ExtractorConfig { repeated_category: RepeatedCategory::Merge, ..Default::default() };
        let record = extract_course(&repeated(), &config).unwrap();
        let names: Vec<_> = record.categories["homework"].assignments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["HW 1", "HW 2"]);
    }

    #[test]
    fn table_outcomes() {
        let config = ExtractorConfig::default();
        let mut builder = CourseBuilder::new(CourseInfo::default(), &config);
        assert_eq!(builder.apply_table(&header("Projects")), Ok(TableOutcome::Category("projects".into())));
        assert_eq!(builder.current_category(), Some("projects"));
        assert_eq!(
            builder.apply_table(&assignments(&[&["P1", "1", "2", "", "Graded"], &["", ""], &["short"]])),
            Ok(TableOutcome::Rows { applied: 1 })
        );
        assert_eq!(builder.apply_table(&Table::from_rows(vec![vec!["Notes"]])), Ok(TableOutcome::Skipped));
    }

    #[test]
    fn failing_table_does_not_stop_the_course() {
        let config = ExtractorConfig::default();
        let mut builder = CourseBuilder::new(CourseInfo::default(), &config);
        builder.current_category = Some("ghost".into());
        let bad = assignments(&[&["Term Grade", "77", "C"], &["HW", "1", "2", "", "Graded"]]);
        assert_eq!(builder.apply_table(&bad), Err(TableError::UnknownCategory("ghost".into())));

        builder.apply_table(&header("Homework")).unwrap();
        builder.apply_table(&assignments(&[&["HW", "1", "2", "", "Graded"]])).unwrap();
        let record = builder.finish().unwrap();
        assert_eq!(record.term_grade.map(|g| g.score), Some("77".to_string()));
        assert_eq!(record.categories["homework"].assignments.len(), 1);
    }
}
