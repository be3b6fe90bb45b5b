use crate::grades::percentage;
use crate::models::{Assignment, TermGrade};

/// What a data row of an assignment table contributes to the course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEffect {
    /// Every cell is blank.
    Skip,
    CategoryAverage(String),
    TermGrade(TermGrade),
    NewAssignment(Assignment),
    /// Too few cells, or an assignment row seen before any category.
    Ignored,
}

/// Interprets one data row, given the category opened by the latest header table.
///
/// Never fails: rows that cannot be read come back as `Ignored`.
pub fn interpret<S: AsRef<str>>(cells: &[S], current_category: Option<&str>) -> RowEffect {
    let cell = |i: usize| cells.get(i).map(|c| c.as_ref().trim());

    if cells.iter().all(|c| c.as_ref().trim().is_empty()) {
        return RowEffect::Skip;
    }

    let label = cell(0).unwrap_or_default().to_lowercase();

    if label.contains("category average") {
        return match (current_category, cell(1)) {
            (Some(_), Some(average)) => RowEffect::CategoryAverage(average.to_string()),
            _ => RowEffect::Ignored,
        };
    }

    if label.contains("term grade") {
        return match cell(1) {
            Some(score) => RowEffect::TermGrade(TermGrade {
                score: score.to_string(),
                letter: cell(2).unwrap_or_default().to_string(),
            }),
            None => RowEffect::Ignored,
        };
    }

    if current_category.is_none() || cells.len() < 5 {
        return RowEffect::Ignored;
    }

    let points = cell(1);
    let max_points = cell(2);
    RowEffect::NewAssignment(Assignment {
        name: cell(0).unwrap_or_default().to_string(),
        points: points.map(str::to_string),
        max_points: max_points.map(str::to_string),
        percentage: percentage::compute(points, max_points),
        status: cell(4).unwrap_or_default().to_string(),
        due_date: cell(5).map(str::to_string),
    })
}
