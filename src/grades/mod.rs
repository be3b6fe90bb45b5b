//! Grade extraction: table roles, row roles, percentages, and the per-course
//! and per-report folds built on top of them.

pub mod classify;
pub mod course;
pub mod percentage;
pub mod report;
pub mod rows;

pub use classify::{classify, classify_table, TableKind};
pub use course::{extract_course, CourseBuilder, TableOutcome};
pub use report::{assemble, assemble_detailed, AssemblyStats, GradesLocator};
pub use rows::{interpret, RowEffect};
