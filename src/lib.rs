pub mod config;
pub mod document;
pub mod error;
pub mod grades;
pub mod models;
pub mod portal;
pub mod snapshot;

pub use config::{ExtractorConfig, RepeatedCategory};
pub use document::{DocumentContext, Table};
pub use models::{Assignment, Category, CourseInfo, CourseRecord, GradeReport, TermGrade};
