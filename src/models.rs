use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Header block at the top of a course frame: course, teacher, term.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CourseInfo {
    pub course_name: String,
    pub teacher_name: String,
    pub term: String,
}

impl CourseInfo {
    /// Takes the first three lines as course name, teacher and term.
    /// Missing lines stay empty.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let line = |i: usize| lines.get(i).map(|l| l.as_ref().to_string()).unwrap_or_default();
        CourseInfo {
            course_name: line(0),
            teacher_name: line(1),
            term: line(2),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub points: Option<String>,
    pub max_points: Option<String>,
    pub percentage: Option<String>,
    pub status: String,
    pub due_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Category {
    // The map key in `CourseRecord::categories` already carries the name.
    #[serde(skip)]
    pub name: String,
    pub assignments: Vec<Assignment>,
    pub category_average: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category { name: name.into(), assignments: Vec::new(), category_average: None }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TermGrade {
    pub score: String,
    pub letter: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CourseRecord {
    pub course_info: CourseInfo,
    pub categories: IndexMap<String, Category>,
    pub term_grade: Option<TermGrade>,
}

impl CourseRecord {
    pub fn new(course_info: CourseInfo) -> Self {
        CourseRecord { course_info, categories: IndexMap::new(), term_grade: None }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.term_grade.is_none()
    }
}

/// One entry per course frame that produced data, in frame order.
pub type GradeReport = Vec<CourseRecord>;
