use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::models::GradeReport;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SchoolInfo {
    pub name: String,
    pub year: String,
}

/// Where and when the frames were captured.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DebugInfo {
    pub url: String,
    pub timestamp: String,
}

/// Record handed to whoever stores the scrape.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Snapshot {
    pub school_info: SchoolInfo,
    pub courses: GradeReport,
    pub debug: DebugInfo,
}

impl Snapshot {
    /// Wraps a report, stamping it with the current local time.
    pub fn new(school_info: SchoolInfo, courses: GradeReport, url: impl Into<String>) -> Self {
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        Snapshot { school_info, courses, debug: DebugInfo { url: url.into(), timestamp } }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CourseInfo, CourseRecord};

    #[test]
    fn serializes_in_portal_order() {
        let mut course = CourseRecord::new(CourseInfo { course_name: "Art".into(), ..Default::default() });
        course.categories.insert("tests".into(), Category::new("tests"));
        course.categories.insert("homework".into(), Category::new("homework"));

        let snapshot = Snapshot::new(SchoolInfo::default(), vec![course], "https://portal/dashboard");
        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["debug"]["url"], "https://portal/dashboard");
        assert_eq!(json["courses"][0]["course_info"]["course_name"], "Art");
        assert_eq!(json["courses"][0]["term_grade"], serde_json::Value::Null);
        assert_eq!(json["courses"][0]["categories"]["tests"]["category_average"], serde_json::Value::Null);
        assert!(json["courses"][0]["categories"]["tests"].get("name").is_none());

        let text = snapshot.to_json_pretty().unwrap();
        assert!(text.find("\"tests\"").unwrap() < text.find("\"homework\"").unwrap());
    }

    #[test]
    fn timestamp_is_iso_like() {
        let snapshot = Snapshot::new(SchoolInfo::default(), Vec::new(), "");
        let ts = &snapshot.debug.timestamp;
        assert_eq!(ts.len(), "2024-05-01T10:00:00.000000".len());
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
    }
}
