use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_CATEGORY_KEYWORDS: [&str; 5] = ["classwork", "homework", "projects", "quizzes", "tests"];

/// Frames served by the gradebook: the legacy `grades.cfm` page or the newer `/GradeBook/` app.
pub const DEFAULT_FRAME_PATTERN: &str = r"(?i:grades\.cfm)|/GradeBook/";

/// What happens when a category header shows up a second time in the same course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepeatedCategory {
    /// The later header wins and the earlier assignments are dropped.
    #[default]
    Reset,
    /// Keep the existing entry and keep appending to it.
    Merge,
}

impl FromStr for RepeatedCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(RepeatedCategory::Reset),
            "merge" => Ok(RepeatedCategory::Merge),
            _ => Err(ConfigError::InvalidValue { key: "GRADES_REPEATED_CATEGORY", value: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Lowercase words that mark a table as a category header.
    pub category_keywords: Vec<String>,
    pub repeated_category: RepeatedCategory,
    /// Regex a frame locator must match to be treated as a grades view.
    pub frame_pattern: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            category_keywords: DEFAULT_CATEGORY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            repeated_category: RepeatedCategory::default(),
            frame_pattern: DEFAULT_FRAME_PATTERN.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Reads overrides from the process environment (call `dotenv()` first to pick up `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with the variable lookup supplied by the caller.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ExtractorConfig::default();

        if let Some(value) = lookup("GRADES_REPEATED_CATEGORY") {
            config.repeated_category = value.parse()?;
        }

        if let Some(value) = lookup("GRADES_CATEGORY_KEYWORDS") {
            let keywords: Vec<String> = value
                .split(',')
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(ConfigError::InvalidValue { key: "GRADES_CATEGORY_KEYWORDS", value });
            }
            config.category_keywords = keywords;
        }

        if let Some(value) = lookup("GRADES_FRAME_PATTERN") {
            // Fail here rather than at the first frame.
            regex::Regex::new(&value)?;
            config.frame_pattern = value;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = ExtractorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ExtractorConfig::default());
        assert_eq!(config.repeated_category, RepeatedCategory::Reset);
        assert_eq!(config.category_keywords.len(), 5);
    }

    #[test]
    fn reads_overrides() {
        let config = ExtractorConfig::from_lookup(lookup(&[
            ("GRADES_REPEATED_CATEGORY", " Merge "),
            ("GRADES_CATEGORY_KEYWORDS", "Labs, quizzes,,"),
            ("GRADES_FRAME_PATTERN", "gradebook"),
        ]))
        .unwrap();
        assert_eq!(config.repeated_category, RepeatedCategory::Merge);
        assert_eq!(config.category_keywords, vec!["labs", "quizzes"]);
        assert_eq!(config.frame_pattern, "gradebook");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ExtractorConfig::from_lookup(lookup(&[("GRADES_REPEATED_CATEGORY", "append")])).is_err());
        assert!(ExtractorConfig::from_lookup(lookup(&[("GRADES_CATEGORY_KEYWORDS", " , ")])).is_err());
        assert!(matches!(
            ExtractorConfig::from_lookup(lookup(&[("GRADES_FRAME_PATTERN", "grades(")])),
            Err(ConfigError::FramePattern(_))
        ));
    }
}
