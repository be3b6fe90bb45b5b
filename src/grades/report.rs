use std::panic::{catch_unwind, AssertUnwindSafe};

use log::{error, info, warn};
use regex::Regex;

use crate::config::ExtractorConfig;
use crate::document::DocumentContext;
use crate::grades::course::extract_course;
use crate::models::{CourseRecord, GradeReport};

/// Decides whether a frame locator points at a gradebook view.
#[derive(Debug, Clone)]
pub struct GradesLocator {
    pattern: Regex,
}

impl GradesLocator {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(GradesLocator { pattern: Regex::new(pattern)? })
    }

    pub fn from_config(config: &ExtractorConfig) -> Result<Self, regex::Error> {
        Self::new(&config.frame_pattern)
    }

    pub fn matches(&self, locator: &str) -> bool {
        !locator.is_empty() && self.pattern.is_match(locator)
    }
}

impl Default for GradesLocator {
    fn default() -> Self {
        GradesLocator::from_config(&ExtractorConfig::default()).expect("default frame pattern compiles")
    }
}

/// Counters describing one assembly pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub contexts: usize,
    /// Contexts accepted by the locator predicate.
    pub matched: usize,
    /// Contexts that produced a non-empty course.
    pub extracted: usize,
}

/// Extracts every grades frame and returns the courses found, or `None` when there were none.
pub fn assemble<P>(contexts: &[DocumentContext], is_grades_frame: P, config: &ExtractorConfig) -> Option<GradeReport>
where
    P: Fn(&str) -> bool,
{
    assemble_detailed(contexts, is_grades_frame, config).0
}

/// Like [`assemble`], also reporting how many frames matched and produced data.
pub fn assemble_detailed<P>(
    contexts: &[DocumentContext],
    is_grades_frame: P,
    config: &ExtractorConfig,
) -> (Option<GradeReport>, AssemblyStats)
where
    P: Fn(&str) -> bool,
{
    assemble_with(contexts, is_grades_frame, |ctx| extract_course(ctx, config))
}

fn assemble_with<P, E>(contexts: &[DocumentContext], is_grades_frame: P, extract: E) -> (Option<GradeReport>, AssemblyStats)
where
    P: Fn(&str) -> bool,
    E: Fn(&DocumentContext) -> Option<CourseRecord>,
{
    let mut stats = AssemblyStats { contexts: contexts.len(), ..Default::default() };
    let mut courses = GradeReport::new();

    for ctx in contexts.iter().filter(|ctx| is_grades_frame(&ctx.locator)) {
        stats.matched += 1;
        info!("Processing grades frame: {}", ctx.locator);

        match catch_unwind(AssertUnwindSafe(|| extract(ctx))) {
            Ok(Some(course)) => {
                stats.extracted += 1;
                courses.push(course);
            }
            Ok(None) => warn!("No grades found in frame: {}", ctx.locator),
            Err(panic_info) => {
                let msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                error!("Error extracting grades from frame {}: {}", ctx.locator, msg);
            }
        }
    }

    let report = if courses.is_empty() { None } else { Some(courses) };
    (report, stats)
}
