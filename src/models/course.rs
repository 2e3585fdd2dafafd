//! Course structures produced by the generation service.
//!
//! Field names on the wire are camelCase. Collections default to empty so a
//! module or lesson the model cut short still deserializes.

use serde::{Deserialize, Serialize};

/// A multiple-choice check attached to a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub lesson_title: String,
    #[serde(default)]
    pub theory: String,
    #[serde(default)]
    pub tests: Vec<Test>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub topic_title: String,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// A fully generated module. `module_number` is its identity within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub module_number: u32,
    pub module_title: String,
    #[serde(default)]
    pub weeks: Vec<u32>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Module {
    /// Total number of lessons across all topics.
    pub fn lesson_count(&self) -> usize {
        self.topics.iter().map(|t| t.lessons.len()).sum()
    }
}

/// Module entry as announced by the outline, before its content exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub module_number: u32,
    pub module_title: String,
    #[serde(default)]
    pub weeks: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOutline {
    pub course_title: String,
    pub level: String,
    pub duration_weeks: u32,
    #[serde(default)]
    pub description: String,
    /// Planned modules; the service may omit these
    #[serde(default)]
    pub modules: Vec<ModuleSummary>,
}

/// The finished course as returned by the `complete` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub course_title: String,
    pub level: String,
    pub duration_weeks: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl CourseDraft {
    /// Outline view of this draft, with module summaries.
    pub fn outline(&self) -> CourseOutline {
        CourseOutline {
            course_title: self.course_title.clone(),
            level: self.level.clone(),
            duration_weeks: self.duration_weeks,
            description: self.description.clone(),
            modules: self
                .modules
                .iter()
                .map(|m| ModuleSummary {
                    module_number: m.module_number,
                    module_title: m.module_title.clone(),
                    weeks: m.weeks.clone(),
                })
                .collect(),
        }
    }
}
