mod course;
mod request;

pub use course::{CourseDraft, CourseOutline, Lesson, Module, ModuleSummary, Test, Topic};
pub use request::{
    language_name, normalize_level, GenerationRequest, PublishRequest, DEFAULT_DURATION_WEEKS,
    DEFAULT_LANGUAGE, DEFAULT_LEVEL, SUPPORTED_LANGUAGES,
};
