//! Data models for tracked records

pub mod course;
pub mod experience;
pub mod goals;
pub mod track;

pub use course::{CourseRecord, Grade};
pub use experience::{Category, ExperienceRecord};
pub use goals::GoalMap;
pub use track::Track;
