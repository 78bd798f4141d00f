pub mod response;
pub mod resume;

pub use resume::{
    EducationField, EducationItem, ExperienceField, ExperienceItem, FieldSet, ResumeModel,
    SkillText,
};
