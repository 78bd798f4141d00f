// src/types/resume.rs
//! Resume data structures exchanged with the resume backend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== Resume JSON Structure =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeModel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub company: String,
    pub role: String,
    pub start_date: String, // "YYYY-MM", never validated
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub school: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
}

impl ResumeModel {
    /// Empty resume, the state before anything is loaded or imported
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when at least one section holds something worth showing
    pub fn has_content(&self) -> bool {
        !self.name.is_empty()
            || !self.summary.is_empty()
            || !self.experience.is_empty()
            || !self.education.is_empty()
            || !self.skills.is_empty()
    }
}

// ===== Field selectors =====

/// Something an editor can write a single string value into
pub trait FieldSet {
    type Field: Copy + fmt::Debug;

    fn set_field(&mut self, field: Self::Field, value: String);
    fn field(&self, field: Self::Field) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Company,
    Role,
    StartDate,
    EndDate,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    School,
    Degree,
    StartDate,
    EndDate,
}

impl FieldSet for ExperienceItem {
    type Field = ExperienceField;

    fn set_field(&mut self, field: ExperienceField, value: String) {
        match field {
            ExperienceField::Company => self.company = value,
            ExperienceField::Role => self.role = value,
            ExperienceField::StartDate => self.start_date = value,
            ExperienceField::EndDate => self.end_date = value,
            ExperienceField::Description => self.description = value,
        }
    }

    fn field(&self, field: ExperienceField) -> &str {
        match field {
            ExperienceField::Company => &self.company,
            ExperienceField::Role => &self.role,
            ExperienceField::StartDate => &self.start_date,
            ExperienceField::EndDate => &self.end_date,
            ExperienceField::Description => &self.description,
        }
    }
}

impl FieldSet for EducationItem {
    type Field = EducationField;

    fn set_field(&mut self, field: EducationField, value: String) {
        match field {
            EducationField::School => self.school = value,
            EducationField::Degree => self.degree = value,
            EducationField::StartDate => self.start_date = value,
            EducationField::EndDate => self.end_date = value,
        }
    }

    fn field(&self, field: EducationField) -> &str {
        match field {
            EducationField::School => &self.school,
            EducationField::Degree => &self.degree,
            EducationField::StartDate => &self.start_date,
            EducationField::EndDate => &self.end_date,
        }
    }
}

/// Skills are bare strings, the whole item is the only field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillText;

impl FieldSet for String {
    type Field = SkillText;

    fn set_field(&mut self, _field: SkillText, value: String) {
        *self = value;
    }

    fn field(&self, _field: SkillText) -> &str {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

// Accepts both the wire name and a snake_case spelling
impl FromStr for ExperienceField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "company" => Ok(Self::Company),
            "role" => Ok(Self::Role),
            "startDate" | "start_date" => Ok(Self::StartDate),
            "endDate" | "end_date" => Ok(Self::EndDate),
            "description" => Ok(Self::Description),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

impl FromStr for EducationField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "school" => Ok(Self::School),
            "degree" => Ok(Self::Degree),
            "startDate" | "start_date" => Ok(Self::StartDate),
            "endDate" | "end_date" => Ok(Self::EndDate),
            other => Err(UnknownField(other.to_string())),
        }
    }
}
