use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::non_blank;
use crate::render::dates::parse_date;

/// Résumé body as edited by the client and persisted as JSON.
///
/// Every collection defaults to empty and every scalar except the name is optional,
/// so partially filled résumés still load and render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeContent {
    pub professional_info: ProfessionalInfo,
    pub summary: Option<String>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub awards: Vec<Award>,
    pub certifications: Vec<Certification>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfessionalInfo {
    pub name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub position: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: Option<String>,
    pub role: Option<String>,
    pub technologies: Option<Technologies>,
    pub achievements: Vec<String>,
}

/// Clients send technologies either as free text or as a list of tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Technologies {
    Text(String),
    List(Vec<String>),
}

impl Technologies {
    pub fn display(&self) -> String {
        match self {
            Technologies::Text(s) => s.trim().to_string(),
            Technologies::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Award {
    pub title: Option<String>,
    /// Printed as entered, never reformatted.
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
}

impl ResumeContent {
    /// Boundary validation run before a résumé is persisted.
    ///
    /// Rejects a missing name and any date the renderer would fail to format,
    /// naming the offending field so the client can point at it.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.professional_info.name.trim().is_empty() {
            return Err(AppError::Validation(
                "professionalInfo.name is required".to_string(),
            ));
        }

        for (i, exp) in self.work_experience.iter().enumerate() {
            check_date(&exp.start_date, || format!("workExperience[{i}].startDate"))?;
            check_date(&exp.end_date, || format!("workExperience[{i}].endDate"))?;
        }
        for (i, edu) in self.education.iter().enumerate() {
            check_date(&edu.start_date, || format!("education[{i}].startDate"))?;
            check_date(&edu.end_date, || format!("education[{i}].endDate"))?;
        }
        for (i, cert) in self.certifications.iter().enumerate() {
            check_date(&cert.issue_date, || format!("certifications[{i}].issueDate"))?;
            check_date(&cert.expiry_date, || format!("certifications[{i}].expiryDate"))?;
        }
        Ok(())
    }
}

fn check_date(value: &Option<String>, field: impl FnOnce() -> String) -> Result<(), AppError> {
    match non_blank(value) {
        Some(raw) if raw != "Present" && parse_date(raw).is_none() => Err(AppError::Validation(
            format!("{} has an unrecognised date: '{raw}'", field()),
        )),
        _ => Ok(()),
    }
}
