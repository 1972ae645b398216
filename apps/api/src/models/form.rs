//! The parallel-array form payload and its conversion into structured records.
//!
//! Multi-entry fields arrive as separately named arrays (`exp_company[]`,
//! `exp_position[]`, …). Entries are joined positionally. What happens when the
//! arrays of one group disagree in length is decided by [`FormArrayPolicy`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::cv::{
    CefrLevel, CvInput, EducationEntry, ExperienceEntry, LanguageSkill, PersonalInfo,
};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{group} arrays have mismatched lengths: {lengths:?}")]
    LengthMismatch {
        group: &'static str,
        lengths: Vec<(&'static str, usize)>,
    },

    #[error("{field}[{index}] has invalid rating: {reason}")]
    InvalidRating {
        field: &'static str,
        index: usize,
        reason: String,
    },
}

/// How to treat parallel arrays of unequal length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormArrayPolicy {
    /// Reject the form.
    #[default]
    Strict,
    /// Zip to the shortest array and drop the unmatched tail.
    Truncate,
}

impl std::str::FromStr for FormArrayPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(FormArrayPolicy::Strict),
            "truncate" => Ok(FormArrayPolicy::Truncate),
            other => Err(format!("unknown form array policy '{other}'")),
        }
    }
}

/// Form field names mirror the HTML form the payload comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CvForm {
    pub name: String,
    pub birthplace: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub about: String,

    pub exp_company: Vec<String>,
    pub exp_location: Vec<String>,
    pub exp_position: Vec<String>,
    pub exp_start: Vec<String>,
    pub exp_end: Vec<String>,
    pub exp_description: Vec<String>,

    pub edu_institute: Vec<String>,
    pub edu_program: Vec<String>,
    pub edu_location: Vec<String>,
    pub edu_start: Vec<String>,
    pub edu_end: Vec<String>,
    pub edu_grade: Vec<String>,
    pub edu_description: Vec<String>,

    pub mother_tongue: String,
    pub lang_name: Vec<String>,
    pub lang_listening: Vec<String>,
    pub lang_reading: Vec<String>,
    pub lang_spoken: Vec<String>,
    pub lang_interaction: Vec<String>,

    pub soft_skills: String,
    pub programming_skills: String,
    pub project_description: Vec<String>,
    pub additional_links: Vec<String>,
}

impl CvForm {
    /// Joins the parallel arrays into one record per entry.
    pub fn into_input(self, policy: FormArrayPolicy) -> Result<CvInput, FormError> {
        let exp_len = group_len(
            "experience",
            &[
                ("exp_company", self.exp_company.len()),
                ("exp_location", self.exp_location.len()),
                ("exp_position", self.exp_position.len()),
                ("exp_start", self.exp_start.len()),
                ("exp_end", self.exp_end.len()),
                ("exp_description", self.exp_description.len()),
            ],
            policy,
        )?;
        let edu_len = group_len(
            "education",
            &[
                ("edu_institute", self.edu_institute.len()),
                ("edu_program", self.edu_program.len()),
                ("edu_location", self.edu_location.len()),
                ("edu_start", self.edu_start.len()),
                ("edu_end", self.edu_end.len()),
                ("edu_grade", self.edu_grade.len()),
                ("edu_description", self.edu_description.len()),
            ],
            policy,
        )?;
        let lang_len = group_len(
            "language",
            &[
                ("lang_name", self.lang_name.len()),
                ("lang_listening", self.lang_listening.len()),
                ("lang_reading", self.lang_reading.len()),
                ("lang_spoken", self.lang_spoken.len()),
                ("lang_interaction", self.lang_interaction.len()),
            ],
            policy,
        )?;

        let experience = (0..exp_len)
            .map(|i| ExperienceEntry {
                organization: self.exp_company[i].clone(),
                location: self.exp_location[i].clone(),
                role: self.exp_position[i].clone(),
                start_date: self.exp_start[i].clone(),
                end_date: non_blank(&self.exp_end[i]),
                description: self.exp_description[i].clone(),
            })
            .collect();

        let education = (0..edu_len)
            .map(|i| EducationEntry {
                start_date: self.edu_start[i].clone(),
                end_date: non_blank(&self.edu_end[i]),
                location: self.edu_location[i].clone(),
                degree: self.edu_program[i].clone(),
                institute: self.edu_institute[i].clone(),
                modules: self.edu_description[i].clone(),
                final_grade: self.edu_grade[i].clone(),
            })
            .collect();

        let mut languages = Vec::with_capacity(lang_len);
        for i in 0..lang_len {
            languages.push(LanguageSkill {
                language: self.lang_name[i].clone(),
                listening: rating("lang_listening", i, &self.lang_listening[i])?,
                reading: rating("lang_reading", i, &self.lang_reading[i])?,
                spoken_production: rating("lang_spoken", i, &self.lang_spoken[i])?,
                spoken_interaction: rating("lang_interaction", i, &self.lang_interaction[i])?,
            });
        }

        Ok(CvInput {
            personal: PersonalInfo {
                name: self.name,
                birthplace: self.birthplace,
                phone: self.phone,
                email: self.email,
                website: self.website.as_deref().and_then(non_blank),
                linkedin: self.linkedin.as_deref().and_then(non_blank),
                summary: self.about,
            },
            experience,
            education,
            mother_tongue: self.mother_tongue,
            languages,
            soft_skills: self.soft_skills,
            programming_skills: self.programming_skills,
            projects: self.project_description,
            links: self
                .additional_links
                .into_iter()
                .filter(|l| !l.trim().is_empty())
                .collect(),
        })
    }
}

/// Number of entries to build for one group of parallel arrays.
fn group_len(
    group: &'static str,
    lengths: &[(&'static str, usize)],
    policy: FormArrayPolicy,
) -> Result<usize, FormError> {
    let min = lengths.iter().map(|(_, n)| *n).min().unwrap_or(0);
    let max = lengths.iter().map(|(_, n)| *n).max().unwrap_or(0);
    if min == max {
        return Ok(min);
    }
    match policy {
        FormArrayPolicy::Strict => Err(FormError::LengthMismatch {
            group,
            lengths: lengths.to_vec(),
        }),
        FormArrayPolicy::Truncate => {
            warn!(
                group,
                kept = min,
                dropped = max - min,
                "parallel form arrays differ in length; truncating to shortest"
            );
            Ok(min)
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn rating(field: &'static str, index: usize, raw: &str) -> Result<CefrLevel, FormError> {
    raw.parse::<CefrLevel>().map_err(|reason| FormError::InvalidRating {
        field,
        index,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn form_with_experience(orgs: &[&str], roles: &[&str]) -> CvForm {
        let n = orgs.len().max(roles.len());
        CvForm {
            name: "Jane Doe".to_string(),
            exp_company: strings(orgs),
            exp_position: strings(roles),
            exp_location: vec!["Berlin".to_string(); n],
            exp_start: vec!["2020".to_string(); n],
            exp_end: vec![String::new(); n],
            exp_description: vec!["Did things".to_string(); n],
            ..CvForm::default()
        }
    }

    #[test]
    fn test_equal_arrays_zip_positionally() {
        let form = form_with_experience(&["Acme", "Globex"], &["Engineer", "Lead"]);
        let input = form.into_input(FormArrayPolicy::Strict).unwrap();
        assert_eq!(input.experience.len(), 2);
        assert_eq!(input.experience[1].organization, "Globex");
        assert_eq!(input.experience[1].role, "Lead");
        assert!(input.experience[0].end_date.is_none());
    }

    #[test]
    fn test_truncate_policy_drops_unmatched_tail() {
        let form = form_with_experience(&["Acme", "Globex", "Initech"], &["Engineer", "Lead"]);
        let input = form.into_input(FormArrayPolicy::Truncate).unwrap();
        assert_eq!(input.experience.len(), 2);
        assert_eq!(input.experience[0].organization, "Acme");
        assert_eq!(input.experience[1].organization, "Globex");
    }

    #[test]
    fn test_strict_policy_rejects_mismatch() {
        let form = form_with_experience(&["Acme", "Globex", "Initech"], &["Engineer", "Lead"]);
        let err = form.into_input(FormArrayPolicy::Strict).unwrap_err();
        match err {
            FormError::LengthMismatch { group, lengths } => {
                assert_eq!(group, "experience");
                assert!(lengths.contains(&("exp_company", 3)));
                assert!(lengths.contains(&("exp_position", 2)));
            }
            other => panic!("expected length mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_language_ratings_are_parsed() {
        let form = CvForm {
            lang_name: strings(&["German"]),
            lang_listening: strings(&["c1"]),
            lang_reading: strings(&["B2"]),
            lang_spoken: strings(&["B1"]),
            lang_interaction: strings(&["A2"]),
            ..CvForm::default()
        };
        let input = form.into_input(FormArrayPolicy::Strict).unwrap();
        assert_eq!(input.languages[0].listening, CefrLevel::C1);
        assert_eq!(input.languages[0].spoken_interaction, CefrLevel::A2);
    }

    #[test]
    fn test_invalid_rating_names_field_and_index() {
        let form = CvForm {
            lang_name: strings(&["German", "French"]),
            lang_listening: strings(&["C1", "C1"]),
            lang_reading: strings(&["C1", "fluent"]),
            lang_spoken: strings(&["C1", "C1"]),
            lang_interaction: strings(&["C1", "C1"]),
            ..CvForm::default()
        };
        let err = form.into_input(FormArrayPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            FormError::InvalidRating { field: "lang_reading", index: 1, .. }
        ));
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let form = CvForm {
            website: Some("  ".to_string()),
            linkedin: Some("https://linkedin.com/in/jane".to_string()),
            additional_links: strings(&["https://a.dev", " "]),
            ..CvForm::default()
        };
        let input = form.into_input(FormArrayPolicy::Strict).unwrap();
        assert!(input.personal.website.is_none());
        assert_eq!(
            input.personal.linkedin.as_deref(),
            Some("https://linkedin.com/in/jane")
        );
        assert_eq!(input.links, vec!["https://a.dev".to_string()]);
    }

    #[test]
    fn test_policy_parses_from_config_string() {
        assert_eq!("Truncate".parse::<FormArrayPolicy>().unwrap(), FormArrayPolicy::Truncate);
        assert_eq!("strict".parse::<FormArrayPolicy>().unwrap(), FormArrayPolicy::Strict);
        assert!("lenient".parse::<FormArrayPolicy>().is_err());
    }
}
