//! Document orchestrator: runs the section composers in their fixed order over
//! one cursor and hands back the finished artifact.
//!
//! A build owns its cursor and display list from start to finish. Nothing is
//! shared between builds, so concurrent requests each call [`compose_cv`] on
//! their own blocking thread.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::compose::entries::{compose_education, compose_experience};
use crate::compose::header::{compose_header, compose_summary};
use crate::compose::headings::{section_heading, sub_heading};
use crate::compose::languages::{compose_language_table, compose_mother_tongue};
use crate::compose::lists::{compose_bullet_list, compose_link, compose_project};
use crate::compose::INK;
use crate::layout::pdf::encode_pdf;
use crate::layout::{default_page_setup, Canvas, DisplayList, LayoutCursor, PageSetup, RenderError};
use crate::models::cv::{sanitize_name, split_skills, CvInput};

pub const ARTIFACT_EXTENSION: &str = "pdf";

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("personal name is required")]
    MissingName,

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Rendered entries per repeated section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCounts {
    pub experience: usize,
    pub education: usize,
    pub languages: usize,
    pub soft_skills: usize,
    pub programming_skills: usize,
    pub projects: usize,
    pub links: usize,
}

#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub page: PageSetup,
    /// Link target for the "None" label when no website is given.
    pub fallback_website: Option<String>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            page: default_page_setup(),
            fallback_website: None,
        }
    }
}

/// A finished build.
#[derive(Debug, Clone)]
pub struct CvArtifact {
    pub id: String,
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
    pub sections: SectionCounts,
    pub document: DisplayList,
}

impl CvArtifact {
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    pub fn to_pdf(&self) -> Result<Vec<u8>, RenderError> {
        encode_pdf(&self.document)
    }
}

/// `{sanitized name}_{YYYYMMDD_HHMMSS}_{6 hex}`.
pub fn artifact_id(name: &str, at: DateTime<Utc>, nonce: Uuid) -> String {
    let hex = nonce.simple().to_string();
    format!(
        "{}_{}_{}",
        sanitize_name(name),
        at.format("%Y%m%d_%H%M%S"),
        &hex[..6]
    )
}

/// Builds one CV into an in-memory display list.
pub fn compose_cv(input: &CvInput, options: &ComposeOptions) -> Result<CvArtifact, ComposeError> {
    let name = input.personal.name.trim();
    if name.is_empty() {
        return Err(ComposeError::MissingName);
    }

    let generated_at = Utc::now();
    let id = artifact_id(name, generated_at, Uuid::new_v4());

    let mut cursor = LayoutCursor::new(DisplayList::new(&options.page), options.page.clone());
    let sections = render_cv(&mut cursor, input, options)?;
    let document = cursor.finish();

    info!(
        artifact_id = %id,
        pages = document.page_count(),
        experience = sections.experience,
        education = sections.education,
        languages = sections.languages,
        projects = sections.projects,
        "cv composed"
    );

    Ok(CvArtifact {
        file_name: format!("{id}.{ARTIFACT_EXTENSION}"),
        id,
        generated_at,
        sections,
        document,
    })
}

/// Draws every section onto `cursor`, starting a fresh page.
pub fn render_cv<C: Canvas>(
    cursor: &mut LayoutCursor<C>,
    input: &CvInput,
    options: &ComposeOptions,
) -> Result<SectionCounts, RenderError> {
    let mut counts = SectionCounts::default();
    cursor.add_page()?;

    compose_header(cursor, &input.personal, options.fallback_website.as_deref())?;

    section_heading(cursor, "ABOUT MYSELF", 7.0, 3.0)?;
    compose_summary(cursor, &input.personal.summary)?;

    section_heading(cursor, "WORK EXPERIENCE", -1.0, 3.0)?;
    cursor.set_text_color(INK);
    for entry in &input.experience {
        compose_experience(cursor, entry)?;
        counts.experience += 1;
    }

    section_heading(cursor, "EDUCATION AND TRAINING", 4.0, 2.0)?;
    for entry in &input.education {
        compose_education(cursor, entry)?;
        counts.education += 1;
    }

    section_heading(cursor, "LANGUAGE SKILLS", -1.0, 3.0)?;
    compose_mother_tongue(cursor, &input.mother_tongue, !input.languages.is_empty())?;
    for skill in &input.languages {
        compose_language_table(cursor, skill)?;
        counts.languages += 1;
    }

    section_heading(cursor, "COMMUNICATION AND INTERPERSONAL SKILLS", 2.0, 2.0)?;
    sub_heading(cursor, "Soft Skills", 14.0, -3.0)?;
    let soft_skills = split_skills(&input.soft_skills);
    compose_bullet_list(cursor, &soft_skills, 16.0)?;
    counts.soft_skills = soft_skills.len();

    section_heading(cursor, "PROGRAMMING SKILLS", 2.0, 2.0)?;
    sub_heading(cursor, "Languages", 14.0, -3.0)?;
    let programming = split_skills(&input.programming_skills);
    compose_bullet_list(cursor, &programming, 20.0)?;
    counts.programming_skills = programming.len();

    cursor.set_y(cursor.y() + 2.0);
    sub_heading(cursor, "Projects", 7.0, 0.5)?;
    cursor.set_y(cursor.y() + 2.0);
    for project in &input.projects {
        if compose_project(cursor, project)? {
            counts.projects += 1;
        }
    }
    for link in input.links.iter().filter(|l| !l.trim().is_empty()) {
        compose_link(cursor, link)?;
        counts.links += 1;
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::DrawOp;
    use crate::models::cv::{
        CefrLevel, EducationEntry, ExperienceEntry, LanguageSkill, PersonalInfo,
    };
    use crate::models::form::{CvForm, FormArrayPolicy};
    use chrono::TimeZone;

    fn sample_input() -> CvInput {
        CvInput {
            personal: PersonalInfo {
                name: "Jane Doe".to_string(),
                birthplace: "Lahore".to_string(),
                phone: "+49 30 1234567".to_string(),
                email: "jane@example.com".to_string(),
                website: None,
                linkedin: None,
                summary: "Backend engineer.\n- Rust\n- Go".to_string(),
            },
            experience: vec![ExperienceEntry {
                organization: "Acme".to_string(),
                location: "Berlin".to_string(),
                role: "Engineer".to_string(),
                start_date: "2020".to_string(),
                end_date: None,
                description: "1. Did X\ncontinued prose".to_string(),
            }],
            education: vec![EducationEntry {
                start_date: "2014".to_string(),
                end_date: Some("2018".to_string()),
                location: "Munich".to_string(),
                degree: "BSc Informatics".to_string(),
                institute: "TU Munich".to_string(),
                modules: String::new(),
                final_grade: "1.7".to_string(),
            }],
            mother_tongue: "Urdu".to_string(),
            languages: vec![LanguageSkill {
                language: "German".to_string(),
                listening: CefrLevel::C1,
                reading: CefrLevel::C1,
                spoken_production: CefrLevel::B1,
                spoken_interaction: CefrLevel::B2,
            }],
            soft_skills: "Teamwork, Leadership,".to_string(),
            programming_skills: "Rust, Go, SQL".to_string(),
            projects: vec!["Built a PDF engine".to_string(), "  ".to_string()],
            links: vec!["https://github.com/jane".to_string()],
        }
    }

    #[test]
    fn test_artifact_id_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let nonce = Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000").unwrap();
        assert_eq!(
            artifact_id("Jane Doe-Smith", at, nonce),
            "Jane_Doe_Smith_20240309_140507_a1b2c3"
        );
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let mut input = sample_input();
        input.personal.name = "   ".to_string();
        let err = compose_cv(&input, &ComposeOptions::default()).unwrap_err();
        assert!(matches!(err, ComposeError::MissingName));
    }

    #[test]
    fn test_compose_counts_sections_and_names_file() {
        let artifact = compose_cv(&sample_input(), &ComposeOptions::default()).unwrap();
        assert!(artifact.id.starts_with("Jane_Doe_"));
        assert_eq!(artifact.file_name, format!("{}.pdf", artifact.id));
        assert_eq!(
            artifact.sections,
            SectionCounts {
                experience: 1,
                education: 1,
                languages: 1,
                soft_skills: 2,
                programming_skills: 3,
                projects: 1,
                links: 1,
            }
        );
        assert!(artifact.page_count() >= 1);
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let artifact = compose_cv(&sample_input(), &ComposeOptions::default()).unwrap();
        let texts: Vec<&str> = artifact.document.texts().collect();
        let order = [
            "Jane Doe",
            "ABOUT MYSELF",
            "WORK EXPERIENCE",
            "EDUCATION AND TRAINING",
            "LANGUAGE SKILLS",
            "COMMUNICATION AND INTERPERSONAL SKILLS",
            "PROGRAMMING SKILLS",
            "Projects",
            "Link: ",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|title| {
                texts
                    .iter()
                    .position(|t| t == title)
                    .unwrap_or_else(|| panic!("missing {title}"))
            })
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "sections out of order: {positions:?}"
        );
        assert!(texts.contains(&"Present"));
    }

    #[test]
    fn test_truncated_form_renders_two_experience_entries() {
        let form = CvForm {
            name: "Jane Doe".to_string(),
            exp_company: vec!["Acme".into(), "Globex".into(), "Initech".into()],
            exp_position: vec!["Engineer".into(), "Lead".into()],
            exp_location: vec!["Berlin".into(); 3],
            exp_start: vec!["2020".into(); 3],
            exp_end: vec![String::new(); 3],
            exp_description: vec!["Did things".into(); 3],
            ..CvForm::default()
        };
        let input = form.into_input(FormArrayPolicy::Truncate).unwrap();
        let artifact = compose_cv(&input, &ComposeOptions::default()).unwrap();

        assert_eq!(artifact.sections.experience, 2);
        let texts: Vec<&str> = artifact.document.texts().collect();
        assert!(texts.contains(&"ACME -   "));
        assert!(texts.contains(&"GLOBEX -   "));
        assert!(!texts.iter().any(|t| t.starts_with("INITECH")));
    }

    #[test]
    fn test_long_input_spills_onto_more_pages() {
        let mut input = sample_input();
        input.experience = (0..12)
            .map(|i| ExperienceEntry {
                organization: format!("Company {i}"),
                location: "Berlin".to_string(),
                role: "Engineer".to_string(),
                start_date: "2020".to_string(),
                end_date: Some("2021".to_string()),
                description: "Owned the ingestion pipeline.\n- Cut latency in half\n- Led three engineers"
                    .to_string(),
            })
            .collect();
        let artifact = compose_cv(&input, &ComposeOptions::default()).unwrap();
        assert!(artifact.page_count() >= 2);

        let trigger = default_page_setup().break_trigger();
        for op in artifact.document.ops() {
            if let DrawOp::FillRect { rect, .. } = op {
                assert!(rect.y + rect.h <= trigger + 1e-3 || rect.y == 0.0);
            }
        }
    }

    #[test]
    fn test_fallback_website_is_linked() {
        let options = ComposeOptions {
            fallback_website: Some("https://fallback.example".to_string()),
            ..ComposeOptions::default()
        };
        let artifact = compose_cv(&sample_input(), &options).unwrap();
        assert!(artifact.document.ops().any(
            |op| matches!(op, DrawOp::Link { uri, .. } if uri == "https://fallback.example")
        ));
    }

    #[test]
    fn test_artifact_encodes_to_pdf() {
        let artifact = compose_cv(&sample_input(), &ComposeOptions::default()).unwrap();
        let bytes = artifact.to_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
