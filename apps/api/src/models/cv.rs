use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel shown in place of a missing end date.
pub const PRESENT_LABEL: &str = "Present";

/// Everything needed to build one CV document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CvInput {
    pub personal: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub mother_tongue: String,
    pub languages: Vec<LanguageSkill>,
    /// Comma-delimited soft skills.
    pub soft_skills: String,
    /// Comma-delimited programming skills.
    pub programming_skills: String,
    pub projects: Vec<String>,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub birthplace: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub organization: String,
    pub location: String,
    pub role: String,
    pub start_date: String,
    /// `None`, empty or whitespace-only means the position is ongoing.
    pub end_date: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub start_date: String,
    pub end_date: Option<String>,
    pub location: String,
    pub degree: String,
    pub institute: String,
    pub modules: String,
    pub final_grade: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub language: String,
    pub listening: CefrLevel,
    pub reading: CefrLevel,
    pub spoken_production: CefrLevel,
    pub spoken_interaction: CefrLevel,
}

/// CEFR-like proficiency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(format!("'{other}' is not one of A1, A2, B1, B2, C1, C2")),
        }
    }
}

/// Resolves an optional end date to its display label.
pub fn end_date_label(end_date: Option<&str>) -> &str {
    match end_date.map(str::trim) {
        Some(d) if !d.is_empty() => d,
        _ => PRESENT_LABEL,
    }
}

/// Splits a comma-delimited list into trimmed labels, keeping order and
/// duplicates. Empty labels (stray or trailing commas) are dropped.
pub fn split_skills(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Replaces every character that is not an ASCII letter or digit with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
