use crate::models::cv::{CefrLevel, LanguageSkill};

/// Estimates the writing band from the four supplied ratings.
///
/// Counts ratings that are exactly C1 (C2 earns nothing) and maps the count:
/// 0→A2, 1→B1, 2→B2, 3→C1, 4→C2. Not an ordinal estimate.
pub fn derive_writing(
    listening: CefrLevel,
    reading: CefrLevel,
    spoken_production: CefrLevel,
    spoken_interaction: CefrLevel,
) -> CefrLevel {
    let c1_count = [listening, reading, spoken_production, spoken_interaction]
        .iter()
        .filter(|level| **level == CefrLevel::C1)
        .count();

    match c1_count {
        0 => CefrLevel::A2,
        1 => CefrLevel::B1,
        2 => CefrLevel::B2,
        3 => CefrLevel::C1,
        _ => CefrLevel::C2,
    }
}

pub fn writing_for(skill: &LanguageSkill) -> CefrLevel {
    derive_writing(
        skill.listening,
        skill.reading,
        skill.spoken_production,
        skill.spoken_interaction,
    )
}
