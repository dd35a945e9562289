use tracing::debug;

use crate::error::{MbgError, Result};
use crate::models::{
    ClassLabel, EducationLevel, Gender, Recipient, RecipientProfile, StandardGroupId,
};
use crate::reference::{AgeBand, ReferenceData};

/// Map a recipient profile to exactly one standard group.
///
/// Age profiles go through the age bands and then the education table;
/// class profiles use the class-to-group table directly. Both end in the
/// same group vocabulary.
pub fn resolve(profile: &RecipientProfile, data: &ReferenceData) -> Result<StandardGroupId> {
    let group_id = match profile.recipient {
        Recipient::Age(age) => resolve_by_age(age, profile.gender, data)?,
        Recipient::Class(class) => resolve_by_class(class, profile.gender, data)?,
    };
    debug!(%profile, %group_id, "resolved standard group");
    Ok(group_id)
}

/// First age band containing `age`, in table order.
pub fn find_age_band(age: u8, data: &ReferenceData) -> Result<&AgeBand> {
    data.age_bands()
        .iter()
        .find(|band| band.contains(age))
        .ok_or_else(|| MbgError::Resolution(format!("no age band covers age {}", age)))
}

fn resolve_by_age(age: u8, gender: Gender, data: &ReferenceData) -> Result<StandardGroupId> {
    let band = find_age_band(age, data)?;
    let gender = effective_gender(gender, band.default_gender);
    group_for_grade(band.level, band.grade, gender, data)
}

fn resolve_by_class(class: ClassLabel, gender: Gender, data: &ReferenceData) -> Result<StandardGroupId> {
    let candidates = data.class_groups(class);
    if candidates.is_empty() {
        return Err(MbgError::Resolution(format!("no standard group for {}", class)));
    }

    let default_gender = data
        .age_bands()
        .iter()
        .find(|band| band.level == class.level() && band.grade == class.grade())
        .map(|band| band.default_gender)
        .unwrap_or(Gender::All);
    let gender = effective_gender(gender, default_gender);

    pick_for_gender(candidates.iter(), gender)
        .ok_or_else(|| MbgError::Resolution(format!("no {} standard group for {}", gender, class)))
}

/// Group id for a level and grade through the education table.
pub fn group_for_grade(
    level: EducationLevel,
    grade: u8,
    gender: Gender,
    data: &ReferenceData,
) -> Result<StandardGroupId> {
    let candidates: Vec<&StandardGroupId> = data
        .education_groups()
        .iter()
        .filter(|row| row.covers(level, grade))
        .map(|row| &row.group_id)
        .collect();

    if candidates.is_empty() {
        return Err(MbgError::Resolution(format!(
            "no standard group for {} grade {}",
            level, grade
        )));
    }

    pick_for_gender(candidates.into_iter(), gender).ok_or_else(|| {
        MbgError::Resolution(format!(
            "no {} standard group for {} grade {}",
            gender, level, grade
        ))
    })
}

fn effective_gender(requested: Gender, default: Gender) -> Gender {
    match requested {
        Gender::All => default,
        other => other,
    }
}

/// First candidate matching the gender.
///
/// Gender only filters when the candidates include gendered ids.
fn pick_for_gender<'a, I>(candidates: I, gender: Gender) -> Option<StandardGroupId>
where
    I: Iterator<Item = &'a StandardGroupId> + Clone,
{
    let gendered = candidates.clone().any(StandardGroupId::is_gendered);
    let mut candidates = candidates;

    match gender {
        Gender::All => candidates.next(),
        _ if !gendered => candidates.next(),
        wanted => candidates.find(|id| id.gender() == Some(wanted)),
    }
    .cloned()
}
