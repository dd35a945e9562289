use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MbgError;

/// Lowest and highest age accepted on a recipient profile.
pub const MIN_RECIPIENT_AGE: u8 = 3;
pub const MAX_RECIPIENT_AGE: u8 = 18;

const ROMAN_GRADES: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    /// Unspecified; resolution falls back to the band default.
    #[default]
    All,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::All => "all",
        };
        f.write_str(s)
    }
}

impl FromStr for Gender {
    type Err = MbgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "l" | "laki-laki" | "laki" => Ok(Gender::Male),
            "female" | "f" | "p" | "perempuan" => Ok(Gender::Female),
            "all" | "semua" | "unspecified" | "" => Ok(Gender::All),
            other => Err(MbgError::InvalidInput(format!("unknown gender '{}'", other))),
        }
    }
}

/// School level a grade belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "SD")]
    Sd,
    #[serde(rename = "SMP")]
    Smp,
    #[serde(rename = "SMA")]
    Sma,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 3] = [EducationLevel::Sd, EducationLevel::Smp, EducationLevel::Sma];

    /// Grades taught at this level.
    pub fn grades(&self) -> std::ops::RangeInclusive<u8> {
        match self {
            EducationLevel::Sd => 1..=6,
            EducationLevel::Smp => 7..=9,
            EducationLevel::Sma => 10..=12,
        }
    }

    pub fn for_grade(grade: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.grades().contains(&grade))
    }

    pub fn class_labels(&self) -> Vec<ClassLabel> {
        self.grades().map(ClassLabel).collect()
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EducationLevel::Sd => "SD",
            EducationLevel::Smp => "SMP",
            EducationLevel::Sma => "SMA",
        };
        f.write_str(s)
    }
}

impl FromStr for EducationLevel {
    type Err = MbgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sd" | "primary" => Ok(EducationLevel::Sd),
            "smp" | "middle" | "junior" => Ok(EducationLevel::Smp),
            "sma" | "secondary" | "senior" => Ok(EducationLevel::Sma),
            other => Err(MbgError::Config(format!("unknown education level '{}'", other))),
        }
    }
}

/// A class label, one per grade I to XII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassLabel(u8);

impl ClassLabel {
    pub fn new(grade: u8) -> Option<Self> {
        (1..=12).contains(&grade).then_some(ClassLabel(grade))
    }

    pub fn grade(&self) -> u8 {
        self.0
    }

    pub fn level(&self) -> EducationLevel {
        // Grade is always 1..=12
        EducationLevel::for_grade(self.0).unwrap_or(EducationLevel::Sma)
    }

    pub fn roman(&self) -> &'static str {
        ROMAN_GRADES[(self.0 - 1) as usize]
    }

    pub fn all() -> Vec<ClassLabel> {
        (1..=12).map(ClassLabel).collect()
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Kelas {}", self.level(), self.roman())
    }
}

impl Serialize for ClassLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for ClassLabel {
    type Err = MbgError;

    /// Accepts "SD Kelas VI", "grade VI", "kelas 6", "VI" or "6".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MbgError::InvalidInput(format!("unknown class label '{}'", s.trim()));

        let last = s.split_whitespace().last().ok_or_else(invalid)?;
        let grade = match last.parse::<u8>() {
            Ok(n) => n,
            Err(_) => ROMAN_GRADES
                .iter()
                .position(|r| r.eq_ignore_ascii_case(last))
                .map(|i| i as u8 + 1)
                .ok_or_else(invalid)?,
        };
        let label = ClassLabel::new(grade).ok_or_else(invalid)?;

        // A level prefix, when given, must agree with the grade.
        if let Some(first) = s.split_whitespace().next() {
            if let Ok(level) = first.parse::<EducationLevel>() {
                if level != label.level() {
                    return Err(invalid());
                }
            }
        }

        Ok(label)
    }
}

/// How the recipient is identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Recipient {
    Age(u8),
    Class(ClassLabel),
}

/// Who the menu is for. Only used to resolve a standard group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecipientProfile {
    pub recipient: Recipient,
    pub gender: Gender,
}

impl RecipientProfile {
    pub fn by_age(age: u8, gender: Gender) -> Self {
        Self {
            recipient: Recipient::Age(age),
            gender,
        }
    }

    pub fn by_class(class: ClassLabel, gender: Gender) -> Self {
        Self {
            recipient: Recipient::Class(class),
            gender,
        }
    }

    pub fn is_age_in_bounds(&self) -> bool {
        match self.recipient {
            Recipient::Age(age) => (MIN_RECIPIENT_AGE..=MAX_RECIPIENT_AGE).contains(&age),
            Recipient::Class(_) => true,
        }
    }
}

impl fmt::Display for RecipientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.recipient {
            Recipient::Age(age) => write!(f, "age {} ({})", age, self.gender),
            Recipient::Class(class) => write!(f, "{} ({})", class, self.gender),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_label_forms() {
        let six = ClassLabel::new(6).unwrap();
        assert_eq!("SD Kelas VI".parse::<ClassLabel>().unwrap(), six);
        assert_eq!("grade VI".parse::<ClassLabel>().unwrap(), six);
        assert_eq!("kelas 6".parse::<ClassLabel>().unwrap(), six);
        assert_eq!("vi".parse::<ClassLabel>().unwrap(), six);
        assert_eq!(six.to_string(), "SD Kelas VI");
    }

    #[test]
    fn test_class_label_rejects_mismatched_level() {
        assert!("SMP Kelas VI".parse::<ClassLabel>().is_err());
        assert!("grade XIII".parse::<ClassLabel>().is_err());
        assert!("".parse::<ClassLabel>().is_err());
    }

    #[test]
    fn test_levels_for_grades() {
        assert_eq!(ClassLabel::new(7).unwrap().level(), EducationLevel::Smp);
        assert_eq!(ClassLabel::new(12).unwrap().to_string(), "SMA Kelas XII");
        assert_eq!(EducationLevel::Sd.class_labels().len(), 6);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Laki-laki".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("Perempuan".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("Semua".parse::<Gender>().unwrap(), Gender::All);
        assert!("x".parse::<Gender>().is_err());
    }

    #[test]
    fn test_age_bounds() {
        assert!(RecipientProfile::by_age(7, Gender::All).is_age_in_bounds());
        assert!(!RecipientProfile::by_age(25, Gender::All).is_age_in_bounds());
    }
}
