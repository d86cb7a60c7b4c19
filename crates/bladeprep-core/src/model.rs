use crate::geom::Point3;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionIdError {
    #[error("no `sectionN` tag in file name {0:?}")]
    NoMatch(String),
    #[error("section number in {0:?} must be a positive integer")]
    NotPositive(String),
    #[error("{0:?} is not a section label")]
    NotALabel(String),
}

/// Ordinal section key, rendered as `section<N>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SectionId(u32);

fn file_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"section(\d+)").expect("static regex"))
}

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^section(\d+)$").expect("static regex"))
}

impl SectionId {
    pub fn new(n: u32) -> Option<Self> {
        (n > 0).then_some(Self(n))
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    /// Finds the first `sectionN` tag anywhere in a file name, e.g. `ps_section3.dat`.
    pub fn from_file_name(name: &str) -> Result<Self, SectionIdError> {
        let caps = file_tag_re()
            .captures(name)
            .ok_or_else(|| SectionIdError::NoMatch(name.to_string()))?;
        Self::from_digits(&caps[1], name)
    }

    /// Parses an exact label such as `section3` (artifact headers).
    pub fn parse_label(label: &str) -> Result<Self, SectionIdError> {
        let caps = label_re()
            .captures(label.trim())
            .ok_or_else(|| SectionIdError::NotALabel(label.to_string()))?;
        Self::from_digits(&caps[1], label)
    }

    fn from_digits(digits: &str, source: &str) -> Result<Self, SectionIdError> {
        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| SectionIdError::NotPositive(source.to_string()))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section{}", self.0)
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SectionId {
    type Error = SectionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_label(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "ps")]
    Pressure,
    #[serde(rename = "ss")]
    Suction,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Pressure => f.write_str("ps"),
            Side::Suction => f.write_str("ss"),
        }
    }
}

/// One side of one section, in the traversal order it was captured (or reoriented) in.
#[derive(Debug, Clone, PartialEq)]
pub struct SideCurve {
    pub section: SectionId,
    pub side: Side,
    pub source: PathBuf,
    pub points: Vec<Point3>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub points: Vec<Point3>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("section {0} appears more than once")]
pub struct DuplicateSection(pub SectionId);

/// Sections keyed by id, iterated in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Section>", into = "Vec<Section>")]
pub struct SectionSet {
    sections: Vec<Section>,
}

impl SectionSet {
    pub fn from_sections(sections: Vec<Section>) -> Result<Self, DuplicateSection> {
        for (i, s) in sections.iter().enumerate() {
            if sections[..i].iter().any(|prev| prev.id == s.id) {
                return Err(DuplicateSection(s.id));
            }
        }
        Ok(Self { sections })
    }

    /// Callers guarantee the ids are already unique.
    pub(crate) fn from_unique(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id).collect()
    }

    /// Applies `f` to every section's points, keeping ids and order.
    pub fn map_points<F>(self, mut f: F) -> Self
    where
        F: FnMut(Vec<Point3>) -> Vec<Point3>,
    {
        Self {
            sections: self
                .sections
                .into_iter()
                .map(|s| Section {
                    id: s.id,
                    points: f(s.points),
                })
                .collect(),
        }
    }
}

impl TryFrom<Vec<Section>> for SectionSet {
    type Error = DuplicateSection;

    fn try_from(sections: Vec<Section>) -> Result<Self, Self::Error> {
        Self::from_sections(sections)
    }
}

impl From<SectionSet> for Vec<Section> {
    fn from(set: SectionSet) -> Self {
        set.sections
    }
}

impl<'a> IntoIterator for &'a SectionSet {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuideRole {
    LeadingEdge,
    TrailingEdgeBefore,
    TrailingEdgeAfter,
}

/// One point per section, in section order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideCurve {
    pub index: usize,
    pub role: GuideRole,
    pub points: Vec<Point3>,
}
