use crate::geom::BBox3;
use crate::model::{SectionId, Side};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

impl Warning {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub id: SectionId,
    pub curves: usize,
    pub raw_points: usize,
    pub unique_points: usize,
    pub removed_duplicates: usize,
    pub extents: Option<BBox3>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareReport {
    pub reversed_side: Side,
    pub files_read: usize,
    pub files_skipped: usize,
    pub sections: Vec<SectionReport>,
    pub warnings: Vec<Warning>,
}
