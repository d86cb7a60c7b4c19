use crate::model::{GuideCurve, GuideRole, SectionId, SectionSet};
use thiserror::Error;

/// Index sampled from every section for the leading-edge guide.
pub const LEADING_EDGE_OFFSET: usize = 10;
/// Distance either side of the section midpoint for the two trailing-edge guides.
pub const TRAILING_EDGE_OFFSET: usize = 10;

#[derive(Debug, Clone)]
pub struct GuideConfig {
    pub leading_edge_offset: usize,
    pub trailing_edge_offset: usize,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            leading_edge_offset: LEADING_EDGE_OFFSET,
            trailing_edge_offset: TRAILING_EDGE_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuideError {
    #[error("{section}: index {index} for guide {role:?} is outside 0..{len}")]
    IndexOutOfRange {
        section: SectionId,
        role: GuideRole,
        index: i64,
        len: usize,
    },
}

pub const GUIDE_ROLES: [GuideRole; 3] = [
    GuideRole::LeadingEdge,
    GuideRole::TrailingEdgeBefore,
    GuideRole::TrailingEdgeAfter,
];

/// Raw sample indices for a section of `len` points, in `GUIDE_ROLES` order.
/// The midpoint-relative ones may be negative or past the end for short sections.
/// Oversized offsets saturate, so they surface as out-of-range indices.
pub fn guide_indices(len: usize, cfg: &GuideConfig) -> [i64; 3] {
    let mid = i64::try_from(len / 2).unwrap_or(i64::MAX);
    let le = i64::try_from(cfg.leading_edge_offset).unwrap_or(i64::MAX);
    let te = i64::try_from(cfg.trailing_edge_offset).unwrap_or(i64::MAX);
    [le, mid.saturating_sub(te), mid.saturating_add(te)]
}

/// Smallest section length for which every guide index is valid.
///
/// `len / 2 + te < len` first holds at `len = 2 * te + 1`, which also gives `len / 2 >= te`.
pub fn min_guide_points(cfg: &GuideConfig) -> usize {
    let leading = cfg.leading_edge_offset.saturating_add(1);
    let trailing = cfg
        .trailing_edge_offset
        .saturating_mul(2)
        .saturating_add(1);
    leading.max(trailing)
}

/// Builds the three guide curves, one point per section in set order.
///
/// Fails on the first section too short to supply an index; no point is substituted.
pub fn extract_guides(
    sections: &SectionSet,
    cfg: &GuideConfig,
) -> Result<Vec<GuideCurve>, GuideError> {
    let mut guides: Vec<GuideCurve> = GUIDE_ROLES
        .iter()
        .enumerate()
        .map(|(index, &role)| GuideCurve {
            index,
            role,
            points: Vec::with_capacity(sections.len()),
        })
        .collect();

    for section in sections {
        let len = section.points.len();
        let indices = guide_indices(len, cfg);
        for (guide, index) in guides.iter_mut().zip(indices) {
            let point = usize::try_from(index)
                .ok()
                .and_then(|i| section.points.get(i))
                .ok_or(GuideError::IndexOutOfRange {
                    section: section.id,
                    role: guide.role,
                    index,
                    len,
                })?;
            guide.points.push(*point);
        }
    }

    Ok(guides)
}
