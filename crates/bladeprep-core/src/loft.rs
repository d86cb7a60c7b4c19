//! Hand-off document for the CAD step that builds section splines and the swept surface.

use crate::geom::Point3;
use crate::model::{GuideCurve, SectionSet};
use serde::{Deserialize, Serialize};

/// Section points are in meters; the CAD model is in millimeters.
pub const METERS_TO_MILLIMETERS: f64 = 1000.0;
pub const SPLINE_DEGREE: u32 = 2;

#[derive(Debug, Clone)]
pub struct LoftConfig {
    pub degree: u32,
    pub unit_scale: f64,
}

impl Default for LoftConfig {
    fn default() -> Self {
        Self {
            degree: SPLINE_DEGREE,
            unit_scale: METERS_TO_MILLIMETERS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplineKind {
    ThroughPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineSpec {
    pub name: String,
    /// Unscaled; the consumer multiplies by `LoftRequest::unit_scale`.
    pub points: Vec<Point3>,
    pub degree: u32,
    pub closed: bool,
    pub kind: SplineKind,
    pub matched_knots: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoftRequest {
    pub unit_scale: f64,
    pub sections: Vec<SplineSpec>,
    pub guides: Vec<SplineSpec>,
    /// First point of every section, already scaled; picks the section start for the sweep.
    pub section_help_points: Vec<Point3>,
    /// First point of every guide, already scaled.
    pub guide_help_points: Vec<Point3>,
}

pub fn build_loft_request(
    sections: &SectionSet,
    guides: &[GuideCurve],
    cfg: &LoftConfig,
) -> LoftRequest {
    let spline = |name: String, points: &[Point3], closed: bool| SplineSpec {
        name,
        points: points.to_vec(),
        degree: cfg.degree,
        closed,
        kind: SplineKind::ThroughPoints,
        matched_knots: true,
    };

    LoftRequest {
        unit_scale: cfg.unit_scale,
        sections: sections
            .iter()
            .map(|s| spline(s.id.to_string(), &s.points, true))
            .collect(),
        guides: guides
            .iter()
            .map(|g| spline(format!("guide_spline_{}", g.index), &g.points, false))
            .collect(),
        section_help_points: sections
            .iter()
            .filter_map(|s| s.points.first())
            .map(|p| p.scaled(cfg.unit_scale))
            .collect(),
        guide_help_points: guides
            .iter()
            .filter_map(|g| g.points.first())
            .map(|p| p.scaled(cfg.unit_scale))
            .collect(),
    }
}
