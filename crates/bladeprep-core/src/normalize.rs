use crate::geom::Point3;
use itertools::Itertools;

/// Same points, last first.
pub fn reverse_curve(points: &[Point3]) -> Vec<Point3> {
    points.iter().rev().copied().collect()
}

/// Cycles every point `(a, b, c) -> (b, c, a)` into the CAD axis convention.
pub fn remap_axes(points: &[Point3]) -> Vec<Point3> {
    points.iter().map(|p| p.cycled()).collect()
}

/// Drops exact duplicates, keeping each value at the position of its first occurrence.
pub fn dedup_points(points: &[Point3]) -> Vec<Point3> {
    points.iter().copied().unique_by(Point3::key).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub input_points: usize,
    pub removed_duplicates: usize,
}

pub fn dedup_in_place(points: &mut Vec<Point3>) -> DedupStats {
    let before = points.len();
    *points = dedup_points(points);
    DedupStats {
        input_points: before,
        removed_duplicates: before.saturating_sub(points.len()),
    }
}
