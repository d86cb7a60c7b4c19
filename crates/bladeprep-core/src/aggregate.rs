use crate::model::{Section, SectionId, SectionSet, SideCurve};
use std::collections::HashMap;

/// Groups side curves by section and stacks each group in the order given.
///
/// Sections appear in the order their first curve appears. Points are not
/// deduplicated here, so a point shared by two sides shows up twice.
pub fn build_sections(curves: &[SideCurve]) -> SectionSet {
    let mut slots: HashMap<SectionId, usize> = HashMap::new();
    let mut sections: Vec<Section> = Vec::new();

    for curve in curves {
        let slot = *slots.entry(curve.section).or_insert_with(|| {
            sections.push(Section {
                id: curve.section,
                points: Vec::new(),
            });
            sections.len() - 1
        });
        sections[slot].points.extend_from_slice(&curve.points);
    }

    SectionSet::from_unique(sections)
}
