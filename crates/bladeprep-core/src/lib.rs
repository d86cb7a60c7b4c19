//! Reconciles pressure-side and suction-side airfoil point files into closed
//! per-section curves and samples guide curves across the sections.

pub mod aggregate;
pub mod fsutil;
pub mod geom;
pub mod guide;
pub mod loft;
pub mod model;
pub mod normalize;
pub mod points_file;
pub mod prepare;
pub mod report;
pub mod sections_file;
