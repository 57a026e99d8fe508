pub mod anchor_geometry;
pub mod topology;
