/// Air volumes enclosed around a seed
pub mod interior;
/// Locations reachable on foot from a start
pub mod path_area;
