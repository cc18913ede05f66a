/// Best-first search over the implicit voxel grid
pub mod coords;
/// Best-first search over explicit graphs
pub mod graph;
