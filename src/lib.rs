use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod container;
pub mod heap_primitives;

// Search primitives
// -----------------
pub mod coords;
pub mod cost;
pub mod float_cost;
pub mod node;
pub mod score;

// Search contexts
// ---------------
pub mod context;
pub mod examiner;
pub mod result;
pub mod settings;

// Node spaces
// -----------
pub mod graph;
pub mod terrain;

// Algorithms
// ----------
pub mod algorithms;
pub mod finders;
