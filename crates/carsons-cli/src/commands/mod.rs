pub mod engine;
pub mod phase;
pub mod primitive;
pub mod report;
pub mod sequence;
