pub mod normalize;
pub mod types;
