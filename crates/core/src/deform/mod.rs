pub mod engine;
pub mod operators;
pub mod plan;
pub mod tone;
