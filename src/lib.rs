// Core drill engine. The terminal shell in main.rs drives it through
// `engine::controller::DrillController`; integration tests and benchmarks
// use the same public surface.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod session;
