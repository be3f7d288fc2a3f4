//! Random generation of parameterized image variants

/// Run loop, stop conditions and built-in recipes
pub mod generator;
/// Parameter spaces and sampled parameter sets
pub mod params;

pub use generator::{GridEffectRecipe, Limit, Recipe, SerigraphConfig, SerigraphRecord, run_serigraph};
pub use params::{ParamSet, ParamSpace};
