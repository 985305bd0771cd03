//! Canonical model record and the closed enumerations it is built from.

mod info;
mod kind;
mod provider;

pub use info::ModelInfo;
pub use kind::{ModelFeature, ModelType};
pub use provider::ModelProvider;
