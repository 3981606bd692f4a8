//! Genome types
//!
//! This module provides the `Model` bit vector and the `TrueModel` targets.

pub mod model;
pub mod true_model;

pub mod prelude {
    pub use super::model::*;
    pub use super::true_model::*;
}
