//! Population management
//!
//! This module provides the Organism and Population types.

pub mod organism;
#[allow(clippy::module_inception)]
pub mod population;

pub mod prelude {
    pub use super::organism::*;
    pub use super::population::*;
}
