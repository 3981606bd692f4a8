//! Evolutionary algorithms
//!
//! This module provides the cooperative generational GA.

pub mod cooperative_ga;

pub mod prelude {
    pub use super::cooperative_ga::*;
}
