//! # confluence
//!
//! An evolutionary simulation of cooperation and task selection.
//!
//! A population of organisms, each carrying two bit-vector models and an
//! evolved task threshold, competes over many generations to match a pair of
//! hidden target models. Every round offers two tasks with randomly varying
//! rewards; paired organisms that split the work earn the sum of their
//! scores, while pairs that duplicate effort keep only the better one.
//!
//! ## Core Concepts
//!
//! - **Task selection as a trait**: each organism's threshold on the reward
//!   difference decides which task it attempts, and evolves like any gene
//! - **Complementary pairing**: organisms with opposite thresholds face
//!   cooperative rounds together
//! - **Generational replacement**: pairwise tournaments pick winners, whose
//!   offspring replace the whole population
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use confluence::prelude::*;
//!
//! let mut rng = confluence::random::seeded(42);
//!
//! let config = SimulationConfig::default()
//!     .with_population_size(40)
//!     .with_generations(100);
//!
//! let result = StandardGA::from_config(config)?
//!     .run(&mut rng, TextReporter::new(std::io::stdout()))?;
//! println!("{}", result.stats.summary());
//! ```

pub mod algorithms;
pub mod challenge;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod genome;
pub mod operators;
pub mod policy;
pub mod population;
pub mod random;
pub mod reward;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::challenge::*;
    pub use crate::config::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::policy::*;
    pub use crate::population::prelude::*;
    pub use crate::random::RandomSource;
    pub use crate::reward::*;
}
