//! # coverage_ga
//!
//! Genetic algorithms for two classical facility-coverage problems over a
//! fixed set of weighted points:
//!
//! - the Location Set Covering Problem (LSCP), which covers every point
//!   with minimum total facility weight, solved by a steady-state GA with
//!   a feasibility repair operator ([`lscp`]);
//! - the Maximal Covering Location Problem (MCLP), which places k
//!   facilities to cover as many points as possible, solved by an elitist
//!   (μ+λ) GA with stagnation-driven mutation ([`mclp`]).
//!
//! Both engines read the same [`ProblemInstance`] JSON records through a
//! shared, immutable [`CoverageModel`] and emit a [`SolutionRecord`].

pub mod config;
pub mod coverage;
pub mod error;
pub mod lscp;
pub mod mclp;
pub mod problem;
pub mod solution;
pub mod utils;

pub use crate::config::{LscpConfig, MclpConfig};
pub use crate::coverage::CoverageModel;
pub use crate::error::{Error, Result};
pub use crate::lscp::LscpAlgorithm;
pub use crate::mclp::MclpAlgorithm;
pub use crate::problem::{Point, ProblemInstance};
pub use crate::solution::SolutionRecord;
