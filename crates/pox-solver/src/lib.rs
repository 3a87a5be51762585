//! SAT-based dependency resolution core.
//!
//! Candidate package states ("the universe") and user requests are
//! encoded into CNF clauses (dependency, conflict, shared-library
//! provides, request, and chain-mutex archetypes), then solved with a
//! DPLL search using unit propagation and chronological backtracking, no
//! clause learning, no incremental re-solving, no parallel search. The
//! satisfying assignment is folded into install/upgrade/delete
//! [`jobs::JobRecord`]s, or the CNF can be handed to an external solver via
//! the [`dimacs`] bridge.
//!
//! Building the universe itself (fetching repository metadata, resolving
//! semver constraints, computing shared-library dependencies from installed
//! binaries) is out of scope; callers implement
//! [`unit::UniverseProvider`] and [`unit::RequestSource`] over their own
//! package index.

mod builder;
mod clause;
mod config;
mod dimacs;
mod dpll;
mod error;
mod jobs;
mod problem;
mod propagate;
mod unit;
mod variable;

#[cfg(test)]
mod tests;

pub use clause::{Clause, ClauseId, ClauseKind, Literal};
pub use config::SolverOptions;
pub use error::{Result, SolveError};
pub use jobs::{JobKind, JobRecord};
pub use problem::Problem;
pub use unit::{Conflict, ConflictKind, JobType, RequestSource, Unit, UniverseProvider};
pub use variable::{VarId, Variable};
