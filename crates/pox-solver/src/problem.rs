//! `Problem` owns the Variable Table and Clause arena for one solve (spec
//! §3, "Problem"; §6, "Solver API").

use std::collections::HashMap;
use std::io::{BufRead, Write};

use crate::builder;
use crate::clause::Clause;
use crate::config::SolverOptions;
use crate::dimacs;
use crate::dpll;
use crate::error::Result;
use crate::jobs::{self, JobRecord};
use crate::unit::{JobType, RequestSource, UniverseProvider};
use crate::variable::{VarId, Variable};

/// Owns every [`Variable`] and [`Clause`] produced for one solve attempt.
/// Cross-references between them are plain indices, not pointers, so
/// teardown is ordinary `Drop`; no explicit destructor order is required.
pub struct Problem {
    variables: Vec<Variable>,
    clauses: Vec<Clause>,
    uid_index: HashMap<String, VarId>,
    job_type: JobType,
    options: SolverOptions,
}

impl Problem {
    /// Build the Variable Table and all clauses (spec §4.1, §4.2).
    pub fn build(universe: &dyn UniverseProvider, request: &dyn RequestSource) -> Self {
        Self::build_with_options(universe, request, SolverOptions::default())
    }

    pub fn build_with_options(
        universe: &dyn UniverseProvider,
        request: &dyn RequestSource,
        options: SolverOptions,
    ) -> Self {
        let built = builder::build(universe, request, &options);
        log::debug!(
            "solver: built problem with {} variables, {} clauses",
            built.variables.len(),
            built.clauses.len()
        );
        Self {
            variables: built.variables,
            clauses: built.clauses,
            uid_index: built.uid_index,
            job_type: request.job_type(),
            options,
        }
    }

    /// Run DPLL search to completion (spec §4.3, §4.4).
    pub fn solve(&mut self) -> Result<()> {
        dpll::search(&mut self.variables, &mut self.clauses, self.job_type)
    }

    /// Fold the satisfying assignment into install/upgrade/delete records
    /// (spec §4.6). Fails if any variable is still unresolved.
    pub fn to_jobs(&self) -> Result<Vec<JobRecord>> {
        jobs::emit(&self.variables, &self.uid_index, self.job_type)
    }

    /// Write this problem's CNF encoding in DIMACS format (spec §4.5, §6).
    pub fn export_dimacs<W: Write>(&self, sink: W) -> std::io::Result<()> {
        dimacs::export(&self.variables, &self.clauses, sink)
    }

    /// Parse an external SAT solver's output and apply it as the
    /// assignment, then emit jobs (spec §4.5, §6).
    pub fn import_assignment<R: BufRead>(&mut self, source: R) -> Result<Vec<JobRecord>> {
        dimacs::import_assignment(&mut self.variables, source)?;
        self.to_jobs()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }
}
