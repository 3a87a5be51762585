/// Tuning knobs for the solver core.
///
/// Mirrors the single real knob the original `pkg(8)` solver exposes: a
/// debug/trace verbosity that gates expensive rule pretty-printing
/// (`DEBUG_LEVEL` in `pkg_solve.c`). Everything else about the algorithm is
/// fixed by the specification, not configurable.
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    /// When true, the clause builder and propagation engine emit
    /// `log::trace!` lines describing every clause and assignment. Off by
    /// default since it is a hot path for large universes.
    pub trace_rules: bool,
}

impl SolverOptions {
    pub fn new() -> Self {
        Self { trace_rules: false }
    }

    pub fn with_trace_rules(mut self, trace_rules: bool) -> Self {
        self.trace_rules = trace_rules;
        self
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self::new()
    }
}
