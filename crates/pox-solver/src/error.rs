use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SolveError>;

/// Failure modes of the solver core.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Top-level (or search) UNSAT, with a human-readable conflict description.
    #[error("conflict: {0}")]
    Unsat(String),

    /// Root-level search exhausted both polarities of its first decision.
    #[error("SAT search exhausted after {guesses} guesses")]
    SearchExhausted { guesses: u64 },

    /// An internal invariant was violated (e.g. more than one install
    /// candidate survived in a chain, or a variable was left unresolved).
    #[error("internal solver error: {0}")]
    Internal(String),

    /// The external solver's output stream ended before a terminating `0`
    /// token was seen.
    #[error("cannot parse sat solver output")]
    DimacsParse,

    /// The external solver reported `UNSAT` explicitly.
    #[error("external solver reported UNSAT")]
    ExternalUnsat,

    /// `to_jobs` was called before every variable was resolved.
    #[error("not all variables are resolved")]
    Unresolved,
}
