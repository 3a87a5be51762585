use crate::variable::{VarId, Variable};

/// Index of a [`Clause`] within a [`crate::problem::Problem`]'s arena.
pub type ClauseId = u32;

/// A reference to a variable plus its required polarity.
///
/// The literal is satisfied iff `variable.to_install XOR inverted == true`;
/// equivalently `inverted` means "wants not-install".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub var: VarId,
    pub inverted: bool,
}

impl Literal {
    pub fn positive(var: VarId) -> Self {
        Self { var, inverted: false }
    }

    pub fn negative(var: VarId) -> Self {
        Self { var, inverted: true }
    }

    pub fn satisfied(&self, vars: &[Variable]) -> bool {
        vars[self.var as usize].to_install ^ self.inverted
    }
}

/// Which archetype (spec §4.2) produced a clause. Carried for conflict
/// reporting and for tests; the propagation engine treats all clauses
/// uniformly as disjunctions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Dependency,
    Conflict,
    ShlibProvide,
    Request,
    ChainMutex,
}

/// An ordered disjunction of literals.
///
/// `nresolved` counts how many member variables are currently resolved; it
/// is incremented by the propagation engine as variables resolve and
/// decremented symmetrically on backtrack undo. It is never otherwise
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct Clause {
    pub literals: Vec<Literal>,
    pub kind: ClauseKind,
    pub nresolved: u32,
}

impl Clause {
    pub fn new(literals: Vec<Literal>, kind: ClauseKind) -> Self {
        Self { literals, kind, nresolved: 0 }
    }

    pub fn nitems(&self) -> usize {
        self.literals.len()
    }

    pub fn is_fully_resolved(&self) -> bool {
        self.nresolved as usize == self.nitems()
    }

    /// True when exactly one literal remains unassigned.
    pub fn is_unit(&self) -> bool {
        self.nitems() > 0 && self.nresolved as usize + 1 == self.nitems()
    }

    pub fn is_satisfied(&self, vars: &[Variable]) -> bool {
        self.literals.iter().any(|l| l.satisfied(vars))
    }

    /// The single literal not yet backed by a resolved variable, if any.
    pub fn unassigned_literal(&self, vars: &[Variable]) -> Option<Literal> {
        let mut found = None;
        for lit in &self.literals {
            if !vars[lit.var as usize].resolved {
                if found.is_some() {
                    return None;
                }
                found = Some(*lit);
            }
        }
        found
    }
}
