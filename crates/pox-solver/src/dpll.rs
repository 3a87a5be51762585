//! DPLL Search: decision frames, the initial-guess heuristic, and
//! chronological backtracking (spec §4.4). No clause learning: when both
//! polarities of a frame's pivot fail, we back up exactly one frame.

use crate::clause::Clause;
use crate::propagate::{propagate, seed_pure_clauses, undo_trail, PropagateOutcome};
use crate::unit::JobType;
use crate::variable::Variable;

/// One level of the Solver Tree (spec §3, "Solver Tree").
struct DecisionFrame {
    pivot: u32,
    guess: bool,
    /// 0 = first polarity untried/in-progress, 1 = already flipped once.
    flips: u8,
    trail: Vec<u32>,
}

/// Apply the initial-guess heuristic (spec §4.4.1) for `var`.
fn initial_guess(job_type: JobType, var: &Variable) -> bool {
    match job_type {
        JobType::Upgrade => {
            if var.unit.is_installed {
                // guess true iff this chain has no other members (no upgrade available)
                var.next.is_none() && var.prev.is_none()
            } else {
                // guess true iff this is an upgrade of some local (chain has other members)
                var.next.is_some() || var.prev.is_some()
            }
        }
        JobType::Install | JobType::Delete | JobType::Fetch | JobType::AutoRemove => {
            var.unit.is_installed
        }
    }
}

/// Run DPLL search to completion. Returns `Ok(())` on SAT (the assignment
/// is left in `variables`), `Err` on UNSAT.
pub fn search(
    variables: &mut [Variable],
    clauses: &mut [Clause],
    job_type: JobType,
) -> Result<(), crate::error::SolveError> {
    let mut root_trail = Vec::new();
    seed_pure_clauses(variables, clauses, &mut root_trail);
    if let PropagateOutcome::Conflict(clause_id) = propagate(variables, clauses, &mut root_trail) {
        return Err(crate::error::SolveError::Unsat(describe_conflict(variables, clauses, clause_id)));
    }

    let mut frames: Vec<DecisionFrame> = Vec::new();
    let mut current: Option<DecisionFrame> = None;
    let mut guesses: u64 = 0;

    loop {
        if current.is_none() {
            let Some(next_var) = variables.iter().position(|v| !v.resolved) else {
                return Ok(());
            };
            let pivot = next_var as u32;
            let guess = initial_guess(job_type, &variables[pivot as usize]);
            current = Some(DecisionFrame { pivot, guess, flips: 0, trail: Vec::new() });
        }

        let mut frame = current.take().unwrap();
        guesses += 1;
        crate::propagate::resolve_one(variables, clauses, frame.pivot, frame.guess, &mut frame.trail);

        match propagate(variables, clauses, &mut frame.trail) {
            PropagateOutcome::Ok => {
                frames.push(frame);
                // current stays None: the next loop iteration picks a new pivot
            }
            PropagateOutcome::Conflict(clause_id) => {
                undo_trail(variables, clauses, &frame.trail);
                frame.trail.clear();

                if frame.flips == 0 {
                    frame.flips = 1;
                    frame.guess = !frame.guess;
                    current = Some(frame);
                    continue;
                }

                // Both polarities of this frame failed: discard it and back up
                // through already-committed frames until one can still flip.
                loop {
                    match frames.pop() {
                        None => {
                            let _ = clause_id;
                            log::info!("solver: search exhausted after {guesses} guesses");
                            return Err(crate::error::SolveError::SearchExhausted { guesses });
                        }
                        Some(mut parent) => {
                            undo_trail(variables, clauses, &parent.trail);
                            parent.trail.clear();
                            if parent.flips == 0 {
                                parent.flips = 1;
                                parent.guess = !parent.guess;
                                current = Some(parent);
                                break;
                            }
                            // parent already exhausted too; keep backing up
                        }
                    }
                }
            }
        }
    }
}

/// Build the human-readable conflict description required by spec §6:
/// each participant's name, origin (local/remote), and desired polarity.
fn describe_conflict(variables: &[Variable], clauses: &[Clause], clause_id: u32) -> String {
    let clause = &clauses[clause_id as usize];
    let mut parts = Vec::new();
    for lit in &clause.literals {
        let v = &variables[lit.var as usize];
        let origin = v.unit.origin();
        let desired = match (v.unit.is_installed, lit.inverted) {
            (true, false) => "keep",
            (true, true) => "remove",
            (false, false) => "install",
            (false, true) => "ignore",
        };
        parts.push(format!("{} ({origin}, wants {desired})", v.unique_id));
    }
    format!(
        "no solution satisfies: {}, please resolve it manually",
        parts.join(", ")
    )
}
