//! Job Emitter (spec §4.6): folds a satisfying assignment, per unique-id
//! chain, into install/upgrade/delete records.

use std::collections::HashMap;

use crate::error::{Result, SolveError};
use crate::unit::JobType;
use crate::variable::{VarId, Variable};

/// The kind of action a [`JobRecord`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Install,
    Fetch,
    Upgrade,
    Delete,
}

/// One planned action. For `Upgrade`, `items[0]` is the replacement and
/// `items[1]` is the superseded unit; for all other kinds only `items[0]`
/// is meaningful.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub kind: JobKind,
    pub items: Vec<VarId>,
}

/// Walk every unique-id chain and classify it into zero or more
/// [`JobRecord`]s. Requires every variable to be resolved.
pub fn emit(variables: &[Variable], uid_index: &HashMap<String, VarId>, job_type: JobType) -> Result<Vec<JobRecord>> {
    if variables.iter().any(|v| !v.resolved) {
        return Err(SolveError::Unresolved);
    }

    let mut jobs = Vec::new();

    let mut heads: Vec<VarId> = uid_index.values().copied().collect();
    heads.sort_unstable();

    for head in heads {
        let members = chain_members(variables, head);

        let add_candidates: Vec<VarId> = members
            .iter()
            .copied()
            .filter(|&v| variables[v as usize].to_install && !variables[v as usize].unit.is_installed)
            .collect();
        let del_candidates: Vec<VarId> = members
            .iter()
            .copied()
            .filter(|&v| !variables[v as usize].to_install && variables[v as usize].unit.is_installed)
            .collect();

        if add_candidates.len() > 1 {
            log::error!(
                "solver: chain '{}' has {} install candidates, expected at most one",
                variables[head as usize].unique_id,
                add_candidates.len()
            );
            return Err(SolveError::Internal(format!(
                "chain '{}' resolved to multiple install candidates",
                variables[head as usize].unique_id
            )));
        }

        match (add_candidates.first().copied(), del_candidates.as_slice()) {
            (Some(add), []) => {
                let kind = if job_type == JobType::Fetch { JobKind::Fetch } else { JobKind::Install };
                jobs.push(JobRecord { kind, items: vec![add] });
            }
            (Some(add), dels) => {
                jobs.push(JobRecord { kind: JobKind::Upgrade, items: vec![add, dels[0]] });
                for &del in &dels[1..] {
                    jobs.push(JobRecord { kind: JobKind::Delete, items: vec![del] });
                }
            }
            (None, dels) => {
                for &del in dels {
                    jobs.push(JobRecord { kind: JobKind::Delete, items: vec![del] });
                }
            }
        }
    }

    Ok(jobs)
}

fn chain_members(variables: &[Variable], head: VarId) -> Vec<VarId> {
    let mut out = vec![head];
    let mut cur = variables[head as usize].next;
    while let Some(id) = cur {
        out.push(id);
        cur = variables[id as usize].next;
    }
    out
}
