//! Clause Builder: turns a universe plus a request into the CNF clauses
//! described by spec §4.2, archetypes (a)-(e).

use std::collections::HashMap;

use crate::clause::{Clause, ClauseKind, Literal};
use crate::config::SolverOptions;
use crate::unit::{ConflictKind, RequestSource, UniverseProvider};
use crate::variable::{VarId, Variable};

/// Output of the Variable Table + Clause Builder stages: everything a
/// [`crate::problem::Problem`] needs to own.
pub struct BuiltProblem {
    pub variables: Vec<Variable>,
    pub clauses: Vec<Clause>,
    pub uid_index: HashMap<String, VarId>,
}

/// Build the Variable Table (spec §4.1) then emit all clause archetypes
/// (spec §4.2) against it.
pub fn build(
    universe: &dyn UniverseProvider,
    request: &dyn RequestSource,
    options: &SolverOptions,
) -> BuiltProblem {
    let (variables, uid_index) = build_variable_table(universe);
    let mut built = BuiltProblem { variables, clauses: Vec::new(), uid_index };
    build_clauses(&mut built, universe, request, options);
    built
}

fn build_variable_table(universe: &dyn UniverseProvider) -> (Vec<Variable>, HashMap<String, VarId>) {
    let mut variables = Vec::new();
    let mut uid_index = HashMap::new();

    for unique_id in universe.unique_ids() {
        let units = universe.units_for(&unique_id);
        let mut prev: Option<VarId> = None;
        let mut head: Option<VarId> = None;

        for unit in units {
            let id = variables.len() as VarId;
            let mut var = Variable::new(unit);
            var.prev = prev;
            variables.push(var);

            if let Some(p) = prev {
                variables[p as usize].next = Some(id);
            } else {
                head = Some(id);
            }
            prev = Some(id);
        }

        if let Some(head) = head {
            uid_index.insert(unique_id, head);
        }
    }

    (variables, uid_index)
}

/// All variable indices in `uid`'s chain, head first.
fn chain_members(variables: &[Variable], head: VarId) -> Vec<VarId> {
    let mut out = vec![head];
    let mut cur = variables[head as usize].next;
    while let Some(id) = cur {
        out.push(id);
        cur = variables[id as usize].next;
    }
    out
}

fn attach(built: &mut BuiltProblem, clause: Clause, trace: bool) {
    let id = built.clauses.len() as u32;
    let vars: Vec<VarId> = clause.literals.iter().map(|l| l.var).collect();
    built.clauses.push(clause);
    for v in vars {
        built.variables[v as usize].attach_rule(id);
    }
    if trace {
        log::trace!("solver: added {}-ary clause #{id}", built.clauses[id as usize].nitems());
    }
}

/// Attach a clause to only the literals explicitly listed in
/// `attach_to` (used for the shlib-provide asymmetry, spec §4.2(c)).
fn attach_partial(built: &mut BuiltProblem, clause: Clause, attach_to: &[VarId], trace: bool) {
    let id = built.clauses.len() as u32;
    built.clauses.push(clause);
    for &v in attach_to {
        built.variables[v as usize].attach_rule(id);
    }
    if trace {
        log::trace!("solver: added {}-ary clause #{id} (partial attach)", built.clauses[id as usize].nitems());
    }
}

fn build_clauses(
    built: &mut BuiltProblem,
    universe: &dyn UniverseProvider,
    request: &dyn RequestSource,
    options: &SolverOptions,
) {
    let n = built.variables.len();
    let trace = options.trace_rules;

    for v in 0..n as VarId {
        build_dependency_clauses(built, v, trace);
        build_conflict_clauses(built, v, trace);
        build_shlib_clauses(built, universe, v, trace);
        build_request_clause(built, request, v, trace);
    }

    let mut heads: Vec<VarId> = built.uid_index.values().copied().collect();
    heads.sort_unstable();
    for head in heads {
        build_chain_mutex(built, head, trace);
    }
}

/// (a) Dependency disjunction: `(¬V ∨ D1 ∨ D2 ∨ …)`.
fn build_dependency_clauses(built: &mut BuiltProblem, v: VarId, trace: bool) {
    let deps = built.variables[v as usize].unit.dependencies.clone();
    for dep_uid in deps {
        let Some(&head) = built.uid_index.get(&dep_uid) else {
            log::warn!("solver: dangling dependency reference to '{dep_uid}', skipping");
            continue;
        };
        let members = chain_members(&built.variables, head);
        let mut literals = vec![Literal::negative(v)];
        literals.extend(members.iter().map(|&m| Literal::positive(m)));
        attach(built, Clause::new(literals, ClauseKind::Dependency), trace);
    }
}

/// (b) Explicit conflict clauses, scoped by [`ConflictKind`].
fn build_conflict_clauses(built: &mut BuiltProblem, v: VarId, trace: bool) {
    let conflicts = built.variables[v as usize].unit.conflicts.clone();
    let v_installed = built.variables[v as usize].unit.is_installed;

    for conflict in conflicts {
        let Some(&head) = built.uid_index.get(&conflict.unique_id) else {
            continue;
        };
        let members = chain_members(&built.variables, head);
        for m in members {
            let m_installed = built.variables[m as usize].unit.is_installed;
            let applies = match conflict.kind {
                ConflictKind::RemoteRemote => !v_installed && !m_installed,
                ConflictKind::RemoteLocal => {
                    (v_installed && !m_installed) || (!v_installed && m_installed)
                }
            };
            if !applies {
                continue;
            }
            attach(
                built,
                Clause::new(vec![Literal::negative(v), Literal::negative(m)], ClauseKind::Conflict),
                trace,
            );
        }
    }
}

/// (c) Shared-library requirement disjunction. Only emitted for remote
/// variables; the clause is attached only to the requiring variable, never
/// to the providers; this asymmetry is intentional (spec §4.2(c), §9).
fn build_shlib_clauses(built: &mut BuiltProblem, universe: &dyn UniverseProvider, v: VarId, trace: bool) {
    if built.variables[v as usize].unit.is_installed {
        return;
    }
    let shlibs = built.variables[v as usize].unit.required_shlibs.clone();
    for shlib in shlibs {
        let providers = universe.provides(&shlib);
        let mut literals = vec![Literal::negative(v)];
        for provider_uid in providers {
            if let Some(&head) = built.uid_index.get(&provider_uid) {
                for m in chain_members(&built.variables, head) {
                    literals.push(Literal::positive(m));
                }
            }
        }
        if literals.len() == 1 {
            log::warn!("solver: cannot find provider for required shlib '{shlib}', discarding clause");
            continue;
        }
        attach_partial(built, Clause::new(literals, ClauseKind::ShlibProvide), &[v], trace);
    }
}

/// (d) Request unary clauses.
fn build_request_clause(built: &mut BuiltProblem, request: &dyn RequestSource, v: VarId, trace: bool) {
    let uid = built.variables[v as usize].unique_id.clone();
    if request.is_install_request(&uid) {
        attach(built, Clause::new(vec![Literal::positive(v)], ClauseKind::Request), trace);
    }
    if request.is_delete_request(&uid) {
        attach(built, Clause::new(vec![Literal::negative(v)], ClauseKind::Request), trace);
    }
}

/// (e) Chain mutex: at most one member of a multi-candidate chain installed.
/// Only the head is paired against each successor (spec §4.2(e)), not every
/// pair of members.
fn build_chain_mutex(built: &mut BuiltProblem, head: VarId, trace: bool) {
    let members = chain_members(&built.variables, head);
    if members.len() <= 1 {
        return;
    }
    for &other in &members[1..] {
        attach(
            built,
            Clause::new(
                vec![Literal::negative(head), Literal::negative(other)],
                ClauseKind::ChainMutex,
            ),
            trace,
        );
    }
}
