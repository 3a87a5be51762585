use crate::unit::Unit;

/// Index of a [`Variable`] within a [`crate::problem::Problem`]'s arena.
pub type VarId = u32;

/// One boolean variable per candidate [`Unit`].
///
/// Variables sharing a `unique_id` form a doubly-linked chain; at most one
/// member of a chain may end up installed (enforced by a chain-mutex
/// clause, spec §4.2(e)).
#[derive(Debug, Clone)]
pub struct Variable {
    pub unit: Unit,
    pub unique_id: String,
    pub digest: String,
    /// Externally assigned priority; unused by the core algorithm itself
    /// but carried through for callers that want tie-breaking data.
    pub priority: i32,
    /// Tentative/assigned installation state.
    pub to_install: bool,
    /// Whether this variable's value has been fixed by propagation or a guess.
    pub resolved: bool,
    /// Clause indices that mention this variable, in prepend order (the
    /// most recently attached clause first), propagation's "conflict
    /// before unit" sweep depends on this order being stable.
    pub rules: Vec<u32>,
    pub prev: Option<VarId>,
    pub next: Option<VarId>,
}

impl Variable {
    pub fn new(unit: Unit) -> Self {
        Self {
            unique_id: unit.unique_id.clone(),
            digest: unit.digest.clone(),
            priority: 0,
            to_install: false,
            resolved: false,
            rules: Vec::new(),
            prev: None,
            next: None,
            unit,
        }
    }

    /// Attach a clause reference, preserving prepend semantics.
    pub fn attach_rule(&mut self, clause: u32) {
        self.rules.insert(0, clause);
    }

    pub fn nrules(&self) -> usize {
        self.rules.len()
    }

    pub fn is_independent(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_rule_prepends() {
        let mut v = Variable::new(Unit::new("a", "d", false));
        v.attach_rule(1);
        v.attach_rule(2);
        v.attach_rule(3);
        assert_eq!(v.rules, vec![3, 2, 1]);
    }

    #[test]
    fn independent_with_no_rules() {
        let v = Variable::new(Unit::new("a", "d", false));
        assert!(v.is_independent());
        assert_eq!(v.nrules(), 0);
    }
}
