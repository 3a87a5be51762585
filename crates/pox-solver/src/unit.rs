//! The boundary between the solver core and its two external collaborators:
//! the universe of candidate package states, and the set of user requests.
//! Both are consumed only through traits; building the universe (metadata
//! fetching, repository I/O, shared-library introspection) is out of scope.

/// A candidate package state. Opaque to the solver beyond these fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Identifies the package independent of version/origin; all units
    /// sharing a unique id form one chain, of which at most one may end up
    /// installed.
    pub unique_id: String,
    /// Content digest, carried through to job records for callers that
    /// need to verify fetched artifacts.
    pub digest: String,
    /// Whether this exact unit is the one currently present on disk.
    pub is_installed: bool,
    /// Unique ids this unit depends on.
    pub dependencies: Vec<String>,
    /// Declared conflicts against other units.
    pub conflicts: Vec<Conflict>,
    /// Shared-library names this unit requires at runtime. Only meaningful
    /// for remote (not-yet-installed) units.
    pub required_shlibs: Vec<String>,
}

impl Unit {
    pub fn new(unique_id: impl Into<String>, digest: impl Into<String>, is_installed: bool) -> Self {
        Self {
            unique_id: unique_id.into(),
            digest: digest.into(),
            is_installed,
            dependencies: Vec::new(),
            conflicts: Vec::new(),
            required_shlibs: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, unique_id: impl Into<String>) -> Self {
        self.dependencies.push(unique_id.into());
        self
    }

    pub fn with_conflict(mut self, unique_id: impl Into<String>, kind: ConflictKind) -> Self {
        self.conflicts.push(Conflict { unique_id: unique_id.into(), kind });
        self
    }

    pub fn with_required_shlib(mut self, name: impl Into<String>) -> Self {
        self.required_shlibs.push(name.into());
        self
    }

    /// `local` vs `remote` as used in conflict-report wording.
    pub fn origin(&self) -> &'static str {
        if self.is_installed { "local" } else { "remote" }
    }
}

/// A declared conflict between two units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub unique_id: String,
    pub kind: ConflictKind,
}

/// The scope under which an explicit conflict clause is emitted (spec §4.2(b)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Conflict only applies between a remote candidate and an installed one.
    RemoteLocal,
    /// Conflict only applies between two remote candidates.
    RemoteRemote,
}

/// The kind of job being planned; drives the initial-guess heuristic
/// (spec §4.4.1) and whether "install" emits as `Install` or `Fetch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    Install,
    Upgrade,
    Delete,
    Fetch,
    AutoRemove,
}

/// Supplies the set of candidate units and the shared-library Provides
/// index. A real implementation fetches this from repository metadata;
/// that implementation is out of scope here.
pub trait UniverseProvider {
    /// All unique ids present in the universe, in the order they should be
    /// assigned into the Variable Table.
    fn unique_ids(&self) -> Vec<String>;

    /// All units sharing `unique_id`, in chain order (the order they should
    /// be linked and iterated).
    fn units_for(&self, unique_id: &str) -> Vec<Unit>;

    /// Unique ids of units that provide the given shared-library name.
    fn provides(&self, shlib_name: &str) -> Vec<String>;
}

/// Supplies the install/delete requests driving the Clause Builder's unary
/// clauses and the DPLL search's initial-guess heuristic.
pub trait RequestSource {
    /// The job this solve is performing.
    fn job_type(&self) -> JobType;

    /// Whether `unique_id` has been requested for install.
    fn is_install_request(&self, unique_id: &str) -> bool;

    /// Whether `unique_id` has been requested for removal.
    fn is_delete_request(&self, unique_id: &str) -> bool;
}
