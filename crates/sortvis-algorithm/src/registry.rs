//! The [`AlgorithmRegistry`]: registered plug-ins in display order.
//!
//! Registration happens once at startup. Afterwards the configuration form
//! only flips selection flags and reads the selected ids back in
//! registration order to build a [`RunQueue`].

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use smallvec::SmallVec;
use sortvis_core::AlgorithmId;

use crate::algorithm::SortAlgorithm;

/// Selected algorithm ids in registration order.
pub type RunQueue = SmallVec<[AlgorithmId; 8]>;

/// One registered plug-in.
#[derive(Clone)]
pub struct AlgorithmEntry {
    /// Display name, unique within the registry.
    pub name: String,
    /// Whether the plug-in takes part in the next run.
    pub selected: bool,
    /// The plug-in itself, shared with running lanes.
    pub algorithm: Arc<dyn SortAlgorithm>,
}

impl fmt::Debug for AlgorithmEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmEntry")
            .field("name", &self.name)
            .field("selected", &self.selected)
            .field("parallel", &self.algorithm.is_parallel())
            .finish()
    }
}

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from plug-in registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The name is already taken by an earlier registration.
    DuplicateName {
        /// The contested name.
        name: String,
    },
    /// The name is empty or whitespace.
    EmptyName,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(f, "an algorithm named '{name}' is already registered")
            }
            Self::EmptyName => write!(f, "algorithm name must not be blank"),
        }
    }
}

impl Error for RegistryError {}

// ── Registry ───────────────────────────────────────────────────────

/// Ordered set of registered plug-ins with their selection flags.
///
/// Keyed by name; an entry's position in the map is its [`AlgorithmId`].
#[derive(Clone, Debug, Default)]
pub struct AlgorithmRegistry {
    entries: IndexMap<String, AlgorithmEntry>,
}

impl AlgorithmRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `algorithm` under `name`, unselected.
    ///
    /// The returned id is the entry's position in display order.
    pub fn register<A: SortAlgorithm>(
        &mut self,
        name: impl Into<String>,
        algorithm: A,
    ) -> Result<AlgorithmId, RegistryError> {
        self.register_shared(name, Arc::new(algorithm))
    }

    /// Register an already shared plug-in.
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        algorithm: Arc<dyn SortAlgorithm>,
    ) -> Result<AlgorithmId, RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.entries.contains_key(&name) {
            tracing::warn!(name = %name, "rejected duplicate algorithm registration");
            return Err(RegistryError::DuplicateName { name });
        }
        let id = AlgorithmId(self.entries.len());
        tracing::debug!(
            id = %id,
            name = %name,
            parallel = algorithm.is_parallel(),
            "registered algorithm"
        );
        self.entries.insert(
            name.clone(),
            AlgorithmEntry {
                name,
                selected: false,
                algorithm,
            },
        );
        Ok(id)
    }

    /// Entry for `id`.
    pub fn get(&self, id: AlgorithmId) -> Option<&AlgorithmEntry> {
        self.entries.get_index(id.0).map(|(_, entry)| entry)
    }

    /// Id of the entry called `name`.
    pub fn find(&self, name: &str) -> Option<AlgorithmId> {
        self.entries.get_index_of(name).map(AlgorithmId)
    }

    /// All entries in display order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &AlgorithmEntry> + '_ {
        self.entries.values()
    }

    /// Number of registered plug-ins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flip the selection of `id`. Returns the new state, or `None` for an
    /// unknown id.
    pub fn toggle(&mut self, id: AlgorithmId) -> Option<bool> {
        let (_, entry) = self.entries.get_index_mut(id.0)?;
        entry.selected = !entry.selected;
        Some(entry.selected)
    }

    /// Set the selection of `id`. Returns `false` for an unknown id.
    pub fn set_selected(&mut self, id: AlgorithmId, selected: bool) -> bool {
        match self.entries.get_index_mut(id.0) {
            Some((_, entry)) => {
                entry.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Selected ids in registration order.
    pub fn selected_ids(&self) -> RunQueue {
        self.entries
            .values()
            .enumerate()
            .filter(|(_, e)| e.selected)
            .map(|(i, _)| AlgorithmId(i))
            .collect()
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        for entry in self.entries.values_mut() {
            entry.selected = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::from_fn;
    use sortvis_core::{Comparator, LaneSlice};

    fn noop() -> impl SortAlgorithm {
        from_fn(|_: &mut LaneSlice<'_>, _: &dyn Comparator| {})
    }

    #[test]
    fn ids_follow_registration_order() {
        let mut reg = AlgorithmRegistry::new();
        let a = reg.register("A", noop()).unwrap();
        let b = reg.register("B", noop()).unwrap();
        assert_eq!((a, b), (AlgorithmId(0), AlgorithmId(1)));
        assert_eq!(reg.find("B"), Some(b));
        assert_eq!(reg.find("C"), None);
        assert_eq!(reg.get(a).unwrap().name, "A");
        assert!(reg.get(AlgorithmId(2)).is_none());
        assert_eq!(reg.len(), 2);
        let names: Vec<&str> = reg.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut reg = AlgorithmRegistry::new();
        reg.register("A", noop()).unwrap();
        assert_eq!(
            reg.register("A", noop()),
            Err(RegistryError::DuplicateName { name: "A".into() })
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn blank_name_rejected() {
        let mut reg = AlgorithmRegistry::new();
        assert_eq!(reg.register("  ", noop()), Err(RegistryError::EmptyName));
        assert!(reg.is_empty());
    }

    #[test]
    fn selection_is_reported_in_registration_order() {
        let mut reg = AlgorithmRegistry::new();
        let ids: Vec<_> = ["A", "B", "C"]
            .iter()
            .map(|n| reg.register(*n, noop()).unwrap())
            .collect();
        assert_eq!(reg.toggle(ids[2]), Some(true));
        assert_eq!(reg.toggle(ids[0]), Some(true));
        assert_eq!(reg.selected_ids().as_slice(), &[ids[0], ids[2]]);
        assert_eq!(reg.toggle(ids[0]), Some(false));
        assert_eq!(reg.selected_ids().as_slice(), &[ids[2]]);
        assert!(reg.set_selected(ids[1], true));
        assert!(!reg.set_selected(AlgorithmId(9), true));
        assert_eq!(reg.toggle(AlgorithmId(9)), None);
        reg.clear_selection();
        assert!(reg.selected_ids().is_empty());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            RegistryError::DuplicateName { name: "X".into() }.to_string(),
            "an algorithm named 'X' is already registered"
        );
        assert_eq!(
            RegistryError::EmptyName.to_string(),
            "algorithm name must not be blank"
        );
    }
}
