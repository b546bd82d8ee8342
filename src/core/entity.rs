use crate::core::error::LedgerError;
use crate::core::transaction::Amount;
use crate::graph::debt_graph::DebtGraph;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Dense, zero-based identity of a registered entity.
///
/// Identities are handed out in registration order and never reused,
/// so they double as row/column indices into the [`DebtGraph`].
///
/// # Examples
///
/// ```
/// use cashflow_minimizer::core::entity::EntityRegistry;
///
/// let mut registry = EntityRegistry::new();
/// let alice = registry.register("Alice").unwrap();
/// let bob = registry.register("Bob").unwrap();
/// assert_eq!(alice.index(), 0);
/// assert_eq!(bob.index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(usize);

impl EntityId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A registered party together with its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity<'a> {
    pub id: EntityId,
    pub name: &'a str,
}

/// Name → identity registry that owns the debt matrix.
///
/// Registering an entity is the only way the [`DebtGraph`] grows: every
/// new identity gets a zeroed row and column in the same step, so the
/// matrix dimension always equals [`EntityRegistry::len`].
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    names: Vec<String>,
    index: HashMap<String, EntityId>,
    graph: DebtGraph,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from persisted names and a row-major matrix.
    pub fn from_parts(names: Vec<String>, matrix: Vec<Vec<Amount>>) -> Result<Self, LedgerError> {
        if matrix.len() != names.len() || matrix.iter().any(|row| row.len() != names.len()) {
            return Err(LedgerError::InvalidSnapshot(format!(
                "matrix does not match {} entities",
                names.len()
            )));
        }

        let mut registry = Self::new();
        for name in names {
            registry.register(name)?;
        }
        for (i, row) in matrix.into_iter().enumerate() {
            for (j, amount) in row.into_iter().enumerate() {
                if amount == 0 {
                    continue;
                }
                if i == j || amount < 0 {
                    return Err(LedgerError::InvalidSnapshot(format!(
                        "cell [{i}][{j}] holds {amount}"
                    )));
                }
                registry
                    .graph
                    .record_debt(EntityId(i), EntityId(j), amount)
                    .map_err(|e| LedgerError::InvalidSnapshot(format!("cell [{i}][{j}]: {e}")))?;
            }
        }
        Ok(registry)
    }

    /// Register a new entity and grow the debt matrix by one row and column.
    pub fn register(&mut self, name: impl Into<String>) -> Result<EntityId, LedgerError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(LedgerError::InvalidName(name));
        }
        if self.index.contains_key(&name) {
            return Err(LedgerError::DuplicateEntity(name));
        }

        let id = EntityId(self.names.len());
        self.graph.push_entity();
        self.index.insert(name.clone(), id);
        info!("registered entity {} as {}", name, id);
        self.names.push(name);

        debug_assert_eq!(self.graph.dimension(), self.names.len());
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Result<EntityId, LedgerError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| LedgerError::UnknownEntity(name.to_string()))
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    /// Names in identity order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.names.iter().enumerate().map(|(i, name)| Entity {
            id: EntityId(i),
            name,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn graph(&self) -> &DebtGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut DebtGraph {
        &mut self.graph
    }
}
