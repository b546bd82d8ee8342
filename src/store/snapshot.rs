use crate::core::entity::EntityRegistry;
use crate::core::transaction::Amount;
use crate::store::StoreError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Everything that survives a session: entity names and the gross matrix.
///
/// On disk this is a whitespace-delimited text file:
///
/// ```text
/// 3
/// Alice
/// Bob
/// Carol
/// 0 100 0
/// 0 0 100
/// 50 0 0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub names: Vec<String>,
    pub matrix: Vec<Vec<Amount>>,
}

impl Snapshot {
    pub fn from_registry(registry: &EntityRegistry) -> Self {
        Self {
            names: registry.names().to_vec(),
            matrix: registry.graph().rows().to_vec(),
        }
    }

    pub fn entity_count(&self) -> usize {
        self.names.len()
    }

    /// Load a snapshot; a missing file yields an empty snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                let snapshot = Self::parse(&content)?;
                info!(
                    "loaded {} entities from {}",
                    snapshot.entity_count(),
                    path.display()
                );
                Ok(snapshot)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no previous data at {}, starting fresh", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        info!("saved {} entities to {}", self.entity_count(), path.display());
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.names.len());
        for name in &self.names {
            let _ = writeln!(out, "{name}");
        }
        for row in &self.matrix {
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            let _ = writeln!(out, "{}", cells.join(" "));
        }
        out
    }

    pub fn parse(content: &str) -> Result<Self, StoreError> {
        let tokens: Vec<&str> = content.split_whitespace().collect();
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(Self::default());
        };
        let count: usize = first
            .parse()
            .map_err(|_| StoreError::Malformed(format!("bad entity count '{first}'")))?;

        // count names followed by count * count cells
        let expected = count
            .checked_mul(count)
            .and_then(|cells| cells.checked_add(count))
            .ok_or_else(|| StoreError::Malformed(format!("entity count {count} is too large")))?;
        if rest.len() < expected {
            return Err(StoreError::Malformed(format!(
                "expected {expected} values for {count} entities, found {}",
                rest.len()
            )));
        }
        if let Some(extra) = rest.get(expected) {
            return Err(StoreError::Malformed(format!(
                "unexpected trailing data '{extra}'"
            )));
        }

        let (name_tokens, cell_tokens) = rest.split_at(count);
        let names = name_tokens.iter().map(|name| name.to_string()).collect();
        let mut matrix = Vec::with_capacity(count);
        for (i, row_tokens) in cell_tokens.chunks(count.max(1)).enumerate() {
            let mut row = Vec::with_capacity(count);
            for (j, token) in row_tokens.iter().enumerate() {
                let cell: Amount = token.parse().map_err(|_| {
                    StoreError::Malformed(format!("bad amount '{token}' at [{i}][{j}]"))
                })?;
                row.push(cell);
            }
            matrix.push(row);
        }
        Ok(Self { names, matrix })
    }
}
