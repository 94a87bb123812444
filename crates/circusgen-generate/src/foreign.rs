use rand::Rng;
use uuid::Uuid;

use crate::errors::GenerationError;

/// Identifiers produced by an upstream table, available as reference targets.
#[derive(Debug, Clone, Default)]
pub struct ForeignKeys {
    table: String,
    ids: Vec<Uuid>,
}

impl ForeignKeys {
    pub fn new(table: impl Into<String>, ids: Vec<Uuid>) -> Self {
        Self {
            table: table.into(),
            ids,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.ids.contains(id)
    }

    pub fn extend(&mut self, ids: impl IntoIterator<Item = Uuid>) {
        self.ids.extend(ids);
    }

    /// Fail unless at least one id is available for `rows` dependent rows.
    pub fn ensure_available(&self, rows: usize) -> Result<(), GenerationError> {
        if rows > 0 && self.ids.is_empty() {
            return Err(self.no_parent_rows());
        }
        Ok(())
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Uuid, GenerationError> {
        if self.ids.is_empty() {
            return Err(self.no_parent_rows());
        }
        Ok(self.ids[rng.random_range(0..self.ids.len())])
    }

    fn no_parent_rows(&self) -> GenerationError {
        GenerationError::NoParentRows {
            table: self.table.clone(),
        }
    }
}
