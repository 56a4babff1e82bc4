//! Page-scoped lookup cache

use shared::record::FieldValue;
use shared::{LookupTable, LookupValue, UNRESOLVED};

use crate::{ClientResult, http::HrApi};

/// Explicitly owned lookup cache with a load-once contract.
///
/// Each page instance owns one; there is no cross-page sharing.
/// [`LookupCache::load_once`] is idempotent: the first call fetches, later
/// calls are no-ops even when the table came back empty.
#[derive(Debug, Default)]
pub struct LookupCache {
    table: Option<LookupTable>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the lookup table unless already loaded.
    pub async fn load_once<A: HrApi>(&mut self, api: &A) -> ClientResult<&LookupTable> {
        let table = match self.table.take() {
            Some(table) => table,
            None => {
                let table = api.fetch_lookups().await?;
                tracing::debug!(categories = table.len(), "Lookup table loaded");
                table
            }
        };
        Ok(self.table.insert(table))
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// The loaded table, if any.
    pub fn table(&self) -> Option<&LookupTable> {
        self.table.as_ref()
    }

    /// Resolve against the loaded table; everything is unresolved before
    /// the load completes.
    pub fn resolve(&self, category: i64, value: Option<&FieldValue>) -> &str {
        match &self.table {
            Some(table) => table.resolve(category, value),
            None => UNRESOLVED,
        }
    }

    /// Selector options for a category; empty before the load completes.
    pub fn values(&self, category: i64) -> &[LookupValue] {
        match &self.table {
            Some(table) => table.values(category),
            None => &[],
        }
    }
}
