//! The data access facade: table lifecycle plus row and cell CRUD.
//!
//! Every operation delegates to the storage backend with minimal translation:
//! a put becomes an atomic batch of cell writes, a row read is a prefix scan
//! over the table's partition, and multi-row deletes collapse into one batch.
//! Failures surface as [`TableError`]; no operation swallows an engine error
//! into a default value.

use crate::catalog::{table_partition, Catalog, TableDescriptor, TableState};
use crate::errors::{Result, TableError};
use crate::keys::CellKey;
use crate::row::Row;
use crate::split::{normalize_split_keys, KeyRange};
use crate::store::{Mutation, StorageBackend, StorageError};
use std::sync::Arc;

/// Facade over one open connection. Cheap to construct; borrow it per call
/// site from [`crate::Connection::client`].
pub struct TableClient<'a> {
    backend: &'a Arc<dyn StorageBackend>,
    catalog: &'a Catalog,
}

impl<'a> TableClient<'a> {
    pub(crate) fn new(backend: &'a Arc<dyn StorageBackend>, catalog: &'a Catalog) -> Self {
        Self { backend, catalog }
    }

    fn descriptor(&self, table: &str) -> Result<TableDescriptor> {
        self.catalog
            .get(table)
            .ok_or_else(|| TableError::not_found(table))
    }

    // ---- table lifecycle ----

    /// Whether the table is registered.
    pub fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(self.catalog.contains(table))
    }

    /// Creates a table with the given column families, optionally pre-split
    /// on the given boundary keys.
    ///
    /// Returns `Ok(false)` without touching anything if the table already
    /// exists. Split keys are normalized to a sorted, deduplicated byte
    /// array; `n` boundaries yield `n + 1` regions.
    pub fn create_table(
        &self,
        table: &str,
        families: &[&str],
        split_keys: Option<&[&str]>,
    ) -> Result<bool> {
        if table.is_empty() {
            return Err(TableError::invalid_input("table name cannot be empty"));
        }
        if families.is_empty() {
            return Err(TableError::invalid_input(
                "a table needs at least one column family",
            ));
        }

        if self.catalog.contains(table) {
            log::warn!("table '{}' already exists", table);
            return Ok(false);
        }

        // Dedup families, preserving declaration order.
        let mut family_names: Vec<String> = Vec::with_capacity(families.len());
        for family in families {
            if family.is_empty() {
                return Err(TableError::invalid_input("column family name cannot be empty"));
            }
            if !family_names.iter().any(|f| f == family) {
                family_names.push((*family).to_string());
            }
        }

        let boundaries = split_keys.map(normalize_split_keys).unwrap_or_default();
        let desc = TableDescriptor::new(table, family_names, boundaries);
        let region_count = desc.regions().len();

        // The catalog is the source of truth, so the descriptor lands before
        // the partition; an interrupted create is healed at the next open.
        self.catalog.insert(desc)?;

        // An interrupted teardown can leave a partition behind with no
        // descriptor; discard it rather than resurface its cells.
        let partition = table_partition(table);
        if self.backend.has_partition(&partition) {
            self.backend.drop_partition(&partition)?;
        }
        self.backend.create_partition(&partition)?;

        log::info!("created table '{}' with {} region(s)", table, region_count);
        Ok(true)
    }

    /// Marks a table disabled, the required first step of teardown.
    pub fn disable_table(&self, table: &str) -> Result<()> {
        let mut desc = self.descriptor(table)?;
        desc.state = TableState::Disabled;
        self.catalog.insert(desc)?;
        Ok(())
    }

    /// Deletes a disabled table and all its data.
    ///
    /// The store refuses to delete an enabled table.
    pub fn delete_table(&self, table: &str) -> Result<()> {
        let desc = self.descriptor(table)?;
        if desc.state == TableState::Enabled {
            return Err(TableError::Enabled(table.to_string()));
        }

        // Descriptor goes first; a partition orphaned by a failed drop is
        // reclaimed by the next create_table of the same name.
        self.catalog.remove(table)?;
        self.backend.drop_partition(&table_partition(table))?;
        log::info!("dropped table '{}'", table);
        Ok(())
    }

    /// Disables then deletes a table. No-op if the table doesn't exist.
    pub fn drop_table(&self, table: &str) -> Result<()> {
        if !self.catalog.contains(table) {
            return Ok(());
        }
        self.disable_table(table)?;
        self.delete_table(table)
    }

    /// The region spans of a table.
    pub fn regions(&self, table: &str) -> Result<Vec<KeyRange>> {
        Ok(self.descriptor(table)?.regions())
    }

    /// Index of the region a row key falls into.
    pub fn region_of(&self, table: &str, row: &str) -> Result<usize> {
        Ok(self.descriptor(table)?.region_for(row))
    }

    // ---- writes ----

    /// Writes a single cell value.
    pub fn put(
        &self,
        table: &str,
        row: &str,
        family: &str,
        qualifier: &str,
        value: &str,
    ) -> Result<()> {
        self.put_many(table, row, family, &[(qualifier, value)])
    }

    /// Writes several columns of one row family in a single atomic mutation.
    ///
    /// Columns are `(qualifier, value)` pairs, so there is no way to supply
    /// mismatched column/value sequences.
    pub fn put_many(
        &self,
        table: &str,
        row: &str,
        family: &str,
        columns: &[(&str, &str)],
    ) -> Result<()> {
        let desc = self.descriptor(table)?;
        if !desc.has_family(family) {
            return Err(TableError::FamilyNotFound {
                table: table.to_string(),
                family: family.to_string(),
            });
        }
        if columns.is_empty() {
            return Err(TableError::invalid_input("put requires at least one column"));
        }

        let partition = table_partition(table);
        let mutations = columns
            .iter()
            .map(|(qualifier, value)| Mutation::Put {
                partition: partition.clone(),
                key: CellKey::new(row, family, *qualifier).encoded(),
                value: value.as_bytes().to_vec(),
            })
            .collect();

        self.backend.apply(mutations)?;
        Ok(())
    }

    // ---- reads ----

    /// Reads the whole table sequentially, in ascending row-key order.
    pub fn scan_table(&self, table: &str) -> Result<Vec<Row>> {
        self.descriptor(table)?;
        let partition = table_partition(table);

        let mut rows: Vec<Row> = Vec::new();
        for (key, value) in self.backend.scan(&partition, None)? {
            let cell = decode_cell(&key)?;
            let value = String::from_utf8_lossy(&value).into_owned();

            // Cells of one row are contiguous in scan order.
            match rows.last_mut() {
                Some(current) if current.key() == cell.row => {
                    current.insert_cell(&cell.family, &cell.qualifier, value);
                }
                _ => {
                    let mut row = Row::new(cell.row.clone());
                    row.insert_cell(&cell.family, &cell.qualifier, value);
                    rows.push(row);
                }
            }
        }

        Ok(rows)
    }

    /// Point lookup of one row. Returns `None` if the row has no cells.
    pub fn get_row(&self, table: &str, row: &str) -> Result<Option<Row>> {
        self.descriptor(table)?;
        let partition = table_partition(table);
        let prefix = CellKey::row_prefix(row);

        let mut result: Option<Row> = None;
        for (key, value) in self.backend.scan(&partition, Some(&prefix))? {
            let cell = decode_cell(&key)?;
            let value = String::from_utf8_lossy(&value).into_owned();
            result
                .get_or_insert_with(|| Row::new(row))
                .insert_cell(&cell.family, &cell.qualifier, value);
        }

        Ok(result)
    }

    /// Point lookup of one cell. Returns `None` if the cell is absent.
    pub fn get_cell(
        &self,
        table: &str,
        row: &str,
        family: &str,
        qualifier: &str,
    ) -> Result<Option<String>> {
        self.descriptor(table)?;
        let partition = table_partition(table);
        let key = CellKey::new(row, family, qualifier).encoded();

        let value = self.backend.get(&partition, &key)?;
        Ok(value.map(|v| String::from_utf8_lossy(&v).into_owned()))
    }

    // ---- deletes ----

    /// Deletes every cell of a row.
    pub fn delete_row(&self, table: &str, row: &str) -> Result<()> {
        self.descriptor(table)?;
        self.delete_prefix(table, &CellKey::row_prefix(row))
    }

    /// Deletes every cell of one family within a row.
    pub fn delete_family(&self, table: &str, row: &str, family: &str) -> Result<()> {
        self.descriptor(table)?;
        self.delete_prefix(table, &CellKey::family_prefix(row, family))
    }

    /// Deletes a single cell.
    pub fn delete_cell(&self, table: &str, row: &str, family: &str, qualifier: &str) -> Result<()> {
        self.descriptor(table)?;
        let partition = table_partition(table);
        self.backend
            .delete(&partition, &CellKey::new(row, family, qualifier).encoded())?;
        Ok(())
    }

    /// Deletes several rows in one batch mutation.
    pub fn delete_rows(&self, table: &str, rows: &[&str]) -> Result<()> {
        self.descriptor(table)?;
        let partition = table_partition(table);

        let mut mutations = Vec::new();
        for row in rows {
            let prefix = CellKey::row_prefix(row);
            for (key, _) in self.backend.scan(&partition, Some(&prefix))? {
                mutations.push(Mutation::Delete {
                    partition: partition.clone(),
                    key,
                });
            }
        }

        if !mutations.is_empty() {
            self.backend.apply(mutations)?;
        }
        Ok(())
    }

    fn delete_prefix(&self, table: &str, prefix: &[u8]) -> Result<()> {
        let partition = table_partition(table);

        let keys = self.backend.scan(&partition, Some(prefix))?;
        if keys.is_empty() {
            return Ok(());
        }

        let mutations = keys
            .into_iter()
            .map(|(key, _)| Mutation::Delete {
                partition: partition.clone(),
                key,
            })
            .collect();

        self.backend.apply(mutations)?;
        Ok(())
    }
}

fn decode_cell(key: &[u8]) -> Result<CellKey> {
    CellKey::decode(key).map_err(|e| TableError::Storage(StorageError::Codec(e)))
}
