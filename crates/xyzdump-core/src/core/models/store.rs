use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Column length mismatch: '{column}' has {actual} entries, expected {expected}")]
    ColumnMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Per-process particle storage, mirrored from the host framework.
///
/// The host owns particle data as parallel per-process columns: one global
/// identifier, one species code, one position, and one set of
/// group-membership bits per locally stored particle. The encoder only
/// iterates this store; membership in the emitted frame is decided by a
/// [`GroupMask`](super::selection::GroupMask) test against the group bits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleStore {
    ids: Vec<i64>,
    type_codes: Vec<u32>,
    positions: Vec<Point3<f64>>,
    group_bits: Vec<u32>,
}

/// A copied row view over one locally stored particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRow {
    pub id: i64,
    pub type_code: u32,
    pub position: Point3<f64>,
    pub group_bits: u32,
}

impl ParticleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a store from pre-built columns.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ColumnMismatch` if the columns differ in length.
    pub fn from_columns(
        ids: Vec<i64>,
        type_codes: Vec<u32>,
        positions: Vec<Point3<f64>>,
        group_bits: Vec<u32>,
    ) -> Result<Self, StoreError> {
        let expected = ids.len();
        for (column, actual) in [
            ("type_codes", type_codes.len()),
            ("positions", positions.len()),
            ("group_bits", group_bits.len()),
        ] {
            if actual != expected {
                return Err(StoreError::ColumnMismatch {
                    column,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self {
            ids,
            type_codes,
            positions,
            group_bits,
        })
    }

    /// Appends one particle row.
    pub fn push(&mut self, id: i64, type_code: u32, position: Point3<f64>, group_bits: u32) {
        self.ids.push(id);
        self.type_codes.push(type_code);
        self.positions.push(position);
        self.group_bits.push(group_bits);
    }

    /// The number of locally stored particles.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates rows in local storage order.
    pub fn rows(&self) -> impl Iterator<Item = ParticleRow> + '_ {
        (0..self.len()).map(|i| ParticleRow {
            id: self.ids[i],
            type_code: self.type_codes[i],
            position: self.positions[i],
            group_bits: self.group_bits[i],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_columns_accepts_equal_lengths() {
        let store = ParticleStore::from_columns(
            vec![1, 2],
            vec![1, 1],
            vec![Point3::origin(), Point3::new(1.0, 2.0, 3.0)],
            vec![1, 1],
        )
        .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn from_columns_rejects_mismatched_lengths() {
        let err = ParticleStore::from_columns(
            vec![1, 2],
            vec![1],
            vec![Point3::origin(), Point3::origin()],
            vec![1, 1],
        )
        .unwrap_err();
        assert_eq!(
            err,
            StoreError::ColumnMismatch {
                column: "type_codes",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn rows_preserve_local_storage_order() {
        let mut store = ParticleStore::new();
        store.push(10, 1, Point3::new(0.0, 0.0, 0.0), 1);
        store.push(20, 2, Point3::new(1.0, 2.0, 3.0), 3);

        let rows: Vec<_> = store.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 10);
        assert_eq!(rows[1].id, 20);
        assert_eq!(rows[1].type_code, 2);
        assert_eq!(rows[1].position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(rows[1].group_bits, 3);
    }

    #[test]
    fn new_store_is_empty() {
        assert!(ParticleStore::new().is_empty());
    }
}
