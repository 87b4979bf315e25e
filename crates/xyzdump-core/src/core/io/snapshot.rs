use crate::core::models::region::{RegionError, SimBox};
use crate::core::models::store::ParticleStore;
use nalgebra::Point3;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct BoxSection {
    lo: [f64; 3],
    hi: [f64; 3],
    tilt: Option<[f64; 3]>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct ParticleSection {
    id: i64,
    #[serde(rename = "type")]
    type_code: u32,
    pos: [f64; 3],
    #[serde(default = "default_group_bits")]
    group: u32,
}

fn default_group_bits() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotFile {
    #[serde(rename = "types")]
    ntypes: Option<usize>,
    #[serde(rename = "box")]
    simbox: BoxSection,
    #[serde(default)]
    particles: Vec<ParticleSection>,
}

#[derive(Debug, Error)]
pub enum SnapshotLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid box geometry: {source}")]
    Region {
        #[from]
        source: RegionError,
    },
    #[error("Particle {id} has type code {type_code} outside the declared range [1, {ntypes}]")]
    TypeCode {
        id: i64,
        type_code: u32,
        ntypes: usize,
    },
}

/// One complete in-memory snapshot: box geometry, particle columns, and the
/// declared species count.
///
/// This is the standalone entry point for driving a frame without a host
/// framework; a live simulation would hand the encoder its own particle
/// store and geometry directly.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub store: ParticleStore,
    pub simbox: SimBox,
    /// The number of declared species. Explicit via the `types` key, or
    /// inferred as the highest type code present (at least 1).
    pub ntypes: usize,
}

impl Snapshot {
    /// Loads a snapshot from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a path-carrying `Io`/`Toml` error if the file cannot be read
    /// or parsed, `Region` for degenerate box bounds, and `TypeCode` if a
    /// particle's species code falls outside `[1, ntypes]`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotLoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SnapshotLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: SnapshotFile =
            toml::from_str(&content).map_err(|e| SnapshotLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        Self::from_file(file)
    }

    fn from_file(file: SnapshotFile) -> Result<Self, SnapshotLoadError> {
        let lo = Point3::from(file.simbox.lo);
        let hi = Point3::from(file.simbox.hi);
        let simbox = match file.simbox.tilt {
            Some(tilt) => SimBox::triclinic(lo, hi, tilt)?,
            None => SimBox::orthogonal(lo, hi)?,
        };

        let inferred = file
            .particles
            .iter()
            .map(|p| p.type_code as usize)
            .max()
            .unwrap_or(0);
        let ntypes = file.ntypes.unwrap_or(inferred).max(1);

        let mut store = ParticleStore::new();
        for p in &file.particles {
            if p.type_code == 0 || p.type_code as usize > ntypes {
                return Err(SnapshotLoadError::TypeCode {
                    id: p.id,
                    type_code: p.type_code,
                    ntypes,
                });
            }
            store.push(p.id, p.type_code, Point3::from(p.pos), p.group);
        }

        Ok(Self {
            store,
            simbox,
            ntypes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load_str(content: &str) -> Result<Snapshot, SnapshotLoadError> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        Snapshot::load(file.path())
    }

    #[test]
    fn loads_orthogonal_snapshot_with_particles() {
        let snapshot = load_str(
            r#"
            [box]
            lo = [0.0, 0.0, 0.0]
            hi = [10.0, 10.0, 10.0]

            [[particles]]
            id = 10
            type = 1
            pos = [0.0, 0.0, 0.0]

            [[particles]]
            id = 20
            type = 2
            pos = [1.0, 2.0, 3.0]
            group = 3
            "#,
        )
        .unwrap();

        assert_eq!(snapshot.store.len(), 2);
        assert_eq!(snapshot.ntypes, 2);
        assert!(!snapshot.simbox.is_triclinic());

        let rows: Vec<_> = snapshot.store.rows().collect();
        assert_eq!(rows[0].group_bits, 1);
        assert_eq!(rows[1].group_bits, 3);
    }

    #[test]
    fn tilt_key_selects_triclinic_shape() {
        let snapshot = load_str(
            r#"
            [box]
            lo = [0.0, 0.0, 0.0]
            hi = [4.0, 4.0, 4.0]
            tilt = [1.5, 0.0, -0.5]
            "#,
        )
        .unwrap();
        assert!(snapshot.simbox.is_triclinic());
    }

    #[test]
    fn declared_type_count_overrides_inference() {
        let snapshot = load_str(
            r#"
            types = 4
            [box]
            lo = [0.0, 0.0, 0.0]
            hi = [1.0, 1.0, 1.0]

            [[particles]]
            id = 1
            type = 2
            pos = [0.5, 0.5, 0.5]
            "#,
        )
        .unwrap();
        assert_eq!(snapshot.ntypes, 4);
    }

    #[test]
    fn empty_snapshot_still_declares_one_type() {
        let snapshot = load_str(
            r#"
            [box]
            lo = [0.0, 0.0, 0.0]
            hi = [1.0, 1.0, 1.0]
            "#,
        )
        .unwrap();
        assert!(snapshot.store.is_empty());
        assert_eq!(snapshot.ntypes, 1);
    }

    #[test]
    fn out_of_range_type_code_is_rejected() {
        let err = load_str(
            r#"
            types = 1
            [box]
            lo = [0.0, 0.0, 0.0]
            hi = [1.0, 1.0, 1.0]

            [[particles]]
            id = 7
            type = 2
            pos = [0.0, 0.0, 0.0]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SnapshotLoadError::TypeCode {
                id: 7,
                type_code: 2,
                ntypes: 1
            }
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_str(
            r#"
            [box]
            lo = [0.0, 0.0, 0.0]
            hi = [1.0, 1.0, 1.0]
            velocity = [1.0, 0.0, 0.0]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotLoadError::Toml { .. }));
    }

    #[test]
    fn inverted_box_bounds_are_rejected() {
        let err = load_str(
            r#"
            [box]
            lo = [0.0, 0.0, 5.0]
            hi = [1.0, 1.0, 1.0]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SnapshotLoadError::Region { .. }));
    }
}
