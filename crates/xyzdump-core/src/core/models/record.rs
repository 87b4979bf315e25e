use nalgebra::Point3;

/// One packed trajectory record for a selected particle.
///
/// Records are produced by the encoder's pack step and consumed by the text
/// rendering step. The identifier travels with the record for the host's
/// cross-frame sort bookkeeping, but it is never rendered into the text
/// output; only the species name and the coordinate triple reach the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DumpRecord {
    /// The globally unique particle identifier.
    pub id: i64,
    /// The integer species code, in `[1, N]` for N declared types.
    pub type_code: u32,
    /// The emitted coordinates: box-local for orthogonal cells, raw
    /// absolute for triclinic cells.
    pub position: Point3<f64>,
}
