use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegionError {
    #[error("Box upper bound is below lower bound on the {axis} axis: {lo} > {hi}")]
    InvertedBounds { axis: char, lo: f64, hi: f64 },
}

/// The shape of the simulation cell.
///
/// Orthogonal cells have axis-aligned edges. Triclinic cells carry the
/// three tilt factors describing how the second and third lattice vectors
/// lean off the axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxShape {
    Orthogonal,
    Triclinic { xy: f64, xz: f64, yz: f64 },
}

/// Simulation box geometry as supplied by the host framework.
///
/// The encoder only reads this: lower bounds serve as the coordinate origin
/// for orthogonal packing, and per-axis extents feed the frame header. The
/// host owns all geometry bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimBox {
    lo: Point3<f64>,
    hi: Point3<f64>,
    shape: BoxShape,
}

impl SimBox {
    /// Creates an axis-aligned box from its lower and upper bounds.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvertedBounds` if any upper bound is below
    /// the corresponding lower bound.
    pub fn orthogonal(lo: Point3<f64>, hi: Point3<f64>) -> Result<Self, RegionError> {
        Self::validated(lo, hi, BoxShape::Orthogonal)
    }

    /// Creates a skewed box from its bounds and `(xy, xz, yz)` tilt factors.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvertedBounds` if any upper bound is below
    /// the corresponding lower bound.
    pub fn triclinic(lo: Point3<f64>, hi: Point3<f64>, tilt: [f64; 3]) -> Result<Self, RegionError> {
        let [xy, xz, yz] = tilt;
        Self::validated(lo, hi, BoxShape::Triclinic { xy, xz, yz })
    }

    fn validated(lo: Point3<f64>, hi: Point3<f64>, shape: BoxShape) -> Result<Self, RegionError> {
        for (axis, l, h) in [('x', lo.x, hi.x), ('y', lo.y, hi.y), ('z', lo.z, hi.z)] {
            if h < l {
                return Err(RegionError::InvertedBounds { axis, lo: l, hi: h });
            }
        }
        Ok(Self { lo, hi, shape })
    }

    /// The lower bounds of the box, used as the origin for orthogonal packing.
    pub fn lo(&self) -> Point3<f64> {
        self.lo
    }

    /// The upper bounds of the box.
    pub fn hi(&self) -> Point3<f64> {
        self.hi
    }

    /// The cell shape selected at construction.
    pub fn shape(&self) -> BoxShape {
        self.shape
    }

    /// Per-axis extents (`hi - lo`).
    pub fn extents(&self) -> Vector3<f64> {
        self.hi - self.lo
    }

    pub fn is_triclinic(&self) -> bool {
        matches!(self.shape, BoxShape::Triclinic { .. })
    }
}
