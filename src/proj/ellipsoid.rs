use crate::error::ProjError;

/// Reference ellipsoid parameters, derived once from the defining constants
/// (semi-major axis and inverse flattening) and immutable thereafter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Inverse flattening (dimensionless); 0 denotes a sphere
    pub rf: f64,
    /// Flattening: 1/rf, or 0 when rf = 0
    pub f: f64,
    /// First eccentricity squared: 2f - f^2
    pub e2: f64,
    /// Second eccentricity squared: e2 / (1 - e2)
    pub ep2: f64,
    /// Third flattening: f / (2 - f)
    pub n: f64,
}

impl Ellipsoid {
    /// Derive the ellipsoid from semi-major axis `a` (metres) and inverse
    /// flattening `rf`.
    ///
    /// `rf = 0` is the degenerate sphere: flattening and both eccentricities
    /// collapse to exactly zero.
    pub const fn new(a: f64, rf: f64) -> Self {
        let f = if rf != 0.0 { 1.0 / rf } else { 0.0 };
        let e2 = 2.0 * f - f * f;
        let ep2 = e2 / (1.0 - e2);
        let n = f / (2.0 - f);
        Self {
            a,
            rf,
            f,
            e2,
            ep2,
            n,
        }
    }

    /// Checked construction for caller-supplied constants.
    pub fn try_new(a: f64, rf: f64) -> Result<Self, ProjError> {
        if !a.is_finite() || a <= 0.0 {
            return Err(ProjError::InvalidParameter(format!(
                "semi-major axis must be positive, got {a}"
            )));
        }
        if !rf.is_finite() || rf < 0.0 {
            return Err(ProjError::InvalidParameter(format!(
                "inverse flattening must be non-negative, got {rf}"
            )));
        }
        Ok(Self::new(a, rf))
    }
}

/// GRS80 ellipsoid, the basis of the NZGD2000 datum.
pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 298.257_222_101);
