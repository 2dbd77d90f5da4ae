//! The fixed NZTM2000 grid: Redfearn's Transverse Mercator bound to the
//! parameters gazetted for the NZGD2000 datum, with degree/metre entry
//! points.
//!
//! Outputs are rounded at the boundary: latitude/longitude to six decimal
//! places, easting/northing to whole metres.

use std::sync::OnceLock;

use crate::error::ProjError;
use crate::proj::ellipsoid::GRS80;
use crate::proj::transverse_mercator::TransverseMercator;
use crate::proj::Projection;

/// Central meridian (degrees east)
const NZTM_CM: f64 = 173.0;
/// Origin latitude (degrees)
const NZTM_OLAT: f64 = 0.0;
/// Central meridian scale factor
const NZTM_SF: f64 = 0.9996;
/// False easting (metres)
const NZTM_FE: f64 = 1_600_000.0;
/// False northing (metres)
const NZTM_FN: f64 = 10_000_000.0;
/// Grid units per metre
const NZTM_UTOM: f64 = 1.0;

/// Decimal places kept for latitude/longitude output
const DEGREE_DP: i32 = 6;

static NZTM: OnceLock<TransverseMercator> = OnceLock::new();

/// The process-wide NZTM projection, built on first use and shared
/// read-only by every conversion.
pub fn nztm() -> &'static TransverseMercator {
    NZTM.get_or_init(|| {
        TransverseMercator::new(
            GRS80,
            NZTM_CM.to_radians(),
            NZTM_OLAT.to_radians(),
            NZTM_SF,
            NZTM_FE,
            NZTM_FN,
            NZTM_UTOM,
        )
    })
}

/// Result of a grid → geodetic conversion: the input NZTM coordinate
/// echoed back, with the position in decimal degrees rounded to 6 dp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticResult {
    pub easting: f64,
    pub northing: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of a geodetic → grid conversion: the input position echoed
/// back, with the NZTM coordinate rounded to whole metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridResult {
    pub latitude: f64,
    pub longitude: f64,
    pub easting: f64,
    pub northing: f64,
}

fn round_dp(value: f64, dp: i32) -> f64 {
    let scale = 10f64.powi(dp);
    (value * scale).round() / scale
}

/// Convert an NZTM easting/northing (metres) to NZGD2000
/// latitude/longitude (decimal degrees).
pub fn nztm_to_geodetic(easting: f64, northing: f64) -> Result<GeodeticResult, ProjError> {
    let (lon, lat) = nztm().inverse(easting, northing)?;
    Ok(GeodeticResult {
        easting,
        northing,
        latitude: round_dp(lat.to_degrees(), DEGREE_DP),
        longitude: round_dp(lon.to_degrees(), DEGREE_DP),
    })
}

/// Convert an NZGD2000 latitude/longitude (decimal degrees) to an NZTM
/// easting/northing (whole metres).
pub fn geodetic_to_nztm(latitude: f64, longitude: f64) -> Result<GridResult, ProjError> {
    let (easting, northing) = nztm().forward(longitude.to_radians(), latitude.to_radians())?;
    Ok(GridResult {
        latitude,
        longitude,
        easting: easting.round(),
        northing: northing.round(),
    })
}
