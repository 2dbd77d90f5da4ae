//! Transverse Mercator projection — Redfearn's formulation.
//!
//! Forward (geodetic → grid) and inverse (grid → geodetic) series as
//! expressed in the GDA technical manual. The polynomial coefficients are
//! reproduced from that formulation verbatim; a single sign or coefficient
//! slip produces plausible-looking but wrong coordinates, so they must not
//! be re-derived.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::ProjError;
use crate::proj::common::{foot_point_latitude, meridian_arc};
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::Projection;

/// Half-width of the longitude band around the central meridian inside
/// which the truncated series holds survey accuracy (radians).
const DESIGN_REGION_HALF_WIDTH: f64 = 10.0 * PI / 180.0;

/// Guard band around the poles where tan(lat) and 1/cos(lat) blow up
/// (radians).
const POLE_EPS: f64 = 1e-8;

/// A fixed Transverse Mercator parameterization over one ellipsoid.
///
/// All fields are set at construction and never mutated, so a single
/// instance is safe to share across threads.
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    /// Central meridian (radians)
    meridian: f64,
    /// Origin latitude (radians)
    orglat: f64,
    /// Central meridian scale factor
    scalef: f64,
    /// False easting (metres)
    falsee: f64,
    /// False northing (metres)
    falsen: f64,
    /// Grid-unit to metre conversion factor
    utom: f64,
    /// Meridional arc at the origin latitude, precomputed
    om: f64,
}

impl TransverseMercator {
    /// Bind a projection to its defining constants. Angles are in radians.
    ///
    /// The meridional arc at the origin latitude is computed here, once;
    /// the instance is immutable afterwards.
    pub fn new(
        ellipsoid: Ellipsoid,
        meridian: f64,
        orglat: f64,
        scalef: f64,
        false_easting: f64,
        false_northing: f64,
        units_to_metres: f64,
    ) -> Self {
        let om = meridian_arc(&ellipsoid, orglat);
        Self {
            ellipsoid,
            meridian,
            orglat,
            scalef,
            falsee: false_easting,
            falsen: false_northing,
            utom: units_to_metres,
            om,
        }
    }

    pub fn central_meridian(&self) -> f64 {
        self.meridian
    }

    pub fn origin_latitude(&self) -> f64 {
        self.orglat
    }

    /// Whether a longitude lies within the band around the central meridian
    /// for which the series truncation keeps survey accuracy. Points
    /// outside still convert; the result degrades without bound.
    pub fn in_design_region(&self, lon: f64) -> bool {
        wrap_longitude(lon - self.meridian).abs() <= DESIGN_REGION_HALF_WIDTH
    }
}

/// Reduce a longitude difference into (-π, π] without iterating, so
/// arbitrarily large inputs cost one modulo.
fn wrap_longitude(dlon: f64) -> f64 {
    let r = dlon % TAU;
    if r > PI {
        r - TAU
    } else if r <= -PI {
        r + TAU
    } else {
        r
    }
}

impl Projection for TransverseMercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        if !lon.is_finite() {
            return Err(ProjError::NonFinite {
                what: "longitude",
                value: lon,
            });
        }
        if !lat.is_finite() {
            return Err(ProjError::NonFinite {
                what: "latitude",
                value: lat,
            });
        }
        if FRAC_PI_2 - lat.abs() < POLE_EPS {
            return Err(ProjError::Singular("latitude at a pole"));
        }

        let a = self.ellipsoid.a;
        let e2 = self.ellipsoid.e2;

        let dlon = wrap_longitude(lon - self.meridian);
        let m = meridian_arc(&self.ellipsoid, lat);

        let slt = lat.sin();
        let eslt = 1.0 - e2 * slt * slt;
        // Radii of curvature in the prime vertical (eta) and the meridian (rho)
        let eta = a / eslt.sqrt();
        let rho = eta * (1.0 - e2) / eslt;
        let psi = eta / rho;

        let clt = lat.cos();
        let wc = clt * dlon;
        let wc2 = wc * wc;

        let t = slt / clt;
        let t2 = t * t;
        let t4 = t2 * t2;
        let t6 = t2 * t4;

        let trm1 = (psi - t2) / 6.0;
        let trm2 =
            (((4.0 * (1.0 - 6.0 * t2) * psi + (1.0 + 8.0 * t2)) * psi - 2.0 * t2) * psi + t4)
                / 120.0;
        let trm3 = (61.0 - 479.0 * t2 + 179.0 * t4 - t6) / 5040.0;

        let gce = (self.scalef * eta * dlon * clt)
            * (((trm3 * wc2 + trm2) * wc2 + trm1) * wc2 + 1.0);
        let easting = gce / self.utom + self.falsee;

        let trm1 = 1.0 / 2.0;
        let trm2 = ((4.0 * psi + 1.0) * psi - t2) / 24.0;
        let trm3 = ((((8.0 * (11.0 - 24.0 * t2) * psi - 28.0 * (1.0 - 6.0 * t2)) * psi
            + (1.0 - 32.0 * t2))
            * psi
            - 2.0 * t2)
            * psi
            + t4)
            / 720.0;
        let trm4 = (1385.0 - 3111.0 * t2 + 543.0 * t4 - t6) / 40320.0;

        let gcn = (eta * t) * ((((trm4 * wc2 + trm3) * wc2 + trm2) * wc2 + trm1) * wc2);
        let northing = (gcn + m - self.om) * self.scalef / self.utom + self.falsen;

        Ok((easting, northing))
    }

    fn inverse(&self, easting: f64, northing: f64) -> Result<(f64, f64), ProjError> {
        if !easting.is_finite() {
            return Err(ProjError::NonFinite {
                what: "easting",
                value: easting,
            });
        }
        if !northing.is_finite() {
            return Err(ProjError::NonFinite {
                what: "northing",
                value: northing,
            });
        }

        let a = self.ellipsoid.a;
        let e2 = self.ellipsoid.e2;

        let arc = (northing - self.falsen) * self.utom / self.scalef + self.om;
        let fphi = foot_point_latitude(&self.ellipsoid, arc);
        if FRAC_PI_2 - fphi.abs() < POLE_EPS {
            return Err(ProjError::Singular("foot-point latitude at a pole"));
        }

        let slt = fphi.sin();
        let clt = fphi.cos();
        let eslt = 1.0 - e2 * slt * slt;
        let eta = a / eslt.sqrt();
        let rho = eta * (1.0 - e2) / eslt;
        let psi = eta / rho;

        let e_off = (easting - self.falsee) * self.utom;
        let x = e_off / (eta * self.scalef);
        let x2 = x * x;

        let t = slt / clt;
        let t2 = t * t;
        let t4 = t2 * t2;

        let trm1 = 1.0 / 2.0;
        let trm2 = ((-4.0 * psi + 9.0 * (1.0 - t2)) * psi + 12.0 * t2) / 24.0;
        let trm3 = ((((8.0 * (11.0 - 24.0 * t2) * psi - 12.0 * (21.0 - 71.0 * t2)) * psi
            + 15.0 * t2 * (15.0 * t2 - 98.0))
            * psi
            + 360.0 * t2)
            * psi
            + 360.0 * t4)
            / 720.0;
        let trm4 = (((1575.0 * t2 + 4095.0) * t2 + 3633.0) * t2 + 1385.0) / 720.0;

        let lat = fphi
            + (t * x * e_off / (self.scalef * rho))
                * (((trm4 * x2 - trm3) * x2 + trm2) * x2 - trm1);

        let trm1 = 1.0;
        let trm2 = (psi + 2.0 * t2) / 6.0;
        let trm3 = (((-4.0 * (1.0 - 6.0 * t2) * psi + (9.0 - 68.0 * t2)) * psi + 72.0 * t2) * psi
            + 24.0 * t4)
            / 120.0;
        let trm4 = (((720.0 * t2 + 1320.0) * t2 + 662.0) * t2 + 61.0) / 5040.0;

        let lon =
            self.meridian - (x / clt) * (((trm4 * x2 - trm3) * x2 + trm2) * x2 - trm1);

        Ok((lon, lat))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::GRS80;
    use approx::assert_relative_eq;

    /// NZTM parameters, bound directly for engine-level tests.
    fn nztm_engine() -> TransverseMercator {
        TransverseMercator::new(
            GRS80,
            173.0_f64.to_radians(),
            0.0,
            0.9996,
            1_600_000.0,
            10_000_000.0,
            1.0,
        )
    }

    #[test]
    fn test_origin_projects_to_false_origin() {
        let tm = nztm_engine();
        let (e, n) = tm.forward(173.0_f64.to_radians(), 0.0).unwrap();
        assert_relative_eq!(e, 1_600_000.0);
        assert_relative_eq!(n, 10_000_000.0);
    }

    #[test]
    fn test_known_point_auckland_region() {
        // Reference conversion: (1783295 E, 5868193 N)
        let tm = nztm_engine();
        let (lon, lat) = tm.inverse(1_783_295.0, 5_868_193.0).unwrap();
        assert_relative_eq!(lat.to_degrees(), -37.314852, epsilon = 6e-7);
        assert_relative_eq!(lon.to_degrees(), 175.068489, epsilon = 6e-7);
    }

    #[test]
    fn test_known_point_otago_region() {
        // Reference conversion: (1375175 E, 5086098 N)
        let tm = nztm_engine();
        let (lon, lat) = tm.inverse(1_375_175.0, 5_086_098.0).unwrap();
        assert_relative_eq!(lat.to_degrees(), -44.343561, epsilon = 6e-7);
        assert_relative_eq!(lon.to_degrees(), 170.179492, epsilon = 6e-7);
    }

    #[test]
    fn test_roundtrip_grid() {
        let tm = nztm_engine();
        let cases: &[(f64, f64)] = &[
            (1_783_295.0, 5_868_193.0),
            (1_375_175.0, 5_086_098.0),
            (1_600_000.0, 10_000_000.0),
            (1_748_795.0, 5_427_057.0), // Wellington area
            (1_345_302.0, 5_007_773.0), // Otago area
        ];
        for &(e, n) in cases {
            let (lon, lat) = tm.inverse(e, n).unwrap();
            let (e2, n2) = tm.forward(lon, lat).unwrap();
            assert_relative_eq!(e2, e, epsilon = 1e-3);
            assert_relative_eq!(n2, n, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_roundtrip_geodetic() {
        let tm = nztm_engine();
        let cases: &[(f64, f64)] = &[
            (-36.85, 174.76), // Auckland
            (-41.29, 174.78), // Wellington
            (-43.53, 172.64), // Christchurch
            (-45.87, 170.50), // Dunedin
        ];
        for &(lat_deg, lon_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (e, n) = tm.forward(lon, lat).unwrap();
            let (lon2, lat2) = tm.inverse(e, n).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_easting_monotonic_in_longitude() {
        let tm = nztm_engine();
        let lat = (-41.0_f64).to_radians();
        let mut prev = f64::NEG_INFINITY;
        for lon_deg in [170.0_f64, 171.5, 173.0, 174.0, 175.5, 177.0, 178.5] {
            let (e, _) = tm.forward(lon_deg.to_radians(), lat).unwrap();
            assert!(e > prev, "easting not increasing at lon {lon_deg}: {e}");
            prev = e;
        }
    }

    #[test]
    fn test_northing_monotonic_in_latitude() {
        // Positive local scale everywhere in the valid region: northing
        // grows strictly as the point moves north, so southern points
        // carry the smaller northings.
        let tm = nztm_engine();
        let lon = 173.0_f64.to_radians();
        let mut prev = f64::NEG_INFINITY;
        for lat_deg in [-47.5_f64, -46.0, -43.0, -40.0, -37.0, -34.0] {
            let (_, n) = tm.forward(lon, lat_deg.to_radians()).unwrap();
            assert!(n > prev, "northing not increasing at lat {lat_deg}: {n}");
            prev = n;
        }
    }

    #[test]
    fn test_longitude_wraps_without_iterating() {
        let tm = nztm_engine();
        let lat = (-41.0_f64).to_radians();
        let lon = 174.5_f64.to_radians();
        let (e0, n0) = tm.forward(lon, lat).unwrap();
        for turns in [-2.0, -1.0, 1.0, 2.0, 1000.0] {
            let (e, n) = tm.forward(lon + turns * TAU, lat).unwrap();
            assert_relative_eq!(e, e0, epsilon = 1e-4);
            assert_relative_eq!(n, n0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_wrap_longitude_range() {
        assert_relative_eq!(wrap_longitude(0.0), 0.0);
        assert_relative_eq!(wrap_longitude(PI + 0.25), 0.25 - PI, epsilon = 1e-12);
        assert_relative_eq!(wrap_longitude(-PI), PI);
        assert_relative_eq!(wrap_longitude(3.0 * TAU + 0.5), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_finite() {
        let tm = nztm_engine();
        assert!(matches!(
            tm.forward(f64::NAN, 0.5),
            Err(ProjError::NonFinite { .. })
        ));
        assert!(matches!(
            tm.forward(3.0, f64::INFINITY),
            Err(ProjError::NonFinite { .. })
        ));
        assert!(matches!(
            tm.inverse(f64::NAN, 5_000_000.0),
            Err(ProjError::NonFinite { .. })
        ));
        assert!(matches!(
            tm.inverse(1_600_000.0, f64::NEG_INFINITY),
            Err(ProjError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_forward_singular_at_pole() {
        let tm = nztm_engine();
        assert!(matches!(
            tm.forward(173.0_f64.to_radians(), FRAC_PI_2),
            Err(ProjError::Singular(_))
        ));
        assert!(matches!(
            tm.forward(173.0_f64.to_radians(), -FRAC_PI_2),
            Err(ProjError::Singular(_))
        ));
    }

    #[test]
    fn test_inverse_singular_at_pole() {
        let tm = nztm_engine();
        // Northing whose meridional arc reaches the north pole
        let arc_pole = meridian_arc(&GRS80, FRAC_PI_2);
        let northing = 10_000_000.0 + arc_pole * 0.9996;
        assert!(matches!(
            tm.inverse(1_600_000.0, northing),
            Err(ProjError::Singular(_))
        ));
    }

    #[test]
    fn test_design_region() {
        let tm = nztm_engine();
        assert!(tm.in_design_region(175.0_f64.to_radians()));
        assert!(tm.in_design_region(166.0_f64.to_radians()));
        assert!(!tm.in_design_region(120.0_f64.to_radians()));
        assert!(!tm.in_design_region((-173.0_f64).to_radians()));
        // Wrapped equivalents land in the same band
        assert!(tm.in_design_region((175.0 + 360.0_f64).to_radians()));
    }

    #[test]
    fn test_scale_factor_on_central_meridian() {
        // On the central meridian the point scale equals the central scale
        // factor: a short northward step of ds metres moves the grid
        // northing by ~0.9996 * ds.
        let tm = nztm_engine();
        let lon = 173.0_f64.to_radians();
        let lat = (-41.0_f64).to_radians();
        let dlat = 1e-5; // ~64 m of meridian arc
        let (_, n1) = tm.forward(lon, lat).unwrap();
        let (_, n2) = tm.forward(lon, lat + dlat).unwrap();
        let arc = meridian_arc(&GRS80, lat + dlat) - meridian_arc(&GRS80, lat);
        assert_relative_eq!((n2 - n1) / arc, 0.9996, epsilon = 1e-6);
    }

    #[test]
    fn test_accessors() {
        let tm = nztm_engine();
        assert_relative_eq!(tm.central_meridian(), 173.0_f64.to_radians());
        assert_relative_eq!(tm.origin_latitude(), 0.0);
        assert_relative_eq!(tm.ellipsoid().a, GRS80.a);
    }

    #[test]
    fn test_batch_matches_scalar() {
        let tm = nztm_engine();
        let points: [(f64, f64); 3] = [(-38.5, 176.0), (-42.0, 171.5), (-45.0, 169.0)];
        let mut coords: Vec<(f64, f64)> = points
            .iter()
            .map(|&(lat, lon)| (lon.to_radians(), lat.to_radians()))
            .collect();
        tm.forward_batch(&mut coords).unwrap();
        for (i, &(lat, lon)) in points.iter().enumerate() {
            let (e, n) = tm
                .forward(lon.to_radians(), lat.to_radians())
                .unwrap();
            assert_relative_eq!(coords[i].0, e);
            assert_relative_eq!(coords[i].1, n);
        }
        tm.inverse_batch(&mut coords).unwrap();
        for (i, &(lat, lon)) in points.iter().enumerate() {
            assert_relative_eq!(coords[i].0, lon.to_radians(), epsilon = 1e-9);
            assert_relative_eq!(coords[i].1, lat.to_radians(), epsilon = 1e-9);
        }
    }
}
