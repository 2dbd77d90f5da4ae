//! Series shared by the projection engine: meridional arc length and its
//! inverse, the foot-point latitude.

use super::ellipsoid::Ellipsoid;

/// Length of meridional arc from the equator to latitude `lat` (radians),
/// in metres.
///
/// Helmert's formula as expressed in the GDA technical manual for
/// Redfearn's projection. The series is truncated at e⁶; the coefficients
/// are fixed to this order and must not be altered.
pub fn meridian_arc(ellipsoid: &Ellipsoid, lat: f64) -> f64 {
    let a = ellipsoid.a;
    let e2 = ellipsoid.e2;
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    let a0 = 1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0;
    let a2 = 3.0 / 8.0 * (e2 + e4 / 4.0 + 15.0 * e6 / 128.0);
    let a4 = 15.0 / 256.0 * (e4 + 3.0 * e6 / 4.0);
    let a6 = 35.0 * e6 / 3072.0;

    a * (a0 * lat - a2 * (2.0 * lat).sin() + a4 * (4.0 * lat).sin() - a6 * (6.0 * lat).sin())
}

/// Latitude (radians) whose meridional arc from the equator is `arc` metres.
///
/// Approximate series inversion of [`meridian_arc`] in the third
/// flattening; no closed form exists. Used only by the inverse projection.
pub fn foot_point_latitude(ellipsoid: &Ellipsoid, arc: f64) -> f64 {
    let a = ellipsoid.a;
    let n = ellipsoid.n;
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n2 * n2;

    let g = a * (1.0 - n) * (1.0 - n2) * (1.0 + 9.0 * n2 / 4.0 + 225.0 * n4 / 64.0);
    let sigma = arc / g;

    sigma
        + (3.0 * n / 2.0 - 27.0 * n3 / 32.0) * (2.0 * sigma).sin()
        + (21.0 * n2 / 16.0 - 55.0 * n4 / 32.0) * (4.0 * sigma).sin()
        + 151.0 * n3 / 96.0 * (6.0 * sigma).sin()
        + 1097.0 * n4 / 512.0 * (8.0 * sigma).sin()
}
