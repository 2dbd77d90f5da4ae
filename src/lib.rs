//! Conversions between NZTM2000 grid coordinates and NZGD2000
//! latitude/longitude, using Redfearn's Transverse Mercator formulation on
//! the GRS80 ellipsoid.
//!
//! The high-level entry points work in decimal degrees and metres and
//! round their outputs (6 decimal places for degrees, whole metres for
//! grid coordinates):
//!
//! ```
//! let geo = nztm::nztm_to_geodetic(1_783_295.0, 5_868_193.0)?;
//! assert!((geo.latitude - -37.314852).abs() < 1e-6);
//! assert!((geo.longitude - 175.068489).abs() < 1e-6);
//!
//! let grid = nztm::geodetic_to_nztm(geo.latitude, geo.longitude)?;
//! assert!((grid.easting - 1_783_295.0).abs() <= 1.0);
//! # Ok::<(), nztm::ProjError>(())
//! ```
//!
//! The projection engine itself ([`proj::transverse_mercator`]) works in
//! radians and is exposed for callers that need unrounded coordinates or a
//! different Transverse Mercator parameterization.

pub mod error;
pub mod nztm;
pub mod proj;

pub use error::ProjError;
pub use nztm::{geodetic_to_nztm, nztm, nztm_to_geodetic, GeodeticResult, GridResult};
pub use proj::Projection;
