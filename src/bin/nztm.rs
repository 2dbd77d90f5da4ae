//! Conversion and self-check CLI for the NZTM library.
//!
//! `nztm check` (the default) runs the built-in reference conversions end
//! to end and reports the round-trip differences, mirroring the validation
//! harness the projection was originally checked against.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use nztm::{geodetic_to_nztm, nztm, nztm_to_geodetic};

/// Reference conversions validated against the LINZ C implementation.
const CHECK_POINTS: [(f64, f64); 2] = [(1_783_295.0, 5_868_193.0), (1_375_175.0, 5_086_098.0)];

#[derive(Parser)]
#[command(name = "nztm")]
#[command(version)]
#[command(about = "Convert between NZTM2000 grid coordinates and NZGD2000 latitude/longitude")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an NZTM easting/northing (metres) to latitude/longitude (degrees)
    ToGeodetic { easting: f64, northing: f64 },

    /// Convert a latitude/longitude (degrees) to NZTM easting/northing (metres)
    #[command(allow_negative_numbers = true)]
    ToGrid { latitude: f64, longitude: f64 },

    /// Run the built-in reference conversions and report round-trip differences
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Check) {
        Commands::ToGeodetic { easting, northing } => {
            let geo = nztm_to_geodetic(easting, northing)?;
            warn_if_outside_design_region(geo.longitude);
            println!("Input NZTM e,n:  {easting:.3} {northing:.3}");
            println!("Lat/Long:        {:.6} {:.6}", geo.latitude, geo.longitude);
        }
        Commands::ToGrid {
            latitude,
            longitude,
        } => {
            warn_if_outside_design_region(longitude);
            let grid = geodetic_to_nztm(latitude, longitude)?;
            println!("Input Lat/Long:  {latitude:.6} {longitude:.6}");
            println!("NZTM e,n:        {:.0} {:.0}", grid.easting, grid.northing);
        }
        Commands::Check => check()?,
    }

    Ok(())
}

fn check() -> Result<()> {
    let mut failures = 0;
    for (easting, northing) in CHECK_POINTS {
        let geo = nztm_to_geodetic(easting, northing)?;
        let grid = geodetic_to_nztm(geo.latitude, geo.longitude)?;
        let de = grid.easting - easting;
        let dn = grid.northing - northing;

        println!("Input NZTM e,n:   {easting:.3} {northing:.3}");
        println!("Output Lat/Long:  {:.6} {:.6}", geo.latitude, geo.longitude);
        println!("Output NZTM e,n:  {:.3} {:.3}", grid.easting, grid.northing);
        println!("Difference:       {de:.3} {dn:.3}");

        if de.abs() > 1.0 || dn.abs() > 1.0 {
            println!("FAILED");
            failures += 1;
        } else {
            println!("ok");
        }
    }
    if failures > 0 {
        bail!("{failures} reference conversion(s) drifted beyond 1 metre");
    }
    Ok(())
}

fn warn_if_outside_design_region(longitude_deg: f64) {
    if !nztm().in_design_region(longitude_deg.to_radians()) {
        eprintln!(
            "warning: longitude {longitude_deg:.6} is far from the NZTM central meridian; \
             the series truncation degrades accuracy out here"
        );
    }
}
