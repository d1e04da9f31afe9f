use clap::Parser;
use geomag::field::position::{CoordinateKind, Position};
use geomag::flux::{FluxUnit, GeoMagFlux, MagneticComponents};
use geomag::igrf::Igrf;
use geomag::utils::time::parse_epoch;
use std::path::PathBuf;
use tracing::{info, Level};

pub type BinResult<T, E = Box<dyn std::error::Error + Send + Sync>> = Result<T, E>;

fn main() {
    if let Err(e) = bin_main() {
        eprintln!("error: {e}");
        if let Some(e) = e.source() {
            eprintln!("error: {e}")
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Epoch as ISO-8601 (e.g. 2020-01-01T00:00:00Z) or decimal year
    #[arg()]
    date: String,

    /// Latitude in degrees, north positive
    #[arg(allow_negative_numbers = true)]
    latitude: f64,

    /// Longitude in degrees, east positive
    #[arg(allow_negative_numbers = true)]
    longitude: f64,

    /// Altitude above the ellipsoid in km, or radius in km for geocentric positions
    #[arg(allow_negative_numbers = true)]
    altitude: f64,

    /// Output unit: nT, uT, T, G, si, mks, mksa or cgs
    #[arg(short, long, default_value = "nT")]
    unit: FluxUnit,

    /// Coordinate frame of the position: geodetic (wgs84) or geocentric (spherical)
    #[arg(short, long, default_value = "geodetic")]
    frame: CoordinateKind,

    /// Coefficient file in the NOAA layout, replacing the bundled IGRF-13 table
    #[arg(short, long)]
    coefficients: Option<PathBuf>,

    /// Log debugging information to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn bin_main() -> BinResult<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let epoch = parse_epoch(&args.date)?;
    let igrf = match &args.coefficients {
        Some(path) => {
            info!(path = %path.display(), "loading coefficients");
            Igrf::from_file(path)?
        }
        None => Igrf::new()?,
    };
    let flux = GeoMagFlux::new(igrf, args.unit);
    let position = Position::new(args.frame, args.altitude, args.longitude, args.latitude);

    let ned = flux.field(epoch, &position)?;
    let components = MagneticComponents::from(ned);
    let unit = flux.unit();

    println!("epoch        {epoch:.4}");
    println!("position     {position}");
    println!("north (X)    {:.6e} {unit}", components.north);
    println!("east (Y)     {:.6e} {unit}", components.east);
    println!("down (Z)     {:.6e} {unit}", components.down);
    println!("horizontal   {:.6e} {unit}", components.horizontal);
    println!("total (F)    {:.6e} {unit}", components.total);
    println!("inclination  {:.4}°", components.inclination);
    println!("declination  {:.4}°", components.declination);

    Ok(())
}
