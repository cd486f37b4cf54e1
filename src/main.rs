//! roms-grid - inspect ROMS grid files from the command line.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use roms_grid::vertical::Surface;
use roms_grid::{geo, BoundingBox, Grid, GridConfig, SchemeRegistry, Subgrid};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "roms-grid")]
#[command(about = "Inspect ROMS grid files and their derived geometry", long_about = None)]
struct Cli {
    /// Enable logging to specified file
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print grid dimensions, window, vertical scheme and resolution
    Info(GridArgs),
    /// Print the lon/lat perimeter of the view or a subgrid
    Boundary {
        #[command(flatten)]
        grid: GridArgs,
        /// Western column of the subgrid
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        imin: isize,
        /// Eastern column of the subgrid (negative counts from the end)
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        imax: isize,
        /// Southern row of the subgrid
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        jmin: isize,
        /// Northern row of the subgrid (negative counts from the end)
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        jmax: isize,
    },
    /// Print depth statistics of every vertical level
    Levels {
        #[command(flatten)]
        grid: GridArgs,
        /// Free-surface elevation (m)
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        zeta: f64,
        /// Use w (interface) levels instead of rho levels
        #[arg(long)]
        w: bool,
    },
    /// Print stations between two points
    Transect {
        /// Start longitude
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        /// Start latitude
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// End longitude
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
        /// End latitude
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Station spacing (km)
        spacing_km: f64,
    },
}

#[derive(Args, Debug)]
struct GridArgs {
    /// Path to the ROMS grid file
    grid: PathBuf,

    /// Directory to search when GRID is not found as given
    #[arg(long)]
    root: Option<PathBuf>,

    /// YAML table of vertical schemes (defaults to the built-in table)
    #[arg(long)]
    schemes: Option<PathBuf>,

    /// Analysis domain
    #[arg(
        long,
        num_args = 4,
        value_names = ["LONMIN", "LONMAX", "LATMIN", "LATMAX"],
        allow_negative_numbers = true
    )]
    bbox: Option<Vec<f64>>,

    /// Disable index padding around the analysis domain
    #[arg(long)]
    no_pad: bool,

    /// Physical domain name
    #[arg(long, default_value = "Regional")]
    domain: String,

    /// Product tag
    #[arg(long, default_value = "ROMS")]
    product: String,
}

impl GridArgs {
    fn open(&self) -> Result<Grid> {
        let registry = match &self.schemes {
            Some(path) => SchemeRegistry::from_file(path)
                .with_context(|| format!("Failed to load scheme table {}", path.display()))?,
            None => SchemeRegistry::builtin().context("Built-in scheme table is invalid")?,
        };

        let mut config = GridConfig::new(&self.grid).with_pad(!self.no_pad);
        config.domain = self.domain.clone();
        config.product = self.product.clone();
        if let Some(root) = &self.root {
            config = config.with_root(root);
        }
        if let Some(b) = &self.bbox {
            if b.len() != 4 {
                bail!("--bbox takes LONMIN LONMAX LATMIN LATMAX");
            }
            config = config.with_bbox(BoundingBox::new(b[0], b[1], b[2], b[3]));
        }

        Grid::open(&config, &registry)
            .with_context(|| format!("Failed to open grid {}", self.grid.display()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging: to the --log file if given, otherwise stderr
    if let Some(log_path) = &cli.log {
        let log_path = log_path.clone();
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || {
                std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&log_path)
                    .expect("Failed to open log file")
            })
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let filter = if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match cli.command {
        Command::Info(args) => info(&args.open()?),
        Command::Boundary {
            grid,
            imin,
            imax,
            jmin,
            jmax,
        } => {
            let grid = grid.open()?;
            let (lon, lat) = grid.boundary(Subgrid::new(imin, imax, jmin, jmax))?;
            for (x, y) in lon.iter().zip(lat.iter()) {
                println!("{:.6} {:.6}", x, y);
            }
            Ok(())
        }
        Command::Levels { grid, zeta, w } => {
            let grid = grid.open()?;
            let surface = Surface::at(zeta);
            let z = if w {
                grid.scoord2z_w(surface)?
            } else {
                grid.scoord2z_r(surface)?
            };
            println!("{:>5} {:>12} {:>12} {:>12}", "level", "min", "mean", "max");
            for (k, level) in z.outer_iter().enumerate() {
                let min = level.iter().copied().fold(f64::INFINITY, f64::min);
                let max = level.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let mean = level.mean().unwrap_or(f64::NAN);
                println!("{:>5} {:>12.3} {:>12.3} {:>12.3}", k, min, mean, max);
            }
            Ok(())
        }
        Command::Transect {
            lon1,
            lat1,
            lon2,
            lat2,
            spacing_km,
        } => {
            if spacing_km <= 0.0 {
                bail!("Station spacing must be positive, got {}", spacing_km);
            }
            let transect = geo::transect(lon1, lat1, lon2, lat2, spacing_km);
            println!("distance_m: {:.1}", transect.distance_m);
            println!("bearing_deg: {:.3}", transect.bearing_deg);
            println!("stations: {}", transect.len());
            for (x, y) in transect.lon.iter().zip(transect.lat.iter()) {
                println!("{:.6} {:.6}", x, y);
            }
            Ok(())
        }
    }
}

fn info(grid: &Grid) -> Result<()> {
    let scheme = grid.scheme();
    let window = grid.window();

    println!("file: {}", grid.path().display());
    if let Ok(title) = grid.title() {
        println!("title: {}", title);
    }
    if let Ok(vct) = grid.vert_coord_type() {
        println!("VertCoordType: {}", vct);
    }
    println!("domain: {} ({})", grid.domain(), grid.product());
    println!("raw shape: {:?}", grid.raw_shape());
    println!("view: {:?}", window.view());
    println!("view_padding: {:?}", window.view_padding());
    println!(
        "scheme: theta_s={} theta_b={} hc={} N={} scoord={}",
        scheme.theta_s, scheme.theta_b, scheme.hc, scheme.n, scheme.scoord
    );
    let obcs: Vec<String> = scheme
        .open_boundaries
        .obcs()
        .iter()
        .map(|(open, side)| format!("{}={}", side, u8::from(*open)))
        .collect();
    println!("open boundaries: {}", obcs.join(" "));
    println!("resolution_deg: {:.6}", grid.resolution(None)?);
    Ok(())
}
