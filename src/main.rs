//! Driver for the property-backed location provider
//!
//! Usage: `propgps [PROPERTIES_FILE] [RUN_SECONDS]`
//!
//! Opens the location module, reads `gps.latitude` / `gps.longitude` from
//! the properties file (default `gps.prop`) and prints every fix to stdout
//! for `RUN_SECONDS` (default 5). Edit the file while it runs to move the
//! simulated position. Set `PROPGPS_CONFIG` to a JSON configuration file to
//! change keys, cadence or output format; `RUST_LOG` controls logging on
//! stderr.

use propgps::{FilePropertySource, FixFormatter, LocationCallbacks, ProviderConfig, MODULE_INFO};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_PROPERTY_FILE: &str = "gps.prop";
const DEFAULT_RUN_SECONDS: u64 = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only fixes
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let mut config = match env::var("PROPGPS_CONFIG") {
        Ok(path) => ProviderConfig::from_file(path)?,
        Err(_) => ProviderConfig::default(),
    };

    let mut args = env::args().skip(1);
    if let Some(path) = args.next() {
        config.property_file = Some(PathBuf::from(path));
    }
    let run_seconds = match args.next() {
        Some(value) => value.parse::<u64>()?,
        None => DEFAULT_RUN_SECONDS,
    };
    let property_file = config
        .property_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROPERTY_FILE));

    info!(
        module = %MODULE_INFO,
        property_file = %property_file.display(),
        poll_interval_ms = config.poll_interval_ms,
        run_seconds,
        "starting location provider"
    );

    let formatter = FixFormatter::new(config.output_format);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let source = Arc::new(FilePropertySource::new(&property_file));
    let mut device = MODULE_INFO.open(MODULE_INFO.id, source, config)?;
    let gps = device.location_interface();

    gps.init(LocationCallbacks::new(move |fix| match formatter.format(fix) {
        Ok(line) => println!("{}", line),
        Err(e) => warn!(error = %e, "failed to format fix"),
    }))?;
    gps.start()?;
    thread::sleep(Duration::from_secs(run_seconds));
    gps.stop()?;
    gps.cleanup()?;

    info!("location provider stopped");
    Ok(())
}
