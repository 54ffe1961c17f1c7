use std::fs::File;
use std::path::PathBuf;

use atlas::DataSource;
use atlas::core::config::{self, CliOverrides};
use atlas::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "atlas", about = "Browse, search and sort the world's countries")]
struct Args {
    /// Where country data comes from
    #[arg(short, long, value_enum)]
    source: Option<DataSource>,

    /// JSON file for the snapshot source
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// restcountries API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Log level written to atlas.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to atlas.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("atlas.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let cli = CliOverrides {
        source: args.source.map(DataSource::as_str),
        snapshot_path: args.snapshot.as_deref(),
        base_url: args.base_url.as_deref(),
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("Atlas starting up with source: {}", resolved.source);

    tui::run(resolved)
}
