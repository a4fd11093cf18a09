mod backup;
mod batch;
mod config;
mod decoder;
mod error;
mod finder;
mod logging;
mod model;
mod sources;
mod writer;
mod xdg;

use anyhow::{Result, anyhow};
use clap::Parser;
use std::env;
use std::path::PathBuf;

use crate::batch::Converter;
use crate::config::{home_dir, load_config};
use crate::decoder::{INSTALL_HINT, LnkInfo};
use crate::logging::{LogFacade, LogSink};

/// Convert Windows shortcuts (*.url, *.lnk) into freedesktop *.desktop links.
///
/// Converted originals are moved into a backup folder in the home directory.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Folder to scan for shortcuts (default: current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Do not process the Desktop folder
    #[arg(short = 'd', long)]
    skip_desktop: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config()?;
    let home = home_dir().ok_or_else(|| anyhow!("cannot determine the home directory"))?;

    let log_path = config.log_path();
    logging::init(&log_path)?;
    let sink = LogFacade;
    sink.info("converting Windows shortcuts to desktop entries");

    let mut folders = Vec::new();
    if !args.skip_desktop {
        if let Some(desktop) = xdg::desktop_folder(&home, &sink) {
            folders.push(desktop);
        }
    }
    match args.path {
        Some(path) => folders.push(path),
        None => folders.push(env::current_dir()?),
    }

    let decoder = LnkInfo::new(&config.decoder);
    let converter = Converter::new(
        &config,
        &decoder,
        config.search_root(&home),
        config.backup_dir(&home),
        &sink,
    );
    let report = converter.run(&folders);

    sink.info(&format!("{} shortcut(s) converted", report.total()));
    if report.decoder_missing {
        eprintln!("{}", INSTALL_HINT);
    }
    print!("{}", report);
    println!("Details in {:?}", log_path);

    Ok(())
}
