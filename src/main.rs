mod cli;

use discprobe::config;
use discprobe::report::{
    print_with_file, ClipInfoView, MainMovieReport, NalReport, PlaylistView, PlaylistsView,
    SegmentStreams,
};
use discprobe_bdmv::{DiscLayout, MainMovieFinder};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "discprobe=debug,discprobe_bdmv=trace,discprobe_nal=debug".to_string()
        } else {
            "discprobe=info,discprobe_bdmv=warn,discprobe_nal=warn".to_string()
        }
    });

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Nal {
            file,
            length_size,
            json,
        } => scan_nal(&file, length_size, config_path, json),
        Commands::Clip { file, json } => show_clip(&file, json),
        Commands::Playlist {
            file,
            chapters,
            json,
        } => show_playlist(&file, chapters, config_path, json),
        Commands::Playlists { folder, json } => list_playlists(&folder, config_path, json),
        Commands::MainMovie {
            folder,
            streams,
            json,
        } => main_movie(&folder, streams, config_path, json),
        Commands::Validate {
            config: validate_path,
        } => validate_config(validate_path.as_deref().or(config_path)),
        Commands::Version => {
            println!("discprobe {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json_str = serde_json::to_string_pretty(value)?;
    println!("{}", json_str);
    Ok(())
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {:?}", path);
    }
    Ok(())
}

fn scan_nal(
    file: &Path,
    length_size: Option<u8>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    ensure_exists(file)?;

    let framing = config.nal.framing(length_size)?;
    let buffer = std::fs::read(file).with_context(|| format!("Failed to read {:?}", file))?;
    tracing::debug!("Scanning {} bytes of {:?}", buffer.len(), file);

    let report = NalReport::scan(&buffer, framing)?;
    if json {
        print_json(&report)?;
    } else {
        print_with_file(file, &report);
    }

    if let Some(error) = report.error {
        anyhow::bail!("Malformed NAL stream {:?}: {}", file, error);
    }
    Ok(())
}

fn show_clip(file: &Path, json: bool) -> Result<()> {
    ensure_exists(file)?;

    let info = discprobe_bdmv::read_clip_info(file)
        .with_context(|| format!("Failed to parse ClipInfo {:?}", file))?;

    if json {
        print_json(&info)
    } else {
        print_with_file(file, ClipInfoView(&info));
        Ok(())
    }
}

fn show_playlist(
    file: &Path,
    chapters: bool,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    ensure_exists(file)?;

    let playlist = if chapters {
        discprobe_bdmv::read_chapters(file)
    } else {
        discprobe_bdmv::read_playlist_with_limit(file, config.selection.max_playlist_items)
    }
    .with_context(|| format!("Failed to parse playlist {:?}", file))?;

    if json {
        print_json(&playlist)
    } else {
        print_with_file(
            file,
            PlaylistView {
                playlist: &playlist,
                chapters,
            },
        );
        Ok(())
    }
}

fn list_playlists(folder: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let finder = MainMovieFinder::new(config.selection.options());
    let summaries = finder
        .scan(folder)
        .with_context(|| format!("Failed to scan playlists in {:?}", folder))?;

    if json {
        print_json(&summaries)
    } else {
        print!("{}", PlaylistsView(&summaries));
        Ok(())
    }
}

fn main_movie(folder: &Path, streams: bool, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    tracing::info!("Looking for the main movie in {:?}", folder);
    let finder = MainMovieFinder::new(config.selection.options());
    let movie = finder.find(folder)?;

    let streams = if streams {
        let layout = DiscLayout::from_folder(folder);
        Some(SegmentStreams::collect(&layout, &movie))
    } else {
        None
    };
    let report = MainMovieReport { movie, streams };

    if json {
        print_json(&report)
    } else {
        print!("{}", report);
        Ok(())
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!(
        "  Max playlist items: {}",
        config.selection.max_playlist_items
    );
    println!("  Tie break: {:?}", config.selection.tie_break);
    match config.nal.length_size {
        Some(size) => println!("  NAL framing: length-prefixed ({} bytes)", size),
        None => println!("  NAL framing: Annex-B"),
    }

    Ok(())
}
