use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "discprobe")]
#[command(author, version, about = "Blu-ray playlist and H.264 stream inspection tool")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the NAL units of a raw H.264 elementary stream
    Nal {
        /// Elementary stream file
        #[arg(required = true)]
        file: PathBuf,

        /// Size of each unit's length prefix (1-4); Annex-B start codes if omitted
        #[arg(short, long)]
        length_size: Option<u8>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the streams listed in a ClipInfo (.clpi) file
    Clip {
        /// ClipInfo file
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the play items of a playlist (.mpls) file
    Playlist {
        /// Playlist file
        #[arg(required = true)]
        file: PathBuf,

        /// Read every play item and list chapter marks
        #[arg(long)]
        chapters: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every playlist of a disc with its duration
    Playlists {
        /// Disc root, BDMV folder or PLAYLIST folder
        #[arg(required = true)]
        folder: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the playlist holding the main movie
    MainMovie {
        /// Disc root, BDMV folder or PLAYLIST folder
        #[arg(required = true)]
        folder: PathBuf,

        /// Also list the streams of each segment
        #[arg(long)]
        streams: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
