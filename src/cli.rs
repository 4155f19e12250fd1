use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tracenav")]
#[command(about = "Step through call traces recorded in structured logs", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (overrides TRACENAV_CONFIG_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a trace log
    Summary {
        /// Log file, or `-` for stdin
        file: PathBuf,
    },

    /// Show the view at one entry
    Show {
        /// Log file, or `-` for stdin
        file: PathBuf,

        /// Entry number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        entry: usize,

        /// Stack depth to focus (0 is outermost) [default: innermost]
        #[arg(short, long)]
        zoom: Option<usize>,
    },

    /// Navigate interactively, reading commands from stdin
    ///
    /// Commands, one per line:
    ///   s, step      next entry        b, back   previous entry
    ///   n, next      next line at zoom p, prev   previous line at zoom
    ///   u, up        zoom out          d, down   zoom in
    ///   g, goto N    jump to entry N   z, zoom N focus depth N
    ///   q, quit
    #[command(verbatim_doc_comment)]
    Step {
        /// Log file
        file: PathBuf,

        /// Entry number to start at, starting at 1
        #[arg(short, long, default_value_t = 1)]
        entry: usize,
    },

    /// Print the parsed trace as JSON
    Dump {
        /// Log file, or `-` for stdin
        file: PathBuf,
    },
}
