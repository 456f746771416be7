use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tl", about = concat!("[x] tasklist v", env!("CARGO_PKG_VERSION"), " - a small todo list for the terminal"), version)]
pub struct Cli {
    /// Directory holding the saved list (default: <platform data dir>/tasklist)
    #[arg(short = 'C', long = "data-dir", env = "TASKLIST_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <data dir>/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "tasklist=trace"
    #[arg(long = "log-level", env = "TASKLIST_LOG")]
    pub log_level: Option<String>,

    /// Log file (default: <data dir>/tasklist.log)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Keep the list in memory only; nothing is saved
    #[arg(long)]
    pub memory: bool,
}
