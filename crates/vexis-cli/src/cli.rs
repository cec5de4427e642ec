use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vexis",
    about = "Vexis: a minimal local version-control engine",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Repository root (the directory holding .vexis)
    #[arg(long, global = true, env = "VEXIS_REPO", default_value = ".")]
    pub repo: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a new Vexis repository
    Init,
    /// Stage files for the next commit
    Add(AddArgs),
    /// Record the staged files as a new commit
    Commit(CommitArgs),
    /// Show commit history from HEAD
    Log(LogArgs),
    /// Show a commit's files and their diff against the parent
    Show(ShowArgs),
    /// Print the raw bytes of a stored object
    CatFile(CatFileArgs),
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CommitArgs {
    #[arg(short, long)]
    pub message: String,
}

#[derive(Args)]
pub struct LogArgs {
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub oneline: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Commit digest, or HEAD
    pub commit: String,
}

#[derive(Args)]
pub struct CatFileArgs {
    pub object: String,
}
