use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ogaget",
    about = "Keep credit files beside game assets and unpack the media they describe.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Key written as a single comma-separated line (repeatable, replaces the default list)
    #[arg(long = "inline-key", value_name = "KEY", global = true)]
    pub inline_keys: Vec<String>,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Print the keys every credit file starts and ends with")]
    Keys,

    #[command(visible_alias = "s", about = "Print a credit file")]
    Show(ShowArgs),

    #[command(visible_alias = "n", about = "Promote provisional keys and rewrite in canonical order")]
    Normalize(NormalizeArgs),

    #[command(visible_aliases = ["l", "ls"], about = "List files in an archive")]
    List(ListArgs),

    #[command(visible_alias = "x", about = "Extract one file from an archive")]
    Extract(ExtractArgs),

    #[command(visible_alias = "u", about = "Extract the media a credit file points at")]
    Unpack(UnpackArgs),
}

#[derive(Debug, clap::Args)]
pub struct ShowArgs {
    /// Path to the credit file
    pub credit: PathBuf,

    /// Output in JSON format
    #[arg(short = 'j', long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct NormalizeArgs {
    /// Credit files, or directories with -r
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Walk directories for .txt credit files
    #[arg(short = 'r', long)]
    pub recursive: bool,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Path to the archive
    pub archive: PathBuf,

    /// Only list files with this extension (repeatable)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Output in JSON format
    #[arg(short = 'j', long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive
    pub archive: PathBuf,

    /// Name of the file inside the archive
    pub entry: String,

    /// Destination file (defaults to the entry's file name in the current directory)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct UnpackArgs {
    /// Path to the credit file
    pub credit: PathBuf,

    /// Path to the downloaded archive
    pub archive: PathBuf,

    /// File inside the archive to use as media
    #[arg(short = 'm', long = "media", value_name = "ENTRY")]
    pub media: Option<String>,

    /// Ignore the `media file` already recorded
    #[arg(long)]
    pub renew: bool,
}
