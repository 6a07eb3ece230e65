//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::{Args, Parser};

/// Options shared by all tools.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Site root (defaults to the current directory).
    #[arg(long, env = "SITEKIT_ROOT")]
    pub root: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report what would change without writing files.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Resolve the site root: `--root`, then `SITEKIT_ROOT`, then the
    /// current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable.
    pub fn resolve_root(&self) -> Result<PathBuf, std::io::Error> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir(),
        }
    }
}

/// Synthesize labelled JPEG placeholders for missing site images.
#[derive(Parser, Debug)]
#[command(name = "generate-placeholders", version, about)]
pub struct PlaceholdersCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// JPEG quality (1-100), overriding the config file.
    #[arg(short, long)]
    pub quality: Option<u8>,
}

/// Rewrite relative asset paths in HTML files to match their depth.
#[derive(Parser, Debug)]
#[command(name = "normalize-html-paths", version, about)]
pub struct NormalizeCli {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Build `index.json` files from the site's markdown content.
#[derive(Parser, Debug)]
#[command(name = "generate-content-indexes", version, about)]
pub struct ContentIndexCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Content directory, overriding the config file.
    #[arg(long)]
    pub content_dir: Option<PathBuf>,
}
