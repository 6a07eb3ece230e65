//! Build per-language `index.json` files from markdown content.

use std::process;

use clap::Parser;

use sitekit::cli::ContentIndexCli;
use sitekit::config::{self, Config};
use sitekit::content_index::ContentIndexer;
use sitekit::error::SiteError;
use sitekit::{logging, print_summary};

fn main() {
    let cli = ContentIndexCli::parse();
    logging::init(cli.common.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &ContentIndexCli) -> Result<(), SiteError> {
    let root = cli.common.resolve_root()?;
    let config_path = config::discover_config_path(cli.common.config.as_deref(), &root);
    let config = Config::load(&config_path).map_err(SiteError::Config)?;

    let content_dir = root.join(cli.content_dir.as_ref().unwrap_or(&config.content.dir));
    tracing::debug!("Content directory: {}", content_dir.display());

    let report = ContentIndexer::new(config.content.langs)
        .dry_run(cli.common.dry_run)
        .build(&content_dir)?;
    print_summary(&report.summary(), cli.common.json)?;

    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(SiteError::Content(format!(
            "{} file(s) failed validation:\n- {}",
            report.failures.len(),
            report.failures.join("\n- ")
        )))
    }
}
