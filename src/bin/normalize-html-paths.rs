//! Rewrite relative asset paths in the site's HTML files to match their depth.

use std::process;

use clap::Parser;

use sitekit::cli::NormalizeCli;
use sitekit::config::{self, Config};
use sitekit::error::SiteError;
use sitekit::normalize::HtmlNormalizer;
use sitekit::{logging, print_summary};

fn main() {
    let cli = NormalizeCli::parse();
    logging::init(cli.common.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &NormalizeCli) -> Result<(), SiteError> {
    let root = cli.common.resolve_root()?;
    let config_path = config::discover_config_path(cli.common.config.as_deref(), &root);
    let config = Config::load(&config_path).map_err(SiteError::Config)?;

    tracing::debug!("Site root: {}", root.display());
    let summary = HtmlNormalizer::new(config.normalize.extra_exclude)
        .dry_run(cli.common.dry_run)
        .normalize(&root)?;
    print_summary(&summary, cli.common.json)?;
    Ok(())
}
