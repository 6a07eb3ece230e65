//! Render labelled placeholder JPEGs for site images that do not exist yet.

use std::process;

use clap::Parser;

use sitekit::catalog::catalog;
use sitekit::cli::PlaceholdersCli;
use sitekit::config::{self, validate_quality, Config};
use sitekit::error::SiteError;
use sitekit::fonts::FontSource;
use sitekit::generator::PlaceholderGenerator;
use sitekit::output::JpegSettings;
use sitekit::{logging, print_summary};

fn main() {
    let cli = PlaceholdersCli::parse();
    logging::init(cli.common.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &PlaceholdersCli) -> Result<(), SiteError> {
    let root = cli.common.resolve_root()?;
    let config_path = config::discover_config_path(cli.common.config.as_deref(), &root);
    let config = Config::load(&config_path).map_err(SiteError::Config)?;

    let quality = cli.quality.unwrap_or(config.placeholders.quality);
    validate_quality(quality).map_err(SiteError::InvalidArgument)?;

    tracing::debug!("Site root: {}", root.display());
    let fonts = FontSource::with_defaults(&config.font_candidates());
    let generator = PlaceholderGenerator::new(fonts, JpegSettings::with_quality(quality))
        .dry_run(cli.common.dry_run);
    if generator.uses_builtin_font() {
        tracing::info!("Labels use the built-in bitmap font; set SITEKIT_FONT for an outline font");
    }

    let summary = generator.generate(&catalog(&root))?;
    print_summary(&summary, cli.common.json)?;
    Ok(())
}
