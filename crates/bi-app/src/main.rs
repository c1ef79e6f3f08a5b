use anyhow::Result;
use clap::Parser;

pub mod batch;
pub mod cli;
pub mod convert;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider la source
    cli.validate_source()?;

    // 4. Charger la config, overrides CLI inclus
    let config = cli.resolve_config()?;
    log::debug!("Config effective : {config:?}");

    // 5a. Traitement par lots
    if let Some(folder) = cli.batch_folder.as_deref() {
        let report = batch::run_batch(folder, cli.batch_out.as_deref(), &config)?;
        if report.failed > 0 {
            log::warn!("{} image(s) en échec", report.failed);
        }
        return Ok(());
    }

    // 5b. Image unique
    if let Some(image) = cli.image.as_deref() {
        let text = convert::convert_file(image, &config)?;
        convert::write_text(&text, cli.output.as_deref())?;
    }
    Ok(())
}
