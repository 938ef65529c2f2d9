use nu_ansi_term::Color::{Blue, Cyan, Green, Red};
use tabled::{
    builder::Builder,
    settings::{themes::BorderCorrection, Panel, Style},
};
use tracing::info;
use tributary_core::AGGREGATE_SOURCE_NAME;

use crate::{context::CliContext, error::CliResult, utils::Colored};

pub fn list_sources(ctx: &CliContext) -> CliResult<()> {
    let config = ctx.config();
    let primary = config.primary_source().map(|source| source.name.as_str());

    let mut builder = Builder::new();
    builder.push_record(["Name", "Location", "Enabled"].map(String::from));

    for source in &config.sources {
        info!(
            name = source.name,
            url = source.url,
            enabled = source.is_enabled(),
            primary = primary == Some(source.name.as_str()),
            "source"
        );

        let name = if primary == Some(source.name.as_str()) {
            format!("{} (primary)", Colored(Blue, &source.name))
        } else {
            format!("{}", Colored(Blue, &source.name))
        };
        let enabled = if source.is_enabled() {
            format!("{}", Colored(Green, "yes"))
        } else {
            format!("{}", Colored(Red, "no"))
        };
        builder.push_record([name, format!("{}", Colored(Cyan, &source.url)), enabled]);
    }

    let enabled = config.enabled_sources().count();
    let table = builder
        .build()
        .with(Panel::header(format!(
            "{} configured, {} enabled",
            config.sources.len(),
            enabled
        )))
        .with(Style::rounded())
        .with(BorderCorrection {})
        .to_string();

    info!("\n{table}");

    if enabled > 1 {
        info!(
            "Use `--source {}` to browse every enabled source at once",
            AGGREGATE_SOURCE_NAME
        );
    }

    Ok(())
}
