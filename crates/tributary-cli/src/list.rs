use nu_ansi_term::Color::{Blue, Cyan, LightRed};
use tracing::{debug, info};

use crate::{context::CliContext, error::CliResult, utils::Colored};

pub fn list_packages(ctx: &CliContext, source: Option<String>) -> CliResult<()> {
    let repo = ctx.open_primary(source.as_deref())?;
    debug!(source = repo.source(), "listing packages");

    let packages = repo.packages()?;

    for package in &packages {
        info!(
            id = package.id,
            version = package.version,
            description = package.description,
            "{}@{}{}",
            Colored(Blue, &package.id),
            Colored(LightRed, &package.version),
            package
                .description
                .as_ref()
                .map(|desc| format!(" - {desc}"))
                .unwrap_or_default()
        );
    }

    info!(
        "{} packages in {}",
        Colored(Cyan, packages.len()),
        Colored(Cyan, repo.source())
    );

    Ok(())
}
