use nu_ansi_term::Color::{Blue, Cyan, Green, LightRed, Yellow};
use tabled::{
    builder::Builder,
    settings::{themes::BorderCorrection, Panel, Style},
};
use tracing::{debug, info, warn};
use tributary_core::{collect_dependency_candidates, Package};

use crate::{
    context::CliContext,
    error::{CliError, CliResult},
    utils::Colored,
};

fn format_candidates(candidates: &[Package]) -> String {
    if candidates.is_empty() {
        return format!("{}", Colored(Yellow, "none"));
    }
    candidates
        .iter()
        .map(|pkg| format!("{}", Colored(LightRed, &pkg.version)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn show_dependencies(
    ctx: &CliContext,
    id: String,
    source: Option<String>,
    no_fallback: bool,
) -> CliResult<()> {
    let use_fallback = !no_fallback && ctx.config().use_fallback();
    let primary = ctx.open_primary(source.as_deref())?;
    let repo = ctx.compose(primary, use_fallback)?;

    debug!(
        id = id,
        source = repo.source(),
        use_fallback = use_fallback,
        "collecting dependencies"
    );

    let closure = collect_dependency_candidates(repo.as_ref(), &id)?;
    if closure.roots.is_empty() {
        return Err(CliError::PackageNotFound(id));
    }

    for root in &closure.roots {
        info!(
            id = root.id,
            version = root.version,
            "{}@{}",
            Colored(Blue, &root.id),
            Colored(LightRed, &root.version)
        );
    }

    if closure.dependencies.is_empty() {
        info!("{} has no dependencies", Colored(Blue, &id));
        return Ok(());
    }

    let mut builder = Builder::new();
    builder.push_record(["Dependency", "Required by", "Candidates"].map(String::from));

    for entry in &closure.dependencies {
        debug!(
            id = entry.id,
            required_by = ?entry.required_by,
            candidates = entry.candidates.len(),
            "dependency"
        );
        builder.push_record([
            format!("{}", Colored(Cyan, &entry.id)),
            entry.required_by.join(", "),
            format_candidates(&entry.candidates),
        ]);
    }

    let header = format!(
        "{} dependencies, {} resolvable",
        closure.dependencies.len(),
        closure.dependencies.len() - closure.missing.len()
    );
    let table = builder
        .build()
        .with(Panel::header(header))
        .with(Style::rounded())
        .with(BorderCorrection {})
        .to_string();

    info!("\n{table}");

    if closure.is_complete() {
        info!("{}", Colored(Green, "All dependencies have candidates"));
    } else {
        warn!("No candidates found for: {}", closure.missing.join(", "));
        if no_fallback {
            info!("Drop --no-fallback to search every enabled source");
        }
    }

    Ok(())
}
