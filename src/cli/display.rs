use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use colored::*;
use modelcard::card::{CardOutcome, ModelArtifact, ModelSpec, SizeLabel, TemplateReport};
use std::path::Path;

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|l| Cell::new(l).fg(comfy_table::Color::Cyan).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(labels: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .set_header(header(labels))
        .load_preset(comfy_table::presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Prints the configured model specs with their derived size labels.
pub fn display_specs_table(specs: &[ModelSpec]) {
    if specs.is_empty() {
        println!("{}", "No models configured".yellow());
        return;
    }

    let mut table = new_table(&["#", "Model", "Size", "Base model", "Dataset"]);
    for (i, spec) in specs.iter().enumerate() {
        let size = match SizeLabel::derive(&spec.model_name) {
            Ok(label) => Cell::new(label).fg(comfy_table::Color::Blue),
            Err(e) => Cell::new(e.kind()).fg(comfy_table::Color::Red),
        };
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Center),
            Cell::new(&spec.model_name).fg(comfy_table::Color::Green),
            size.set_alignment(CellAlignment::Center),
            Cell::new(&spec.base_model),
            Cell::new(&spec.dataset),
        ]);
    }

    println!("\n{}", table);
    println!("{}", format!("Total models: {}", specs.len()).bright_green());
}

/// Prints one row per generated card and a closing tally.
pub fn display_outcomes(outcomes: &[CardOutcome], dry_run: bool) {
    let mut table = new_table(&["Model", "Status", "Output", "Time"]);
    for outcome in outcomes {
        let (status, detail) = match &outcome.result {
            Ok(path) => (
                Cell::new(if dry_run { "rendered" } else { "written" }).fg(comfy_table::Color::Green),
                Cell::new(path.display()),
            ),
            Err(e) => (
                Cell::new(e.kind()).fg(comfy_table::Color::Red),
                Cell::new(e.to_string()).fg(comfy_table::Color::DarkGrey),
            ),
        };
        table.add_row(vec![
            Cell::new(&outcome.model_name).fg(comfy_table::Color::Yellow),
            status,
            detail,
            Cell::new(format!("{:.1}s", outcome.elapsed.as_secs_f64())).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("\n{}", table);

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    let done = outcomes.len() - failed;
    let summary = format!("{} succeeded, {} failed", done, failed);
    if failed == 0 {
        println!("{}", summary.bright_green());
    } else {
        println!("{}", summary.bright_red());
    }
}

/// Prints the text a provider returned for a model.
pub fn display_artifact(model_name: &str, artifact: &ModelArtifact) {
    println!("{}", format!("== {} architecture ==", model_name).cyan().bold());
    println!("{}", artifact.arch_text);
    println!("{}", format!("== {} configuration ==", model_name).cyan().bold());
    println!("{}", artifact.config_text);
}

pub fn display_template_report(path: &Path, report: &TemplateReport) {
    if report.is_ok() {
        println!("{} {}", "Template OK:".bright_green(), path.display());
        return;
    }
    println!("{} {}", "Template problems in".bright_red(), path.display());
    for placeholder in &report.missing {
        println!("  {} {}", "missing".red(), placeholder);
    }
    for token in &report.unknown {
        println!("  {} {}", "unknown".yellow(), token);
    }
}
