// Declare the display submodule
mod display;

use std::fs;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use modelcard::artifact::{ArtifactProvider, GgufProvider, HubProvider};
use modelcard::card::{check_template, CardGenerator};
use modelcard::config::{ProviderKind, Settings};

use display::{display_artifact, display_outcomes, display_specs_table, display_template_report};

/// Generate model cards for published language models
#[derive(Parser, Debug)]
#[command(name = "modelcard", version, about)]
pub struct Cli {
    /// Directory holding default.toml and local.toml
    #[arg(long, global = true, default_value = "config")]
    pub config_dir: PathBuf,

    /// Override the configured artifact provider
    #[arg(long, global = true, value_enum)]
    pub provider: Option<ProviderKind>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render and write cards for the configured models
    Generate {
        /// Only generate these models (repeatable)
        #[arg(long = "only", value_name = "MODEL_NAME")]
        only: Vec<String>,
        /// Render and validate without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List the configured models
    List,
    /// Print the architecture and configuration text of a model
    Inspect {
        model_name: String,
    },
    /// Check the template for missing or unknown placeholders
    CheckTemplate,
}

fn build_provider(settings: &Settings, kind: ProviderKind) -> Result<Box<dyn ArtifactProvider>> {
    Ok(match kind {
        ProviderKind::Hub => Box::new(
            HubProvider::new(settings.hub.clone()).context("Failed to build hub client")?,
        ),
        ProviderKind::Gguf => Box::new(GgufProvider::new(settings.gguf.directory.clone())),
    })
}

/// Runs the selected command. Returns `false` when any card failed to generate.
pub fn run(cli: Cli, settings: &Settings) -> Result<bool> {
    let kind = cli.provider.unwrap_or(settings.provider.kind);

    match cli.command {
        Command::Generate { only, dry_run } => {
            let specs = match settings.selected_models(&only) {
                Ok(specs) => specs,
                Err(unknown) => bail!("Unknown model(s): {}", unknown.join(", ")),
            };
            if specs.is_empty() {
                bail!("No models configured; add [[models]] entries to the configuration");
            }

            let provider = build_provider(settings, kind)?;
            let generator = CardGenerator::new(
                &settings.template.path,
                &settings.output.directory,
                &*provider,
            );

            info!("Generating {} card(s) with the {} provider", specs.len(), provider.name());
            let outcomes = generator.generate_all(&specs, dry_run);
            display_outcomes(&outcomes, dry_run);
            Ok(outcomes.iter().all(|o| o.is_ok()))
        }
        Command::List => {
            display_specs_table(&settings.models);
            Ok(true)
        }
        Command::Inspect { model_name } => {
            let provider = build_provider(settings, kind)?;
            let artifact = provider.load(&model_name)?;
            display_artifact(&model_name, &artifact);
            Ok(true)
        }
        Command::CheckTemplate => {
            let path = &settings.template.path;
            let template = fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?;
            let report = check_template(&template);
            display_template_report(path, &report);
            Ok(report.is_ok())
        }
    }
}
