use super::load_document;
use crate::config::{resolve, Config};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_template::{assemble_with, AssembleOptions, PartialTemplateConfig, TemplateConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Saved document (`[{ id, type, props }]` JSON)
    pub input: PathBuf,

    /// Template JSON layered over the project's template
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Emit only the concatenated block markup
    #[arg(long)]
    pub body_only: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// One head entry per line
    #[arg(long)]
    pub pretty: bool,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let html = render(&args, cwd)?;

    match &args.out {
        Some(out) => {
            let out = resolve(cwd, out);
            fs::write(&out, &html).with_context(|| format!("Cannot write {}", out.display()))?;
            println!("{} Wrote {}", "✓".green(), out.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

/// Exported markup for `args`, without writing it anywhere
pub fn render(args: &ExportArgs, cwd: &str) -> Result<String> {
    let config = Config::load(cwd)?;
    let (document, registry) = load_document(cwd, &args.input, &config)?;
    let body = document.render_body(&registry);
    debug!(blocks = document.len(), "Rendered body");

    if args.body_only {
        return Ok(body);
    }

    let mut template = TemplateConfig::from_partial(&config.template);
    if let Some(path) = &args.template {
        template = template.merged(&load_template(cwd, path)?);
    }

    let options = AssembleOptions {
        pretty: args.pretty,
        ..Default::default()
    };
    Ok(assemble_with(&body, &template, options))
}

fn load_template(cwd: &str, path: &Path) -> Result<PartialTemplateConfig> {
    let path = resolve(cwd, path);
    let json = fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))?;
    PartialTemplateConfig::from_json(&json)
        .with_context(|| format!("Invalid template {}", path.display()))
}
