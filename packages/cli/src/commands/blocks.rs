use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagebuilder_blocks::BlockRegistry;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct BlocksArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,

    /// Include blocks disabled by the project config
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BlockSummary {
    pub key: String,
    pub name: String,
    pub icon: String,
    pub defaults: serde_json::Value,
}

pub fn summarize(registry: &BlockRegistry) -> Vec<BlockSummary> {
    registry
        .iter()
        .map(|(key, descriptor)| BlockSummary {
            key: key.to_string(),
            name: descriptor.name().to_string(),
            icon: descriptor.icon().to_string(),
            defaults: serde_json::to_value(descriptor.default_props()).unwrap_or_default(),
        })
        .collect()
}

pub fn blocks(args: BlocksArgs, cwd: &str) -> Result<()> {
    let registry = if args.all {
        BlockRegistry::get_all()
    } else {
        Config::load(cwd)?.registry()?
    };
    let summaries = summarize(&registry);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for block in &summaries {
        println!(
            "  {} {:<10} {}",
            block.icon,
            block.key.bright_white().bold(),
            block.name
        );
    }
    Ok(())
}
