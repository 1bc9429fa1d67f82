use super::load_document;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_blocks::BlockRegistry;
use pagebuilder_editor::{BlockId, Document};
use pagebuilder_template::{validate, TemplateConfig, TemplateViolation};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Saved document (`[{ id, type, props }]` JSON)
    pub input: PathBuf,

    /// Exit with an error when anything is reported
    #[arg(long)]
    pub strict: bool,
}

/// A block whose properties fail its type's validation
#[derive(Debug, Clone, PartialEq)]
pub struct BlockIssue {
    pub position: usize,
    pub id: BlockId,
    pub block_type: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub blocks_checked: usize,
    pub block_issues: Vec<BlockIssue>,
    pub template: Option<TemplateViolation>,
}

impl CheckReport {
    pub fn issue_count(&self) -> usize {
        self.block_issues.len() + usize::from(self.template.is_some())
    }
}

pub fn inspect(document: &Document, registry: &BlockRegistry, template: &TemplateConfig) -> CheckReport {
    let block_issues = document
        .blocks()
        .iter()
        .enumerate()
        .filter_map(|(position, block)| {
            let message = registry.get(&block.block_type)?.validate(&block.props)?;
            Some(BlockIssue {
                position,
                id: block.id,
                block_type: block.block_type.clone(),
                message,
            })
        })
        .collect();

    CheckReport {
        blocks_checked: document.len(),
        block_issues,
        template: validate(template).err(),
    }
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (document, registry) = load_document(cwd, &args.input, &config)?;
    let template = TemplateConfig::from_partial(&config.template);

    println!("🔍 {} {}", "Checking".green().bold(), args.input.display());
    println!();

    let report = inspect(&document, &registry, &template);

    for issue in &report.block_issues {
        println!(
            "  {} #{} {} ({}): {}",
            "⚠".yellow(),
            issue.position + 1,
            issue.block_type.bright_white(),
            issue.id,
            issue.message
        );
    }
    if let Some(violation) = &report.template {
        println!("  {} template: {}", "⚠".yellow(), violation);
    }

    println!();
    println!("   Blocks checked: {}", report.blocks_checked);
    if report.issue_count() == 0 {
        println!("   {} No issues found!", "✓".green());
        return Ok(());
    }
    println!("   {} {}", "Warnings:".yellow(), report.issue_count());

    if args.strict {
        return Err(anyhow!("{} issue(s) found", report.issue_count()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebuilder_template::PartialTemplateConfig;

    fn document(json: &str) -> (Document, BlockRegistry) {
        let registry = BlockRegistry::get_all();
        (Document::from_json(json, &registry).unwrap(), registry)
    }

    #[test]
    fn test_reports_invalid_blocks_in_order() {
        let (doc, registry) = document(
            r#"[
                { "type": "paragraph", "props": { "text": "ok" } },
                { "type": "image", "props": { "src": "not a url" } },
                { "type": "heading", "props": { "level": 9 } }
            ]"#,
        );
        let report = inspect(&doc, &registry, &TemplateConfig::default());

        assert_eq!(report.blocks_checked, 3);
        let positions: Vec<_> = report.block_issues.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(report.block_issues[0].block_type, "image");
        assert!(report.template.is_none());
    }

    #[test]
    fn test_reports_template_advisory() {
        let (doc, registry) = document("[]");
        let partial: PartialTemplateConfig =
            serde_json::from_str(r#"{ "doctype": "<html>" }"#).unwrap();
        let report = inspect(&doc, &registry, &TemplateConfig::from_partial(&partial));

        assert!(matches!(
            report.template,
            Some(TemplateViolation::InvalidDoctype(_))
        ));
        assert_eq!(report.issue_count(), 1);
    }

    #[test]
    fn test_strict_fails_on_issues() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("page.json"),
            r#"[{ "type": "list", "props": { "items": [] } }]"#,
        )
        .unwrap();
        let cwd = dir.path().display().to_string();

        let lenient = CheckArgs {
            input: PathBuf::from("page.json"),
            strict: false,
        };
        assert!(check(lenient, &cwd).is_ok());

        let strict = CheckArgs {
            input: PathBuf::from("page.json"),
            strict: true,
        };
        assert!(check(strict, &cwd).is_err());
    }
}
