mod cli;
mod git;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{CheckArgs, Cli, Commands, DiffArgs};
use revguide_config::{find_config_file, Loader, RuleSet};
use revguide_diff::parse_file_diff;
use revguide_matcher::Resolver;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check(ref args) => {
            let rules = load_rules(cli.config.as_deref())?;
            check(rules, args)
        }
        Commands::Diff(ref args) => {
            let rules = load_rules(cli.config.as_deref())?;
            diff(rules, args)
        }
        Commands::Validate(ref args) => {
            validate(args.path.as_deref().or(cli.config.as_deref()))
        }
    }
}

/// Load the rule set from an explicit path, a discovered config file, or
/// the built-in defaults.
fn load_rules(explicit: Option<&Path>) -> Result<RuleSet> {
    let loader = Loader::new();

    if let Some(path) = explicit {
        return loader
            .load_file(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    match find_config_file(Path::new(".")) {
        Some(found) => loader
            .load_file(&found)
            .with_context(|| format!("failed to load config {}", found.display())),
        None => {
            log::debug!("no config file found, using defaults");
            Ok(RuleSet::default())
        }
    }
}

fn check(rules: RuleSet, args: &CheckArgs) -> Result<()> {
    let rule_count = rules.rules.len();
    let mut resolver = Resolver::new(rules);

    println!("Testing file: {}", args.file);
    println!("Configuration: {rule_count} rules defined");
    println!();

    let guides = resolver.guides(&args.file)?;
    println!("Should review: {}", !guides.is_empty());
    if guides.is_empty() {
        println!("No rules matched this file.");
        return Ok(());
    }

    println!();
    println!("Full review guides: {}", guides.join(", "));

    let diff_guides = resolver.diff_guides(&args.file)?;
    println!("Diff review guides: {}", diff_guides.join(", "));

    if args.verbose {
        println!();
        for guide in resolver.load_guides(&guides) {
            println!("Resolved guide {} ({} bytes)", guide.name, guide.content.len());
        }
    }

    Ok(())
}

fn diff(rules: RuleSet, args: &DiffArgs) -> Result<()> {
    let (base, head) = git::parse_range(args.range.as_deref().unwrap_or(""));
    let mut resolver = Resolver::new(rules);

    let files = match &args.file {
        Some(file) => vec![file.clone()],
        None => git::changed_files(&base, &head)
            .with_context(|| format!("failed to list changes in {base}..{head}"))?,
    };

    let mut reviewed = 0;
    for file in &files {
        let guides = resolver.diff_guides(file)?;
        if guides.is_empty() {
            log::debug!("skipping {file}: no rules matched");
            continue;
        }

        let raw = git::file_diff(&base, &head, file)
            .with_context(|| format!("failed to get diff for {file}"))?;
        let parsed = parse_file_diff(&raw, file)
            .with_context(|| format!("failed to parse diff for {file}"))?;
        if parsed.hunks.is_empty() {
            continue;
        }

        reviewed += 1;
        println!("Guides: {}", guides.join(", "));
        println!("{}", parsed.review_text());
    }

    if reviewed == 0 {
        println!("No reviewable changes in {base}..{head}.");
    }

    Ok(())
}

fn validate(explicit: Option<&Path>) -> Result<()> {
    let loader = Loader::new();

    let (rules, source) = match explicit {
        Some(path) => {
            println!("Validating config file: {}", path.display());
            (loader.load_file(path)?, path.display().to_string())
        }
        None => match find_config_file(Path::new(".")) {
            Some(found) => {
                println!("Validating config file: {}", found.display());
                let rules = loader.load_file(&found)?;
                (rules, found.display().to_string())
            }
            None => {
                println!("No config file found, using defaults");
                (RuleSet::default(), "built-in defaults".to_string())
            }
        },
    };

    println!("Configuration is valid: {source}");
    println!("  - Content strategy: {}", rules.content_defaults.strategy.as_str());
    println!("  - Default lines: {}", rules.content_defaults.lines);
    println!("  - Rules defined: {}", rules.rules.len());

    Ok(())
}
