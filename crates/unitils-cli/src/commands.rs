use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;
use unitils_assert::UnitilsConfig;
use unitils_compare::{ComparatorModes, ReflectionComparator};

use crate::cli::*;

pub const EXIT_DIFFERENT: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Equal,
    Different,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Equal => ExitCode::SUCCESS,
            Outcome::Different => ExitCode::from(EXIT_DIFFERENT),
        }
    }
}

/// Result of comparing two documents.
#[derive(Debug, Serialize)]
pub struct Comparison {
    pub equal: bool,
    pub modes: ComparatorModes,
    pub report: Option<String>,
}

pub fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Compare(args) => cmd_compare(&args, config, cli.format),
        Command::Config(_) => cmd_config(&config, cli.format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<UnitilsConfig> {
    let config = match path {
        Some(path) => UnitilsConfig::load(path)?,
        None => UnitilsConfig::from_env()?,
    };
    Ok(config)
}

fn cmd_compare(args: &CompareArgs, config: UnitilsConfig, format: OutputFormat) -> anyhow::Result<Outcome> {
    let comparison = compare(args, config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Text => match &comparison.report {
            None => println!(
                "{} {} and {} are equal ({})",
                "✓".green().bold(),
                args.expected.display().to_string().bold(),
                args.actual.display().to_string().bold(),
                comparison.modes.to_string().cyan(),
            ),
            Some(report) => {
                print!("{report}");
                println!(
                    "{} documents differ ({})",
                    "✗".red().bold(),
                    comparison.modes.to_string().cyan(),
                );
            }
        },
    }
    Ok(if comparison.equal {
        Outcome::Equal
    } else {
        Outcome::Different
    })
}

/// Compare the two documents named by `args`. `--style` overrides the
/// configured report style.
pub fn compare(args: &CompareArgs, mut config: UnitilsConfig) -> anyhow::Result<Comparison> {
    if let Some(style) = args.style {
        config.formatter.style = style.into();
    }
    let expected = read_json(&args.expected)?;
    let actual = read_json(&args.actual)?;
    let modes = args.modes(config.assertions.lenient_modes);

    let chain = ReflectionComparator::for_modes(modes);
    let difference = chain.get_difference_with_limits(&expected, &actual, config.limits())?;
    debug!(%modes, equal = difference.is_none(), "compared documents");

    let report = difference.map(|difference| config.report().render(&difference));
    Ok(Comparison {
        equal: report.is_none(),
        modes,
        report,
    })
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn cmd_config(config: &UnitilsConfig, format: OutputFormat) -> anyhow::Result<Outcome> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => print!("{}", config.to_toml_string()?),
    }
    Ok(Outcome::Equal)
}
