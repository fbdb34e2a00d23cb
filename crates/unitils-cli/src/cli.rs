use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use unitils_compare::{ComparatorMode, ComparatorModes};
use unitils_report::FormatterStyle;

#[derive(Parser)]
#[command(
    name = "unitils",
    about = "Unitils: lenient structural comparison of JSON documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file; defaults to $UNITILS_CONFIG, then built-in settings
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare an expected and an actual JSON document
    Compare(CompareArgs),
    /// Show the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    pub expected: PathBuf,
    pub actual: PathBuf,
    /// Ignore the order of array elements
    #[arg(long)]
    pub lenient_order: bool,
    /// Null, false and zero on the expected side match anything
    #[arg(long)]
    pub ignore_defaults: bool,
    /// Dates only need to be both present or both absent
    #[arg(long)]
    pub lenient_dates: bool,
    /// Add the configured lenient modes
    #[arg(long)]
    pub lenient: bool,
    /// Report layout; overrides the config file
    #[arg(long)]
    pub style: Option<StyleArg>,
}

impl CompareArgs {
    /// The flag modes, plus `lenient` when `--lenient` is given.
    pub fn modes(&self, lenient: ComparatorModes) -> ComparatorModes {
        let mut modes = if self.lenient {
            lenient
        } else {
            ComparatorModes::STRICT
        };
        let flags = [
            (self.lenient_order, ComparatorMode::LenientOrder),
            (self.ignore_defaults, ComparatorMode::IgnoreDefaults),
            (self.lenient_dates, ComparatorMode::LenientDates),
        ];
        for (set, mode) in flags {
            if set {
                modes = modes.with(mode);
            }
        }
        modes
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StyleArg {
    Default,
    Tree,
}

impl From<StyleArg> for FormatterStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Default => FormatterStyle::Default,
            StyleArg::Tree => FormatterStyle::Tree,
        }
    }
}

#[derive(Args)]
pub struct ConfigArgs {}
