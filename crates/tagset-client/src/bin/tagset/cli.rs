//! CLI definitions for tagset.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use tagset_core::ValueKind;

#[derive(Debug, Parser)]
#[command(
    name = "tagset",
    version,
    about = "Write PLC tag values through a tag web endpoint",
    infer_subcommands = true,
    after_help = "Examples:\n  tagset encode int 16909060 --size 4    # prints 4,3,2,1\n  tagset set Pump.Run bool 1\n  tagset set Setpoint real 12.5 --size 4\n  tagset click setpoint                  # prompts for a new value\n  tagset get Setpoint"
)]
pub struct Cli {
    /// Show request details on stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Configuration file (defaults to ./tagset.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Tag server base URL (overrides the config file).
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the wire encoding of a value without sending it.
    Encode {
        #[arg(value_enum)]
        kind: KindArg,
        #[arg(allow_negative_numbers = true)]
        value: String,
        /// Byte width (integers: 1..=16, reals: 4 or 8).
        #[arg(long)]
        size: Option<usize>,
    },
    /// Write one tag.
    Set {
        /// Tag path, e.g. `Line1.Counter` or `Temps[3]`.
        tag: String,
        #[arg(value_enum)]
        kind: KindArg,
        #[arg(allow_negative_numbers = true)]
        value: String,
        /// Byte width (integers: 1..=16, reals: 4 or 8).
        #[arg(long)]
        size: Option<usize>,
    },
    /// Read a tag back from the server.
    Get {
        /// Tag path; the server resolves its root symbol.
        tag: String,
    },
    /// Run the click handler of a configured widget.
    Click {
        /// Widget id from the config file.
        widget: String,
        /// Use this value instead of prompting.
        #[arg(long, allow_negative_numbers = true)]
        value: Option<String>,
        /// Read the current value from the server before prompting.
        #[arg(long)]
        refresh: bool,
    },
    /// Show the IEEE-754 fields of a real value.
    Inspect {
        #[arg(allow_negative_numbers = true)]
        value: String,
        /// 4 (binary32) or 8 (binary64).
        #[arg(long, default_value = "4")]
        size: usize,
    },
    /// List configured widgets.
    Widgets,
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Bool,
    Int,
    Real,
}

impl From<KindArg> for ValueKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Bool => ValueKind::Bool,
            KindArg::Int => ValueKind::Int,
            KindArg::Real => ValueKind::Real,
        }
    }
}
