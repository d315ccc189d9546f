//! Command-line definition.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use restyle_core::Breakpoint;

/// Edit a persisted element style and generate classes, styles and markup from it.
#[derive(Debug, Parser)]
#[command(name = "restyle", version, about)]
pub struct Cli {
    /// Configuration file (default: $RESTYLE_CONFIG, then ./restyle.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding persisted state
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Storage key of the edited element
    #[arg(long, global = true, value_name = "KEY")]
    pub key: Option<String>,

    /// Breakpoint prefix for generated classes (auto, base, sm, md, lg, xl, 2xl)
    #[arg(short, long, global = true, value_name = "BP")]
    pub breakpoint: Option<Breakpoint>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the current style state
    Show {
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print the generated utility classes
    Classes,
    /// Print the generated inline styles
    Styles {
        /// Print a `style` attribute body instead of JSON
        #[arg(long)]
        css: bool,
    },
    /// Print the generated markup
    Markup {
        /// Strip scripts, event handlers and unsafe URLs
        #[arg(long)]
        sanitize: bool,
        /// Also copy the markup to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Set a field by dotted path, e.g. `set border.radius.all 12`
    Set {
        path: String,
        /// JSON value; anything that is not valid JSON is taken as a string
        value: String,
    },
    /// Restore the default style and clear persisted state
    Reset,
    /// Write the state as a versioned export file
    Export {
        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Also copy the export to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Replace the state with an export file
    Import { file: PathBuf },
    /// Ask the assist relay to restyle the element
    Assist {
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}
