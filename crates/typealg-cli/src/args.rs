use clap::{Parser, Subcommand, ValueEnum};
use typealg_solver::NominalClosure;

use crate::tracing_config::LogFormat;

/// CLI arguments for the typealg binary.
#[derive(Parser, Debug)]
#[command(
    name = "typealg",
    version,
    about = "Normalize and relate types with unions, intersections, nullability and flexible ranges"
)]
pub struct CliArgs {
    /// Tracing output format. Overrides TYPEALG_LOG_FORMAT.
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the reference scenarios and report each outcome.
    Scenarios,
    /// Print the relation matrix of the built-in collection hierarchy.
    Hierarchy {
        /// How far nominal subtyping follows declared supertypes.
        #[arg(long, value_enum, default_value_t = Closure::Transitive)]
        closure: Closure,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    /// Declared supertypes only.
    Direct,
    /// Every declared ancestor.
    Transitive,
}

impl From<Closure> for NominalClosure {
    fn from(closure: Closure) -> Self {
        match closure {
            Closure::Direct => NominalClosure::DirectOnly,
            Closure::Transitive => NominalClosure::Transitive,
        }
    }
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
