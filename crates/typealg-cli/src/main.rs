//! `typealg`: runs the reference scenarios and prints relation matrices.

mod args;
mod hierarchy;
mod scenarios;
mod tracing_config;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::{ColoredString, Colorize};
use typealg_solver::{NominalClosure, SubtypingRelation};

use crate::args::{CliArgs, Command};
use crate::hierarchy::{RelationMatrix, collection_hierarchy, sample_types};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    tracing_config::init_tracing(args.log_format);
    if args.no_color {
        colored::control::set_override(false);
    }

    match args.command {
        Command::Scenarios => run_scenarios(),
        Command::Hierarchy { closure } => print_hierarchy(closure.into()),
    }
}

fn run_scenarios() -> Result<()> {
    let outcomes = scenarios::run().context("running scenarios")?;
    let mut failed = 0;
    for outcome in &outcomes {
        if outcome.passed() {
            println!("{} {} = {}", "ok".green(), outcome.title, outcome.actual);
        } else {
            failed += 1;
            println!(
                "{} {} = {} (expected {})",
                "FAIL".red().bold(),
                outcome.title,
                outcome.actual,
                outcome.expected
            );
        }
    }

    if failed > 0 {
        bail!("{failed} of {} scenarios failed", outcomes.len());
    }
    println!("{} scenarios passed", outcomes.len());
    Ok(())
}

fn print_hierarchy(closure: NominalClosure) -> Result<()> {
    let env = collection_hierarchy(closure)?;
    let matrix = RelationMatrix::compute(&env, sample_types())?;

    println!("{}", format!("closure: {closure:?}").bold());
    let width = matrix
        .types
        .iter()
        .map(|ty| ty.to_string().len())
        .max()
        .unwrap_or(0);
    for (left, right, relation) in matrix.pairs() {
        println!(
            "{:<width$}  {}  {}",
            left.to_string(),
            paint(relation),
            right
        );
    }
    Ok(())
}

fn paint(relation: SubtypingRelation) -> ColoredString {
    let name = format!("{:<10}", relation.to_string());
    match relation {
        SubtypingRelation::Subtype => name.green(),
        SubtypingRelation::Supertype => name.cyan(),
        SubtypingRelation::Equivalent => name.bold(),
        SubtypingRelation::Unrelated => name.dimmed(),
    }
}
