use attachify_core::Config;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::process;

mod apply;
mod cli;
mod plan;
mod reorder;
mod store;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_default();
    let use_color = !cli.no_color
        && config.defaults.use_color.unwrap_or_else(|| io::stdout().is_terminal());

    let result = match &cli.command {
        Commands::Plan {
            target,
            rule,
            limit,
            output,
        } => plan::handle_plan(
            &cli.table,
            target,
            rule,
            *limit,
            *output,
            use_color,
            &config.defaults,
        ),
        Commands::Apply {
            target,
            rule,
            confirm,
            output,
        } => apply::handle_apply(
            &cli.table,
            target,
            rule,
            *confirm,
            *output,
            use_color,
            &config.defaults,
        ),
        Commands::Reorder {
            field,
            record,
            from,
            to,
            output,
        } => reorder::handle_reorder(&cli.table, field, record, *from, *to, *output, use_color),
    };

    match result {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        },
    }
}
