mod columns;
mod common;
mod records;
mod stats;

use std::process;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, arg};
use env_logger::Env;

use vardb_query::QueryError;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "vardb";

    /// Exit status for requests the caller has to fix.
    pub const EXIT_CLIENT_ERROR: i32 = 2;
    /// Exit status for everything else that went wrong.
    pub const EXIT_SERVER_ERROR: i32 = 1;
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Filter, page through and summarize clinical variant records.")
        .subcommand_required(true)
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .global(true)
                .help("Path to a vardb TOML config"),
        )
        .arg(
            arg!(--data <DATA>)
                .required(false)
                .global(true)
                .help("Path to a variant TSV/TSV.gz file (default pagination settings)"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .global(true)
                .help("Output JSON path (default: stdout)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more (-v info, -vv debug); RUST_LOG overrides"),
        )
        .subcommand(records::cli::create_list_cli())
        .subcommand(records::cli::create_filter_cli())
        .subcommand(records::cli::create_search_cli())
        .subcommand(stats::cli::create_counts_cli())
        .subcommand(stats::cli::create_disease_counts_cli())
        .subcommand(columns::cli::create_unique_values_cli())
        .subcommand(columns::cli::create_columns_cli())
}

fn init_logging(matches: &ArgMatches) {
    // globals propagate down, so the subcommand sees -v wherever it was given
    let matches = matches.subcommand().map_or(matches, |(_, sub)| sub);
    let level = match matches.get_count("verbose") {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        //
        // RECORDS
        //
        Some((records::cli::LIST_CMD, matches)) => {
            records::handlers::run_list(matches)?;
        }
        Some((records::cli::FILTER_CMD, matches)) => {
            records::handlers::run_filter(matches)?;
        }
        Some((records::cli::SEARCH_CMD, matches)) => {
            records::handlers::run_search(matches)?;
        }

        //
        // AGGREGATES
        //
        Some((stats::cli::COUNTS_CMD, matches)) => {
            stats::handlers::run_counts(matches)?;
        }
        Some((stats::cli::DISEASE_COUNTS_CMD, matches)) => {
            stats::handlers::run_disease_counts(matches)?;
        }

        //
        // COLUMN METADATA
        //
        Some((columns::cli::UNIQUE_VALUES_CMD, matches)) => {
            columns::handlers::run_unique_values(matches)?;
        }
        Some((columns::cli::COLUMNS_CMD, matches)) => {
            columns::handlers::run_columns(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<QueryError>() {
        Some(e) if e.is_client_error() => consts::EXIT_CLIENT_ERROR,
        _ => consts::EXIT_SERVER_ERROR,
    }
}

fn main() {
    let app = build_parser();
    let matches = app.get_matches();
    init_logging(&matches);

    if let Err(err) = run(&matches) {
        eprintln!("Error: {:#}", err);
        process::exit(exit_code(&err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use vardb_core::errors::StoreError;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_global_args_reach_subcommands() {
        let matches = build_parser()
            .try_get_matches_from([
                "vardb", "search", "--data", "v.tsv", "--chrom", "1", "--chrom", "X", "-vv",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, records::cli::SEARCH_CMD);
        assert_eq!(sub.get_one::<String>("data").map(String::as_str), Some("v.tsv"));
        assert_eq!(sub.get_count("verbose"), 2);

        let criteria = common::criteria(sub).unwrap();
        assert_eq!(criteria.chromosome, vec!["1".to_string(), "X".to_string()]);
    }

    #[rstest]
    fn test_exit_codes() {
        let client = anyhow::Error::from(QueryError::InvalidField("Colour".to_string()));
        assert_eq!(exit_code(&client), consts::EXIT_CLIENT_ERROR);

        let client = anyhow::Error::from(QueryError::invalid_value("page", 0))
            .context("while paging");
        assert_eq!(exit_code(&client), consts::EXIT_CLIENT_ERROR);

        let server = anyhow::Error::from(QueryError::from(StoreError::Unavailable(
            "gone".to_string(),
        )));
        assert_eq!(exit_code(&server), consts::EXIT_SERVER_ERROR);

        let load = anyhow::anyhow!("Failed to load variants");
        assert_eq!(exit_code(&load), consts::EXIT_SERVER_ERROR);
    }
}
