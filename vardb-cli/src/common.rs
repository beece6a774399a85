use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, arg};
use log::info;
use serde::Serialize;

use vardb_core::models::VariantTable;
use vardb_query::{FilterCriteria, PageRequest, QueryService, RawCriteria, VardbConfig};

///
/// Open the variant table named by `--config` or `--data` and wrap it in a service.
///
pub fn load_service(matches: &ArgMatches) -> Result<QueryService<VariantTable>> {
    let config_path = matches.get_one::<String>("config");
    let data_path = matches.get_one::<String>("data");

    match (config_path, data_path) {
        (Some(config_path), _) => {
            let config = VardbConfig::try_from(Path::new(config_path))
                .with_context(|| format!("Failed to load config: {}", config_path))?;
            let table = VariantTable::try_from(config.store.path.as_path()).with_context(|| {
                format!("Failed to load variants from {}", config.store.path.display())
            })?;
            info!("Serving {} with {:?}", table, config.pagination);
            Ok(QueryService::with_pagination(
                Arc::new(table),
                config.pagination,
            ))
        }
        (None, Some(data_path)) => {
            let table = VariantTable::try_from(data_path.as_str())
                .with_context(|| format!("Failed to load variants from {}", data_path))?;
            Ok(QueryService::new(Arc::new(table)))
        }
        (None, None) => bail!("One of --config or --data is required"),
    }
}

pub fn with_paging(cmd: Command) -> Command {
    cmd.arg(
        arg!(--page <PAGE>)
            .required(false)
            .value_parser(clap::value_parser!(usize))
            .help("1-based page number (default: 1)"),
    )
    .arg(
        arg!(--limit <LIMIT>)
            .required(false)
            .value_parser(clap::value_parser!(usize))
            .help("Records per page (default and maximum come from the config)"),
    )
}

pub fn page_request(
    service: &QueryService<VariantTable>,
    matches: &ArgMatches,
) -> Result<PageRequest> {
    let page = matches.get_one::<usize>("page").copied();
    let limit = matches.get_one::<usize>("limit").copied();
    Ok(service.page_request(page, limit)?)
}

fn repeatable(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .required(false)
        .action(ArgAction::Append)
        .help(help)
}

pub fn with_criteria(cmd: Command) -> Command {
    cmd.arg(arg!(--gene <GENE>).required(false).help("Case-insensitive substring of Gene Info"))
        .arg(
            Arg::new("position-start")
                .long("position-start")
                .required(false)
                .help("Lowest position to include"),
        )
        .arg(
            Arg::new("position-stop")
                .long("position-stop")
                .required(false)
                .help("Highest position to include"),
        )
        .arg(repeatable("chrom", "Chromosome to include (repeatable)"))
        .arg(repeatable("alt-type", "Variant type to include, e.g. SNV (repeatable)"))
        .arg(repeatable("ref", "Reference allele to include (repeatable)"))
        .arg(repeatable("alt", "Alternate allele to include (repeatable)"))
        .arg(repeatable("clnsig", "Clinical significance to include (repeatable)"))
        .arg(repeatable("clndn", "Disease name to include (repeatable)"))
        .arg(repeatable("category", "Disease category to include (repeatable)"))
}

fn many(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

pub fn criteria(matches: &ArgMatches) -> Result<FilterCriteria> {
    let raw = RawCriteria {
        gene_info: matches.get_one::<String>("gene").cloned(),
        position_start: matches.get_one::<String>("position-start").cloned(),
        position_stop: matches.get_one::<String>("position-stop").cloned(),
        chromosome: many(matches, "chrom"),
        alt_type: many(matches, "alt-type"),
        reference_allele: many(matches, "ref"),
        alternate_allele: many(matches, "alt"),
        clinical_significance: many(matches, "clnsig"),
        disease_name: many(matches, "clndn"),
        category: many(matches, "category"),
    };
    Ok(FilterCriteria::from_raw(&raw)?)
}

///
/// Pretty-print `value` as JSON to `--output`, or stdout when it is absent.
///
pub fn write_json<T: Serialize>(value: &T, matches: &ArgMatches) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")?;

    match matches.get_one::<String>("output") {
        Some(p) => {
            let mut file = File::create(Path::new(p))
                .with_context(|| format!("Failed to create output file: {}", p))?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            eprintln!("Output written to {}", p);
        }
        None => {
            io::stdout().write_all(json.as_bytes())?;
            println!();
        }
    }

    Ok(())
}
