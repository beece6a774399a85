use anyhow::Result;
use clap::ArgMatches;

use vardb_query::ColumnMap;

use crate::common::{load_service, write_json};

pub fn run_columns(matches: &ArgMatches) -> Result<()> {
    write_json(&ColumnMap, matches)
}

pub fn run_unique_values(matches: &ArgMatches) -> Result<()> {
    let column = matches
        .get_one::<String>("column")
        .expect("--column is required");

    let service = load_service(matches)?;
    let values = service.distinct_values(column)?;
    write_json(&values, matches)
}
