use anyhow::Result;
use clap::ArgMatches;

use vardb_query::Dimension;

use crate::common::{criteria, load_service, write_json};

pub fn run_counts(matches: &ArgMatches) -> Result<()> {
    let dimension: Dimension = matches
        .get_one::<String>("DIMENSION")
        .expect("dimension is required")
        .parse()?;
    let criteria = criteria(matches)?;

    let service = load_service(matches)?;
    let counts = service.group_counts(dimension, &criteria)?;
    write_json(&counts, matches)
}

pub fn run_disease_counts(matches: &ArgMatches) -> Result<()> {
    let service = load_service(matches)?;
    let counts = service.disease_counts()?;
    write_json(&counts, matches)
}
