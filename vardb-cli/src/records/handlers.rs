use anyhow::Result;
use clap::ArgMatches;

use crate::common::{criteria, load_service, page_request, write_json};

pub fn run_list(matches: &ArgMatches) -> Result<()> {
    let service = load_service(matches)?;
    let request = page_request(&service, matches)?;

    let page = service.list_all(&request)?;
    write_json(&page, matches)
}

pub fn run_filter(matches: &ArgMatches) -> Result<()> {
    let column = matches
        .get_one::<String>("column")
        .expect("--column is required");
    let value = matches
        .get_one::<String>("value")
        .expect("--value is required");

    let service = load_service(matches)?;
    let request = page_request(&service, matches)?;

    let page = service.filter_by_column(column, value, &request)?;
    write_json(&page, matches)
}

pub fn run_search(matches: &ArgMatches) -> Result<()> {
    let criteria = criteria(matches)?;

    let service = load_service(matches)?;
    let request = page_request(&service, matches)?;

    let page = service.advanced_search(&criteria, &request)?;
    write_json(&page, matches)
}
