use clap::{Command, arg};

use crate::common::{with_criteria, with_paging};

pub const LIST_CMD: &str = "list";
pub const FILTER_CMD: &str = "filter";
pub const SEARCH_CMD: &str = "search";

pub fn create_list_cli() -> Command {
    with_paging(Command::new(LIST_CMD).about("List every variant record, one page at a time."))
}

pub fn create_filter_cli() -> Command {
    with_paging(
        Command::new(FILTER_CMD)
            .about("List records whose column equals a value exactly.")
            .arg(
                arg!(--column <COLUMN>)
                    .required(true)
                    .help("Column label, e.g. \"Chromosome\" or \"Gene Info\" (see `vardb columns`)"),
            )
            .arg(
                arg!(--value <VALUE>)
                    .required(true)
                    .help("Value to match (case-sensitive)"),
            ),
    )
}

pub fn create_search_cli() -> Command {
    with_paging(with_criteria(
        Command::new(SEARCH_CMD)
            .about("List records matching every given criterion. No criteria matches everything."),
    ))
}
