use clap::{Command, arg};

use crate::common::with_criteria;

pub const COUNTS_CMD: &str = "counts";
pub const DISEASE_COUNTS_CMD: &str = "disease-counts";

pub fn create_counts_cli() -> Command {
    with_criteria(
        Command::new(COUNTS_CMD)
            .about("Count matching records per value of one dimension.")
            .arg(
                arg!(<DIMENSION>)
                    .required(true)
                    .help("One of: chromosome, alt_type, clinical_significance, genes (top 10)"),
            ),
    )
}

pub fn create_disease_counts_cli() -> Command {
    Command::new(DISEASE_COUNTS_CMD)
        .about("Count all records per disease category and disease name.")
}
