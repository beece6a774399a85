use clap::{Command, arg};

pub const COLUMNS_CMD: &str = "columns";
pub const UNIQUE_VALUES_CMD: &str = "unique-values";

pub fn create_columns_cli() -> Command {
    Command::new(COLUMNS_CMD).about("Print the field identifier to column label mapping.")
}

pub fn create_unique_values_cli() -> Command {
    Command::new(UNIQUE_VALUES_CMD)
        .about("Print the sorted distinct values of one field.")
        .arg(
            arg!(--column <FIELD>)
                .required(true)
                .help("Field identifier, e.g. chromosome or gene_info (see `vardb columns`)"),
        )
}
