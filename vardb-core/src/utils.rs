use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Label of the only non-numeric chromosome in the canonical domain.
pub const CHROMOSOME_X: &str = "X";

/// Highest numbered autosome in the canonical domain.
pub const MAX_AUTOSOME: u64 = 22;

///
/// Numeric value of a chromosome label made only of ASCII digits.
///
/// Labels such as "X", "MT" or "chr1" are not numeric and return `None`.
/// Digit strings too large for `u64` still count as numeric and saturate.
///
pub fn numeric_chromosome(label: &str) -> Option<u64> {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(label.parse::<u64>().unwrap_or(u64::MAX))
}

///
/// Is the label one of "1".."22" or "X"?
///
/// Membership is exact: "01" or "x" are not canonical.
///
pub fn is_canonical_chromosome(label: &str) -> bool {
    canonical_chromosome_rank(label).is_some()
}

///
/// Position of a canonical chromosome in karyotype order: "1" -> 1 ... "22" -> 22, "X" -> 23.
///
pub fn canonical_chromosome_rank(label: &str) -> Option<u64> {
    if label == CHROMOSOME_X {
        return Some(MAX_AUTOSOME + 1);
    }
    if label.starts_with('0') {
        return None;
    }
    numeric_chromosome(label).filter(|n| (1..=MAX_AUTOSOME).contains(n))
}

///
/// Comparator for chromosome group keys.
///
/// Numeric labels order by integer value and come before everything else.
/// Any two non-numeric labels (or missing labels) compare equal, so a stable
/// sort keeps whatever order they already had.
///
pub fn compare_chromosomes(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a.and_then(numeric_chromosome), b.and_then(numeric_chromosome)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
