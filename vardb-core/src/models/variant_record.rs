use serde::{Deserialize, Serialize};

///
/// VariantRecord struct, one row of the clinical variant fact table.
///
/// Serde names match the storage column names of the seeding file, so a
/// record deserializes straight from a TSV row. Every field except `id` may be null.
///
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct VariantRecord {
    #[serde(rename = "ID")]
    pub id: u64,

    #[serde(rename = "CHROM", default)]
    pub chromosome: Option<String>,
    #[serde(rename = "POS", default)]
    pub position: Option<u64>,
    #[serde(rename = "REF", default)]
    pub reference_allele: Option<String>,
    #[serde(rename = "ALT", default)]
    pub alternate_allele: Option<String>,

    #[serde(rename = "CLNSIG", default)]
    pub clinical_significance: Option<String>,
    #[serde(rename = "GENEINFO", default)]
    pub gene_info: Option<String>,
    #[serde(rename = "CLNVC", default)]
    pub variant_class: Option<String>,
    #[serde(rename = "CLNVCSO", default)]
    pub sequence_ontology: Option<String>,
    #[serde(rename = "CLNDN", default)]
    pub disease_name: Option<String>,
    #[serde(rename = "ALT_TYPE", default)]
    pub alt_type: Option<String>,
    #[serde(rename = "ALT_VALUE", default)]
    pub alt_value: Option<String>,

    #[serde(rename = "NormalSeq", default)]
    pub normal_sequence: Option<String>,
    #[serde(rename = "MUTATED_SEQ", default)]
    pub mutated_sequence: Option<String>,

    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "ORIGIN", default)]
    pub origin: Option<f64>,
}

impl VariantRecord {
    ///
    /// Create a record with only its identity set
    ///
    pub fn new(id: u64) -> Self {
        VariantRecord {
            id,
            ..Default::default()
        }
    }
}
