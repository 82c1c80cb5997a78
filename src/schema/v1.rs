use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub path: String,
    pub gct_version: Option<String>,
    pub genes: Option<u64>,
    pub samples: Option<u64>,
    pub metadata_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cleaning {
    pub genes_kept: u64,
    pub genes_dropped: u64,
    pub dropped: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaSummary {
    pub components: u64,
    pub explained_variance_ratio: Vec<f64>,
    pub histology: Vec<LabelCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureSummary {
    pub name: String,
    pub gmt_path: String,
    pub exocrine_samples: u64,
    pub excluded_samples: u64,
    pub list_total: u64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub coverage: f64,
    pub genes_scored: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreStats {
    pub n: u64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub bins: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfnSigV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub input: InputMeta,
    pub cleaning: Option<Cleaning>,
    pub pca: Option<PcaSummary>,
    pub signature: Option<SignatureSummary>,
    pub scores: Option<ScoreStats>,
    pub warnings: Vec<String>,
}

impl IfnSigV1 {
    pub fn empty(tool_version: &str, input: &str) -> Self {
        Self {
            tool: "kira-ifnsig".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            input: InputMeta {
                path: input.to_string(),
                gct_version: None,
                genes: None,
                samples: None,
                metadata_fields: Vec::new(),
            },
            cleaning: None,
            pca: None,
            signature: None,
            scores: None,
            warnings: Vec::new(),
        }
    }
}
