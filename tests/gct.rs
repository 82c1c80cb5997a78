use std::fs;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use kira_ifnsig::PipelineError;
use kira_ifnsig::io::gct::{parse_gct_str, read_gct};
use tempfile::TempDir;

const GCT13: &str = "#1.3\n3\t2\t1\t1\nid\tsymbol\tS1\tS2\nhistological_type_other\tna\tAdeno\tNeuroendocrine\nG1\tg1\t1.5\t2.0\nG2\tg2\tNA\t3.0\nG3\tg3\t-666\t\n";

#[test]
fn gct13_matrix_and_metadata() {
    let ds = parse_gct_str(GCT13, "mem").unwrap();
    assert_eq!(ds.version, "1.3");
    assert_eq!(ds.matrix.genes(), ["G1", "G2", "G3"]);
    assert_eq!(ds.matrix.samples(), ["S1", "S2"]);
    assert_eq!(ds.matrix.row(0), [1.5, 2.0]);
    assert!(ds.matrix.value(1, 0).is_nan());
    assert_eq!(ds.matrix.value(1, 1), 3.0);
    assert!(ds.matrix.value(2, 0).is_nan());
    assert!(ds.matrix.value(2, 1).is_nan());
    assert_eq!(
        ds.col_meta.field("histological_type_other").unwrap(),
        ["Adeno", "Neuroendocrine"]
    );
}

#[test]
fn gct12_has_no_metadata() {
    let content = "#1.2\n2\t3\nName\tDescription\tA\tB\tC\nTP53\tna\t1\t2\t3\nMX1\tna\t4\t5\t6\n";
    let ds = parse_gct_str(content, "mem").unwrap();
    assert_eq!(ds.version, "1.2");
    assert_eq!(ds.matrix.n_genes(), 2);
    assert_eq!(ds.matrix.n_samples(), 3);
    assert_eq!(ds.matrix.row(1), [4.0, 5.0, 6.0]);
    assert!(ds.col_meta.fields().is_empty());
}

#[test]
fn gct_rejects_unknown_version() {
    let err = parse_gct_str("#2.0\n1\t1\n", "mem").unwrap_err();
    let named = err.downcast_ref::<PipelineError>().unwrap();
    assert!(matches!(named, PipelineError::MalformedGct { line: 1, .. }));
}

#[test]
fn gct_rejects_row_count_mismatch() {
    let content = "#1.2\n3\t1\nName\tDescription\tA\nG1\tna\t1\nG2\tna\t2\n";
    let err = parse_gct_str(content, "mem").unwrap_err();
    assert!(err.to_string().contains("expected 3 data rows, found 2"));
}

#[test]
fn gct_rejects_bad_value_with_line() {
    let content = "#1.2\n1\t2\nName\tDescription\tA\tB\nG1\tna\t1\tabc\n";
    let err = parse_gct_str(content, "mem").unwrap_err();
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::MalformedGct { line, reason, .. }) => {
            assert_eq!(*line, 4);
            assert!(reason.contains("abc"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn gct_rejects_duplicate_samples() {
    let content = "#1.2\n1\t2\nName\tDescription\tA\tA\nG1\tna\t1\t2\n";
    let err = parse_gct_str(content, "mem").unwrap_err();
    assert!(err.to_string().contains("duplicate sample id 'A'"));
}

#[test]
fn missing_file_is_named_error() {
    let tmp = TempDir::new().unwrap();
    let err = read_gct(&tmp.path().join("PAAD.gct")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::InputNotFound(_))
    ));
}

#[test]
fn reads_gzipped_gct() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("PAAD.gct.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(GCT13.as_bytes()).unwrap();
    fs::write(&path, enc.finish().unwrap()).unwrap();

    let ds = read_gct(&path).unwrap();
    assert_eq!(ds.matrix.n_genes(), 3);
    assert_eq!(ds.col_meta.samples(), ["S1", "S2"]);
}

#[test]
fn gct_rejects_duplicate_gene_ids_with_line() {
    let content = "#1.2\n3\t1\nName\tDescription\tA\nMX1\tna\t1\nISG15\tna\t2\nMX1\tna\t3\n";
    let err = parse_gct_str(content, "mem").unwrap_err();
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::MalformedGct { line, reason, .. }) => {
            assert_eq!(*line, 6);
            assert!(reason.contains("duplicate gene id 'MX1' (first at line 4)"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn gct_ids_differing_only_in_case_load() {
    let content = "#1.2\n2\t1\nName\tDescription\tA\nMx1\tna\t1\nMX1\tna\t2\n";
    let ds = parse_gct_str(content, "mem").unwrap();
    assert_eq!(ds.matrix.genes(), ["Mx1", "MX1"]);
}

#[test]
fn missing_value_spellings_become_nan_and_are_dropped() {
    let tokens = [
        "", "#N/A", "N/A", "NA", "#NA", "#N/A!", "na", "NULL", "None", "#VALUE!", "NaN", "-NaN",
        "nan", "-nan", "-666", "-666.0", "-666.00", "-666.000",
    ];
    for tok in tokens {
        let content = format!(
            "#1.2\n2\t2\nName\tDescription\tA\tB\nG1\tna\t1\t{}\nG2\tna\t3\t4\n",
            tok
        );
        let ds = parse_gct_str(&content, "mem")
            .unwrap_or_else(|e| panic!("token '{}' rejected: {}", tok, e));
        assert!(ds.matrix.value(0, 1).is_nan(), "token '{}' not missing", tok);

        let cleaned = ds.matrix.drop_missing();
        assert_eq!(cleaned.dropped, vec!["G1".to_string()], "token '{}'", tok);
        assert_eq!(cleaned.matrix.genes(), ["G2"]);
    }
}

#[test]
fn near_missing_values_stay_numeric() {
    let content = "#1.2\n1\t2\nName\tDescription\tA\tB\nG1\tna\t-666.5\t-66.6\n";
    let ds = parse_gct_str(content, "mem").unwrap();
    assert_eq!(ds.matrix.row(0), [-666.5, -66.6]);
}
