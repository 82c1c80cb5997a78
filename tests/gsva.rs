use kira_ifnsig::PipelineError;
use kira_ifnsig::expr::ExprMatrix;
use kira_ifnsig::geneset::GeneSet;
use kira_ifnsig::scores::gsva::{
    gsva, non_constant_genes, order_rankstat, random_walk, row_kcdf,
};
use kira_ifnsig::scores::{GsvaParams, score_gene_set};

/// Genes 0..5 rise towards sample 0; genes 5..10 are shuffled.
fn signature_matrix() -> ExprMatrix {
    let genes: Vec<String> = (0..10).map(|g| format!("G{}", g)).collect();
    let samples: Vec<String> = (0..6).map(|s| format!("S{}", s)).collect();
    let rows = (0..10)
        .map(|g| {
            (0..6)
                .map(|s| {
                    if g < 5 {
                        (10 - s) as f64 + g as f64 * 0.1
                    } else {
                        ((s * 7 + g * 3) % 6) as f64
                    }
                })
                .collect()
        })
        .collect();
    ExprMatrix::from_rows(genes, samples, rows).unwrap()
}

#[test]
fn rankstat_is_symmetric_around_middle() {
    let (order, stats) = order_rankstat(&[0.1, 3.0, -2.0, 1.0]);
    assert_eq!(order, vec![1, 3, 0, 2]);
    assert_eq!(stats, vec![0.0, 2.0, 1.0, 1.0]);
}

#[test]
fn kcdf_is_monotone_in_value() {
    let k = row_kcdf(&[1.0, 3.0, 2.0, 5.0]);
    assert!(k[0] < k[2]);
    assert!(k[2] < k[1]);
    assert!(k[1] < k[3]);
}

#[test]
fn walk_is_none_when_set_covers_everything() {
    let (order, stats) = order_rankstat(&[1.0, 2.0, 3.0]);
    assert!(random_walk(&[0, 1, 2], &order, &stats, 1.0).is_none());
    assert!(random_walk(&[], &order, &stats, 1.0).is_none());
}

#[test]
fn walk_top_ranked_set_reaches_one() {
    let values: Vec<f64> = (0..10).map(|v| 10.0 - v as f64).collect();
    let (order, stats) = order_rankstat(&values);
    let (pos, neg) = random_walk(&[0, 1, 2, 3, 4], &order, &stats, 1.0).unwrap();
    assert!((pos - 1.0).abs() < 1e-12);
    assert_eq!(neg, 0.0);
}

#[test]
fn scores_follow_signature_direction() {
    let m = signature_matrix();
    let scores = gsva(&m, &[vec![0, 1, 2, 3, 4]], &GsvaParams::default()).unwrap();
    let s = &scores[0];
    assert_eq!(s.len(), 6);
    assert!(s.iter().all(|v| (-1.0..=1.0).contains(v)));
    assert!(s[0] > 0.5, "top sample scored {}", s[0]);
    assert!(s[5] < -0.5, "bottom sample scored {}", s[5]);
    assert!(s[0] > s[5]);
}

#[test]
fn scores_do_not_depend_on_thread_count() {
    let m = signature_matrix();
    let set = vec![vec![0, 2, 4, 6]];
    let one = gsva(&m, &set, &GsvaParams { threads: 1, ..GsvaParams::default() }).unwrap();
    let many = gsva(&m, &set, &GsvaParams { threads: 4, ..GsvaParams::default() }).unwrap();
    assert_eq!(one, many);
}

#[test]
fn score_gene_set_drops_constant_genes_before_size_check() {
    let mut rows: Vec<Vec<f64>> = (0..6)
        .map(|g| (0..4).map(|s| (g * 4 + s) as f64).collect())
        .collect();
    rows[5] = vec![2.0; 4];
    let genes: Vec<String> = (0..6).map(|g| format!("G{}", g)).collect();
    let samples: Vec<String> = (0..4).map(|s| format!("S{}", s)).collect();
    let m = ExprMatrix::from_rows(genes.clone(), samples, rows).unwrap();
    assert_eq!(non_constant_genes(&m), vec![0, 1, 2, 3, 4]);

    let set = GeneSet::new("IFN_Signature", genes[1..].to_vec());
    let err = score_gene_set(&m, &set, 5, 1000, &GsvaParams::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::GenesetBelowMinSize { found: 4, min: 5, .. })
    ));

    let (scores, warnings) = score_gene_set(&m, &set, 3, 1000, &GsvaParams::default()).unwrap();
    assert_eq!(scores.genes_used, 4);
    assert_eq!(scores.samples, vec!["S0", "S1", "S2", "S3"]);
    assert_eq!(warnings.len(), 1);
}
