use std::fs;
use std::path::Path;

use kira_ifnsig::PipelineError;
use kira_ifnsig::ctx::Ctx;
use kira_ifnsig::pipeline::Pipeline;
use kira_ifnsig::pipeline::stage0_scaffold::Stage0Scaffold;
use kira_ifnsig::pipeline::stage1_load::Stage1Load;
use kira_ifnsig::pipeline::stage2_clean::Stage2Clean;
use kira_ifnsig::pipeline::stage3_distribution::Stage3Distribution;
use kira_ifnsig::pipeline::stage4_reduce::Stage4Reduce;
use kira_ifnsig::pipeline::stage5_exocrine::Stage5Exocrine;
use kira_ifnsig::pipeline::stage6_signature::Stage6Signature;
use tempfile::TempDir;

fn write_small(dir: &Path) {
    fs::write(
        dir.join("PAAD.gct"),
        "#1.3\n3\t4\t0\t1\nid\tS1\tS2\tS3\tS4\n\
         histological_type_other\tAdenocarcinoma\tNeuroendocrine\tColloid\tAdenocarcinoma\n\
         Mx1\t1.0\t2.0\t3.0\t5.0\n\
         KRT19\t4.0\tNA\t2.0\t1.0\n\
         isg15\t7.0\t1.0\t0.5\t2.5\n",
    )
    .unwrap();
    fs::write(dir.join("type1_IFN.txt"), "ISG15\nmx1\nIFIT1\n").unwrap();
}

fn until_signature() -> Pipeline {
    Pipeline::new(vec![
        Box::new(Stage0Scaffold::new()),
        Box::new(Stage1Load::new()),
        Box::new(Stage2Clean::new()),
        Box::new(Stage3Distribution::new()),
        Box::new(Stage4Reduce::new()),
        Box::new(Stage5Exocrine::new()),
        Box::new(Stage6Signature::new()),
    ])
}

#[test]
fn small_matrix_flows_through_signature_stage() {
    let tmp = TempDir::new().unwrap();
    write_small(tmp.path());
    let mut ctx = Ctx::in_dir(tmp.path(), "0.0.0-test");
    ctx.render_plots = false;

    until_signature().run(&mut ctx).unwrap();

    let cleaned = ctx.cleaned.as_ref().unwrap();
    assert_eq!(cleaned.dropped, vec!["KRT19".to_string()]);
    assert_eq!(cleaned.matrix.n_genes(), 2);

    assert_eq!(ctx.box_stats.as_ref().unwrap().len(), 4);
    let scatter = ctx.pca_scatter.as_ref().unwrap();
    assert_eq!(scatter.points.len(), 4);
    assert_eq!(
        scatter.labels,
        vec!["Adenocarcinoma", "Neuroendocrine", "Colloid"]
    );

    let exocrine = ctx.exocrine.as_ref().unwrap();
    assert_eq!(exocrine.samples(), ["S1", "S3", "S4"]);
    assert_eq!(exocrine.genes(), ["MX1", "ISG15"]);
    assert_eq!(ctx.excluded_samples, 1);

    let matched = ctx.matched.as_ref().unwrap();
    assert_eq!(matched.genes, vec!["ISG15", "MX1"]);
    assert_eq!(matched.missing, vec!["IFIT1"]);

    let gmt = fs::read_to_string(tmp.path().join("ifn_signature.gmt")).unwrap();
    assert_eq!(gmt, "IFN_Signature\tNA\tISG15\tMX1\n");
    assert!(tmp.path().join("pca.tsv").exists());
    assert!(!tmp.path().join("pca.svg").exists());
}

#[test]
fn empty_match_is_reported_before_scoring() {
    let tmp = TempDir::new().unwrap();
    write_small(tmp.path());
    fs::write(tmp.path().join("type1_IFN.txt"), "OAS1\nIFI6\n").unwrap();
    let mut ctx = Ctx::in_dir(tmp.path(), "0.0.0-test");
    ctx.render_plots = false;

    let err = until_signature().run(&mut ctx).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::EmptyGeneMatch { .. })
    ));
    assert!(!tmp.path().join("ifn_signature.gmt").exists());
}

#[test]
fn missing_histology_field_fails_at_reduce() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("PAAD.gct"),
        "#1.2\n2\t3\nName\tDescription\tA\tB\tC\nG1\tna\t1\t2\t3\nG2\tna\t3\t1\t2\n",
    )
    .unwrap();
    let mut ctx = Ctx::in_dir(tmp.path(), "0.0.0-test");
    ctx.render_plots = false;

    let err = until_signature().run(&mut ctx).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::MetadataColumnMissing(f)) if f == "histological_type_other"
    ));
    assert!(ctx.box_stats.is_some());
    assert!(ctx.pca_scatter.is_none());
}

#[test]
fn all_neuroendocrine_is_named_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("PAAD.gct"),
        "#1.3\n2\t2\t0\t1\nid\tA\tB\nhistological_type_other\tNeuroendocrine\tNeuroendocrine\nG1\t1\t2\nG2\t2\t1\n",
    )
    .unwrap();
    let mut ctx = Ctx::in_dir(tmp.path(), "0.0.0-test");
    let pipeline = Pipeline::new(vec![
        Box::new(Stage1Load::new()),
        Box::new(Stage2Clean::new()),
        Box::new(Stage5Exocrine::new()),
    ]);
    let err = pipeline.run(&mut ctx).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::NoExocrineSamples(_))
    ));
}

#[test]
fn full_pipeline_stage_order() {
    assert_eq!(
        Pipeline::full().stage_names(),
        vec![
            "stage0_scaffold",
            "stage1_load",
            "stage2_clean",
            "stage3_distribution",
            "stage4_reduce",
            "stage5_exocrine",
            "stage6_signature",
            "stage7_gsva",
            "stage8_output",
        ]
    );
}

#[test]
fn case_collision_warns_once_at_signature_stage() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("PAAD.gct"),
        "#1.3\n3\t3\t0\t1\nid\tA\tB\tC\nhistological_type_other\tColloid\tColloid\tNeuroendocrine\n\
         Mx1\t1\t2\t3\nMX1\t9\t8\t7\nISG15\t2\t4\t1\n",
    )
    .unwrap();
    fs::write(tmp.path().join("type1_IFN.txt"), "MX1\nISG15\n").unwrap();
    let mut ctx = Ctx::in_dir(tmp.path(), "0.0.0-test");
    let pipeline = Pipeline::new(vec![
        Box::new(Stage1Load::new()),
        Box::new(Stage2Clean::new()),
        Box::new(Stage5Exocrine::new()),
        Box::new(Stage6Signature::new()),
    ]);
    pipeline.run(&mut ctx).unwrap();

    assert_eq!(ctx.warnings.len(), 1);
    assert!(ctx.warnings[0].contains("gene id 'MX1' at row 2 collides with row 1"));
    assert_eq!(ctx.matched.as_ref().unwrap().genes, vec!["MX1", "ISG15"]);
}

#[test]
fn duplicate_gene_rows_fail_at_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("PAAD.gct"),
        "#1.3\n2\t2\t0\t1\nid\tA\tB\nhistological_type_other\tColloid\tColloid\nMX1\t1\t2\nMX1\t3\t4\n",
    )
    .unwrap();
    let mut ctx = Ctx::in_dir(tmp.path(), "0.0.0-test");
    let err = Pipeline::new(vec![Box::new(Stage1Load::new())])
        .run(&mut ctx)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::MalformedGct { line: 6, .. })
    ));
    assert!(ctx.dataset.is_none());
}
