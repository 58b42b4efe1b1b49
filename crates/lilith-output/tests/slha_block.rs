mod common;

use std::fs;

use lilith_core::GlobalResult;
use lilith_output::{
    render_results_slha, render_results_slha_pvalue, write_results_slha_pvalue, OutputConfig,
    ResultWriter, BLOCK_HEADER,
};

use common::sample_results;

fn values(block: &str) -> Vec<String> {
    block
        .lines()
        .skip(1)
        .map(|line| line.split_whitespace().nth(1).unwrap().to_string())
        .collect()
}

#[test]
fn plain_block_has_three_entries() {
    let global = GlobalResult {
        l: 12.345678,
        l_ref: Some(9.87654),
        ..GlobalResult::default()
    };
    let block =
        render_results_slha(&sample_results(), &global, &OutputConfig::default()).expect("render");
    let lines: Vec<_> = block.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], BLOCK_HEADER);
    assert_eq!(lines[1], "  0           12.3457           # -2*LogL");
    assert_eq!(lines[2], "  1           5                # exp_ndf");
    assert_eq!(lines[3], "  2           9.8765           # -2*LogL_SM");
}

#[test]
fn pvalue_block_has_six_entries() {
    let global = GlobalResult {
        l: 10.0,
        l_ref: Some(4.0),
        fit_ndf: Some(2),
        dbversion: Some("22.x".into()),
    };
    let block = render_results_slha_pvalue(&sample_results(), &global, &OutputConfig::default())
        .expect("render");
    assert!(block.starts_with(BLOCK_HEADER));
    assert_eq!(
        values(&block),
        vec!["10.0", "5", "4.0", "2", "0.0498", "22.x"]
    );
    let labels: Vec<_> = block
        .lines()
        .skip(1)
        .map(|line| line.split('#').nth(1).unwrap().trim())
        .collect();
    assert_eq!(
        labels,
        vec!["-2*LogL", "exp_ndf", "-2*LogL_ref", "fit_ndf", "pvalue", "database version"]
    );
}

#[test]
fn decimals_follow_config() {
    let global = GlobalResult {
        l: 1.23456,
        l_ref: Some(1.0),
        ..GlobalResult::default()
    };
    let config = OutputConfig {
        slha_decimals: 2,
        ..OutputConfig::default()
    };
    let block = render_results_slha(&[], &global, &config).expect("render");
    assert_eq!(values(&block), vec!["1.23", "0", "1.0"]);
}

#[test]
fn missing_inputs_are_named() {
    let mut global = GlobalResult {
        l: 3.0,
        ..GlobalResult::default()
    };
    let err = render_results_slha(&[], &global, &OutputConfig::default()).expect_err("no l_ref");
    assert_eq!(err.missing_key_name(), Some("l_ref"));

    global.l_ref = Some(1.0);
    let err = render_results_slha_pvalue(&[], &global, &OutputConfig::default())
        .expect_err("no fit_ndf");
    assert_eq!(err.missing_key_name(), Some("fit_ndf"));

    global.fit_ndf = Some(0);
    let err = render_results_slha_pvalue(&[], &global, &OutputConfig::default())
        .expect_err("zero fit_ndf");
    assert_eq!(err.info().map(|info| info.code.as_str()), Some("lilith.fit_ndf"));

    global.fit_ndf = Some(1);
    let err = render_results_slha_pvalue(&[], &global, &OutputConfig::default())
        .expect_err("no dbversion");
    assert_eq!(err.missing_key_name(), Some("dbversion"));
}

#[test]
fn written_block_matches_rendered_block() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("results.slha");
    let global = GlobalResult {
        l: 8.0,
        l_ref: Some(8.5),
        fit_ndf: Some(3),
        dbversion: Some("19.09".into()),
    };
    let receipt =
        write_results_slha_pvalue(&sample_results(), &global, &OutputConfig::default(), &path)
            .expect("write");
    let written = fs::read_to_string(&path).expect("read back");
    assert_eq!(receipt.bytes, written.len());
    assert_eq!(values(&written)[4], "1.0");
}

#[test]
fn huge_likelihood_is_printed_unrounded() {
    let global = GlobalResult {
        l: 1e305,
        l_ref: Some(2.5),
        ..GlobalResult::default()
    };
    let block = render_results_slha(&[], &global, &OutputConfig::default()).expect("render");
    assert_eq!(values(&block), vec!["1e305", "0", "2.5"]);
}

#[test]
fn out_of_range_decimals_are_rejected_before_rendering() {
    let global = GlobalResult {
        l: 0.0,
        l_ref: Some(2.5),
        fit_ndf: Some(1),
        dbversion: Some("22.x".into()),
    };
    let config = OutputConfig {
        slha_decimals: 400,
        ..OutputConfig::default()
    };
    let err = render_results_slha(&[], &global, &config).expect_err("plain");
    assert_eq!(err.info().map(|info| info.code.as_str()), Some("lilith.config"));
    let err = render_results_slha_pvalue(&[], &global, &config).expect_err("pvalue");
    assert_eq!(err.info().map(|info| info.code.as_str()), Some("lilith.config"));

    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("results.slha");
    let writer = ResultWriter::default().with_config(config);
    assert!(writer.results_slha(&[], &global, &path).is_err());
    assert!(!path.exists());
}
