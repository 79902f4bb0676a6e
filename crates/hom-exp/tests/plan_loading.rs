use std::fs;

use hom_core::{Distribution, HomError, StreamPolicy};
use hom_exp::serde::to_yaml_string;
use hom_exp::{load_plan, SweepPlan};
use tempfile::tempdir;

#[test]
fn partial_yaml_takes_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.yaml");
    fs::write(
        &path,
        "distributions: [2]\nsnr_levels: [0.0, 25.0]\nstream_policy: per-combination\nconcurrency: 4\n",
    )
    .unwrap();
    let plan = load_plan(&path).unwrap();
    assert_eq!(plan.distributions, vec![Distribution::Exponential]);
    assert_eq!(plan.snr_levels, vec![0.0, 25.0]);
    assert_eq!(plan.seed, 42);
    assert_eq!(plan.stream_policy, StreamPolicy::PerCombination);
    assert_eq!(plan.concurrency, 4);
    assert_eq!(plan.geometry.cell_size, 256);
    assert_eq!(plan.means, vec![44.0, 88.0, 132.0, 176.0, 220.0]);
    assert_eq!(plan.acceptable_error, 0.05);
}

#[test]
fn json_and_yaml_describe_the_same_plan() {
    let dir = tempdir().unwrap();
    let plan = SweepPlan {
        seed: 9,
        noise_offset: 128.0,
        ..SweepPlan::default()
    };
    let yaml = dir.path().join("plan.yml");
    let json = dir.path().join("plan.json");
    fs::write(&yaml, to_yaml_string(&plan).unwrap()).unwrap();
    fs::write(&json, serde_json::to_vec(&plan).unwrap()).unwrap();
    assert_eq!(load_plan(&yaml).unwrap(), plan);
    assert_eq!(load_plan(&json).unwrap(), plan);
}

fn load_err(name: &str, body: &str) -> HomError {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    load_plan(&path).unwrap_err()
}

#[test]
fn invalid_plans_are_config_errors() {
    let cases = [
        ("geometry:\n  rows: 0\n", "geometry-grid"),
        ("geometry:\n  cell_size: 256\n  active_size: 227\n", "geometry-border"),
        ("means: [1.0, 2.0]\n", "plan-parameters"),
        ("spreads: [0.5, -1.0, 1.5, 2.0, 2.5]\n", "plan-spreads"),
        ("snr_levels: []\n", "plan-snr-levels"),
        ("acceptable_error: 0.0\n", "plan-threshold"),
        ("concurrency: 0\n", "plan-concurrency"),
        ("distributions: [0, 7]\nstrict_distributions: true\n", "unknown-distribution"),
    ];
    for (body, code) in cases {
        match load_err("plan.yaml", body) {
            HomError::Config(info) => assert_eq!(info.code, code, "{body}"),
            other => panic!("{body}: unexpected {other:?}"),
        }
    }
}

#[test]
fn unknown_distributions_pass_without_strict_mode() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");
    fs::write(&path, r#"{"distributions": [0, 7]}"#).unwrap();
    let plan = load_plan(&path).unwrap();
    assert_eq!(plan.distributions[1], Distribution::Unknown(7));
}

#[test]
fn format_and_file_errors() {
    assert!(matches!(load_err("plan.toml", "seed = 1"), HomError::Config(_)));
    assert!(matches!(load_err("plan.yaml", "seed: [unclosed"), HomError::Serde(_)));
    assert!(matches!(load_err("plan.json", "{"), HomError::Serde(_)));
    let dir = tempdir().unwrap();
    assert!(matches!(
        load_plan(&dir.path().join("missing.yaml")),
        Err(HomError::Io(_))
    ));
}
