use hom_core::{
    CellEvaluation, CellTruth, Distribution, EvaluationRecord, GroundTruthRecord, PicCoordinates,
};
use serde_json::json;

#[test]
fn ground_truth_uses_document_field_names() {
    let record = GroundTruthRecord {
        distribution: Distribution::Uniform,
        snr_db: 25.0,
        cells: vec![CellTruth {
            pic_coordinates: PicCoordinates { row: 1, col: 3 },
            theoretical_skewness: 0.0,
            theoretical_kurtosis: -1.2,
            mean: 88.0,
            std: 2.0,
        }],
    };

    let value = serde_json::to_value(&record).expect("serialize");
    assert_eq!(
        value,
        json!({
            "distribution": 1,
            "snr_db": 25.0,
            "cells": [{
                "pic_coordinates": {"row": 1, "col": 3},
                "theoretical_skewness": 0.0,
                "theoretical_kurtosis": -1.2,
                "mean": 88.0,
                "std": 2.0
            }]
        })
    );
    let decoded: GroundTruthRecord = serde_json::from_value(value).expect("deserialize");
    assert_eq!(decoded, record);
}

#[test]
fn evaluation_uses_document_field_names() {
    let raw = r#"{"cells": [{"row": 0, "column": 4, "evaluated_skewness": 0.01, "evaluated_kurtosis": -0.02}]}"#;
    let record: EvaluationRecord = serde_json::from_str(raw).expect("parse");
    assert_eq!(
        record.cells,
        vec![CellEvaluation {
            row: 0,
            column: 4,
            evaluated_skewness: 0.01,
            evaluated_kurtosis: -0.02,
        }]
    );
    assert_eq!(record.cells[0].position().col, 4);
}

#[test]
fn unknown_distribution_round_trips_as_integer() {
    let value = serde_json::to_value(Distribution::Unknown(9)).expect("serialize");
    assert_eq!(value, json!(9));
    let decoded: Distribution = serde_json::from_value(value).expect("deserialize");
    assert_eq!(decoded, Distribution::Unknown(9));
}
