//! Tests for the position report.

use tictree::Analysis;
use tictree_core::{Board, Tally};

#[test]
fn test_empty_board_report() {
    let analysis = Analysis::of(Board::new()).unwrap();
    assert_eq!(analysis.tally(), Tally::new(24_096, 12_432, 16_064));
    assert_eq!(analysis.best(), Some(4));
    assert_eq!(analysis.moves().len(), 9);
}

#[test]
fn test_json_report() {
    let analysis = Analysis::of("....X....".parse().unwrap()).unwrap();
    let mut out = Vec::new();
    analysis.write_json(&mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["board"], "....X....");
    assert_eq!(value["to_move"], "O");
    assert_eq!(value["best"], 0);
    assert_eq!(value["tally"]["x_wins"], 1_504);
    assert_eq!(value["moves"][0]["cell"], 0);
    assert_eq!(value["moves"][0]["tally"]["o_wins"], 66);
    assert_eq!(value["moves"].as_array().unwrap().len(), 8);
}

#[test]
fn test_table_report_marks_best_move() {
    let analysis = Analysis::of(Board::new()).unwrap();
    let mut out = Vec::new();
    analysis.write_table(&mut out).unwrap();
    let table = String::from_utf8(out).unwrap();

    assert!(table.starts_with("Position ......... (X to move)\n"));
    assert!(table.contains("Games: 52592 (X 24096, O 12432, tie 16064)"));
    let best: Vec<&str> = table.lines().filter(|l| l.ends_with(" *")).collect();
    assert_eq!(best.len(), 1);
    assert!(best[0].trim_start().starts_with("4 "));
}

#[test]
fn test_finished_position_has_no_moves() {
    let analysis = Analysis::of("XOXXOOOXX".parse().unwrap()).unwrap();
    assert_eq!(analysis.tally(), Tally::tie());
    assert_eq!(analysis.best(), None);

    let mut out = Vec::new();
    analysis.write_table(&mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().ends_with("No moves remain\n"));
}

#[test]
fn test_unreachable_position_is_rejected() {
    assert!(Analysis::of("XXX......".parse().unwrap()).is_err());
}
