//! Tests for the engine module

use super::*;
use std::collections::BTreeSet;

fn cells_from_minterms(ones: &[u32], dontcares: &[u32], num_vars: usize) -> Vec<Cell> {
    (0..1u32 << num_vars)
        .map(|index| {
            if dontcares.contains(&index) {
                Cell::DontCare
            } else if ones.contains(&index) {
                Cell::One
            } else {
                Cell::Zero
            }
        })
        .collect()
}

fn implicant_text(result: &Minimization) -> Vec<String> {
    result.implicants.iter().map(Term::to_string).collect()
}

#[test]
fn test_corner_wraparound() {
    let cells = cells_from_minterms(&[0, 2, 8, 10], &[], 4);
    let result = simplify(&cells, Mode::Sop).unwrap();

    assert_eq!(result.simplified_expression, "B'D'");
    assert_eq!(result.original_expression, "A'B'C'D' + A'B'CD' + AB'C'D' + AB'CD'");
    assert_eq!(result.groups.len(), 4);
    let corners: BTreeSet<(usize, usize)> = result
        .groups
        .iter()
        .map(|g| (g.row_start, g.col_start))
        .collect();
    assert_eq!(corners, BTreeSet::from([(0, 0), (0, 3), (3, 0), (3, 3)]));
    for group in &result.groups {
        assert_eq!(group.group_id, 1);
        assert_eq!(group.covered_minterm_indices, vec![0, 2, 8, 10]);
        assert_eq!(group.rect().area(), 1);
    }
}

#[test]
fn test_full_two_variable_map() {
    let cells = parse_cells("1111").unwrap();
    let result = simplify(&cells, Mode::Sop).unwrap();
    assert_eq!(result.simplified_expression, "1");
    assert!(result.implicants.is_empty());
    assert!(result.groups.is_empty());
    assert_eq!(result.original_expression, "A'B' + A'B + AB' + AB");
}

#[test]
fn test_constant_cases() {
    let zeros = parse_cells("00000000").unwrap();
    let sop = simplify(&zeros, Mode::Sop).unwrap();
    assert_eq!(sop.simplified_expression, "0");
    assert_eq!(sop.original_expression, "0");
    assert!(sop.groups.is_empty());

    let pos = simplify(&zeros, Mode::Pos).unwrap();
    assert_eq!(pos.simplified_expression, "0");
    assert!(pos.implicants.is_empty());
    assert!(pos.groups.is_empty());

    let ones = parse_cells("11111111").unwrap();
    let pos = simplify(&ones, Mode::Pos).unwrap();
    assert_eq!(pos.simplified_expression, "1");
    assert_eq!(pos.original_expression, "1");
}

#[test]
fn test_pos_mode() {
    // maxterms {2, 3, 6}
    let cells = parse_cells("11001101").unwrap();
    let result = simplify(&cells, Mode::Pos).unwrap();
    assert_eq!(result.maxterms, vec![2, 3, 6]);
    assert_eq!(result.simplified_expression, "(B' + C)(A + B')");
    assert_eq!(result.groups.len(), 2);

    let first = &result.groups[0];
    assert_eq!(first.rect(), Rect { row_start: 0, row_end: 1, col_start: 3, col_end: 3 });
    assert_eq!(first.covered_minterm_indices, vec![2, 6]);

    let second = &result.groups[1];
    assert_eq!(second.rect(), Rect { row_start: 0, row_end: 0, col_start: 2, col_end: 3 });
    assert_eq!(second.group_id, 2);
    assert_eq!(second.color_tag, "border-green-500");
}

#[test]
fn test_dont_care_absorption() {
    let cells = cells_from_minterms(&[5, 7, 13], &[15], 4);
    let result = simplify(&cells, Mode::Sop).unwrap();

    assert_eq!(result.simplified_expression, "BD");
    assert_eq!(result.dontcares, vec![15]);
    assert_eq!(implicant_text(&result), vec!["-1-1"]);
    assert!(result.implicants[0].expand().contains(&15));

    let group = &result.groups[0];
    assert_eq!(group.covered_minterm_indices, vec![5, 7, 13]);
    assert_eq!(group.rect(), Rect { row_start: 1, row_end: 2, col_start: 1, col_end: 2 });
}

#[test]
fn test_idempotent_on_own_cover() {
    let cells = cells_from_minterms(&[4, 8, 10, 11, 12, 15], &[9, 14], 4);
    let first = simplify(&cells, Mode::Sop).unwrap();
    assert_eq!(first.simplified_expression, "BC'D' + AD' + AC");

    let covered: Vec<u32> = first
        .implicants
        .iter()
        .flat_map(Term::expand)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let again = simplify(&cells_from_minterms(&covered, &[], 4), Mode::Sop).unwrap();
    assert_eq!(again.implicants, first.implicants);
}

#[test]
fn test_palette_cycles_by_rank() {
    // Odd parity checkerboard: eight isolated minterms
    let ones: Vec<u32> = (0..16).filter(|m: &u32| m.count_ones() % 2 == 1).collect();
    let result = simplify(&cells_from_minterms(&ones, &[], 4), Mode::Sop).unwrap();

    assert_eq!(result.implicants.len(), 8);
    assert_eq!(result.groups.len(), 8);
    let ids: Vec<usize> = result.groups.iter().map(|g| g.group_id).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    assert_eq!(result.groups[0].color_tag, "border-red-500");
    assert_eq!(result.groups[6].color_tag, "border-red-500");
    assert_eq!(result.groups[7].color_tag, "border-green-500");
}

#[test]
fn test_custom_palette() {
    let config = KmapConfig::default().with_palette(["teal"]);
    let engine = Engine::new(config);
    let result = engine
        .simplify(&parse_cells("1001").unwrap(), Mode::Sop)
        .unwrap();
    assert!(result.groups.iter().all(|g| g.color_tag == "teal"));
    assert_eq!(result.groups.len(), 2);
}

#[test]
fn test_single_variable_map_has_no_groups() {
    let result = simplify(&parse_cells("01").unwrap(), Mode::Sop).unwrap();
    assert_eq!(result.num_vars, 1);
    assert_eq!(result.simplified_expression, "A");
    assert_eq!(implicant_text(&result), vec!["1"]);
    assert!(result.groups.is_empty());
}

#[test]
fn test_mode_is_rejected_before_cells() {
    let err = Engine::default()
        .simplify_symbols(&["1", "?", "0"], "XOR")
        .unwrap_err();
    assert_eq!(
        err,
        KmapError::InvalidMode {
            mode: Arc::from("XOR")
        }
    );
}

#[test]
fn test_unsupported_cell_count() {
    let cells = parse_cells("10101").unwrap();
    assert_eq!(
        simplify(&cells, Mode::Sop).unwrap_err(),
        KmapError::UnsupportedVariableCount { cells: 5 }
    );

    let lenient = Engine::new(KmapConfig::default().with_lenient_variable_count(true));
    let result = lenient.simplify(&cells, Mode::Sop).unwrap();
    assert_eq!(result.num_vars, 4);
    assert_eq!(result.minterms, vec![0, 2, 4]);
}

#[test]
fn test_request_wire_format() {
    let request: SimplifyRequest =
        serde_json::from_str(r#"{"map": ["1", "0", "0", "1"], "type": "pos"}"#).unwrap();
    let result = Engine::default().simplify_request(&request).unwrap();
    assert_eq!(result.mode, Mode::Pos);
    assert_eq!(result.simplified_expression, "(A + B')(A' + B)");

    let default_mode: SimplifyRequest = serde_json::from_str(r#"{"map": ["0", "1"]}"#).unwrap();
    assert_eq!(default_mode.mode, "SOP");
}

#[test]
fn test_result_json_fields() {
    let result = simplify(&parse_cells("0111").unwrap(), Mode::Sop).unwrap();
    let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(value["simplified_expression"], "B + A");
    assert_eq!(value["mode"], "SOP");
    assert_eq!(value["minterms"], serde_json::json!([1, 2, 3]));
    assert_eq!(value["groups"][0]["group_id"], 1);
    assert_eq!(value["implicants"], serde_json::json!(["-1", "1-"]));
}

#[test]
fn test_eliminated_variables_per_group() {
    let result = simplify(&cells_from_minterms(&[0, 2, 8, 10], &[], 4), Mode::Sop).unwrap();
    assert_eq!(result.eliminated_variables(1), vec!["A", "C"]);
    assert!(result.eliminated_variables(2).is_empty());
    assert!(result.eliminated_variables(0).is_empty());
    assert_eq!(result.rects_for(1).count(), 4);
}
