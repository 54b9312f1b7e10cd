//! Integration tests for the K-map minimizer
//!
//! These tests exercise complete workflows: reading cells from files,
//! minimizing in both forms, the JSON wire format and the explanation
//! boundary.

use kmap_logic::*;
use std::io::{self, Write};
use tempfile::NamedTempFile;

// File input

#[test]
fn test_cells_from_file() -> io::Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "# four corners")?;
    writeln!(file, "1, 0, 0, 1   # row A'B' in index order")?;
    writeln!(file, "0 0 0 0")?;
    writeln!(file, "1 0 X 0")?;
    writeln!(file, "0 0 X 0")?;
    file.flush()?;

    let reader = io::BufReader::new(std::fs::File::open(file.path())?);
    let cells = read_cells(reader)?;
    assert_eq!(cells.len(), 16, "All 16 cells should be read");

    let result = simplify(&cells, Mode::Sop)?;
    assert_eq!(result.minterms, vec![0, 3, 8]);
    assert_eq!(result.dontcares, vec![10, 14]);
    assert_eq!(result.simplified_expression, "B'C'D' + A'B'CD");
    Ok(())
}

#[test]
fn test_invalid_file_content_is_invalid_input() -> io::Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "1 0 1 Y")?;
    file.flush()?;

    let reader = io::BufReader::new(std::fs::File::open(file.path())?);
    let err = read_cells(reader).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    assert!(err.to_string().contains("index 3"), "message: {}", err);
    Ok(())
}

// Complete workflows

#[test]
fn test_sop_and_pos_of_same_map() -> io::Result<()> {
    // F = m(0, 1, 2, 5, 8, 9, 10)
    let cells = parse_cells("1110 0100 1110 0000")?;
    let sop = simplify(&cells, Mode::Sop)?;
    assert_eq!(sop.simplified_expression, "B'D' + B'C' + A'C'D");

    let pos = simplify(&cells, Mode::Pos)?;
    assert_eq!(pos.maxterms, vec![3, 4, 6, 7, 11, 12, 13, 14, 15]);
    assert_eq!(pos.simplified_expression, "(C' + D')(B' + D)(A' + B')");
    Ok(())
}

#[test]
fn test_engine_with_custom_config() -> io::Result<()> {
    let engine = Engine::new(
        KmapConfig::new()
            .with_palette(["one", "two"])
            .with_lenient_variable_count(true),
    );
    // 6 cells, read as the start of a 4-variable map
    let result = engine.simplify(&parse_cells("110011")?, Mode::Sop)?;
    assert_eq!(result.num_vars, 4);
    assert_eq!(result.minterms, vec![0, 1, 4, 5]);
    assert_eq!(result.simplified_expression, "A'C'");
    assert!(result.groups.iter().all(|g| g.color_tag == "one"));
    Ok(())
}

#[test]
fn test_errors_convert_to_io() {
    let err: io::Error = simplify(&[Cell::One; 3], Mode::Sop).unwrap_err().into();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

    let err: io::Error = "NAND".parse::<Mode>().unwrap_err().into();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

    let err: io::Error = KmapError::NoPriorResult.into();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

// Wire format

#[test]
fn test_request_round_trip() -> io::Result<()> {
    let request: SimplifyRequest = serde_json::from_str(
        r#"{"map": ["1","0","0","1","1","0","0","1"], "type": "sop"}"#,
    )?;
    let result = Engine::default().simplify_request(&request)?;
    assert_eq!(result.simplified_expression, "B'C' + BC");

    let json = result.to_json()?;
    let decoded: Minimization = serde_json::from_str(&json)?;
    assert_eq!(decoded, result, "Result should survive a JSON round trip");
    Ok(())
}

#[test]
fn test_request_rejects_bad_mode_first() {
    let request: SimplifyRequest =
        serde_json::from_str(r#"{"map": ["1", "Q"], "type": "NOR"}"#).unwrap();
    assert_eq!(
        Engine::default().simplify_request(&request).unwrap_err(),
        KmapError::InvalidMode {
            mode: "NOR".into()
        }
    );
}

#[test]
fn test_minimal_wire_record_decodes() {
    // Records from producers that omit the extra fields still decode
    let json = r#"{
        "simplified_expression": "A",
        "original_expression": "AB' + AB",
        "minterms": [2, 3],
        "maxterms": [0, 1],
        "dontcares": [],
        "groups": [],
        "mode": "SOP"
    }"#;
    let result: Minimization = serde_json::from_str(json).unwrap();
    assert_eq!(result.num_vars, 0);
    assert!(result.implicants.is_empty());
    assert_eq!(result.active_terms(), &[2, 3]);
}

// Explanation boundary

struct Echo;

impl Explainer for Echo {
    fn explain(&self, result: &Minimization) -> Result<String, ExplainError> {
        Ok(format!("{} groups", result.implicants.len()))
    }
}

#[test]
fn test_explains_latest_result_only() -> io::Result<()> {
    let mut slot = ResultSlot::new();
    assert_eq!(
        explain_latest(&slot, &Echo).unwrap_err(),
        KmapError::NoPriorResult
    );

    slot.store(simplify(&parse_cells("1001")?, Mode::Sop)?);
    assert_eq!(explain_latest(&slot, &Echo)?, "2 groups");

    slot.store(simplify(&parse_cells("1100")?, Mode::Sop)?);
    assert_eq!(explain_latest(&slot, &Echo)?, "1 groups");

    let prompt = explain_latest(&slot, &PromptExplainer)?;
    assert!(prompt.contains("Simplified Expression: A'"));
    Ok(())
}
