// Integration test for the calamine backend.
// Run with: `cargo test -p grille-io --features calamine --test calamine`

use crate::common::build_workbook;
use grille_io::{CalamineAdapter, CellValue, IoError, SpreadsheetReader, sheet_to_rows};

#[test]
fn calamine_reads_typed_cells_at_sheet_coordinates() {
    let path = build_workbook(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sh.get_cell_mut((1, 1)).set_value_string("id");
        sh.get_cell_mut((2, 1)).set_value_string("flag");
        sh.get_cell_mut((3, 1)).set_value_string("ratio");
        sh.get_cell_mut((1, 2)).set_value_number(3);
        sh.get_cell_mut((2, 2)).set_value_bool(true);
        sh.get_cell_mut((3, 2)).set_value_number(0.25);
    });

    let mut backend = CalamineAdapter::open_path(&path).expect("open via calamine");
    assert_eq!(backend.sheet_names().unwrap(), vec!["Sheet1"]);

    let data = backend.read_sheet("Sheet1").unwrap();
    assert_eq!(data.get(1, 1), Some(&CellValue::from("id")));
    assert_eq!(data.get(2, 1), Some(&CellValue::Number(3.0)));
    assert_eq!(data.get(2, 2), Some(&CellValue::Boolean(true)));
    assert_eq!(data.get(2, 3), Some(&CellValue::Number(0.25)));

    let rows = sheet_to_rows(&data);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["id", "flag", "ratio"]);
}

#[test]
fn calamine_offsets_ranges_that_do_not_start_at_a1() {
    let path = build_workbook(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        // C3 header, C4 value
        sh.get_cell_mut((3, 3)).set_value_string("name");
        sh.get_cell_mut((3, 4)).set_value_string("bronze_sword");
    });

    let mut backend = CalamineAdapter::open_path(&path).unwrap();
    let data = backend.read_sheet("Sheet1").unwrap();
    assert_eq!(data.get(3, 3), Some(&CellValue::from("name")));
    assert_eq!(data.get(4, 3), Some(&CellValue::from("bronze_sword")));
}

#[test]
fn calamine_blank_header_becomes_empty_column() {
    let path = build_workbook(|book| {
        let sh = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sh.get_cell_mut((1, 1)).set_value_string("key");
        sh.get_cell_mut((3, 1)).set_value_string("value");
        sh.get_cell_mut((1, 2)).set_value_string("A");
        sh.get_cell_mut((2, 2)).set_value_string("note");
        sh.get_cell_mut((3, 2)).set_value_string("1");
    });

    let mut backend = CalamineAdapter::open_path(&path).unwrap();
    let rows = sheet_to_rows(&backend.read_sheet("Sheet1").unwrap());
    assert_eq!(
        rows[0].keys().collect::<Vec<_>>(),
        vec!["key", "__EMPTY", "value"]
    );
}

#[test]
fn calamine_missing_sheet_is_reported_by_name() {
    let path = build_workbook(|_| {});
    let mut backend = CalamineAdapter::open_path(&path).unwrap();
    assert!(!backend.has_sheet("meta").unwrap());
    match backend.read_sheet("meta") {
        Err(IoError::SheetNotFound(name)) => assert_eq!(name, "meta"),
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn calamine_opens_from_bytes() {
    let path = build_workbook(|book| {
        let _ = book.new_sheet("meta");
    });
    let bytes = std::fs::read(&path).unwrap();
    let backend = CalamineAdapter::open_bytes(bytes).unwrap();
    assert_eq!(backend.sheet_names().unwrap(), vec!["Sheet1", "meta"]);
}
