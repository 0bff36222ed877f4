#![allow(dead_code)]

use grille::{CellValue, JsonAdapter};

pub type Table = Vec<Vec<CellValue>>;

fn table<const N: usize>(rows: Vec<[CellValue; N]>) -> Table {
    rows.into_iter().map(Vec::from).collect()
}

fn t(s: &str) -> CellValue {
    CellValue::from(s)
}

fn n(v: f64) -> CellValue {
    CellValue::from(v)
}

const BLANK: CellValue = CellValue::Absent;

/// The reference workbook: every sheet format, typed arrays, a blank
/// annotation column and two key/value sheets merged into one path.
pub fn sample_sheets() -> Vec<(&'static str, Table)> {
    let meta = table(vec![
        [t("name"), t("format"), t("collection")],
        [t("arrayCollection"), t("array"), t("arrayCollection")],
        [t("hashCollection"), t("hash"), t("hashCollection")],
        [t("keyvalueCollection"), t("keyvalue"), t("keyvalueCollection")],
        [t("arrayMerge"), t("array"), t("arrayMerge")],
        [t("settingsBase"), t("keyvalue"), t("config.settings")],
        [t("settingsOverride"), t("keyvalue"), t("config.settings")],
    ]);

    let array_header = [
        t("id"),
        t("bool"),
        t("floatArray"),
        t("boolArray"),
        t("stringArray"),
        BLANK,
    ];
    let array_types = [
        t("integer"),
        t("boolean"),
        t("array.float"),
        t("array.boolean"),
        t("array.string"),
        t("designer notes"),
    ];
    let array_row = |id: f64, flag: &str| {
        [
            n(id),
            t(flag),
            t("[1,3,4]"),
            t("[true,false,false]"),
            t(r#"["a","b","c"]"#),
            t("free text"),
        ]
    };

    let array_collection = table(vec![
        array_header.clone(),
        array_types.clone(),
        array_row(0.0, "TRUE"),
        array_row(1.0, "FALSE"),
        array_row(2.0, "TRUE"),
        array_row(3.0, "FALSE"),
    ]);

    let array_merge = table(vec![
        array_header,
        array_types,
        array_row(1.0, "FALSE"),
        array_row(2.0, "FALSE"),
        array_row(3.0, "FALSE"),
        array_row(4.0, "FALSE"),
        array_row(5.0, "TRUE"),
    ]);

    let hash_collection = table(vec![
        [t("id"), t("atk"), t("def"), t("critical")],
        [t("string"), t("integer"), t("integer"), t("float")],
        [t("bronze_sword"), n(0.0), n(0.0), n(0.1)],
        [t("silver_sword"), n(1.0), n(1.0), n(0.2)],
        [t("gold_sword"), n(2.5), t("2"), t("0.3")],
    ]);

    let keyvalue_collection = table(vec![
        [t("key"), t("type"), t("value")],
        [t("FLOAT"), t("float"), t("0.1")],
        [t("INTEGER"), t("integer"), t("10")],
        [t("ARRAY_INTEGER"), t("array.integer"), t("[1,2,3]")],
        [t("STRING"), t("string"), t("test")],
    ]);

    let settings_base = table(vec![
        [t("key"), t("type"), t("value")],
        [t("volume"), t("float"), n(0.8)],
        [t("fullscreen"), t("boolean"), t("FALSE")],
    ]);

    let settings_override = table(vec![
        [t("key"), t("type"), t("value")],
        [t("fullscreen"), t("boolean"), t("TRUE")],
        [t("language"), t("string"), t("en")],
    ]);

    vec![
        ("meta", meta),
        ("arrayCollection", array_collection),
        ("hashCollection", hash_collection),
        ("keyvalueCollection", keyvalue_collection),
        ("arrayMerge", array_merge),
        ("settingsBase", settings_base),
        ("settingsOverride", settings_override),
    ]
}

/// Load `sheets` into an in-memory workbook, one row per table row.
pub fn json_workbook(sheets: &[(&str, Table)]) -> JsonAdapter {
    let mut wb = JsonAdapter::new();
    for (name, rows) in sheets {
        wb.add_sheet(name);
        for row in rows {
            wb.push_row(name, row.iter().cloned());
        }
    }
    wb
}

pub fn sample_workbook() -> JsonAdapter {
    json_workbook(&sample_sheets())
}

/// Replace one sheet's table in a sheet list.
pub fn with_sheet(
    mut sheets: Vec<(&'static str, Table)>,
    name: &'static str,
    rows: Table,
) -> Vec<(&'static str, Table)> {
    match sheets.iter_mut().find(|(n, _)| *n == name) {
        Some(slot) => slot.1 = rows,
        None => sheets.push((name, rows)),
    }
    sheets
}
