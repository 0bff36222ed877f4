use std::path::PathBuf;

/// Build an `.xlsx` file with umya and return its path.
///
/// The temp directory is leaked on purpose so the file outlives the builder.
pub fn build_workbook(f: impl FnOnce(&mut umya_spreadsheet::Spreadsheet)) -> PathBuf {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("fixture.xlsx");
    let mut book = umya_spreadsheet::new_file();
    f(&mut book);
    umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write workbook");
    std::mem::forget(dir);
    path
}
