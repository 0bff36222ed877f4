// Shared test helpers (umya workbook builders)
mod common;

#[cfg(feature = "calamine")]
mod reading;
