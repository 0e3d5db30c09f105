pub mod export_xlsx;

#[cfg(test)]
pub use export_xlsx::build_workbook;
pub use export_xlsx::export_report_xlsx;
