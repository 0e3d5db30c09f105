use crate::domain::Cell;
use crate::errors::AppError;
use crate::pipeline::Report;
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

/// A workbook holding one sheet named `sheet_name`: the fixed header row,
/// then one row per ranked listing.
pub fn build_workbook(report: &Report, sheet_name: &str) -> Result<Workbook, AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    worksheet
        .set_name(sheet_name)
        .map_err(|e| AppError::XlsxError(format!("Invalid sheet name '{sheet_name}': {e}")))?;

    // Headers
    for (col, header) in report.header().iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                AppError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows
    for (i, row) in report.rows().iter().enumerate() {
        let r = (i + 1) as u32;

        for (col, cell) in row.iter().enumerate() {
            let c = col as u16;
            let written = match cell {
                Cell::Text(s) => worksheet.write_string(r, c, s.as_str()),
                Cell::Number(n) => worksheet.write_number(r, c, *n),
            };
            written.map_err(|e| {
                AppError::XlsxError(format!("Failed to write row {r}, column {c}: {e}"))
            })?;
        }
    }

    Ok(workbook)
}

/// Writes `real_estate_analysis_{date}.xlsx` into `dir`, replacing any
/// earlier export for the same day.
pub fn export_report_xlsx(report: &Report, dir: &Path, date: &str) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(format!("real_estate_analysis_{date}.xlsx"));
    let mut workbook = build_workbook(report, date)?;

    workbook
        .save(&path)
        .map_err(|e| AppError::XlsxError(format!("Failed to save workbook: {}", e)))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParsedListing, RawListing, ScoredListing};
    use crate::pipeline::StageCounts;

    fn report() -> Report {
        let raw = RawListing {
            title: "2-ком. квартира".to_string(),
            price_text: "30 000 000 ₸".to_string(),
            location_text: "Алматы, Медеуский р-н".to_string(),
            link: "https://krisha.kz/a/show/1".to_string(),
            full_text: "50 м²".to_string(),
        };
        let scored = ScoredListing {
            listing: ParsedListing::new(raw, Some(2), Some(30_000_000), Some(50.0)),
            deviation_score: 0.0,
            liquidity_score: 0.0,
            centrality_flag: 1,
            investment_score: 3.0,
        };
        Report::new(vec![scored], StageCounts::default())
    }

    #[test]
    fn workbook_serializes() {
        let mut workbook = build_workbook(&report(), "2026-10-19").unwrap();
        let buffer = workbook.save_to_buffer().unwrap();
        // xlsx is a zip archive
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn invalid_sheet_name_is_reported() {
        assert!(matches!(
            build_workbook(&report(), "bad/name"),
            Err(AppError::XlsxError(_))
        ));
    }

    #[test]
    fn export_overwrites_same_day_file() {
        let dir = std::env::temp_dir().join(format!("krisha_export_{}", std::process::id()));

        let first = export_report_xlsx(&report(), &dir, "2026-10-19").unwrap();
        let empty = Report::new(Vec::new(), StageCounts::default());
        let second = export_report_xlsx(&empty, &dir, "2026-10-19").unwrap();

        assert_eq!(first, second);
        assert!(second.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
