//! Workbook Writer
//!
//! Writes a record set as the three-sheet workbook `reader` expects.
//! Column order follows the `*_COLUMNS` constants.

use std::path::Path;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::logic::records::RecordSet;
use super::reader::WorkbookError;
use super::*;

pub fn write_workbook(records: &RecordSet, path: &Path) -> Result<(), WorkbookError> {
    let mut workbook = Workbook::new();

    fill_workbook(&mut workbook, records)
        .and_then(|_| workbook.save(path))
        .map_err(|source| WorkbookError::Write {
            path: path.display().to_string(),
            source,
        })?;

    log::info!("Workbook written to: {}", path.display());
    Ok(())
}

fn fill_workbook(workbook: &mut Workbook, records: &RecordSet) -> Result<(), XlsxError> {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    // === Operational Data ===
    let sheet = workbook.add_worksheet();
    sheet.set_name(OPERATIONAL_SHEET)?;
    write_headers(sheet, OPERATIONAL_COLUMNS)?;
    for (i, r) in records.operational.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_date_with_format(row, 0, r.date, &date_format)?;
        sheet.write_number(row, 1, r.equipment_id)?;
        sheet.write_string(row, 2, r.equipment_name.as_str())?;
        sheet.write_number(row, 3, r.temperature)?;
        sheet.write_number(row, 4, r.pressure)?;
        sheet.write_number(row, 5, r.vibration)?;
        sheet.write_number(row, 6, r.operating_hours)?;
        sheet.write_number(row, 7, r.energy_kwh)?;
    }

    // === Maintenance Data ===
    let sheet = workbook.add_worksheet();
    sheet.set_name(MAINTENANCE_SHEET)?;
    write_headers(sheet, MAINTENANCE_COLUMNS)?;
    for (i, r) in records.maintenance.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_date_with_format(row, 0, r.date, &date_format)?;
        sheet.write_number(row, 1, r.equipment_id)?;
        sheet.write_string(row, 2, r.equipment_name.as_str())?;
        sheet.write_string(row, 3, r.maintenance_type.as_str())?;
        if let Some(parts) = r.parts_label() {
            sheet.write_string(row, 4, parts)?;
        }
        if let Some(cause) = &r.failure_cause {
            sheet.write_string(row, 5, cause.as_str())?;
        }
    }

    // === Occurrence Records ===
    let sheet = workbook.add_worksheet();
    sheet.set_name(OCCURRENCE_SHEET)?;
    write_headers(sheet, OCCURRENCE_COLUMNS)?;
    for (i, r) in records.occurrences.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_date_with_format(row, 0, r.date, &date_format)?;
        sheet.write_number(row, 1, r.equipment_id)?;
        sheet.write_string(row, 2, r.equipment_name.as_str())?;
        if let Some(part) = &r.part {
            sheet.write_string(row, 3, part.as_str())?;
        }
        if let Some(symptom) = &r.observed_symptom {
            sheet.write_string(row, 4, symptom.as_str())?;
        }
        sheet.write_number(row, 5, r.failure_class)?;
    }

    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    Ok(())
}
