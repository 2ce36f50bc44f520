//! Workbook Reader
//!
//! Opens the workbook with calamine (xlsx/xls/ods) and hands back the
//! three raw sheets. Typed conversion lives in `schema`.

use std::io::{Read, Seek};
use std::path::Path;
use calamine::{open_workbook_auto, Reader, Sheets};
use thiserror::Error;

use super::schema::{RawSheet, RawWorkbook, SchemaError};
use super::{MAINTENANCE_SHEET, OCCURRENCE_SHEET, OPERATIONAL_SHEET};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("cannot open workbook '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: calamine::Error,
    },

    #[error("cannot read sheet '{sheet}': {source}")]
    Read {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("cannot write workbook '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

// ============================================================================
// LOAD
// ============================================================================

/// Read the three sheets without interpreting their cells
pub fn load_workbook(path: &Path) -> Result<RawWorkbook, WorkbookError> {
    log::info!("Loading workbook from: {}", path.display());

    let mut workbook = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let raw = RawWorkbook {
        operational: read_sheet(&mut workbook, OPERATIONAL_SHEET)?,
        maintenance: read_sheet(&mut workbook, MAINTENANCE_SHEET)?,
        occurrences: read_sheet(&mut workbook, OCCURRENCE_SHEET)?,
    };

    log::debug!(
        "Workbook rows: operational={}, maintenance={}, occurrences={}",
        raw.operational.rows.len(),
        raw.maintenance.rows.len(),
        raw.occurrences.rows.len()
    );

    Ok(raw)
}

fn read_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>, name: &str) -> Result<RawSheet, WorkbookError> {
    if !workbook.sheet_names().iter().any(|n| n == name) {
        return Err(SchemaError::MissingSheet { sheet: name.to_string() }.into());
    }

    let range = workbook.worksheet_range(name).map_err(|source| WorkbookError::Read {
        sheet: name.to_string(),
        source,
    })?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| header.iter().map(|cell| cell.to_string().trim().to_string()).collect())
        .unwrap_or_default();

    Ok(RawSheet {
        name: name.to_string(),
        headers,
        rows: rows.map(|cells| cells.to_vec()).collect(),
    })
}
