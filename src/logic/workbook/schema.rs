//! Workbook Schema
//!
//! Raw sheets as read from disk, and their validated conversion into typed
//! records. Missing sheets, join keys or columns are fatal; nothing is
//! silently defaulted.

use calamine::{Data, DataType};
use chrono::NaiveDate;
use thiserror::Error;

use crate::logic::records::{
    MaintenanceRecord, MaintenanceType, OccurrenceRecord, OperationalRecord, RecordSet,
};
use super::*;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("sheet '{sheet}' not found in workbook")]
    MissingSheet { sheet: String },

    #[error("sheet '{sheet}' is missing join key column '{column}'")]
    MissingJoinKey { sheet: String, column: String },

    #[error("sheet '{sheet}' is missing column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("sheet '{sheet}', row {row}, column '{column}': {reason}")]
    InvalidCell {
        sheet: String,
        row: usize,
        column: String,
        reason: String,
    },
}

// ============================================================================
// RAW SHEET
// ============================================================================

static EMPTY_CELL: Data = Data::Empty;

/// One sheet: header row + data rows, cells untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Data>>,
}

impl RawSheet {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, headers: &[&str], rows: Vec<Vec<Data>>) -> Self {
        Self {
            name: name.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    /// Resolve the required columns to their positions
    fn columns(&self, required: &[&'static str]) -> Result<Columns<'_>, SchemaError> {
        let mut positions = Vec::with_capacity(required.len());
        for &column in required {
            let position = self
                .headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| self.missing(column))?;
            positions.push((column, position));
        }
        Ok(Columns { sheet: self, positions })
    }

    fn missing(&self, column: &str) -> SchemaError {
        if JOIN_KEYS.contains(&column) {
            SchemaError::MissingJoinKey { sheet: self.name.clone(), column: column.to_string() }
        } else {
            SchemaError::MissingColumn { sheet: self.name.clone(), column: column.to_string() }
        }
    }

    /// Data rows with their 1-based spreadsheet row number, blank rows skipped
    fn data_rows(&self) -> impl Iterator<Item = (usize, &[Data])> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| !cells.iter().all(|c| c.is_empty()))
            .map(|(i, cells)| (i + 2, cells.as_slice()))
    }
}

/// Column lookup for one sheet
struct Columns<'a> {
    sheet: &'a RawSheet,
    positions: Vec<(&'static str, usize)>,
}

impl<'a> Columns<'a> {
    fn cell<'r>(&self, cells: &'r [Data], column: &str) -> &'r Data {
        self.positions
            .iter()
            .find(|(name, _)| *name == column)
            .and_then(|(_, i)| cells.get(*i))
            .unwrap_or(&EMPTY_CELL)
    }

    fn invalid(&self, row: usize, column: &str, reason: impl Into<String>) -> SchemaError {
        SchemaError::InvalidCell {
            sheet: self.sheet.name.clone(),
            row,
            column: column.to_string(),
            reason: reason.into(),
        }
    }

    fn date(&self, cells: &[Data], row: usize, column: &str) -> Result<NaiveDate, SchemaError> {
        let cell = self.cell(cells, column);
        parse_date(cell).ok_or_else(|| self.invalid(row, column, format!("not a date: {:?}", cell)))
    }

    fn equipment_id(&self, cells: &[Data], row: usize, column: &str) -> Result<u32, SchemaError> {
        let cell = self.cell(cells, column);
        whole_number(cell)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| self.invalid(row, column, format!("not an equipment id: {:?}", cell)))
    }

    fn number(&self, cells: &[Data], row: usize, column: &str) -> Result<f64, SchemaError> {
        let cell = self.cell(cells, column);
        cell.as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid(row, column, format!("not a number: {:?}", cell)))
    }

    fn text(&self, cells: &[Data], column: &str) -> Option<String> {
        match self.cell(cells, column) {
            Data::Empty | Data::Error(_) => None,
            cell => cell
                .as_string()
                .or_else(|| Some(cell.to_string()))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Integer value of a cell; fractional numbers are rejected, not truncated
fn whole_number(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(v) => Some(*v),
        Data::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Some(*v as i64),
        Data::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .and_then(|v| whole_number(&Data::Float(v)))
            })
        }
        _ => None,
    }
}

/// Excel date cells, numeric serials, ISO strings and dd/mm/yyyy strings
pub fn parse_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::String(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
                .ok()
                .or_else(|| {
                    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                        .ok()
                        .map(|dt| dt.date())
                })
        }
        Data::Empty | Data::Error(_) | Data::Bool(_) => None,
        other => other.as_date(),
    }
}

// ============================================================================
// RAW WORKBOOK
// ============================================================================

/// The three sheets of one workbook
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWorkbook {
    pub operational: RawSheet,
    pub maintenance: RawSheet,
    pub occurrences: RawSheet,
}

impl RawWorkbook {
    /// Validate every sheet and convert it to typed records
    pub fn to_records(&self) -> Result<RecordSet, SchemaError> {
        Ok(RecordSet {
            operational: operational_records(&self.operational)?,
            maintenance: maintenance_records(&self.maintenance)?,
            occurrences: occurrence_records(&self.occurrences)?,
        })
    }
}

fn operational_records(sheet: &RawSheet) -> Result<Vec<OperationalRecord>, SchemaError> {
    let cols = sheet.columns(OPERATIONAL_COLUMNS)?;
    sheet
        .data_rows()
        .map(|(row, cells)| -> Result<OperationalRecord, SchemaError> {
            Ok(OperationalRecord {
                date: cols.date(cells, row, COL_DATE)?,
                equipment_id: cols.equipment_id(cells, row, COL_EQUIPMENT_ID)?,
                equipment_name: cols.text(cells, COL_EQUIPMENT).unwrap_or_default(),
                temperature: cols.number(cells, row, COL_TEMPERATURE)?,
                pressure: cols.number(cells, row, COL_PRESSURE)?,
                vibration: cols.number(cells, row, COL_VIBRATION)?,
                operating_hours: cols.number(cells, row, COL_OPERATING_HOURS)?,
                energy_kwh: cols.number(cells, row, COL_ENERGY)?,
            })
        })
        .collect()
}

fn maintenance_records(sheet: &RawSheet) -> Result<Vec<MaintenanceRecord>, SchemaError> {
    let cols = sheet.columns(MAINTENANCE_COLUMNS)?;
    sheet
        .data_rows()
        .map(|(row, cells)| -> Result<MaintenanceRecord, SchemaError> {
            let raw_type = cols.text(cells, COL_MAINTENANCE_TYPE).unwrap_or_default();
            let maintenance_type = MaintenanceType::parse(&raw_type).ok_or_else(|| {
                cols.invalid(row, COL_MAINTENANCE_TYPE, format!("unknown maintenance type '{}'", raw_type))
            })?;

            Ok(MaintenanceRecord {
                date: cols.date(cells, row, COL_DATE)?,
                equipment_id: cols.equipment_id(cells, row, COL_EQUIPMENT_ID)?,
                equipment_name: cols.text(cells, COL_EQUIPMENT).unwrap_or_default(),
                maintenance_type,
                replaced_parts: cols
                    .text(cells, COL_REPLACED_PARTS)
                    .map(|p| MaintenanceRecord::split_parts(&p))
                    .unwrap_or_default(),
                failure_cause: cols.text(cells, COL_FAILURE_CAUSE),
            })
        })
        .collect()
}

fn occurrence_records(sheet: &RawSheet) -> Result<Vec<OccurrenceRecord>, SchemaError> {
    let cols = sheet.columns(OCCURRENCE_COLUMNS)?;
    sheet
        .data_rows()
        .map(|(row, cells)| -> Result<OccurrenceRecord, SchemaError> {
            let class_cell = cols.cell(cells, COL_FAILURE_CLASS);
            let failure_class = match whole_number(class_cell) {
                Some(0) => 0,
                Some(1) => 1,
                _ if class_cell.is_empty() => 0,
                _ => return Err(cols.invalid(row, COL_FAILURE_CLASS, format!("expected 0 or 1, got {:?}", class_cell))),
            };

            Ok(OccurrenceRecord {
                date: cols.date(cells, row, COL_DATE)?,
                equipment_id: cols.equipment_id(cells, row, COL_EQUIPMENT_ID)?,
                equipment_name: cols.text(cells, COL_EQUIPMENT).unwrap_or_default(),
                part: cols.text(cells, COL_PART),
                observed_symptom: cols.text(cells, COL_SYMPTOM),
                failure_class,
            })
        })
        .collect()
}
