//! Snapshot - latest state per equipment

use super::builder::chronological_groups;
use super::row::FeatureRow;
use super::vector::FeatureVector;

/// Most recent feature row of one equipment, plus the last known
/// maintenance/occurrence context from its history.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<'a> {
    pub row: &'a FeatureRow,
    pub last_symptom: Option<&'a str>,
    pub last_replaced_parts: Option<&'a str>,
    pub last_failure_cause: Option<&'a str>,
}

impl<'a> Snapshot<'a> {
    pub fn equipment_id(&self) -> u32 {
        self.row.equipment_id
    }

    pub fn equipment_name(&self) -> &'a str {
        &self.row.equipment_name
    }

    pub fn vector(&self) -> FeatureVector {
        FeatureVector::from_row(self.row)
    }
}

/// One snapshot per distinct equipment id, ordered by id.
///
/// The chronologically-last row wins; on a date tie the row that came
/// later in the input wins.
pub fn latest_snapshots(rows: &[FeatureRow]) -> Vec<Snapshot<'_>> {
    chronological_groups(rows)
        .into_values()
        .filter_map(move |indices| {
            let last = *indices.last()?;
            let mut snapshot = Snapshot {
                row: &rows[last],
                last_symptom: None,
                last_replaced_parts: None,
                last_failure_cause: None,
            };

            for &i in &indices {
                let row = &rows[i];
                if let Some(symptom) = row.observed_symptom.as_deref() {
                    snapshot.last_symptom = Some(symptom);
                }
                if let Some(parts) = row.replaced_parts() {
                    snapshot.last_replaced_parts = Some(parts);
                }
                if let Some(cause) = row.failure_cause.as_deref() {
                    snapshot.last_failure_cause = Some(cause);
                }
            }

            Some(snapshot)
        })
        .collect()
}
