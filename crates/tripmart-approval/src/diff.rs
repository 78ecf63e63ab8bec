//! Field-level diff between a current record and a candidate
//! change-set.
//!
//! Pure and synchronous: no I/O happens here. Candidate entries with
//! a JSON null value are treated as "not requested" and skipped —
//! explicit nulling of a field is not supported through this path.

use serde_json::{Map, Value};
use tracing::warn;

use crate::fields;

/// Which field-naming convention the candidate uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldNaming {
    /// Vendor-profile domain: camelCase candidates translated through
    /// the static field table (unknown names pass through).
    Profile,
    /// Service domain: candidate names are already internal.
    Internal,
}

/// A populated diff: the minimal change-set plus the parallel
/// snapshot of current values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    /// Internal field name → value at submission time. JSON null when
    /// the field was absent from the current record.
    pub current_data: Map<String, Value>,
    /// Internal field name → proposed value.
    pub requested_data: Map<String, Value>,
    /// External names of the changed fields, in diff order.
    pub changed_fields: Vec<String>,
}

/// Outcome of a diff. `Unchanged` is a distinct result, not an empty
/// diff: callers must not create a request or emit a message for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    Unchanged,
    Changed(FieldDiff),
}

/// Compare candidate values against the current record and collect
/// the fields that actually differ.
///
/// Equality is structural (`serde_json::Value` equality), so arrays
/// and objects compare by value. A candidate field absent from the
/// current record counts as changed, with a null snapshot entry.
pub fn compute_diff(
    current: &Map<String, Value>,
    candidate: &Map<String, Value>,
    naming: FieldNaming,
) -> DiffOutcome {
    let mut diff = FieldDiff {
        current_data: Map::new(),
        requested_data: Map::new(),
        changed_fields: Vec::new(),
    };

    for (external, value) in candidate {
        if value.is_null() {
            continue;
        }

        let internal = match naming {
            FieldNaming::Profile => {
                if !fields::is_known(external) {
                    warn!(field = %external, "unmapped field passed through");
                }
                fields::resolve_internal(external)
            }
            FieldNaming::Internal => external.as_str(),
        };

        let current_value = current.get(internal);
        if current_value == Some(value) {
            continue;
        }

        diff.current_data.insert(
            internal.to_string(),
            current_value.cloned().unwrap_or(Value::Null),
        );
        diff.requested_data
            .insert(internal.to_string(), value.clone());
        diff.changed_fields.push(external.clone());
    }

    if diff.changed_fields.is_empty() {
        DiffOutcome::Unchanged
    } else {
        DiffOutcome::Changed(diff)
    }
}
