//! Sort criteria for record queries.

use serde::{Deserialize, Serialize};

use crate::geo::Point;

/// One ordering criterion.
///
/// When `nearest_to` is present the server orders by distance from that
/// point instead of by the column's value. The schema cannot enforce that
/// convention; it is part of the endpoint contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub column: String,
    #[serde(default)]
    pub desc: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_to: Option<Point>,
}

impl SortSpec {
    /// Ascending sort on `column`.
    #[must_use]
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            desc: false,
            nearest_to: None,
        }
    }

    /// Descending sort on `column`.
    #[must_use]
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            desc: true,
            nearest_to: None,
        }
    }

    /// Distance sort: nearest to `point` first.
    #[must_use]
    pub fn nearest_to(column: impl Into<String>, point: Point) -> Self {
        Self {
            column: column.into(),
            desc: false,
            nearest_to: Some(point),
        }
    }
}

/// Encodes a sort list as the single JSON string carried by the `sort`
/// query parameter.
///
/// List order is significant: the server applies the first entry as the
/// primary sort key and later entries as tie-breakers, in order.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn encode_sort(sort: &[SortSpec]) -> Result<String, serde_json::Error> {
    serde_json::to_string(sort)
}
