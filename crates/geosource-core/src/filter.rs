//! The recursive record-filter tree.
//!
//! A filter is a tagged node: `TEXT` matches a column against a search
//! string, `GEO` matches by proximity to a placed marker or containment in a
//! turf polygon, and `MULTI` combines an ordered list of child filters with
//! a boolean operator. Trees nest through `MULTI` with no depth limit.
//!
//! Evaluation happens entirely on the server: `AND` means every child must
//! match, `OR` means at least one must. On the wire the whole tree travels
//! as a single JSON-encoded string in the `filter` query parameter, children
//! included — there is no separate framing per level.

use serde::{Deserialize, Serialize};

/// Boolean combinator for a `MULTI` filter node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanOperator {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl BooleanOperator {
    /// The wire constant for this operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl std::fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the recursive predicate tree used to query records.
///
/// The `type` discriminant selects the variant. The source contract is loose:
/// producers may attach fields irrelevant to a node's type, and evaluators
/// treat those as absent. Decoding mirrors that by ignoring unknown keys
/// instead of rejecting the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RecordFilter {
    /// Match `column` against a free-text `search` string.
    #[serde(rename = "TEXT", rename_all = "camelCase")]
    Text {
        column: String,
        search: String,
        /// Human-readable label shown by UIs; not evaluated.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        /// Restricts the predicate to records from one data source.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_source_id: Option<String>,
        /// Restricts the predicate to a single record.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        record_id: Option<String>,
    },

    /// Geographic predicate: proximity (`distance` metres around
    /// `placed_marker`) or containment in a `turf` polygon.
    ///
    /// The contract does not force exactly one of the two forms; a node
    /// carrying both (or neither) is still well-formed and the server
    /// decides how to treat it.
    #[serde(rename = "GEO", rename_all = "camelCase")]
    Geo {
        /// Radius in metres around the referenced marker.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        distance: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placed_marker: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        turf: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_source_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        record_id: Option<String>,
    },

    /// Combines `children` in list order with `operator`.
    #[serde(rename = "MULTI", rename_all = "camelCase")]
    Multi {
        #[serde(default)]
        operator: BooleanOperator,
        #[serde(default)]
        children: Vec<RecordFilter>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl RecordFilter {
    /// A `TEXT` node matching `column` against `search`.
    #[must_use]
    pub fn text(column: impl Into<String>, search: impl Into<String>) -> Self {
        Self::Text {
            column: column.into(),
            search: search.into(),
            label: None,
            data_source_id: None,
            record_id: None,
        }
    }

    /// A `GEO` node matching records within `distance` metres of a placed
    /// marker.
    #[must_use]
    pub fn within_distance(distance: f64, placed_marker: impl Into<String>) -> Self {
        Self::Geo {
            distance: Some(distance),
            placed_marker: Some(placed_marker.into()),
            turf: None,
            label: None,
            data_source_id: None,
            record_id: None,
        }
    }

    /// A `GEO` node matching records contained in a turf polygon.
    #[must_use]
    pub fn within_turf(turf: impl Into<String>) -> Self {
        Self::Geo {
            distance: None,
            placed_marker: None,
            turf: Some(turf.into()),
            label: None,
            data_source_id: None,
            record_id: None,
        }
    }

    /// A `MULTI` node requiring every child to match.
    #[must_use]
    pub fn all_of(children: Vec<RecordFilter>) -> Self {
        Self::Multi {
            operator: BooleanOperator::And,
            children,
            label: None,
        }
    }

    /// A `MULTI` node requiring at least one child to match.
    #[must_use]
    pub fn any_of(children: Vec<RecordFilter>) -> Self {
        Self::Multi {
            operator: BooleanOperator::Or,
            children,
            label: None,
        }
    }

    /// Attaches a display label to this node.
    #[must_use]
    pub fn with_label(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Text { label, .. } | Self::Geo { label, .. } | Self::Multi { label, .. } => {
                *label = Some(value.into());
            }
        }
        self
    }

    /// Encodes the whole tree as the single JSON string carried by the
    /// `filter` query parameter.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_query_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_filter_round_trips_column_and_search_exactly() {
        let filter = RecordFilter::text("status", "active");
        let json = filter.to_query_value().unwrap();
        let back: RecordFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filter);
        match back {
            RecordFilter::Text { column, search, .. } => {
                assert_eq!(column, "status");
                assert_eq!(search, "active");
            }
            other => panic!("expected TEXT node, got: {other:?}"),
        }
    }

    #[test]
    fn nested_multi_decodes_children_in_original_order() {
        let json = r#"{
            "type": "MULTI",
            "operator": "AND",
            "children": [
                {"type": "TEXT", "column": "status", "search": "active"},
                {"type": "GEO", "distance": 5000, "placedMarker": "m1"}
            ]
        }"#;
        let filter: RecordFilter = serde_json::from_str(json).unwrap();
        let RecordFilter::Multi {
            operator, children, ..
        } = filter
        else {
            panic!("expected MULTI node");
        };
        assert_eq!(operator, BooleanOperator::And);
        assert_eq!(children.len(), 2);
        assert!(matches!(&children[0], RecordFilter::Text { column, .. } if column == "status"));
        assert!(matches!(
            &children[1],
            RecordFilter::Geo {
                distance: Some(d),
                placed_marker: Some(m),
                ..
            } if (*d - 5000.0).abs() < f64::EPSILON && m == "m1"
        ));
    }

    #[test]
    fn multi_children_recurse_through_further_multi_nodes() {
        let tree = RecordFilter::all_of(vec![
            RecordFilter::any_of(vec![
                RecordFilter::text("name", "cafe"),
                RecordFilter::text("name", "bar"),
            ]),
            RecordFilter::within_turf("t1"),
        ]);
        let json = tree.to_query_value().unwrap();
        let back: RecordFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
        let RecordFilter::Multi { children, .. } = back else {
            panic!("expected MULTI node");
        };
        assert!(matches!(
            &children[0],
            RecordFilter::Multi {
                operator: BooleanOperator::Or,
                ..
            }
        ));
    }

    #[test]
    fn multi_without_children_or_operator_still_decodes() {
        let filter: RecordFilter = serde_json::from_str(r#"{"type": "MULTI"}"#).unwrap();
        let RecordFilter::Multi {
            operator, children, ..
        } = filter
        else {
            panic!("expected MULTI node");
        };
        assert_eq!(operator, BooleanOperator::And);
        assert!(children.is_empty());
    }

    #[test]
    fn irrelevant_fields_on_a_node_are_ignored() {
        // Producers may send inconsistent combinations; evaluators treat
        // fields irrelevant to the node's type as absent.
        let json = r#"{"type": "TEXT", "column": "status", "search": "active", "distance": 99}"#;
        let filter: RecordFilter = serde_json::from_str(json).unwrap();
        assert!(matches!(filter, RecordFilter::Text { .. }));
    }

    #[test]
    fn operator_wire_constants() {
        assert_eq!(BooleanOperator::And.as_str(), "AND");
        assert_eq!(BooleanOperator::Or.as_str(), "OR");
        assert_eq!(
            serde_json::to_string(&BooleanOperator::Or).unwrap(),
            r#""OR""#
        );
    }

    #[test]
    fn query_value_is_a_single_json_string() {
        let filter = RecordFilter::within_distance(1000.0, "m1").with_label("nearby");
        let encoded = filter.to_query_value().unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["type"], "GEO");
        assert_eq!(value["placedMarker"], "m1");
        assert_eq!(value["label"], "nearby");
    }
}
