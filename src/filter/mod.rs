// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

//! The backend-native filter tree.
//!
//! These types serialize to the JSON filter schema the vector store accepts:
//! a [`Filter`] groups conditions under `must`, `should` and `must_not`, and
//! a condition is either a payload field constraint, a null/empty check, an
//! id lookup, or a nested filter. Empty clause vectors are omitted from the
//! serialized form.

use serde::{Deserialize, Serialize};

use crate::ast::Number;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Filter {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub must: Vec<Condition>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub should: Vec<Condition>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub must_not: Vec<Condition>,
}

impl Filter {
	pub fn must(conditions: Vec<Condition>) -> Self {
		Self {
			must: conditions,
			..Self::default()
		}
	}

	pub fn should(conditions: Vec<Condition>) -> Self {
		Self {
			should: conditions,
			..Self::default()
		}
	}

	pub fn must_not(conditions: Vec<Condition>) -> Self {
		Self {
			must_not: conditions,
			..Self::default()
		}
	}
}

/// Untagged: the serialized shape alone distinguishes the variants, so
/// `Filter` must stay last for deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
	Field(FieldCondition),
	IsNull(IsNullCondition),
	IsEmpty(IsEmptyCondition),
	HasId(HasIdCondition),
	Filter(Filter),
}

/// A constraint on one payload field. Exactly one of the optional clauses is
/// set by the lowering pass; the schema allows combining them, which the
/// count-equality lowering uses for `gte` plus `lte`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCondition {
	pub key: String,
	#[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
	pub r#match: Option<Match>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub range: Option<Range>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub datetime_range: Option<DatetimeRange>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub values_count: Option<ValuesCount>,
}

impl FieldCondition {
	fn empty(key: String) -> Self {
		Self {
			key,
			r#match: None,
			range: None,
			datetime_range: None,
			values_count: None,
		}
	}

	pub fn matches(key: String, r#match: Match) -> Self {
		Self {
			r#match: Some(r#match),
			..Self::empty(key)
		}
	}

	pub fn range(key: String, range: Range) -> Self {
		Self {
			range: Some(range),
			..Self::empty(key)
		}
	}

	pub fn datetime_range(key: String, range: DatetimeRange) -> Self {
		Self {
			datetime_range: Some(range),
			..Self::empty(key)
		}
	}

	pub fn values_count(key: String, count: ValuesCount) -> Self {
		Self {
			values_count: Some(count),
			..Self::empty(key)
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Match {
	Value { value: Value },
	Text { text: String },
	Any { any: Vec<Value> },
}

impl Match {
	pub fn value(value: Value) -> Self {
		Match::Value { value }
	}

	pub fn text(text: String) -> Self {
		Match::Text { text }
	}

	pub fn any(any: Vec<Value>) -> Self {
		Match::Any { any }
	}
}

/// A matchable payload value. Bool must precede the numeric variants and
/// Text must stay last for untagged deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Range {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lt: Option<Number>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gt: Option<Number>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gte: Option<Number>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lte: Option<Number>,
}

/// Range over RFC 3339 timestamps. Bounds pass through as written; the
/// backend parses them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatetimeRange {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lt: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gt: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gte: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lte: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValuesCount {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lt: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gt: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gte: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub lte: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsNullCondition {
	pub is_null: PayloadField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsEmptyCondition {
	pub is_empty: PayloadField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadField {
	pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HasIdCondition {
	pub has_id: Vec<PointId>,
}

/// A point id: unsigned integer or UUID-style string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
	Num(u64),
	Uuid(String),
}
