// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

use std::fmt::{self, Display, Formatter};

use crate::filter::PointId;

/// A WHERE-clause expression.
///
/// The variant set is closed: lowering matches exhaustively, so adding a
/// predicate form forces a compile-time-visible gap there.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
	/// `field OP value`
	Comparison {
		field: FieldPath,
		op: CompareOp,
		value: Literal,
	},
	/// `field IN (...)` / `field NOT IN (...)`
	Membership {
		field: FieldPath,
		negated: bool,
		values: Vec<Literal>,
	},
	/// `field BETWEEN low AND high` / `field NOT BETWEEN low AND high`
	RangeBetween {
		field: FieldPath,
		negated: bool,
		low: Literal,
		high: Literal,
	},
	/// `field IS NULL` / `field IS NOT NULL`
	NullCheck { field: FieldPath, is_not: bool },
	/// `field IS EMPTY` / `field = []`
	EmptyCheck { field: FieldPath },
	/// `field LIKE 'pattern'`
	TextMatch { field: FieldPath, pattern: String },
	/// `COUNT(field) OP value`
	Count {
		field: FieldPath,
		op: CompareOp,
		value: Literal,
	},
	/// `COUNT(field) BETWEEN low AND high`
	CountBetween {
		field: FieldPath,
		low: Literal,
		high: Literal,
	},
	/// Lookup by point id. Never produced by the parser; leaf lowering
	/// reroutes predicates on the reserved field `id` through this form.
	IdLookup { negated: bool, ids: Vec<PointId> },
	And(Box<Expr>, Box<Expr>),
	Or(Box<Expr>, Box<Expr>),
	Not(Box<Expr>),
}

/// One segment of a field path. `projected` marks the `[]` array suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
	pub name: String,
	pub projected: bool,
}

/// A dotted payload field path, e.g. `country.cities[].population`.
///
/// Immutable once constructed; equality and hashing follow the serialized
/// dot-joined form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
	segments: Vec<Segment>,
}

impl FieldPath {
	pub fn new(segments: Vec<Segment>) -> Self {
		Self { segments }
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// The serialized form used as the condition key.
	pub fn key(&self) -> String {
		self.to_string()
	}

	/// True for the reserved identifier `id`: a single, non-projected,
	/// case-insensitive segment.
	pub fn is_id(&self) -> bool {
		match self.segments.as_slice() {
			[segment] => !segment.projected && segment.name.eq_ignore_ascii_case("id"),
			_ => false,
		}
	}
}

impl Display for FieldPath {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		for (index, segment) in self.segments.iter().enumerate() {
			if index > 0 {
				f.write_str(".")?;
			}
			f.write_str(&segment.name)?;
			if segment.projected {
				f.write_str("[]")?;
			}
		}
		Ok(())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
	Eq,
	Neq,
	Gt,
	Gte,
	Lt,
	Lte,
}

impl CompareOp {
	pub const fn as_str(&self) -> &'static str {
		match self {
			CompareOp::Eq => "=",
			CompareOp::Neq => "!=",
			CompareOp::Gt => ">",
			CompareOp::Gte => ">=",
			CompareOp::Lt => "<",
			CompareOp::Lte => "<=",
		}
	}
}

impl Display for CompareOp {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A literal value as written in the expression. The parser only records
/// the lexical shape; the lowering pass decides the backend-native type.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Text(String),
	Number(Number),
	Bool(bool),
	Null,
}

impl Display for Literal {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Literal::Text(text) => write!(f, "'{}'", text),
			Literal::Number(number) => write!(f, "{}", number),
			Literal::Bool(true) => f.write_str("TRUE"),
			Literal::Bool(false) => f.write_str("FALSE"),
			Literal::Null => f.write_str("NULL"),
		}
	}
}

/// A numeric literal, integer or floating. Integers keep full `i64`
/// precision through lowering and serialization.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Number {
	Int(i64),
	Float(f64),
}

impl Display for Number {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Number::Int(value) => write!(f, "{}", value),
			Number::Float(value) => write!(f, "{}", value),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn segment(name: &str, projected: bool) -> Segment {
		Segment {
			name: name.to_string(),
			projected,
		}
	}

	#[test]
	fn test_field_path_display() {
		let path = FieldPath::new(vec![
			segment("country", false),
			segment("cities", true),
			segment("population", false),
		]);
		assert_eq!(path.to_string(), "country.cities[].population");
	}

	#[test]
	fn test_field_path_is_id() {
		assert!(FieldPath::new(vec![segment("id", false)]).is_id());
		assert!(FieldPath::new(vec![segment("ID", false)]).is_id());
		assert!(!FieldPath::new(vec![segment("id", true)]).is_id());
		assert!(!FieldPath::new(vec![segment("user", false), segment("id", false)]).is_id());
		assert!(!FieldPath::new(vec![segment("identifier", false)]).is_id());
	}
}
