// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

//! AST to filter lowering.
//!
//! Composite nodes map onto filter groups: `AND` chains flatten into one
//! `must` group, `OR` chains into one `should` group, and `NOT` over a group
//! wraps it in a `must_not` filter. Leaf predicates lower through a polarity
//! tracker so a negated leaf becomes a `must_not` member without an extra
//! nesting level. `NOT NOT x` lowers exactly like `x`.

use tracing::instrument;

use crate::{
	ast::{CompareOp, Expr, FieldPath, Literal, Number},
	error::SemanticError,
	filter::{
		Condition, DatetimeRange, FieldCondition, Filter, HasIdCondition, IsEmptyCondition,
		IsNullCondition, Match, PayloadField, PointId, Range, Value, ValuesCount,
	},
};

#[instrument(level = "trace", skip(expr))]
pub fn lower(expr: Expr) -> Result<Filter, SemanticError> {
	match unwrap_double_not(expr) {
		expr @ Expr::And(_, _) => {
			let mut parts = Vec::new();
			flatten_and(expr, &mut parts);
			lower_and(parts)
		}
		expr @ Expr::Or(_, _) => {
			let mut parts = Vec::new();
			flatten_or(expr, &mut parts);
			lower_or(parts)
		}
		Expr::Not(inner) => lower_not(*inner),
		leaf => Ok(lower_leaf(leaf)?.into_filter()),
	}
}

/// A leaf condition with its polarity. Tracking polarity separately lets a
/// negated leaf join its enclosing group without an extra filter level.
enum Lowered {
	Positive(Condition),
	Negated(Condition),
}

impl Lowered {
	fn flip(self) -> Self {
		match self {
			Lowered::Positive(condition) => Lowered::Negated(condition),
			Lowered::Negated(condition) => Lowered::Positive(condition),
		}
	}

	fn into_filter(self) -> Filter {
		match self {
			Lowered::Positive(condition) => Filter::must(vec![condition]),
			Lowered::Negated(condition) => Filter::must_not(vec![condition]),
		}
	}

	fn into_group_member(self) -> Condition {
		match self {
			Lowered::Positive(condition) => condition,
			Lowered::Negated(condition) => {
				Condition::Filter(Filter::must_not(vec![condition]))
			}
		}
	}
}

/// Strips `NOT NOT` pairs off the head of the expression.
fn unwrap_double_not(expr: Expr) -> Expr {
	match expr {
		Expr::Not(inner) => match *inner {
			Expr::Not(inner) => unwrap_double_not(*inner),
			other => Expr::Not(Box::new(other)),
		},
		other => other,
	}
}

fn flatten_and(expr: Expr, out: &mut Vec<Expr>) {
	match unwrap_double_not(expr) {
		Expr::And(left, right) => {
			flatten_and(*left, out);
			flatten_and(*right, out);
		}
		other => out.push(other),
	}
}

fn flatten_or(expr: Expr, out: &mut Vec<Expr>) {
	match unwrap_double_not(expr) {
		Expr::Or(left, right) => {
			flatten_or(*left, out);
			flatten_or(*right, out);
		}
		other => out.push(other),
	}
}

fn lower_and(parts: Vec<Expr>) -> Result<Filter, SemanticError> {
	let mut must = Vec::with_capacity(parts.len());
	for part in parts {
		match part {
			part @ (Expr::Or(_, _) | Expr::Not(_)) => {
				must.push(Condition::Filter(lower(part)?));
			}
			leaf => must.push(lower_leaf(leaf)?.into_group_member()),
		}
	}
	Ok(Filter::must(must))
}

fn lower_or(parts: Vec<Expr>) -> Result<Filter, SemanticError> {
	let mut should = Vec::with_capacity(parts.len());
	for part in parts {
		match part {
			part @ (Expr::And(_, _) | Expr::Not(_)) => {
				should.push(Condition::Filter(lower(part)?));
			}
			leaf => should.push(lower_leaf(leaf)?.into_group_member()),
		}
	}
	Ok(Filter::should(should))
}

/// `inner` is never itself a `NOT`; the caller has stripped double
/// negations.
fn lower_not(inner: Expr) -> Result<Filter, SemanticError> {
	match inner {
		inner @ (Expr::And(_, _) | Expr::Or(_, _)) => {
			Ok(Filter::must_not(vec![Condition::Filter(lower(inner)?)]))
		}
		leaf => Ok(lower_leaf(leaf)?.flip().into_filter()),
	}
}

fn lower_leaf(leaf: Expr) -> Result<Lowered, SemanticError> {
	match leaf {
		Expr::Comparison {
			field,
			op,
			value,
		} => lower_comparison(field, op, value),
		Expr::Membership {
			field,
			negated,
			values,
		} => lower_membership(field, negated, values),
		Expr::RangeBetween {
			field,
			negated,
			low,
			high,
		} => {
			let lowered = lower_between(field, low, high)?;
			Ok(if negated {
				lowered.flip()
			} else {
				lowered
			})
		}
		Expr::NullCheck {
			field,
			is_not,
		} => {
			let condition = Condition::IsNull(IsNullCondition {
				is_null: PayloadField {
					key: field.key(),
				},
			});
			Ok(if is_not {
				Lowered::Negated(condition)
			} else {
				Lowered::Positive(condition)
			})
		}
		Expr::EmptyCheck { field } => Ok(Lowered::Positive(Condition::IsEmpty(IsEmptyCondition {
			is_empty: PayloadField {
				key: field.key(),
			},
		}))),
		Expr::TextMatch {
			field,
			pattern,
		} => Ok(Lowered::Positive(Condition::Field(FieldCondition::matches(
			field.key(),
			Match::text(pattern),
		)))),
		Expr::Count {
			field,
			op,
			value,
		} => lower_count(field, op, value),
		Expr::CountBetween {
			field,
			low,
			high,
		} => {
			let gte = count_bound(&field, "COUNT BETWEEN", low)?;
			let lte = count_bound(&field, "COUNT BETWEEN", high)?;
			Ok(Lowered::Positive(Condition::Field(FieldCondition::values_count(
				field.key(),
				ValuesCount {
					gte: Some(gte),
					lte: Some(lte),
					..ValuesCount::default()
				},
			))))
		}
		Expr::IdLookup {
			negated,
			ids,
		} => {
			let condition = Condition::HasId(HasIdCondition {
				has_id: ids,
			});
			Ok(if negated {
				Lowered::Negated(condition)
			} else {
				Lowered::Positive(condition)
			})
		}
		// Composites never reach leaf lowering; route through the group
		// lowering so the output stays well-formed regardless.
		composite => Ok(Lowered::Positive(Condition::Filter(lower(composite)?))),
	}
}

fn lower_comparison(field: FieldPath, op: CompareOp, value: Literal) -> Result<Lowered, SemanticError> {
	if field.is_id() {
		return lower_id_comparison(op, value);
	}

	match op {
		CompareOp::Eq | CompareOp::Neq => {
			let matched = match value {
				Literal::Text(text) => Value::Text(text),
				Literal::Number(Number::Int(value)) => Value::Int(value),
				Literal::Number(Number::Float(value)) => Value::Float(value),
				Literal::Bool(value) => Value::Bool(value),
				Literal::Null => {
					return Err(type_mismatch(&field, op.as_str(), &Literal::Null));
				}
			};
			let condition = Condition::Field(FieldCondition::matches(
				field.key(),
				Match::value(matched),
			));
			Ok(match op {
				CompareOp::Eq => Lowered::Positive(condition),
				_ => Lowered::Negated(condition),
			})
		}
		CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte => match value {
			Literal::Number(number) => {
				let mut range = Range::default();
				match op {
					CompareOp::Gt => range.gt = Some(number),
					CompareOp::Gte => range.gte = Some(number),
					CompareOp::Lt => range.lt = Some(number),
					_ => range.lte = Some(number),
				}
				Ok(Lowered::Positive(Condition::Field(FieldCondition::range(
					field.key(),
					range,
				))))
			}
			// Text in range position is treated as a timestamp and
			// passed through verbatim.
			Literal::Text(text) => {
				let mut range = DatetimeRange::default();
				match op {
					CompareOp::Gt => range.gt = Some(text),
					CompareOp::Gte => range.gte = Some(text),
					CompareOp::Lt => range.lt = Some(text),
					_ => range.lte = Some(text),
				}
				Ok(Lowered::Positive(Condition::Field(FieldCondition::datetime_range(
					field.key(),
					range,
				))))
			}
			other => Err(type_mismatch(&field, op.as_str(), &other)),
		},
	}
}

fn lower_membership(field: FieldPath, negated: bool, values: Vec<Literal>) -> Result<Lowered, SemanticError> {
	if field.is_id() {
		return lower_id_membership(field, negated, values);
	}

	let operator = if negated {
		"NOT IN"
	} else {
		"IN"
	};
	if values.is_empty() {
		return Err(SemanticError::EmptyList {
			field: field.key(),
		});
	}

	let mut any = Vec::with_capacity(values.len());
	for value in values {
		any.push(match value {
			Literal::Text(text) => Value::Text(text),
			Literal::Number(Number::Int(value)) => Value::Int(value),
			Literal::Number(Number::Float(value)) => Value::Float(value),
			Literal::Bool(value) => Value::Bool(value),
			Literal::Null => {
				return Err(type_mismatch(&field, operator, &Literal::Null));
			}
		});
	}

	let condition = Condition::Field(FieldCondition::matches(field.key(), Match::any(any)));
	Ok(if negated {
		Lowered::Negated(condition)
	} else {
		Lowered::Positive(condition)
	})
}

fn lower_between(field: FieldPath, low: Literal, high: Literal) -> Result<Lowered, SemanticError> {
	if field.is_id() {
		return Err(SemanticError::UnsupportedIdPredicate {
			operator: "BETWEEN".to_string(),
		});
	}

	match (low, high) {
		(Literal::Number(low), Literal::Number(high)) => {
			Ok(Lowered::Positive(Condition::Field(FieldCondition::range(
				field.key(),
				Range {
					gte: Some(low),
					lte: Some(high),
					..Range::default()
				},
			))))
		}
		(Literal::Text(low), Literal::Text(high)) => {
			Ok(Lowered::Positive(Condition::Field(FieldCondition::datetime_range(
				field.key(),
				DatetimeRange {
					gte: Some(low),
					lte: Some(high),
					..DatetimeRange::default()
				},
			))))
		}
		(low @ (Literal::Number(_) | Literal::Text(_)), high @ (Literal::Number(_) | Literal::Text(_))) => {
			Err(SemanticError::BoundMismatch {
				field: field.key(),
				low: low.to_string(),
				high: high.to_string(),
			})
		}
		(low @ (Literal::Bool(_) | Literal::Null), _) => {
			Err(type_mismatch(&field, "BETWEEN", &low))
		}
		(_, high) => Err(type_mismatch(&field, "BETWEEN", &high)),
	}
}

fn lower_count(field: FieldPath, op: CompareOp, value: Literal) -> Result<Lowered, SemanticError> {
	if field.is_id() {
		return Err(SemanticError::UnsupportedIdPredicate {
			operator: "COUNT".to_string(),
		});
	}

	let operator = format!("COUNT {}", op.as_str());
	let bound = count_bound(&field, &operator, value)?;

	let mut count = ValuesCount::default();
	match op {
		CompareOp::Eq => {
			count.gte = Some(bound);
			count.lte = Some(bound);
		}
		CompareOp::Neq => {
			// No single values_count clause expresses inequality.
			return Err(SemanticError::TypeMismatch {
				field: field.key(),
				operator,
				literal: bound.to_string(),
			});
		}
		CompareOp::Gt => count.gt = Some(bound),
		CompareOp::Gte => count.gte = Some(bound),
		CompareOp::Lt => count.lt = Some(bound),
		CompareOp::Lte => count.lte = Some(bound),
	}
	Ok(Lowered::Positive(Condition::Field(FieldCondition::values_count(field.key(), count))))
}

/// Count bounds must be non-negative integers.
fn count_bound(field: &FieldPath, operator: &str, value: Literal) -> Result<u64, SemanticError> {
	match value {
		Literal::Number(Number::Int(int)) if int >= 0 => Ok(int as u64),
		other => Err(type_mismatch(field, operator, &other)),
	}
}

fn lower_id_comparison(op: CompareOp, value: Literal) -> Result<Lowered, SemanticError> {
	match op {
		CompareOp::Eq | CompareOp::Neq => {
			let id = literal_to_point_id(value)?;
			let condition = Condition::HasId(HasIdCondition {
				has_id: vec![id],
			});
			Ok(match op {
				CompareOp::Eq => Lowered::Positive(condition),
				_ => Lowered::Negated(condition),
			})
		}
		other => Err(SemanticError::UnsupportedIdPredicate {
			operator: other.as_str().to_string(),
		}),
	}
}

fn lower_id_membership(field: FieldPath, negated: bool, values: Vec<Literal>) -> Result<Lowered, SemanticError> {
	if values.is_empty() {
		return Err(SemanticError::EmptyList {
			field: field.key(),
		});
	}

	let mut ids = Vec::with_capacity(values.len());
	for value in values {
		ids.push(literal_to_point_id(value)?);
	}

	let condition = Condition::HasId(HasIdCondition {
		has_id: ids,
	});
	Ok(if negated {
		Lowered::Negated(condition)
	} else {
		Lowered::Positive(condition)
	})
}

fn literal_to_point_id(value: Literal) -> Result<PointId, SemanticError> {
	match value {
		Literal::Number(Number::Int(int)) if int >= 0 => Ok(PointId::Num(int as u64)),
		Literal::Text(text) => Ok(PointId::Uuid(text)),
		other => Err(SemanticError::InvalidId {
			literal: other.to_string(),
		}),
	}
}

fn type_mismatch(field: &FieldPath, operator: &str, literal: &impl std::fmt::Display) -> SemanticError {
	SemanticError::TypeMismatch {
		field: field.key(),
		operator: operator.to_string(),
		literal: literal.to_string(),
	}
}
