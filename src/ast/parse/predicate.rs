// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

//! Predicate leaves: comparisons, IN lists, BETWEEN ranges, null/empty
//! checks, LIKE patterns and COUNT constraints.

use crate::{
	ast::{
		CompareOp, Expr, FieldPath, Literal, Number, Segment,
		lex::{self, Keyword, Operator, Separator, TokenKind, unescape_text},
		parse::{Parser, unexpected},
	},
	error::SyntaxError,
};

impl Parser {
	pub(crate) fn parse_predicate(&mut self) -> Result<Expr, SyntaxError> {
		if self.consume_if_keyword(Keyword::Count) {
			return self.parse_count();
		}

		let field = self.parse_field_path()?;
		let token = self.advance("comparison operator")?;

		match token.kind {
			TokenKind::Operator(Operator::Equal) => {
				// `field = []` is the empty check, not a comparison.
				if self.consume_if_operator(Operator::OpenBracket) {
					self.consume_operator(Operator::CloseBracket)?;
					return Ok(Expr::EmptyCheck { field });
				}
				let value = self.parse_value()?;
				Ok(Expr::Comparison {
					field,
					op: CompareOp::Eq,
					value,
				})
			}
			TokenKind::Operator(operator) => {
				let op = match operator {
					Operator::NotEqual => CompareOp::Neq,
					Operator::LeftAngle => CompareOp::Lt,
					Operator::LeftAngleEqual => CompareOp::Lte,
					Operator::RightAngle => CompareOp::Gt,
					Operator::RightAngleEqual => CompareOp::Gte,
					_ => return Err(unexpected(&token, "comparison operator")),
				};
				let value = self.parse_value()?;
				Ok(Expr::Comparison {
					field,
					op,
					value,
				})
			}
			TokenKind::Keyword(Keyword::Is) => {
				let is_not = self.consume_if_keyword(Keyword::Not);
				let check = self.advance("NULL or EMPTY")?;
				match check.kind {
					TokenKind::Keyword(Keyword::Null) => Ok(Expr::NullCheck {
						field,
						is_not,
					}),
					TokenKind::Keyword(Keyword::Empty) => {
						let check = Expr::EmptyCheck { field };
						if is_not {
							Ok(Expr::Not(Box::new(check)))
						} else {
							Ok(check)
						}
					}
					_ => Err(unexpected(&check, "NULL or EMPTY")),
				}
			}
			TokenKind::Keyword(Keyword::In) => {
				let values = self.parse_value_list()?;
				Ok(Expr::Membership {
					field,
					negated: false,
					values,
				})
			}
			TokenKind::Keyword(Keyword::Between) => self.parse_between(field, false),
			TokenKind::Keyword(Keyword::Not) => {
				if self.consume_if_keyword(Keyword::In) {
					let values = self.parse_value_list()?;
					return Ok(Expr::Membership {
						field,
						negated: true,
						values,
					});
				}
				if self.consume_if_keyword(Keyword::Between) {
					return self.parse_between(field, true);
				}
				match self.peek() {
					Some(next) => Err(unexpected(next, "IN or BETWEEN")),
					None => Err(SyntaxError::UnexpectedEof {
						expected: "IN or BETWEEN".to_string(),
					}),
				}
			}
			TokenKind::Keyword(Keyword::Like) => {
				let pattern = self.advance("text literal")?;
				if pattern.kind != TokenKind::Literal(lex::Literal::Text) {
					return Err(unexpected(&pattern, "text literal"));
				}
				Ok(Expr::TextMatch {
					field,
					pattern: unescape_text(pattern.fragment()),
				})
			}
			_ => Err(unexpected(&token, "comparison operator")),
		}
	}

	/// `COUNT(field) OP value` or `COUNT(field) BETWEEN low AND high`.
	fn parse_count(&mut self) -> Result<Expr, SyntaxError> {
		self.consume_operator(Operator::OpenParen)?;
		let field = self.parse_field_path()?;
		self.consume_operator(Operator::CloseParen)?;

		if self.consume_if_keyword(Keyword::Between) {
			let low = self.parse_value()?;
			self.consume_keyword(Keyword::And)?;
			let high = self.parse_value()?;
			return Ok(Expr::CountBetween {
				field,
				low,
				high,
			});
		}

		let token = self.advance("comparison operator")?;
		let op = match token.kind {
			TokenKind::Operator(Operator::Equal) => CompareOp::Eq,
			TokenKind::Operator(Operator::NotEqual) => CompareOp::Neq,
			TokenKind::Operator(Operator::LeftAngle) => CompareOp::Lt,
			TokenKind::Operator(Operator::LeftAngleEqual) => CompareOp::Lte,
			TokenKind::Operator(Operator::RightAngle) => CompareOp::Gt,
			TokenKind::Operator(Operator::RightAngleEqual) => CompareOp::Gte,
			_ => return Err(unexpected(&token, "comparison operator")),
		};
		let value = self.parse_value()?;
		Ok(Expr::Count {
			field,
			op,
			value,
		})
	}

	fn parse_between(&mut self, field: FieldPath, negated: bool) -> Result<Expr, SyntaxError> {
		let low = self.parse_value()?;
		self.consume_keyword(Keyword::And)?;
		let high = self.parse_value()?;
		Ok(Expr::RangeBetween {
			field,
			negated,
			low,
			high,
		})
	}

	/// Dotted path of identifiers; any segment may carry a `[]` array
	/// projection suffix, e.g. `country.cities[].population`.
	pub(crate) fn parse_field_path(&mut self) -> Result<FieldPath, SyntaxError> {
		let mut segments = Vec::with_capacity(1);
		loop {
			let token = self.advance("field name")?;
			if !token.is_identifier() {
				return Err(unexpected(&token, "field name"));
			}
			let projected = if self.consume_if_operator(Operator::OpenBracket) {
				self.consume_operator(Operator::CloseBracket)?;
				true
			} else {
				false
			};
			segments.push(Segment {
				name: token.fragment().to_string(),
				projected,
			});

			if !self.consume_if_operator(Operator::Dot) {
				break;
			}
		}
		Ok(FieldPath::new(segments))
	}

	/// A literal value: quoted text, number, boolean, or NULL.
	pub(crate) fn parse_value(&mut self) -> Result<Literal, SyntaxError> {
		let token = self.advance("value")?;
		match token.kind {
			TokenKind::Literal(lex::Literal::Text) => {
				Ok(Literal::Text(unescape_text(token.fragment())))
			}
			TokenKind::Literal(lex::Literal::Number) => {
				let fragment = token.fragment();
				if let Ok(value) = fragment.parse::<i64>() {
					return Ok(Literal::Number(Number::Int(value)));
				}
				// Fractions, exponents and i64 overflow all land
				// here.
				match fragment.parse::<f64>() {
					Ok(value) if value.is_finite() => {
						Ok(Literal::Number(Number::Float(value)))
					}
					_ => Err(SyntaxError::NumberOutOfRange {
						offset: token.offset(),
						fragment: fragment.to_string(),
					}),
				}
			}
			TokenKind::Literal(lex::Literal::True) => Ok(Literal::Bool(true)),
			TokenKind::Literal(lex::Literal::False) => Ok(Literal::Bool(false)),
			TokenKind::Keyword(Keyword::Null) => Ok(Literal::Null),
			_ => Err(unexpected(&token, "value")),
		}
	}

	/// Parenthesized, comma-separated value list. May be empty; the
	/// lowering pass decides whether an empty list is acceptable.
	fn parse_value_list(&mut self) -> Result<Vec<Literal>, SyntaxError> {
		self.consume_operator(Operator::OpenParen)?;
		let mut values = Vec::new();

		if self.consume_if_operator(Operator::CloseParen) {
			return Ok(values);
		}
		loop {
			values.push(self.parse_value()?);
			if self.consume_if_separator(Separator::Comma) {
				continue;
			}
			self.consume_operator(Operator::CloseParen)?;
			break;
		}
		Ok(values)
	}

	fn consume_if_separator(&mut self, expected: Separator) -> bool {
		match self.peek() {
			Some(token) if token.is_separator(expected) => {
				let _ = self.advance(expected.as_str());
				true
			}
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ast::{lex::lex, parse::parse};

	fn parse_str(input: &str) -> Result<Expr, SyntaxError> {
		parse(lex(input).unwrap())
	}

	fn text(value: &str) -> Literal {
		Literal::Text(value.to_string())
	}

	#[test]
	fn test_equality_text() {
		let expr = parse_str("city = 'London'").unwrap();
		assert_eq!(expr, Expr::Comparison {
			field: path(&["city"]),
			op: CompareOp::Eq,
			value: text("London"),
		});
	}

	#[test]
	fn test_escaped_quote_in_value() {
		let expr = parse_str("name = 'O''Brien'").unwrap();
		assert_eq!(expr, Expr::Comparison {
			field: path(&["name"]),
			op: CompareOp::Eq,
			value: text("O'Brien"),
		});
	}

	#[test]
	fn test_not_equal_spellings() {
		for input in ["a != 1", "a <> 1"] {
			let expr = parse_str(input).unwrap();
			assert_eq!(expr, Expr::Comparison {
				field: path(&["a"]),
				op: CompareOp::Neq,
				value: Literal::Number(Number::Int(1)),
			});
		}
	}

	#[test]
	fn test_float_value() {
		let expr = parse_str("price <= 10.5").unwrap();
		assert_eq!(expr, Expr::Comparison {
			field: path(&["price"]),
			op: CompareOp::Lte,
			value: Literal::Number(Number::Float(10.5)),
		});
	}

	#[test]
	fn test_i64_overflow_falls_back_to_float() {
		let expr = parse_str("n = 99999999999999999999").unwrap();
		assert_eq!(expr, Expr::Comparison {
			field: path(&["n"]),
			op: CompareOp::Eq,
			value: Literal::Number(Number::Float(1e20)),
		});
	}

	#[test]
	fn test_in_list() {
		let expr = parse_str("status IN ('active', 'pending')").unwrap();
		assert_eq!(expr, Expr::Membership {
			field: path(&["status"]),
			negated: false,
			values: vec![text("active"), text("pending")],
		});
	}

	#[test]
	fn test_not_in_list() {
		let expr = parse_str("status NOT IN ('archived')").unwrap();
		assert_eq!(expr, Expr::Membership {
			field: path(&["status"]),
			negated: true,
			values: vec![text("archived")],
		});
	}

	#[test]
	fn test_empty_in_list_parses() {
		let expr = parse_str("status IN ()").unwrap();
		assert_eq!(expr, Expr::Membership {
			field: path(&["status"]),
			negated: false,
			values: vec![],
		});
	}

	#[test]
	fn test_between() {
		let expr = parse_str("price BETWEEN 100 AND 200").unwrap();
		assert_eq!(expr, Expr::RangeBetween {
			field: path(&["price"]),
			negated: false,
			low: Literal::Number(Number::Int(100)),
			high: Literal::Number(Number::Int(200)),
		});
	}

	#[test]
	fn test_not_between() {
		let expr = parse_str("price NOT BETWEEN 100 AND 200").unwrap();
		assert!(matches!(expr, Expr::RangeBetween {
			negated: true,
			..
		}));
	}

	#[test]
	fn test_is_null_forms() {
		assert_eq!(parse_str("a IS NULL").unwrap(), Expr::NullCheck {
			field: path(&["a"]),
			is_not: false,
		});
		assert_eq!(parse_str("a IS NOT NULL").unwrap(), Expr::NullCheck {
			field: path(&["a"]),
			is_not: true,
		});
	}

	#[test]
	fn test_empty_forms() {
		assert_eq!(parse_str("tags IS EMPTY").unwrap(), Expr::EmptyCheck {
			field: path(&["tags"]),
		});
		assert_eq!(parse_str("tags = []").unwrap(), Expr::EmptyCheck {
			field: path(&["tags"]),
		});
		assert_eq!(
			parse_str("tags IS NOT EMPTY").unwrap(),
			Expr::Not(Box::new(Expr::EmptyCheck {
				field: path(&["tags"]),
			}))
		);
	}

	#[test]
	fn test_like() {
		let expr = parse_str("name LIKE 'john'").unwrap();
		assert_eq!(expr, Expr::TextMatch {
			field: path(&["name"]),
			pattern: "john".to_string(),
		});
	}

	#[test]
	fn test_like_requires_text() {
		let err = parse_str("name LIKE 42").unwrap_err();
		assert!(matches!(err, SyntaxError::UnexpectedToken { .. }));
	}

	#[test]
	fn test_count() {
		let expr = parse_str("COUNT(comments) >= 2").unwrap();
		assert_eq!(expr, Expr::Count {
			field: path(&["comments"]),
			op: CompareOp::Gte,
			value: Literal::Number(Number::Int(2)),
		});
	}

	#[test]
	fn test_count_between() {
		let expr = parse_str("COUNT(tags) BETWEEN 1 AND 5").unwrap();
		assert_eq!(expr, Expr::CountBetween {
			field: path(&["tags"]),
			low: Literal::Number(Number::Int(1)),
			high: Literal::Number(Number::Int(5)),
		});
	}

	#[test]
	fn test_projected_path() {
		let expr = parse_str("diet[].food = 'meat'").unwrap();
		match expr {
			Expr::Comparison { field, .. } => {
				assert_eq!(field.key(), "diet[].food");
			}
			other => panic!("unexpected expr: {:?}", other),
		}
	}

	#[test]
	fn test_nested_path() {
		let expr = parse_str("country.name = 'Germany'").unwrap();
		match expr {
			Expr::Comparison { field, .. } => {
				assert_eq!(field.key(), "country.name");
			}
			other => panic!("unexpected expr: {:?}", other),
		}
	}

	#[test]
	fn test_null_value() {
		let expr = parse_str("a = NULL").unwrap();
		assert_eq!(expr, Expr::Comparison {
			field: path(&["a"]),
			op: CompareOp::Eq,
			value: Literal::Null,
		});
	}

	#[test]
	fn test_dangling_not_after_field() {
		let err = parse_str("a NOT LIKE 'x'").unwrap_err();
		assert!(matches!(err, SyntaxError::UnexpectedToken { .. }));
	}

	fn path(names: &[&str]) -> FieldPath {
		FieldPath::new(
			names.iter()
				.map(|name| Segment {
					name: name.to_string(),
					projected: false,
				})
				.collect(),
		)
	}
}
