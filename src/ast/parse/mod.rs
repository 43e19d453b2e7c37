// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

//! Token stream to AST.
//!
//! A small Pratt parser: `AND` binds tighter than `OR`, both are
//! left-associative, prefix `NOT` and parentheses bind tighter than either.
//! Predicate leaves are handled in [`predicate`].

mod predicate;

use std::cmp::PartialOrd;

use crate::{
	ast::{
		Expr,
		lex::{Keyword, Operator, Token, TokenKind},
	},
	error::{MAX_NESTING_DEPTH, SyntaxError},
};

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub(crate) enum Precedence {
	None,
	Or,
	And,
}

pub fn parse(tokens: Vec<Token>) -> Result<Expr, SyntaxError> {
	let mut parser = Parser::new(tokens);
	let expr = parser.parse_node(Precedence::None, 0)?;

	if let Some(token) = parser.peek() {
		return Err(unexpected(token, "end of input"));
	}
	Ok(expr)
}

pub(crate) struct Parser {
	tokens: Vec<Token>,
	position: usize,
}

impl Parser {
	fn new(tokens: Vec<Token>) -> Self {
		Self {
			tokens,
			position: 0,
		}
	}

	pub(crate) fn parse_node(&mut self, precedence: Precedence, depth: usize) -> Result<Expr, SyntaxError> {
		let mut left = self.parse_prefix(depth)?;

		while !self.is_eof() {
			let current = self.current_precedence();
			if precedence >= current {
				break;
			}

			let operator = self.advance("AND or OR")?;
			// Parsing the right side at the operator's own precedence
			// keeps equal operators left-associative.
			let right = self.parse_node(current, depth)?;
			left = match operator.kind {
				TokenKind::Keyword(Keyword::And) => {
					Expr::And(Box::new(left), Box::new(right))
				}
				TokenKind::Keyword(Keyword::Or) => {
					Expr::Or(Box::new(left), Box::new(right))
				}
				_ => return Err(unexpected(&operator, "AND or OR")),
			};
		}
		Ok(left)
	}

	fn parse_prefix(&mut self, depth: usize) -> Result<Expr, SyntaxError> {
		if depth >= MAX_NESTING_DEPTH {
			let offset = self.peek().map(|token| token.offset()).unwrap_or(0);
			return Err(SyntaxError::NestingTooDeep { offset });
		}

		if self.consume_if_keyword(Keyword::Not) {
			let inner = self.parse_prefix(depth + 1)?;
			return Ok(Expr::Not(Box::new(inner)));
		}

		if self.consume_if_operator(Operator::OpenParen) {
			let node = self.parse_node(Precedence::None, depth + 1)?;
			self.consume_operator(Operator::CloseParen)?;
			return Ok(node);
		}

		self.parse_predicate()
	}

	fn current_precedence(&self) -> Precedence {
		match self.peek().map(|token| token.kind) {
			Some(TokenKind::Keyword(Keyword::And)) => Precedence::And,
			Some(TokenKind::Keyword(Keyword::Or)) => Precedence::Or,
			_ => Precedence::None,
		}
	}

	pub(crate) fn is_eof(&self) -> bool {
		self.position >= self.tokens.len()
	}

	pub(crate) fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.position)
	}

	pub(crate) fn advance(&mut self, expected: &str) -> Result<Token, SyntaxError> {
		if self.position >= self.tokens.len() {
			return Err(SyntaxError::UnexpectedEof {
				expected: expected.to_string(),
			});
		}
		let token = self.tokens[self.position].clone();
		self.position += 1;
		Ok(token)
	}

	pub(crate) fn consume_operator(&mut self, expected: Operator) -> Result<Token, SyntaxError> {
		let token = self.advance(expected.as_str())?;
		if !token.is_operator(expected) {
			return Err(unexpected(&token, expected.as_str()));
		}
		Ok(token)
	}

	pub(crate) fn consume_keyword(&mut self, expected: Keyword) -> Result<Token, SyntaxError> {
		let token = self.advance(expected.as_str())?;
		if !token.is_keyword(expected) {
			return Err(unexpected(&token, expected.as_str()));
		}
		Ok(token)
	}

	pub(crate) fn consume_if_operator(&mut self, expected: Operator) -> bool {
		match self.peek() {
			Some(token) if token.is_operator(expected) => {
				self.position += 1;
				true
			}
			_ => false,
		}
	}

	pub(crate) fn consume_if_keyword(&mut self, expected: Keyword) -> bool {
		match self.peek() {
			Some(token) if token.is_keyword(expected) => {
				self.position += 1;
				true
			}
			_ => false,
		}
	}
}

pub(crate) fn unexpected(token: &Token, expected: &str) -> SyntaxError {
	SyntaxError::UnexpectedToken {
		offset: token.offset(),
		fragment: token.fragment().to_string(),
		expected: expected.to_string(),
	}
}
