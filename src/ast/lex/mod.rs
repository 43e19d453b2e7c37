// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

//! WHERE-clause tokenizer.
//!
//! [`lex`] turns input text into a flat token vector; every token carries a
//! [`Span`] with its byte offset and source fragment. Keywords and boolean
//! literals are case-insensitive and word-boundary terminated.

use nom::{
	IResult, Parser,
	branch::alt,
	character::complete::multispace0,
	combinator::complete,
	multi::many0,
	sequence::preceded,
};
use nom_locate::LocatedSpan;

pub use keyword::Keyword;
pub use operator::Operator;
pub use separator::Separator;
pub use span::Span;
pub(crate) use literal::unescape_text;

use crate::{
	ast::lex::{
		identifier::parse_identifier, keyword::parse_keyword, literal::parse_literal,
		operator::parse_operator, separator::parse_separator,
	},
	error::SyntaxError,
};

mod identifier;
mod keyword;
mod literal;
mod operator;
mod separator;
mod span;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub kind: TokenKind,
	pub span: Span,
}

impl Token {
	pub fn is_identifier(&self) -> bool {
		self.kind == TokenKind::Identifier
	}
	pub fn is_keyword(&self, keyword: Keyword) -> bool {
		self.kind == TokenKind::Keyword(keyword)
	}
	pub fn is_operator(&self, operator: Operator) -> bool {
		self.kind == TokenKind::Operator(operator)
	}
	pub fn is_separator(&self, separator: Separator) -> bool {
		self.kind == TokenKind::Separator(separator)
	}
	pub fn fragment(&self) -> &str {
		self.span.fragment.as_str()
	}
	pub fn offset(&self) -> usize {
		self.span.offset
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
	Keyword(Keyword),
	Identifier,
	Literal(Literal),
	Operator(Operator),
	Separator(Separator),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Literal {
	Number,
	Text,
	True,
	False,
}

pub fn lex(input: &str) -> Result<Vec<Token>, SyntaxError> {
	let located = LocatedSpan::new(input);
	let (rest, tokens) = match many0(token).parse(located) {
		Ok(ok) => ok,
		Err(_) => {
			// many0 cannot fail; nothing consumed means the error below.
			(located, Vec::new())
		}
	};

	// Anything the grammar could not consume is a lex error at the
	// furthest position reached.
	let trailing = rest.fragment().trim_start();
	if !trailing.is_empty() {
		let skipped = rest.fragment().len() - trailing.len();
		let fragment: String =
			trailing.chars().take_while(|c| !c.is_whitespace()).collect();
		return Err(SyntaxError::UnexpectedCharacter {
			offset: rest.location_offset() + skipped,
			fragment,
		});
	}
	Ok(tokens)
}

fn token(input: LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, Token> {
	complete(preceded(
		multispace0,
		alt((parse_keyword, parse_literal, parse_identifier, parse_operator, parse_separator)),
	))
	.parse(input)
}

pub(crate) fn as_span(value: LocatedSpan<&str>) -> Span {
	Span::from(value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_keyword() {
		let tokens = lex("AND").unwrap();
		assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::And));
		assert_eq!(tokens[0].fragment(), "AND");
	}

	#[test]
	fn test_identifier() {
		let tokens = lex("my_var123").unwrap();
		assert_eq!(tokens[0].kind, TokenKind::Identifier);
		assert_eq!(tokens[0].fragment(), "my_var123");
	}

	#[test]
	fn test_number_signed() {
		let tokens = lex("-42").unwrap();
		assert_eq!(tokens.len(), 1);
		assert_eq!(tokens[0].kind, TokenKind::Literal(Literal::Number));
		assert_eq!(tokens[0].fragment(), "-42");
	}

	#[test]
	fn test_text() {
		let tokens = lex("'hello world'").unwrap();
		assert_eq!(tokens[0].kind, TokenKind::Literal(Literal::Text));
		assert_eq!(tokens[0].fragment(), "hello world");
	}

	#[test]
	fn test_skips_whitespace() {
		let tokens = lex("   AND").unwrap();
		assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::And));
		assert_eq!(tokens[0].offset(), 3);
	}

	#[test]
	fn test_comparison_sequence() {
		let tokens = lex("age >= 17").unwrap();
		assert_eq!(tokens.len(), 3);
		assert_eq!(tokens[0].kind, TokenKind::Identifier);
		assert_eq!(tokens[1].kind, TokenKind::Operator(Operator::RightAngleEqual));
		assert_eq!(tokens[2].kind, TokenKind::Literal(Literal::Number));
	}

	#[test]
	fn test_projected_path() {
		let tokens = lex("diet[].food").unwrap();
		let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
		assert_eq!(kinds, vec![
			TokenKind::Identifier,
			TokenKind::Operator(Operator::OpenBracket),
			TokenKind::Operator(Operator::CloseBracket),
			TokenKind::Operator(Operator::Dot),
			TokenKind::Identifier,
		]);
	}

	#[test]
	fn test_keyword_prefix_is_identifier() {
		let tokens = lex("android").unwrap();
		assert_eq!(tokens.len(), 1);
		assert_eq!(tokens[0].kind, TokenKind::Identifier);
	}

	#[test]
	fn test_unexpected_character() {
		let err = lex("a = 1 ; b = 2").unwrap_err();
		assert_eq!(err, SyntaxError::UnexpectedCharacter {
			offset: 6,
			fragment: ";".to_string()
		});
	}

	#[test]
	fn test_trailing_whitespace_ok() {
		let tokens = lex("a = 1   ").unwrap();
		assert_eq!(tokens.len(), 3);
	}

	// Every token class must lex when it ends the input, with no more
	// bytes following it.
	#[test]
	fn test_final_token_at_end_of_input() {
		for (input, kind) in [
			("'London'", TokenKind::Literal(Literal::Text)),
			("TRUE", TokenKind::Literal(Literal::True)),
			("FALSE", TokenKind::Literal(Literal::False)),
			("NULL", TokenKind::Keyword(Keyword::Null)),
			("42", TokenKind::Literal(Literal::Number)),
			("city", TokenKind::Identifier),
			(")", TokenKind::Operator(Operator::CloseParen)),
			(",", TokenKind::Separator(Separator::Comma)),
		] {
			let tokens = lex(input).unwrap();
			assert_eq!(tokens.last().map(|token| token.kind), Some(kind), "input: {input}");
		}
	}

	#[test]
	fn test_expression_ending_in_text_literal() {
		let tokens = lex("city = 'London'").unwrap();
		assert_eq!(tokens.len(), 3);
		assert_eq!(tokens[2].kind, TokenKind::Literal(Literal::Text));
		assert_eq!(tokens[2].fragment(), "London");
	}

	#[test]
	fn test_expression_ending_in_keyword() {
		let tokens = lex("category IS NOT NULL").unwrap();
		assert_eq!(tokens.len(), 4);
		assert_eq!(tokens[3].kind, TokenKind::Keyword(Keyword::Null));
	}

	#[test]
	fn test_expression_ending_in_boolean() {
		let tokens = lex("in_stock = TRUE").unwrap();
		assert_eq!(tokens.len(), 3);
		assert_eq!(tokens[2].kind, TokenKind::Literal(Literal::True));
	}
}
