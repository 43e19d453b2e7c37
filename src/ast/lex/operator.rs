// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

use nom::{
	IResult, Input, Parser,
	branch::alt,
	bytes::complete::tag,
	combinator::value,
};
use nom_locate::LocatedSpan;

use crate::ast::lex::{Token, TokenKind, as_span};

macro_rules! operator {
    (
        $( $value:ident => $tag:literal ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operator { $( $value ),* }

        impl Operator {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Operator::$value => $tag ),*
                }
            }
        }
    };
}

operator! {
	OpenParen       => "(",
	CloseParen      => ")",
	OpenBracket     => "[",
	CloseBracket    => "]",
	LeftAngle       => "<",
	LeftAngleEqual  => "<=",
	RightAngle      => ">",
	RightAngleEqual => ">=",
	Equal           => "=",
	NotEqual        => "!=",
	Dot             => ".",
}

pub(crate) fn parse_operator(input: LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, Token> {
	let start = input;

	// Two-character operators first; `<>` lexes to NotEqual as well.
	let parser = alt((
		value(Operator::LeftAngleEqual, tag("<=")),
		value(Operator::RightAngleEqual, tag(">=")),
		value(Operator::NotEqual, tag("!=")),
		value(Operator::NotEqual, tag("<>")),
		value(Operator::OpenParen, tag("(")),
		value(Operator::CloseParen, tag(")")),
		value(Operator::OpenBracket, tag("[")),
		value(Operator::CloseBracket, tag("]")),
		value(Operator::LeftAngle, tag("<")),
		value(Operator::RightAngle, tag(">")),
		value(Operator::Equal, tag("=")),
		value(Operator::Dot, tag(".")),
	));

	parser
		.map(|op| Token {
			kind: TokenKind::Operator(op),
			span: as_span(start.take(op.as_str().len())),
		})
		.parse(input)
}

#[cfg(test)]
mod tests {
	use nom_locate::LocatedSpan;

	use super::*;

	#[test]
	fn test_parse_operator_invalid() {
		let result = parse_operator(LocatedSpan::new("foobar rest"));
		assert!(result.is_err(), "expected error parsing invalid operator, got: {:?}", result);
	}

	#[test]
	fn test_angle_bang_equal() {
		let (_rest, token) = parse_operator(LocatedSpan::new("<> rest")).unwrap();
		assert_eq!(token.kind, TokenKind::Operator(Operator::NotEqual));
		assert_eq!(token.span.fragment, "<>");
	}

	fn check_operator(op: Operator, symbol: &str) {
		let input_str = format!("{symbol} rest");
		let input = LocatedSpan::new(input_str.as_str());

		let (remaining, token) = parse_operator(input).unwrap();
		assert_eq!(TokenKind::Operator(op), token.kind, "mismatch for symbol: {}", symbol);
		assert_eq!(token.span.fragment, symbol);
		assert_eq!(token.span.offset, 0);
		assert_eq!(*remaining.fragment(), " rest");
	}

	macro_rules! generate_test {
		($($name:ident => ($variant:ident, $symbol:literal)),* $(,)?) => {
			$(
				#[test]
				fn $name() {
					check_operator(Operator::$variant, $symbol);
				}
			)*
		};
	}

	generate_test! {
		test_operator_open_paren => (OpenParen, "("),
		test_operator_close_paren => (CloseParen, ")"),
		test_operator_open_bracket => (OpenBracket, "["),
		test_operator_close_bracket => (CloseBracket, "]"),
		test_operator_left_angle => (LeftAngle, "<"),
		test_operator_left_angle_equal => (LeftAngleEqual, "<="),
		test_operator_right_angle => (RightAngle, ">"),
		test_operator_right_angle_equal => (RightAngleEqual, ">="),
		test_operator_equal => (Equal, "="),
		test_operator_not_equal => (NotEqual, "!="),
		test_operator_dot => (Dot, "."),
	}
}
