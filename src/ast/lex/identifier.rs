// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

use nom::{
	IResult, Parser,
	bytes::complete::{take_while, take_while1},
	combinator::{complete, recognize},
	sequence::pair,
};
use nom_locate::LocatedSpan;

use crate::ast::lex::{Token, TokenKind, as_span};

pub(crate) fn parse_identifier(input: LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, Token> {
	let (rest, span) =
		complete(recognize(pair(take_while1(is_identifier_start), take_while(is_identifier_char))))
			.parse(input)?;
	Ok((rest, Token {
		kind: TokenKind::Identifier,
		span: as_span(span),
	}))
}

fn is_identifier_start(c: char) -> bool {
	c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
	use nom_locate::LocatedSpan;

	use super::*;

	#[test]
	fn test_identifier() {
		let (_rest, result) = parse_identifier(LocatedSpan::new("user_referral")).unwrap();
		assert_eq!(result.kind, TokenKind::Identifier);
		assert_eq!(result.span.fragment, "user_referral");
	}

	#[test]
	fn test_identifier_must_not_start_with_digit() {
		assert!(parse_identifier(LocatedSpan::new("1abc")).is_err());
	}
}
