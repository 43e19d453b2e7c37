// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

use nom::{
	IResult, Input, Parser,
	branch::alt,
	bytes::complete::{tag, take_while1},
	character::complete::{char, digit1},
	combinator::{complete, opt, recognize},
	multi::many0,
	sequence::{pair, preceded, terminated},
};
use nom_locate::LocatedSpan;

use crate::ast::lex::{
	Literal, Token, TokenKind, as_span,
	keyword::word,
};

/// Parses any literal: quoted text, number, or boolean.
pub(crate) fn parse_literal(input: LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, Token> {
	alt((parse_text, parse_number, parse_boolean)).parse(input)
}

/// Single-quoted text; `''` escapes a quote. The token fragment is the raw
/// inner text, quotes excluded and escapes still doubled.
fn parse_text(input: LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, Token> {
	let (rest, inner) = preceded(
		char('\''),
		terminated(
			recognize(many0(alt((take_while1(|c: char| c != '\''), tag("''"))))),
			char('\''),
		),
	)
	.parse(input)?;
	Ok((rest, Token {
		kind: TokenKind::Literal(Literal::Text),
		span: as_span(inner),
	}))
}

/// Undo the `''` escaping of a text token fragment.
pub(crate) fn unescape_text(raw: &str) -> String {
	raw.replace("''", "'")
}

/// Optional sign, digits, optional fraction, optional exponent. Whether the
/// token is integer or floating is decided when the AST literal is built.
fn parse_number(input: LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, Token> {
	let sign = || opt(alt((char('+'), char('-'))));
	let fraction = opt(pair(char('.'), digit1));
	let exponent = opt(pair(alt((char('e'), char('E'))), pair(sign(), digit1)));

	let (rest, span) = complete(recognize(pair(
		sign(),
		pair(digit1, pair(fraction, exponent)),
	)))
	.parse(input)?;
	Ok((rest, Token {
		kind: TokenKind::Literal(Literal::Number),
		span: as_span(span),
	}))
}

fn parse_boolean(input: LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, Token> {
	let start = input;
	let (rest, literal) = alt((
		word("TRUE").map(|_| Literal::True),
		word("FALSE").map(|_| Literal::False),
	))
	.parse(input)?;

	let consumed = start.location_offset();
	let length = rest.location_offset() - consumed;
	Ok((rest, Token {
		kind: TokenKind::Literal(literal),
		span: as_span(start.take(length)),
	}))
}
