// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

use nom::{
	IResult, Input, Parser,
	branch::alt,
	bytes::complete::tag_no_case,
	character::complete::satisfy,
	combinator::{map, not, peek},
	sequence::terminated,
};
use nom_locate::LocatedSpan;

use crate::ast::lex::{Token, TokenKind, as_span};

macro_rules! keyword {
    (
        $( $value:ident => $tag:literal ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword { $( $value ),* }

        impl Keyword {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Keyword::$value => $tag ),*
                }
            }
        }
    };
}

// All keywords are matched case-insensitively and must not be followed by an
// identifier character.
keyword! {
	And     => "AND",
	Or      => "OR",
	Not     => "NOT",
	In      => "IN",
	Between => "BETWEEN",
	Like    => "LIKE",
	Is      => "IS",
	Null    => "NULL",
	Empty   => "EMPTY",
	Count   => "COUNT",
}

fn is_ident_continue(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

pub(crate) fn word(
	tag: &'static str,
) -> impl FnMut(LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, ()> {
	move |input| {
		map(
			terminated(
				tag_no_case::<&str, LocatedSpan<&str>, nom::error::Error<LocatedSpan<&str>>>(tag),
				not(peek(satisfy(is_ident_continue))),
			),
			|_| (),
		)
		.parse(input)
	}
}

fn keyword(
	keyword: Keyword,
) -> impl FnMut(LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, Keyword> {
	move |input| map(word(keyword.as_str()), move |_| keyword).parse(input)
}

pub(crate) fn parse_keyword(input: LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, Token> {
	let start = input;

	let parser = alt((
		keyword(Keyword::Between),
		keyword(Keyword::And),
		keyword(Keyword::Count),
		keyword(Keyword::Empty),
		keyword(Keyword::Like),
		keyword(Keyword::Null),
		keyword(Keyword::Not),
		keyword(Keyword::Or),
		keyword(Keyword::In),
		keyword(Keyword::Is),
	));

	parser
		.map(|kw| Token {
			kind: TokenKind::Keyword(kw),
			span: as_span(start.take(kw.as_str().len())),
		})
		.parse(input)
}

#[cfg(test)]
mod tests {
	use nom_locate::LocatedSpan;

	use super::*;

	#[test]
	fn test_parse_keyword_invalid() {
		let result = parse_keyword(LocatedSpan::new("foobar rest"));
		assert!(result.is_err());
	}

	#[test]
	fn test_keyword_requires_word_boundary() {
		assert!(parse_keyword(LocatedSpan::new("android")).is_err());
		assert!(parse_keyword(LocatedSpan::new("in_stock")).is_err());
		assert!(parse_keyword(LocatedSpan::new("nots")).is_err());
	}

	fn check_keyword(keyword: Keyword, repr: &str) {
		for input_str in [format!("{repr} rest"), format!("{} rest", repr.to_lowercase())] {
			let input = LocatedSpan::new(input_str.as_str());
			let (remaining, token) = parse_keyword(input).unwrap();
			assert_eq!(token.kind, TokenKind::Keyword(keyword), "mismatch for {repr}");
			assert_eq!(token.span.fragment.to_uppercase(), repr);
			assert_eq!(token.span.offset, 0);
			assert_eq!(*remaining.fragment(), " rest");
		}
	}

	macro_rules! generate_test {
		($($name:ident => ($variant:ident, $repr:literal)),* $(,)?) => {
			$(
				#[test]
				fn $name() {
					check_keyword(Keyword::$variant, $repr);
				}
			)*
		};
	}

	generate_test! {
		test_keyword_and => (And, "AND"),
		test_keyword_or => (Or, "OR"),
		test_keyword_not => (Not, "NOT"),
		test_keyword_in => (In, "IN"),
		test_keyword_between => (Between, "BETWEEN"),
		test_keyword_like => (Like, "LIKE"),
		test_keyword_is => (Is, "IS"),
		test_keyword_null => (Null, "NULL"),
		test_keyword_empty => (Empty, "EMPTY"),
		test_keyword_count => (Count, "COUNT"),
	}
}
