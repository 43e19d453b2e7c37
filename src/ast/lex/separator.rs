// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

use nom::{IResult, Input, Parser, bytes::complete::tag, combinator::value};
use nom_locate::LocatedSpan;

use crate::ast::lex::{Token, TokenKind, as_span};

macro_rules! separator {
    (
        $( $value:ident => $tag:literal ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Separator { $( $value ),* }

        impl Separator {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Separator::$value => $tag ),*
                }
            }
        }
    };
}

separator! {
	Comma => ",",
}

pub(crate) fn parse_separator(input: LocatedSpan<&str>) -> IResult<LocatedSpan<&str>, Token> {
	let start = input;

	value(Separator::Comma, tag(","))
		.map(|sep: Separator| Token {
			kind: TokenKind::Separator(sep),
			span: as_span(start.take(sep.as_str().len())),
		})
		.parse(input)
}
