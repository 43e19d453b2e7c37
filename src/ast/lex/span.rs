// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

use nom_locate::LocatedSpan;

/// Source location of a token: byte offset into the input plus the matched
/// fragment. Carried on every token and into syntax errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
	/// The offset of the fragment relative to the input. Starts at 0.
	pub offset: usize,
	pub fragment: String,
}

impl<'a> From<LocatedSpan<&'a str>> for Span {
	fn from(value: LocatedSpan<&'a str>) -> Self {
		Self {
			offset: value.location_offset(),
			fragment: value.fragment().to_string(),
		}
	}
}
