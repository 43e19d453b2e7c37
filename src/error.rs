// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

//! Error types for the two compiler stages.
//!
//! [`SyntaxError`] is raised while lexing/parsing and carries the byte
//! offset and source fragment of the failure. [`SemanticError`] is raised
//! while lowering and carries the field path and offending literal. Both are
//! fatal to the translation call; nothing is recovered internally.

/// Maximum combined nesting depth of parentheses and prefix `NOT`.
pub const MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
	#[error("unexpected character `{fragment}` at offset {offset}")]
	UnexpectedCharacter { offset: usize, fragment: String },

	#[error("unexpected `{fragment}` at offset {offset}, expected {expected}")]
	UnexpectedToken {
		offset: usize,
		fragment: String,
		expected: String,
	},

	#[error("unexpected end of input, expected {expected}")]
	UnexpectedEof { expected: String },

	#[error("number `{fragment}` at offset {offset} is out of range")]
	NumberOutOfRange { offset: usize, fragment: String },

	#[error("expression nesting exceeds {MAX_NESTING_DEPTH} levels at offset {offset}")]
	NestingTooDeep { offset: usize },
}

impl SyntaxError {
	/// Byte offset of the failure within the input, when known.
	pub fn offset(&self) -> Option<usize> {
		match self {
			SyntaxError::UnexpectedCharacter { offset, .. }
			| SyntaxError::UnexpectedToken { offset, .. }
			| SyntaxError::NumberOutOfRange { offset, .. }
			| SyntaxError::NestingTooDeep { offset } => Some(*offset),
			SyntaxError::UnexpectedEof { .. } => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SemanticError {
	#[error("`{field}`: {operator} does not accept {literal}")]
	TypeMismatch {
		field: String,
		operator: String,
		literal: String,
	},

	#[error("`{field}`: IN list must not be empty")]
	EmptyList { field: String },

	#[error("`{field}`: BETWEEN bounds must have the same type, got {low} and {high}")]
	BoundMismatch {
		field: String,
		low: String,
		high: String,
	},

	#[error("id lookup does not support {operator}")]
	UnsupportedIdPredicate { operator: String },

	#[error("id values must be unsigned integers or strings, got {literal}")]
	InvalidId { literal: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Syntax(#[from] SyntaxError),
	#[error(transparent)]
	Semantic(#[from] SemanticError),
}
