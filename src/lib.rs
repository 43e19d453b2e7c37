// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

//! SQL-like WHERE clauses compiled into vector-search filters.
//!
//! This crate provides:
//! - Tokenization of WHERE-clause text via the [`ast::lex`] module
//! - A closed expression AST via the [`ast`] module
//! - The output filter model via the [`filter`] module
//! - AST lowering into a [`Filter`] via the [`lower`] module
//! - The complete pipeline via [`where_to_filter`]

pub mod ast;
pub mod error;
pub mod filter;
pub mod lower;

use tracing::instrument;

pub use crate::{
	error::{Error, SemanticError, SyntaxError},
	filter::Filter,
};

pub type Result<T> = std::result::Result<T, Error>;

/// Compile a WHERE-clause body (without the leading `WHERE` keyword) into a
/// nested [`Filter`].
///
/// The pipeline is lex -> parse -> lower; each stage is a pure function of
/// its input. Callers receive either the filter value or one structured
/// error, never a partial or fallback result.
///
/// ```
/// use vsql::where_to_filter;
///
/// let filter = where_to_filter("city = 'London' AND age > 30").unwrap();
/// assert_eq!(filter.must.len(), 2);
/// ```
#[instrument(level = "trace", skip(text))]
pub fn where_to_filter(text: &str) -> Result<Filter> {
	let tokens = ast::lex::lex(text)?;
	let expr = ast::parse::parse(tokens)?;
	let filter = lower::lower(expr)?;
	Ok(filter)
}
