// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 vsql

pub mod ast;
pub mod lex;
pub mod parse;

pub use ast::{CompareOp, Expr, FieldPath, Literal, Number, Segment};
