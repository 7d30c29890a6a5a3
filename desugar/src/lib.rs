//! Desugaring for direct-style bind sequences.
//!
//! This crate turns a linear sequence of bind statements, written as one
//! flat block, into the nested effect composition the runtime actually
//! executes. The transform is a pure, deterministic structural recursion over
//! an explicit statement-sequence IR, built and consumed entirely at build
//! time; the `effect!` proc macro in `sequent-macros` is a thin veneer over
//! it.
//!
//! The input grammar has four statement shapes:
//!
//! - `pattern <- expr;` is a bind statement: run `expr` as an effect against
//!   the ambient context and match its outcome against `pattern`;
//! - `let pat = expr;` is a plain binding, evaluated eagerly and never routed
//!   through the context;
//! - a final expression, the sequence's result;
//! - optional `else { … }` clauses: match arms handling failure payloads
//!   from anywhere in the bind chain.

pub mod ast;
pub mod expand;
pub mod parser;

pub use ast::{BindSequence, ElseClause, Stmt};
pub use expand::desugar;
