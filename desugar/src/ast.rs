//! Statement-sequence IR for direct-style bind blocks.

use proc_macro2::Ident;
use syn::{Expr, Pat};

/// One statement of a bind sequence.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `pattern <- expr;`: run `expr` as an effect against the ambient
    /// context and match its outcome against `pattern`. A failure
    /// short-circuits the rest of the sequence.
    Bind {
        /// Pattern matched against the outcome.
        pattern: Pat,
        /// Effect-producing expression.
        expr: Expr,
    },
    /// `let pat = expr;`: ordinary immediate computation, not routed
    /// through the context.
    Let {
        /// Bound pattern.
        pattern: Pat,
        /// Eagerly evaluated expression.
        expr: Expr,
    },
}

impl Stmt {
    /// Whether this statement is a bind.
    pub fn is_bind(&self) -> bool {
        matches!(self, Stmt::Bind { .. })
    }
}

/// One fallback clause of the optional `else { … }` block: a match arm over
/// the failure payload that short-circuited the chain.
#[derive(Debug, Clone)]
pub struct ElseClause {
    /// The arm's pattern, kept verbatim.
    pub pattern: Pat,
    /// Optional `if` guard, kept verbatim.
    pub guard: Option<Expr>,
    /// Result expression; the expansion routes it through `run`.
    pub body: Expr,
}

/// A whole direct-style block: statements, optional final expression,
/// optional else-clauses, and an optional explicit name for the ambient
/// context variable.
#[derive(Debug, Clone)]
pub struct BindSequence {
    /// Explicit context name from a `|cx|` header, if any. Absent a header,
    /// the expansion generates a hygienic fresh name.
    pub context: Option<Ident>,
    /// The ordered non-final statements.
    pub stmts: Vec<Stmt>,
    /// The final expression. May be absent only when the last statement is a
    /// bind, whose outcome then passes through as the result.
    pub tail: Option<Expr>,
    /// Fallback clauses, in source order.
    pub else_clauses: Vec<ElseClause>,
}

impl BindSequence {
    /// Number of bind statements.
    pub fn bind_count(&self) -> usize {
        self.stmts.iter().filter(|s| s.is_bind()).count()
    }

    /// Whether the block carries else-clauses.
    pub fn has_else(&self) -> bool {
        !self.else_clauses.is_empty()
    }
}
