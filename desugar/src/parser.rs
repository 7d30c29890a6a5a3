//! Parser for direct-style bind blocks.
//!
//! Accepts either a bare statement sequence or a `|cx| { … }` form naming
//! the ambient context, optionally followed by `else { … }` clauses written
//! as ordinary match arms.

use proc_macro2::Ident;
use syn::parse::discouraged::Speculative;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Arm, Expr, Pat, Token};

use crate::ast::{BindSequence, ElseClause, Stmt};

impl Parse for BindSequence {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let context = parse_context_header(input)?;

        let (stmts, tail) = if input.peek(syn::token::Brace) {
            let content;
            braced!(content in input);
            parse_block(&content)?
        } else {
            parse_block(input)?
        };

        let mut else_clauses = Vec::new();
        if input.peek(Token![else]) {
            input.parse::<Token![else]>()?;
            let content;
            braced!(content in input);
            while !content.is_empty() {
                let arm: Arm = content.parse()?;
                else_clauses.push(ElseClause {
                    pattern: arm.pat,
                    guard: arm.guard.map(|(_, guard)| *guard),
                    body: *arm.body,
                });
            }
            if else_clauses.is_empty() {
                return Err(input.error("else block cannot be empty"));
            }
        }

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after effect block"));
        }

        Ok(BindSequence {
            context,
            stmts,
            tail,
            else_clauses,
        })
    }
}

/// A `|cx|` header counts only when a braced block follows; anything else
/// (say, a closure as the final expression) is left for the statement
/// parser.
fn parse_context_header(input: ParseStream) -> syn::Result<Option<Ident>> {
    if !input.peek(Token![|]) {
        return Ok(None);
    }
    let fork = input.fork();
    let header = (|| -> syn::Result<Ident> {
        fork.parse::<Token![|]>()?;
        let name: Ident = fork.parse()?;
        fork.parse::<Token![|]>()?;
        Ok(name)
    })();
    match header {
        Ok(name) if fork.peek(syn::token::Brace) => {
            input.advance_to(&fork);
            Ok(Some(name))
        }
        _ => Ok(None),
    }
}

fn parse_block(input: ParseStream) -> syn::Result<(Vec<Stmt>, Option<Expr>)> {
    let mut stmts = Vec::new();
    let mut tail = None;

    while !input.is_empty() {
        if input.peek(Token![let]) {
            input.parse::<Token![let]>()?;
            let pattern = Pat::parse_single(input)?;
            input.parse::<Token![=]>()?;
            let expr: Expr = input.parse()?;
            input.parse::<Token![;]>()?;
            stmts.push(Stmt::Let { pattern, expr });
            continue;
        }

        let fork = input.fork();
        if let Ok(pattern) = Pat::parse_single(&fork) {
            if fork.peek(Token![<-]) {
                input.advance_to(&fork);
                input.parse::<Token![<-]>()?;
                let expr: Expr = input.parse()?;
                input.parse::<Token![;]>()?;
                stmts.push(Stmt::Bind { pattern, expr });
                continue;
            }
        }

        let expr: Expr = input.parse()?;
        if !input.is_empty() {
            return Err(input.error("the final expression must end the sequence"));
        }
        tail = Some(expr);
    }

    if tail.is_none() && !matches!(stmts.last(), Some(Stmt::Bind { .. })) {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "an effect block must end with an expression or a bind statement",
        ));
    }

    Ok((stmts, tail))
}
