//! Expansion of a bind sequence into nested effect composition.
//!
//! The transform is a structural recursion over the statement list:
//!
//! 1. the whole block becomes `::sequent::Effect::new(move |cx| { … })`;
//! 2. every bind statement's expression is routed through
//!    `::sequent::run(&mut *cx, …)`; the reborrow keeps the context usable
//!    both inside the expression and by later statements;
//! 3. the transformed statements chain as an ordered pattern-match sequence
//!    with fallthrough-on-failure;
//! 4. the final expression and every else-clause result are routed through
//!    `run` as well, never returned raw;
//! 5. else-clauses are attached verbatim apart from that rewrite, plus an
//!    implicit terminal arm re-surfacing an unmatched value unchanged;
//! 6. an `if` without `else` on a bind's right-hand side gains an implicit
//!    else arm yielding a successful unit outcome;
//! 7. without an explicit context name, a fresh one is created under
//!    [`Span::mixed_site`] hygiene so caller code cannot collide with it.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::Expr;

use crate::ast::{BindSequence, ElseClause, Stmt};

/// Fallback name for the ambient context variable.
const CONTEXT_VAR: &str = "__effect_cx";

/// Desugars a parsed bind sequence into an effect expression.
///
/// Pure and deterministic: the same sequence always expands to the same
/// token stream.
pub fn desugar(seq: &BindSequence) -> TokenStream {
    let cx = seq
        .context
        .clone()
        .unwrap_or_else(|| Ident::new(CONTEXT_VAR, Span::mixed_site()));
    let failed = Ident::new("__failed", Span::mixed_site());
    let body = expand_stmts(&seq.stmts, seq.tail.as_ref(), &seq.else_clauses, &cx, &failed);

    quote! {
        ::sequent::Effect::new(move |#cx| {
            #[allow(unused_imports)]
            use ::sequent::Outcome::{Success, Failure};
            #body
        })
    }
}

fn expand_stmts(
    stmts: &[Stmt],
    tail: Option<&Expr>,
    else_clauses: &[ElseClause],
    cx: &Ident,
    failed: &Ident,
) -> TokenStream {
    match stmts.split_first() {
        None => match tail {
            Some(expr) => route_through_run(expr, cx),
            // The parser guarantees a missing tail means the last statement
            // was a bind, handled below before recursing this far.
            None => TokenStream::new(),
        },
        Some((Stmt::Let { pattern, expr }, rest)) => {
            let inner = expand_stmts(rest, tail, else_clauses, cx, failed);
            quote! {{
                let #pattern = #expr;
                #inner
            }}
        }
        Some((Stmt::Bind { pattern, expr }, rest)) => {
            let scrutinee = bind_scrutinee(expr, cx);
            let fallthrough = expand_fallthrough(else_clauses, cx, failed);
            if rest.is_empty() && tail.is_none() {
                // The bind is the tail: the continuation is empty, so the
                // outcome passes through whole and the pattern binds nothing.
                let bound = Ident::new("__bound", Span::mixed_site());
                quote! {
                    match #scrutinee {
                        ::sequent::Outcome::Failure(#failed) => #fallthrough,
                        #bound => #bound,
                    }
                }
            } else {
                let inner = expand_stmts(rest, tail, else_clauses, cx, failed);
                quote! {
                    match #scrutinee {
                        #pattern => #inner,
                        ::sequent::Outcome::Failure(#failed) => #fallthrough,
                    }
                }
            }
        }
    }
}

/// The expression a bind statement matches on.
///
/// An `if` without `else` gets the implicit success arm so a false condition
/// contributes a harmless unit success instead of an undefined value.
fn bind_scrutinee(expr: &Expr, cx: &Ident) -> TokenStream {
    match expr {
        Expr::If(conditional) if conditional.else_branch.is_none() => {
            let test = &conditional.cond;
            let then_branch = &conditional.then_branch;
            let routed = route_through_run_tokens(quote!(#then_branch), cx);
            quote! {
                if #test {
                    #routed
                } else {
                    ::sequent::Outcome::Success(())
                }
            }
        }
        _ => route_through_run(expr, cx),
    }
}

/// Routes an expression through `run` against the ambient context.
///
/// The expression is bound first so it may itself borrow the context; the
/// borrow ends before `run` takes its own.
fn route_through_run(expr: &Expr, cx: &Ident) -> TokenStream {
    route_through_run_tokens(quote!(#expr), cx)
}

fn route_through_run_tokens(expr: TokenStream, cx: &Ident) -> TokenStream {
    let step = Ident::new("__step", Span::mixed_site());
    quote! {{
        let #step = #expr;
        ::sequent::run(&mut *#cx, #step)
    }}
}

/// Where a failed bind lands: the else-clauses when present, otherwise the
/// failure re-surfaces as the sequence's result.
fn expand_fallthrough(else_clauses: &[ElseClause], cx: &Ident, failed: &Ident) -> TokenStream {
    if else_clauses.is_empty() {
        return quote!(::sequent::Outcome::Failure(#failed));
    }

    let arms = else_clauses.iter().map(|clause| {
        let pattern = &clause.pattern;
        let body = route_through_run(&clause.body, cx);
        match &clause.guard {
            Some(guard) => quote!(#pattern if #guard => #body,),
            None => quote!(#pattern => #body,),
        }
    });
    let unmatched = Ident::new("__unmatched", Span::mixed_site());

    quote! {
        match ::sequent::Outcome::Failure(#failed) {
            #(#arms)*
            #[allow(unreachable_patterns)]
            #unmatched => #unmatched,
        }
    }
}
