//! Procedural macros for sequent.
//!
//! The heavy lifting, parsing the statement-sequence IR and expanding it,
//! lives in `sequent-desugar`; this crate is the thin proc-macro veneer.

use proc_macro::TokenStream;
use sequent_desugar::{desugar, BindSequence};
use syn::parse_macro_input;

/// Desugars a direct-style bind sequence into nested effect composition.
///
/// ```ignore
/// use sequent::prelude::*;
///
/// let pipeline = effect!(|cx| {
///     Success(user) <- find_user(7);
///     let banner = format!("welcome {user}");
///     Success(count) <- record_login(&user);
///     Success((banner, count))
/// } else {
///     Failure(code) if code > 0 => Failure(code),
///     other => other,
/// });
/// ```
///
/// Each bind statement's expression runs against the ambient context via
/// `run`, so effects, literal outcomes, sagas, and effect lists all compose.
/// Without the `|cx|` header the context variable gets a hygienic fresh name.
#[proc_macro]
pub fn effect(input: TokenStream) -> TokenStream {
    let sequence = parse_macro_input!(input as BindSequence);
    desugar(&sequence).into()
}
