//! Multi-class token ledger primitives.
//! Stable, protocol-neutral, behavior-free.
//!
//! Rule: No String identifiers in ledger state. Ever.

pub mod primitives;
pub mod token_id;

pub use primitives::{Address, Amount};
pub use token_id::{TokenId, TokenKind};
