//! Multi-class token ledger.
//!
//! One engine manages many token classes simultaneously. Each class behaves
//! as a fungible amount-based asset or as a uniquely-owned non-fungible
//! item, decided purely by the identifier's bit pattern
//! ([`lib_types::TokenId`]): one 256-bit id space, one transfer entry
//! point, one balance/ownership store.
//!
//! # Key types
//!
//! - [`Ledger`]: the state container and transfer engine
//! - [`TokenReceiver`] / [`ReceiverResolver`]: the receiver-acknowledgement
//!   protocol for contract destinations
//! - [`LedgerEvent`]: records emitted into the ledger journal
//! - [`LedgerError`]: the failure taxonomy; every failure aborts its whole
//!   operation
//!
//! # Execution
//!
//! Use [`Ledger::safe_transfer_from`] and
//! [`Ledger::safe_batch_transfer_from`] to move tokens with full
//! validation. State mutations commit before receiver hooks run; a bad
//! acknowledgement unwinds the entire operation, nested re-entrant effects
//! included.

pub mod errors;
pub mod events;
pub mod ledger;
pub mod receiver;
pub mod transfer;

pub use errors::{LedgerError, LedgerResult};
pub use events::LedgerEvent;
pub use ledger::Ledger;
pub use receiver::{
    supports_interface, AckCode, InterfaceId, NoReceivers, ReceiverError, ReceiverResolver,
    TokenReceiver, CAPABILITY_QUERY_INTERFACE, MULTI_TOKEN_INTERFACE,
};
