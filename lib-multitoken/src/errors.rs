//! Ledger operation errors

use lib_types::{Address, Amount, TokenId};
use thiserror::Error;

/// Error during ledger operations.
///
/// Every variant is fatal to the enclosing operation. Nothing is retried
/// internally, and no partial effect survives a failure: the caller either
/// observes the whole operation applied or none of it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("unauthorized: {caller} is neither {owner} nor an approved operator")]
    Unauthorized { caller: Address, owner: Address },

    #[error("transfer to the null account")]
    NullDestination,

    #[error("ownership mismatch for {id:?}: claimed {claimed}, recorded {recorded:?}")]
    OwnershipMismatch {
        id: TokenId,
        claimed: Address,
        recorded: Option<Address>,
    },

    #[error("insufficient balance for {id:?}: have {have}, need {need}")]
    InsufficientBalance {
        id: TokenId,
        have: Amount,
        need: Amount,
    },

    #[error("arithmetic overflow crediting {id:?}")]
    Overflow { id: TokenId },

    #[error("receiver at {account} rejected the transfer")]
    ReceiverRejected { account: Address },

    #[error("paired arrays differ in length: {0} vs {1}")]
    LengthMismatch(usize, usize),

    #[error("identifier {id:?} does not classify as required for this operation")]
    WrongIdKind { id: TokenId },

    #[error("item {id:?} already issued")]
    AlreadyIssued { id: TokenId },
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
