//! Emitted ledger records

use lib_types::{Address, Amount, TokenId};
use serde::{Deserialize, Serialize};

/// Observable record appended to the ledger journal.
///
/// Records belong to the operation's atomic unit: an aborted operation
/// leaves none behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// One per transferred element. A single transfer emits exactly one;
    /// a batch emits one per array element, in array order. Issuance emits
    /// one with the null account on the `from` side.
    Transfer {
        operator: Address,
        from: Address,
        to: Address,
        id: TokenId,
        amount: Amount,
    },
    /// One per approval change
    ApprovalForAll {
        owner: Address,
        operator: Address,
        approved: bool,
    },
}
