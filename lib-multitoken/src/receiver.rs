//! Receiver-acknowledgement protocol and interface discovery.
//!
//! A destination account that carries contract code must explicitly signal
//! that it can handle incoming tokens: the engine invokes
//! [`TokenReceiver::on_token_received`] after committing the element's state
//! mutation and requires the fixed code [`AckCode::TRANSFER_ACCEPTED`] back.
//! Anything else aborts the whole enclosing operation.

use lib_types::{Address, Amount, TokenId};
use thiserror::Error;

use crate::ledger::Ledger;

/// Fixed 4-byte acknowledgement code returned by receiver hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckCode(pub [u8; 4]);

impl AckCode {
    /// The only code the engine accepts as a successful acknowledgement
    pub const TRANSFER_ACCEPTED: AckCode = AckCode([0xf2, 0x3a, 0x6e, 0x61]);
}

/// Failure of the receiver call itself, as opposed to a wrong code.
/// The engine treats both identically: the enclosing operation aborts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReceiverError {
    #[error("receiver call failed: {0}")]
    CallFailed(String),
}

/// Destination-side acknowledgement hook.
///
/// The ledger is handed back into the hook: the invoked code runs with full
/// sender privileges and may re-enter any ledger operation. The engine
/// commits the current element's mutation before invoking the hook, so a
/// re-entrant call always observes the debit already landed and cannot
/// double-spend.
pub trait TokenReceiver {
    fn on_token_received(
        &mut self,
        ledger: &mut Ledger,
        operator: Address,
        from: Address,
        id: TokenId,
        amount: Amount,
        data: &[u8],
    ) -> Result<AckCode, ReceiverError>;
}

/// Contract-code-presence predicate and dispatch seam in one capability
/// interface.
///
/// `None` means the account carries no code: the hook is skipped entirely.
/// The engine consults the resolver exactly once per single transfer and
/// exactly once per batch destination.
pub trait ReceiverResolver {
    fn resolve(&mut self, account: &Address) -> Option<&mut (dyn TokenReceiver + 'static)>;
}

/// Resolver for hosts with no contract accounts at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReceivers;

impl ReceiverResolver for NoReceivers {
    fn resolve(&mut self, _account: &Address) -> Option<&mut (dyn TokenReceiver + 'static)> {
        None
    }
}

/// 4-byte interface signature used by capability discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceId(pub [u8; 4]);

/// Signature of the multi-class ledger interface
pub const MULTI_TOKEN_INTERFACE: InterfaceId = InterfaceId([0xd9, 0xb6, 0x7a, 0x26]);

/// Signature of the capability-discovery interface itself
pub const CAPABILITY_QUERY_INTERFACE: InterfaceId = InterfaceId([0x01, 0xff, 0xc9, 0xa7]);

/// Static capability responder.
///
/// Answers whether this ledger implements the given interface signature.
/// Pure lookup over the two fixed signatures; no state involved.
pub fn supports_interface(id: InterfaceId) -> bool {
    id == MULTI_TOKEN_INTERFACE || id == CAPABILITY_QUERY_INTERFACE
}
