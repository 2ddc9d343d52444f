//! Transfer execution.
//!
//! Single and batch transfers share one per-element core: classify the
//! identifier, validate, mutate, record. Every check precedes every write,
//! so a precondition failure leaves nothing applied.
//!
//! Ordering contract (correctness-critical): an element's state mutation is
//! committed BEFORE the receiver hook for that element runs, never after. A
//! hook that re-enters the ledger therefore observes the debit already
//! landed. Aborting on a bad acknowledgement restores the checkpoint taken
//! at operation entry, which also unwinds any nested re-entrant effects
//! committed inside the aborted operation.

#![allow(clippy::too_many_arguments)]

use lib_types::{Address, Amount, TokenId, TokenKind};

use crate::errors::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;
use crate::ledger::{Checkpoint, Ledger};
use crate::receiver::{AckCode, ReceiverResolver, TokenReceiver};

impl Ledger {
    /// Transfer `amount` units of a fungible `id` (or the single item `id`
    /// itself) from `from` to `to`.
    ///
    /// # Enforcement
    ///
    /// - `to` must not be the null account
    /// - `caller` must be `from` or hold blanket approval from `from`
    /// - Non-fungible item: the ownership record must equal `from` exactly
    ///   (the amount parameter is accepted for interface compatibility but
    ///   not applied to any balance)
    /// - Fungible: checked debit and credit; either both apply or neither
    ///
    /// The resolver is consulted exactly once. If `to` resolves to a
    /// receiver, the hook runs after the mutation is committed and must
    /// return [`AckCode::TRANSFER_ACCEPTED`]; anything else rolls the whole
    /// operation back.
    pub fn safe_transfer_from(
        &mut self,
        resolver: &mut dyn ReceiverResolver,
        caller: Address,
        from: Address,
        to: Address,
        id: TokenId,
        amount: Amount,
        data: &[u8],
    ) -> LedgerResult<()> {
        // =====================================================================
        // Preconditions (no state touched yet)
        // =====================================================================
        if to.is_zero() {
            return Err(LedgerError::NullDestination);
        }
        self.check_authorized(&caller, &from)?;

        // =====================================================================
        // Apply, then acknowledge
        // =====================================================================
        match resolver.resolve(&to) {
            None => self.apply_element(caller, from, to, id, amount),
            Some(receiver) => {
                // The hook can fail after the mutation landed; checkpoint first.
                let checkpoint = self.checkpoint();
                self.apply_element(caller, from, to, id, amount)?;
                self.expect_ack(receiver, &checkpoint, caller, from, to, id, amount, data)
            }
        }
    }

    /// Transfer several identifiers from `from` to `to` as one atomic unit.
    ///
    /// Element branch logic is identical to
    /// [`safe_transfer_from`](Self::safe_transfer_from), applied in array
    /// order with one record per element. Authorization is blanket and
    /// checked once. The
    /// destination's code-presence is checked once, before the loop; a
    /// plain account never sees a hook call, a contract account sees one
    /// per element, immediately after that element's mutation.
    ///
    /// The first failing element (in index order) determines the reported
    /// error, and every already-applied element is rolled back with it.
    /// There is no partial-batch commit.
    pub fn safe_batch_transfer_from(
        &mut self,
        resolver: &mut dyn ReceiverResolver,
        caller: Address,
        from: Address,
        to: Address,
        ids: &[TokenId],
        amounts: &[Amount],
        data: &[u8],
    ) -> LedgerResult<()> {
        // =====================================================================
        // Preconditions (no state touched yet)
        // =====================================================================
        if to.is_zero() {
            return Err(LedgerError::NullDestination);
        }
        if ids.len() != amounts.len() {
            return Err(LedgerError::LengthMismatch(ids.len(), amounts.len()));
        }
        self.check_authorized(&caller, &from)?;

        // Code-presence: exactly once, hoisted out of the loop
        let receiver = resolver.resolve(&to);

        // Any element can fail after earlier elements mutated
        let checkpoint = self.checkpoint();

        match receiver {
            None => {
                for (&id, &amount) in ids.iter().zip(amounts) {
                    if let Err(err) = self.apply_element(caller, from, to, id, amount) {
                        self.restore(&checkpoint);
                        return Err(err);
                    }
                }
            }
            Some(receiver) => {
                for (&id, &amount) in ids.iter().zip(amounts) {
                    if let Err(err) = self.apply_element(caller, from, to, id, amount) {
                        self.restore(&checkpoint);
                        return Err(err);
                    }
                    // Mutation committed; only now hand control to the hook
                    self.expect_ack(receiver, &checkpoint, caller, from, to, id, amount, data)?;
                }
            }
        }
        Ok(())
    }

    /// One element of transfer work: classify, validate, mutate, record.
    ///
    /// All checks precede all writes; on error nothing has been applied.
    fn apply_element(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        id: TokenId,
        amount: Amount,
    ) -> LedgerResult<()> {
        match id.kind() {
            TokenKind::NonFungibleItem => {
                let recorded = self.owner_of(id);
                if recorded != Some(from) {
                    return Err(LedgerError::OwnershipMismatch {
                        id,
                        claimed: from,
                        recorded,
                    });
                }
                // Atomic reassignment; the amount parameter is not applied
                self.set_owner(id, to);
            }
            // Fungible classes and non-fungible base types share the
            // balance table semantics
            TokenKind::Fungible | TokenKind::NonFungibleBase => {
                let have = self.fungible_balance(&id, &from);
                let debited = have
                    .checked_sub(amount)
                    .ok_or(LedgerError::InsufficientBalance {
                        id,
                        have,
                        need: amount,
                    })?;
                if from != to {
                    let credited = self
                        .fungible_balance(&id, &to)
                        .checked_add(amount)
                        .ok_or(LedgerError::Overflow { id })?;
                    self.set_fungible_balance(id, from, debited);
                    self.set_fungible_balance(id, to, credited);
                }
                // from == to nets to zero; the sufficiency check still applied
            }
        }

        tracing::debug!(
            "transfer: {} -> {} id {:?} amount {} (operator {})",
            from,
            to,
            id,
            amount,
            operator
        );
        self.record(LedgerEvent::Transfer {
            operator,
            from,
            to,
            id,
            amount,
        });
        Ok(())
    }

    /// Invoke the hook for one committed element and demand the fixed code.
    /// Anything else restores the checkpoint and fails the operation.
    fn expect_ack(
        &mut self,
        receiver: &mut dyn TokenReceiver,
        checkpoint: &Checkpoint,
        operator: Address,
        from: Address,
        to: Address,
        id: TokenId,
        amount: Amount,
        data: &[u8],
    ) -> LedgerResult<()> {
        match receiver.on_token_received(self, operator, from, id, amount, data) {
            Ok(code) if code == AckCode::TRANSFER_ACCEPTED => Ok(()),
            Ok(code) => {
                self.restore(checkpoint);
                tracing::warn!(
                    "receiver at {} returned wrong code {:?}, operation rolled back",
                    to,
                    code
                );
                Err(LedgerError::ReceiverRejected { account: to })
            }
            Err(err) => {
                self.restore(checkpoint);
                tracing::warn!(
                    "receiver call at {} failed ({}), operation rolled back",
                    to,
                    err
                );
                Err(LedgerError::ReceiverRejected { account: to })
            }
        }
    }
}
