//! Ledger state container.
//!
//! The canonical state is four keyed containers plus the event journal.
//! Nothing else is durable. All mutation goes through `&mut self` methods,
//! so one operation runs to completion before the next can observe anything.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use lib_types::{Address, Amount, TokenId};

use crate::errors::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;

/// Multi-class token ledger.
///
/// One instance manages every token class: fungible classes live in the
/// balance table, non-fungible items in the ownership table, and a single
/// blanket approval table covers both. The identifier's bit pattern decides
/// which path a transfer takes; there is no per-class storage duplication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// Fungible balances: class id -> account -> amount
    balances: HashMap<TokenId, HashMap<Address, Amount>>,
    /// Non-fungible ownership: item id -> owning account.
    /// Absent entry = never issued.
    owners: HashMap<TokenId, Address>,
    /// Blanket operator approvals: owner -> approved operators.
    /// Presence in the set is approval; no per-class granularity exists.
    operators: HashMap<Address, HashSet<Address>>,
    /// Issued supply per fungible class. Written only by issuance;
    /// transfers conserve it.
    supply: HashMap<TokenId, Amount>,
    /// Append-only journal of emitted records
    events: Vec<LedgerEvent>,
}

/// Whole-ledger snapshot for abort rollback.
///
/// Restoring unwinds every mutation since the checkpoint, including effects
/// committed by re-entrant hook calls nested inside the aborted operation.
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint(Ledger);

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Balance of `owner` for `id`.
    ///
    /// A non-fungible item answers 1 or 0 by ownership, never any other
    /// value. Every other identifier reads the balance table; non-fungible
    /// base types have no balance semantics and return the table default.
    pub fn balance_of(&self, owner: &Address, id: TokenId) -> Amount {
        if id.is_non_fungible_item() {
            match self.owners.get(&id) {
                Some(current) if current == owner => 1,
                _ => 0,
            }
        } else {
            self.fungible_balance(&id, owner)
        }
    }

    /// Element-wise [`balance_of`](Self::balance_of) over paired arrays
    pub fn balance_of_batch(
        &self,
        owners: &[Address],
        ids: &[TokenId],
    ) -> LedgerResult<Vec<Amount>> {
        if owners.len() != ids.len() {
            return Err(LedgerError::LengthMismatch(owners.len(), ids.len()));
        }
        Ok(owners
            .iter()
            .zip(ids)
            .map(|(owner, id)| self.balance_of(owner, *id))
            .collect())
    }

    /// Current owner of a non-fungible item.
    ///
    /// `None` for unissued items and for fungible ids (a defined but
    /// meaningless query).
    pub fn owner_of(&self, id: TokenId) -> Option<Address> {
        self.owners.get(&id).copied()
    }

    /// Issued supply for a fungible class
    pub fn total_supply(&self, class: TokenId) -> Amount {
        self.supply.get(&class).copied().unwrap_or(0)
    }

    // =========================================================================
    // Operator approval
    // =========================================================================

    /// Grant or revoke blanket operator rights over all of `owner`'s
    /// holdings. Unconditional overwrite; emits one record per call.
    pub fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operators.entry(owner).or_default().insert(operator);
        } else if let Some(set) = self.operators.get_mut(&owner) {
            set.remove(&operator);
            if set.is_empty() {
                self.operators.remove(&owner);
            }
        }
        tracing::debug!(
            "approval change: owner {} operator {} approved {}",
            owner,
            operator,
            approved
        );
        self.events.push(LedgerEvent::ApprovalForAll {
            owner,
            operator,
            approved,
        });
    }

    /// Pure lookup, no side effects
    pub fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        self.operators
            .get(owner)
            .map(|set| set.contains(operator))
            .unwrap_or(false)
    }

    // =========================================================================
    // Issuance (host-facing genesis seam, outside the transfer protocol)
    // =========================================================================

    /// Credit freshly issued units of a fungible class to `to`.
    ///
    /// The only way issued supply increases. Records provenance as a
    /// transfer from the null account.
    pub fn issue_fungible(
        &mut self,
        class: TokenId,
        to: Address,
        amount: Amount,
    ) -> LedgerResult<()> {
        if !class.is_fungible() {
            return Err(LedgerError::WrongIdKind { id: class });
        }
        if to.is_zero() {
            return Err(LedgerError::NullDestination);
        }
        let credited = self
            .fungible_balance(&class, &to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { id: class })?;
        let issued = self
            .total_supply(class)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { id: class })?;
        self.set_fungible_balance(class, to, credited);
        self.supply.insert(class, issued);
        tracing::info!("issued {} of {:?} to {}", amount, class, to);
        self.events.push(LedgerEvent::Transfer {
            operator: Address::zero(),
            from: Address::zero(),
            to,
            id: class,
            amount,
        });
        Ok(())
    }

    /// Bring a non-fungible item into existence, owned by `to`.
    ///
    /// An item id can be issued at most once; ownership afterwards changes
    /// only through transfer.
    pub fn issue_non_fungible(&mut self, item: TokenId, to: Address) -> LedgerResult<()> {
        if !item.is_non_fungible_item() {
            return Err(LedgerError::WrongIdKind { id: item });
        }
        if to.is_zero() {
            return Err(LedgerError::NullDestination);
        }
        if self.owners.contains_key(&item) {
            return Err(LedgerError::AlreadyIssued { id: item });
        }
        self.owners.insert(item, to);
        tracing::info!("issued item {:?} to {}", item, to);
        self.events.push(LedgerEvent::Transfer {
            operator: Address::zero(),
            from: Address::zero(),
            to,
            id: item,
            amount: 1,
        });
        Ok(())
    }

    // =========================================================================
    // Event journal
    // =========================================================================

    /// All records emitted so far, in emission order
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Take the journal, leaving it empty
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Engine internals
    // =========================================================================

    pub(crate) fn fungible_balance(&self, id: &TokenId, account: &Address) -> Amount {
        self.balances
            .get(id)
            .and_then(|per_account| per_account.get(account))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn set_fungible_balance(&mut self, id: TokenId, account: Address, amount: Amount) {
        self.balances.entry(id).or_default().insert(account, amount);
    }

    pub(crate) fn set_owner(&mut self, id: TokenId, to: Address) {
        self.owners.insert(id, to);
    }

    pub(crate) fn record(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    /// Caller must be the owner or hold blanket approval from them
    pub(crate) fn check_authorized(&self, caller: &Address, from: &Address) -> LedgerResult<()> {
        if caller == from || self.is_approved_for_all(from, caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                caller: *caller,
                owner: *from,
            })
        }
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.clone())
    }

    pub(crate) fn restore(&mut self, checkpoint: &Checkpoint) {
        *self = checkpoint.0.clone();
    }
}
