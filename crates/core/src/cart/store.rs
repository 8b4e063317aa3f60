//! Cart store: line items, derived total, write-through persistence.

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::repository::{CartRepository, RepositoryError};
use crate::types::{CartCandidate, LineItem, ProductId, checked_total};

/// Result of persisting a mutation.
///
/// A failed save never rolls back the in-memory cart; the store stays
/// authoritative for the rest of the session.
#[derive(Debug)]
#[must_use = "a failed save should be reported to the user"]
pub enum SaveOutcome {
    /// The mutation was applied and written.
    Saved,
    /// The mutation was rejected; nothing changed and nothing was written.
    Unchanged,
    /// The mutation was applied but the write failed.
    Failed(RepositoryError),
}

impl SaveOutcome {
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// The save error, if the write failed.
    #[must_use]
    pub const fn warning(&self) -> Option<&RepositoryError> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Saved | Self::Unchanged => None,
        }
    }
}

/// The authoritative cart for one session.
///
/// Items are unique by [`ProductId`] and keep insertion order. The total is
/// cached and recomputed after every mutation, and always fits in a
/// `Decimal`: a mutation that would overflow it is rejected. Every accepted
/// mutation writes the full item list through the repository.
#[derive(Debug)]
pub struct CartStore<R> {
    repository: R,
    items: Vec<LineItem>,
    total_price: Decimal,
}

impl<R: CartRepository> CartStore<R> {
    /// Hydrate a store from `repository`.
    ///
    /// A missing or unreadable persisted cart starts the session empty, as
    /// does one whose total does not fit in a `Decimal`.
    #[instrument(skip(repository))]
    pub fn open(repository: R) -> Self {
        let (items, total_price) = match repository.load() {
            Ok(Some(items)) => match checked_total(&items) {
                Some(total) => {
                    info!(items = items.len(), "Restored cart");
                    (items, total)
                }
                None => {
                    warn!("Discarding cart whose total overflows, starting empty");
                    (Vec::new(), Decimal::ZERO)
                }
            },
            Ok(None) => (Vec::new(), Decimal::ZERO),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cart, starting empty");
                (Vec::new(), Decimal::ZERO)
            }
        };

        Self {
            repository,
            items,
            total_price,
        }
    }

    /// Add one unit of `candidate`.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// the name, price and image from the first add are kept. An add that
    /// would overflow the quantity or the total is rejected without a write.
    #[instrument(skip(self, candidate), fields(product_id = %candidate.id()))]
    pub fn add_item(&mut self, candidate: CartCandidate) -> SaveOutcome {
        let id = candidate.id();
        let total = if let Some(existing) = self.find_mut(id) {
            let Some(quantity) = existing.quantity.checked_add(1) else {
                debug!("Rejected add past maximum quantity");
                return SaveOutcome::Unchanged;
            };
            let previous = existing.quantity;
            existing.quantity = quantity;
            let total = checked_total(&self.items);
            if total.is_none() {
                self.set_quantity(id, previous);
            }
            total
        } else {
            self.items.push(LineItem::from_candidate(candidate));
            let total = checked_total(&self.items);
            if total.is_none() {
                self.items.pop();
            }
            total
        };

        let Some(total) = total else {
            debug!("Rejected add that would overflow the cart total");
            return SaveOutcome::Unchanged;
        };
        debug!(quantity = self.get(id).map_or(0, |item| item.quantity), "Added cart item");
        self.commit(total)
    }

    /// Remove the item with `id`. Unknown ids are ignored.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_item(&mut self, id: ProductId) -> SaveOutcome {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        debug!(removed = before - self.items.len(), "Removed cart item");
        self.recompute_and_commit()
    }

    /// Set the quantity of the item with `id`.
    ///
    /// Quantities below 1 are rejected and leave the cart untouched, without
    /// a write, as are quantities that would overflow the line or cart
    /// total. Quantities above `u32::MAX` are capped. Unknown ids are ignored.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn update_quantity(&mut self, id: ProductId, new_quantity: i64) -> SaveOutcome {
        if new_quantity < 1 {
            debug!(new_quantity, "Rejected quantity below 1");
            return SaveOutcome::Unchanged;
        }
        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);

        let Some(previous) = self.set_quantity(id, quantity) else {
            return self.recompute_and_commit();
        };
        let Some(total) = checked_total(&self.items) else {
            self.set_quantity(id, previous);
            debug!(quantity, "Rejected quantity that would overflow the cart total");
            return SaveOutcome::Unchanged;
        };
        debug!(quantity, "Updated cart item quantity");
        self.commit(total)
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> SaveOutcome {
        self.items.clear();
        debug!("Cleared cart");
        self.commit(Decimal::ZERO)
    }

    /// Current items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the item for `id`.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Sum of `unit_price × quantity` over all items.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the repository.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// End the session and hand back the repository.
    #[must_use]
    pub fn into_repository(self) -> R {
        self.repository
    }

    fn find_mut(&mut self, id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Set the quantity of `id`, returning the previous quantity.
    fn set_quantity(&mut self, id: ProductId, quantity: u32) -> Option<u32> {
        self.find_mut(id)
            .map(|item| std::mem::replace(&mut item.quantity, quantity))
    }

    fn recompute_and_commit(&mut self) -> SaveOutcome {
        // Only reached when the cart shrank or stayed the same, and a
        // smaller cart's total always fits.
        let total = checked_total(&self.items).unwrap_or(self.total_price);
        self.commit(total)
    }

    fn commit(&mut self, total: Decimal) -> SaveOutcome {
        self.total_price = total;
        match self.repository.save(&self.items) {
            Ok(()) => SaveOutcome::Saved,
            Err(e) => {
                warn!(error = %e, "Failed to persist cart, keeping in-memory state");
                SaveOutcome::Failed(e)
            }
        }
    }
}
