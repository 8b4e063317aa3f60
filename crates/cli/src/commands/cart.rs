//! Cart mutation commands.

use tracing::info;

use carecart_core::{CartCandidate, CartRepository, CartStore, ProductId, SaveOutcome};

/// Add one unit of `candidate`.
pub fn add<R: CartRepository>(store: &mut CartStore<R>, candidate: CartCandidate) -> SaveOutcome {
    let id = candidate.id();
    let outcome = store.add_item(candidate);
    let quantity = store.get(id).map_or(0, |item| item.quantity);
    info!(product_id = %id, quantity, "Added to cart");
    outcome
}

pub fn remove<R: CartRepository>(store: &mut CartStore<R>, id: ProductId) -> SaveOutcome {
    let present = store.get(id).is_some();
    let outcome = store.remove_item(id);
    info!(product_id = %id, present, "Removed from cart");
    outcome
}

/// Set the quantity of `id`. Quantities below 1 leave the cart unchanged.
pub fn update<R: CartRepository>(
    store: &mut CartStore<R>,
    id: ProductId,
    quantity: i64,
) -> SaveOutcome {
    let outcome = store.update_quantity(id, quantity);
    info!(product_id = %id, quantity, accepted = !outcome.is_unchanged(), "Updated quantity");
    outcome
}

pub fn clear<R: CartRepository>(store: &mut CartStore<R>) -> SaveOutcome {
    let outcome = store.clear_cart();
    info!("Cleared cart");
    outcome
}
