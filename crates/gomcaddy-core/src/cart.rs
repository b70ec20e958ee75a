//! # Cart Engine
//!
//! The in-progress, single-restaurant basket and its persistence port.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart State Operations                              │
//! │                                                                         │
//! │  UI Event                 CartSession              Cart Change          │
//! │  ────────                 ───────────              ───────────          │
//! │                                                                         │
//! │  Click menu item ───────► add_item() ────────────► merge or append     │
//! │                              │                                          │
//! │                              ├─ different restaurant?                   │
//! │                              │    resolve() → Keep    → NOT APPLIED     │
//! │                              │    resolve() → Replace → new cart        │
//! │                                                                         │
//! │  Change quantity ───────► set_quantity() ────────► qty ≤ 0 removes     │
//! │  Click remove ──────────► remove_item() ─────────► empty cart unbinds  │
//! │  Click clear ───────────► clear() ───────────────► empty + unbound     │
//! │                                                                         │
//! │  Every APPLIED mutation is saved through the CartStore port.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `menu_item_id`, kept in insertion order
//! - Non-empty lines ⇒ a restaurant is bound, and every line is from it
//! - Quantity is always ≥ 1; a line with quantity ≤ 0 does not exist
//! - `total`/`item_count` are recomputed on every read, never cached

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::error::{CoreError, CoreResult, StoreError};
use crate::money::Money;
use crate::types::{MenuItem, OrderLine, Restaurant};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart.
///
/// Name and price are frozen at the moment the item is added, so the
/// cart displays consistent data even if the menu changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Menu item this line was created from.
    pub menu_item_id: String,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Unit price in kobo at time of adding (frozen).
    pub unit_price: i64,

    /// Quantity in cart, always ≥ 1.
    pub quantity: i64,

    /// Image reference for cart display. Not part of order payloads.
    #[serde(default)]
    pub image: Option<String>,
}

impl CartLine {
    /// Creates a line from a menu item with quantity 1.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        CartLine {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
            image: if item.image.is_empty() {
                None
            } else {
                Some(item.image.clone())
            },
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_kobo(self.unit_price * self.quantity)
    }

    /// Converts to the wire order-line shape (drops the image ref).
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            menu_item_id: self.menu_item_id.clone(),
            name: self.name.clone(),
            price: self.unit_price,
            quantity: self.quantity,
        }
    }
}

// =============================================================================
// Conflict Resolution
// =============================================================================

/// The user's decision when adding from a second restaurant.
///
/// Injected into `add_item` as a callback so the cart engine carries no
/// UI dependency; the glue layer shows whatever dialog it likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    /// Keep the current cart; the add is not applied.
    Keep,
    /// Discard the current cart and start over with the new restaurant.
    Replace,
}

/// How an `add_item` call changed the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Added,
    /// An existing line's quantity was incremented.
    Merged,
    /// The cart was replaced with a single line from the new restaurant.
    Replaced,
    /// The user kept the old cart; nothing changed.
    NotApplied,
}

// =============================================================================
// Cart
// =============================================================================

/// The single-restaurant basket.
///
/// Fields are private so the invariants above cannot be bypassed;
/// reads go through accessors, mutations through the operations below.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    restaurant_id: Option<String>,
    restaurant_name: Option<String>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The bound restaurant id, if any line is in the cart.
    pub fn restaurant_id(&self) -> Option<&str> {
        self.restaurant_id.as_deref()
    }

    /// The bound restaurant name, for conflict prompts and headers.
    pub fn restaurant_name(&self) -> Option<&str> {
        self.restaurant_name.as_deref()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart total, recomputed from the lines on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// Total quantity across all lines, recomputed on every call.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Adds a menu item to the cart.
    ///
    /// ## Behavior
    /// - Cart bound to a different restaurant: `resolve(current, new)`
    ///   decides. `Keep` leaves the cart unchanged and reports
    ///   `NotApplied`; `Replace` restarts the cart with this one item.
    /// - Same restaurant (or empty cart): merges into an existing line
    ///   (`quantity += 1`) or appends a new line with quantity 1.
    /// - Every applied add binds the restaurant id/name.
    pub fn add_item<F>(
        &mut self,
        item: &MenuItem,
        restaurant: &Restaurant,
        resolve: F,
    ) -> CoreResult<AddOutcome>
    where
        F: FnOnce(&str, &str) -> ConflictDecision,
    {
        if item.restaurant_id != restaurant.id {
            return Err(CoreError::ForeignMenuItem {
                item_id: item.id.clone(),
                restaurant_id: restaurant.id.clone(),
            });
        }

        let conflicting = !self.lines.is_empty()
            && self.restaurant_id.as_deref() != Some(restaurant.id.as_str());

        if conflicting {
            let current = self.restaurant_name.as_deref().unwrap_or("another restaurant");
            match resolve(current, &restaurant.name) {
                ConflictDecision::Keep => return Ok(AddOutcome::NotApplied),
                ConflictDecision::Replace => {
                    self.lines = vec![CartLine::from_menu_item(item)];
                    self.bind(restaurant);
                    return Ok(AddOutcome::Replaced);
                }
            }
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.menu_item_id == item.id) {
            let new_qty = line.quantity + 1;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            self.bind(restaurant);
            return Ok(AddOutcome::Merged);
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_menu_item(item));
        self.bind(restaurant);
        Ok(AddOutcome::Added)
    }

    /// Removes a line by menu item id.
    ///
    /// If the cart becomes empty the restaurant binding is cleared, so
    /// the next order can come from anywhere.
    pub fn remove_item(&mut self, item_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.menu_item_id != item_id);

        if self.lines.len() == initial_len {
            return Err(CoreError::LineNotFound {
                item_id: item_id.to_string(),
            });
        }

        if self.lines.is_empty() {
            self.unbind();
        }
        Ok(())
    }

    /// Sets a line's quantity exactly (idempotent, not incremental).
    ///
    /// Quantity ≤ 0 is equivalent to `remove_item`.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_item(item_id);
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        match self.lines.iter_mut().find(|l| l.menu_item_id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::LineNotFound {
                item_id: item_id.to_string(),
            }),
        }
    }

    /// Empties the cart and unbinds the restaurant.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.unbind();
    }

    fn bind(&mut self, restaurant: &Restaurant) {
        self.restaurant_id = Some(restaurant.id.clone());
        self.restaurant_name = Some(restaurant.name.clone());
    }

    fn unbind(&mut self) {
        self.restaurant_id = None;
        self.restaurant_name = None;
    }

    /// Rebuilds a cart from a persisted record, defaulting anything that
    /// violates the invariants instead of crashing.
    fn from_persisted(record: PersistedCart) -> Self {
        let mut seen: Vec<String> = Vec::new();
        let lines: Vec<CartLine> = record
            .items
            .into_iter()
            .filter(|l| l.quantity >= 1 && !l.menu_item_id.is_empty())
            .filter(|l| {
                if seen.iter().any(|id| *id == l.menu_item_id) {
                    false
                } else {
                    seen.push(l.menu_item_id.clone());
                    true
                }
            })
            .map(|mut l| {
                l.quantity = l.quantity.min(MAX_LINE_QUANTITY);
                l
            })
            .collect();

        // Lines without a bound restaurant violate the invariant; the
        // record is unusable, so start fresh.
        if lines.is_empty() || record.restaurant_id.is_none() {
            return Cart::new();
        }

        Cart {
            lines,
            restaurant_id: record.restaurant_id,
            restaurant_name: record.restaurant_name,
        }
    }
}

// =============================================================================
// Persistence Port
// =============================================================================

/// The persisted cart record: one JSON document per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedCart {
    pub items: Vec<CartLine>,
    pub restaurant_id: Option<String>,
    pub restaurant_name: Option<String>,
}

impl From<&Cart> for PersistedCart {
    fn from(cart: &Cart) -> Self {
        PersistedCart {
            items: cart.lines.clone(),
            restaurant_id: cart.restaurant_id.clone(),
            restaurant_name: cart.restaurant_name.clone(),
        }
    }
}

/// Storage port for the cart record.
///
/// `load` returns `Ok(None)` when nothing was ever saved; a readable but
/// invalid record is an error, which restoration degrades to an empty
/// cart. Adapters live outside the core (see gomcaddy-store); tests use
/// [`MemoryStore`].
pub trait CartStore: Send + Sync {
    /// Loads the saved cart record, if one exists.
    fn load(&self) -> Result<Option<PersistedCart>, StoreError>;

    /// Durably saves the cart record, replacing any previous one.
    fn save(&self, cart: &PersistedCart) -> Result<(), StoreError>;
}

/// Shared handles to a store are stores too, so a session and a test
/// (or two views) can observe the same record.
impl<S: CartStore + ?Sized> CartStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<PersistedCart>, StoreError> {
        (**self).load()
    }

    fn save(&self, cart: &PersistedCart) -> Result<(), StoreError> {
        (**self).save(cart)
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<PersistedCart>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// The last saved record, if any.
    pub fn snapshot(&self) -> Option<PersistedCart> {
        self.record.lock().expect("store mutex poisoned").clone()
    }

    /// Number of saves performed, for asserting the persistence contract.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().expect("store mutex poisoned")
    }
}

impl CartStore for MemoryStore {
    fn load(&self) -> Result<Option<PersistedCart>, StoreError> {
        Ok(self.record.lock().expect("store mutex poisoned").clone())
    }

    fn save(&self, cart: &PersistedCart) -> Result<(), StoreError> {
        *self.record.lock().expect("store mutex poisoned") = Some(cart.clone());
        *self.saves.lock().expect("store mutex poisoned") += 1;
        Ok(())
    }
}

// =============================================================================
// Cart Session
// =============================================================================

/// A cart bound to its persistence port.
///
/// Restores the saved record at startup and saves after every applied
/// mutation, so the basket survives process restarts. A declined
/// restaurant conflict applies nothing and therefore saves nothing.
pub struct CartSession {
    cart: Cart,
    store: Box<dyn CartStore>,
}

impl CartSession {
    /// Restores the session from the store.
    ///
    /// A missing, unreadable, or corrupt record yields an empty cart;
    /// startup never fails because of bad persisted state.
    pub fn restore(store: Box<dyn CartStore>) -> Self {
        let cart = match store.load() {
            Ok(Some(record)) => Cart::from_persisted(record),
            Ok(None) | Err(_) => Cart::new(),
        };
        CartSession { cart, store }
    }

    /// Read access to the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds an item; persists unless the add was not applied.
    pub fn add_item<F>(
        &mut self,
        item: &MenuItem,
        restaurant: &Restaurant,
        resolve: F,
    ) -> CoreResult<AddOutcome>
    where
        F: FnOnce(&str, &str) -> ConflictDecision,
    {
        let outcome = self.cart.add_item(item, restaurant, resolve)?;
        if outcome != AddOutcome::NotApplied {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Removes a line and persists.
    pub fn remove_item(&mut self, item_id: &str) -> CoreResult<()> {
        self.cart.remove_item(item_id)?;
        self.persist()
    }

    /// Sets a line quantity and persists.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> CoreResult<()> {
        self.cart.set_quantity(item_id, quantity)?;
        self.persist()
    }

    /// Clears the cart and persists the empty record.
    pub fn clear(&mut self) -> CoreResult<()> {
        self.cart.clear();
        self.persist()
    }

    fn persist(&self) -> CoreResult<()> {
        self.store.save(&PersistedCart::from(&self.cart))?;
        Ok(())
    }
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession").field("cart", &self.cart).finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(id: &str, name: &str) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            cuisine_type: "Nigerian".to_string(),
            rating: 4.5,
            image: String::new(),
            delivery_time: "30-45 mins".to_string(),
            min_order: 0,
            is_open: true,
        }
    }

    fn item(id: &str, restaurant_id: &str, price: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: format!("Item {}", id),
            description: String::new(),
            price,
            category: "Main Course".to_string(),
            image: String::new(),
            available: true,
        }
    }

    fn keep(_: &str, _: &str) -> ConflictDecision {
        ConflictDecision::Keep
    }

    #[test]
    fn test_add_merges_same_item() {
        let mut cart = Cart::new();
        let rest = restaurant("r1", "Mama's Kitchen");
        let jollof = item("a", "r1", 500);

        for _ in 0..4 {
            cart.add_item(&jollof, &rest, keep).unwrap();
        }

        // Merge, not duplicate lines: quantity equals the number of adds.
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 4);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_add_binds_restaurant() {
        let mut cart = Cart::new();
        let rest = restaurant("r1", "Mama's Kitchen");
        cart.add_item(&item("a", "r1", 500), &rest, keep).unwrap();

        assert_eq!(cart.restaurant_id(), Some("r1"));
        assert_eq!(cart.restaurant_name(), Some("Mama's Kitchen"));
    }

    #[test]
    fn test_conflict_declined_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let rest_a = restaurant("r1", "Mama's Kitchen");
        cart.add_item(&item("a", "r1", 500), &rest_a, keep).unwrap();
        let before = cart.clone();

        let rest_b = restaurant("r2", "Calabar Pot");
        let outcome = cart
            .add_item(&item("b", "r2", 700), &rest_b, |current, new| {
                assert_eq!(current, "Mama's Kitchen");
                assert_eq!(new, "Calabar Pot");
                ConflictDecision::Keep
            })
            .unwrap();

        assert_eq!(outcome, AddOutcome::NotApplied);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_conflict_accepted_replaces_cart() {
        let mut cart = Cart::new();
        let rest_a = restaurant("r1", "Mama's Kitchen");
        cart.add_item(&item("a", "r1", 500), &rest_a, keep).unwrap();
        cart.add_item(&item("a", "r1", 500), &rest_a, keep).unwrap();

        let rest_b = restaurant("r2", "Calabar Pot");
        let outcome = cart
            .add_item(&item("b", "r2", 700), &rest_b, |_, _| ConflictDecision::Replace)
            .unwrap();

        assert_eq!(outcome, AddOutcome::Replaced);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].menu_item_id, "b");
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.restaurant_id(), Some("r2"));
        assert_eq!(cart.restaurant_name(), Some("Calabar Pot"));
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let rest = restaurant("r1", "Mama's Kitchen");

        let mut removed = Cart::new();
        removed.add_item(&item("a", "r1", 500), &rest, keep).unwrap();
        removed.add_item(&item("b", "r1", 700), &rest, keep).unwrap();
        removed.remove_item("a").unwrap();

        let mut zeroed = Cart::new();
        zeroed.add_item(&item("a", "r1", 500), &rest, keep).unwrap();
        zeroed.add_item(&item("b", "r1", 700), &rest, keep).unwrap();
        zeroed.set_quantity("a", 0).unwrap();

        assert_eq!(removed, zeroed);
    }

    #[test]
    fn test_set_quantity_is_exact_not_incremental() {
        let mut cart = Cart::new();
        let rest = restaurant("r1", "Mama's Kitchen");
        cart.add_item(&item("a", "r1", 500), &rest, keep).unwrap();

        cart.set_quantity("a", 7).unwrap();
        assert_eq!(cart.lines()[0].quantity, 7);
        cart.set_quantity("a", 7).unwrap();
        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_removing_last_line_unbinds_restaurant() {
        let mut cart = Cart::new();
        let rest = restaurant("r1", "Mama's Kitchen");
        cart.add_item(&item("a", "r1", 500), &rest, keep).unwrap();

        cart.remove_item("a").unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.restaurant_id(), None);
        assert_eq!(cart.restaurant_name(), None);

        // A different restaurant can be ordered from next.
        let rest_b = restaurant("r2", "Calabar Pot");
        let outcome = cart.add_item(&item("b", "r2", 700), &rest_b, keep).unwrap();
        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(cart.restaurant_id(), Some("r2"));
    }

    #[test]
    fn test_total_recomputed_after_every_mutation() {
        let mut cart = Cart::new();
        let rest = restaurant("r1", "Mama's Kitchen");
        cart.add_item(&item("a", "r1", 500), &rest, keep).unwrap();
        cart.add_item(&item("b", "r1", 300), &rest, keep).unwrap();
        assert_eq!(cart.total().kobo(), 800);

        cart.set_quantity("a", 3).unwrap();
        assert_eq!(cart.total().kobo(), 1800);

        cart.remove_item("b").unwrap();
        assert_eq!(cart.total().kobo(), 1500);

        cart.clear();
        assert_eq!(cart.total().kobo(), 0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_rejects_foreign_menu_item() {
        let mut cart = Cart::new();
        let rest = restaurant("r1", "Mama's Kitchen");
        let err = cart
            .add_item(&item("x", "r2", 500), &rest, keep)
            .unwrap_err();
        assert!(matches!(err, CoreError::ForeignMenuItem { .. }));
    }

    #[test]
    fn test_quantity_limits() {
        let mut cart = Cart::new();
        let rest = restaurant("r1", "Mama's Kitchen");
        cart.add_item(&item("a", "r1", 500), &rest, keep).unwrap();

        let err = cart
            .set_quantity("a", MAX_LINE_QUANTITY + 1)
            .unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));

        let err = cart.set_quantity("missing", 2).unwrap_err();
        assert!(matches!(err, CoreError::LineNotFound { .. }));
    }

    #[test]
    fn test_session_saves_after_every_applied_mutation() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut session = CartSession::restore(Box::new(store.clone()));

        let rest = restaurant("r1", "Mama's Kitchen");
        session.add_item(&item("a", "r1", 500), &rest, keep).unwrap();
        assert_eq!(store.save_count(), 1);

        session.set_quantity("a", 2).unwrap();
        assert_eq!(store.save_count(), 2);

        // A declined conflict applies nothing and saves nothing.
        let rest_b = restaurant("r2", "Calabar Pot");
        let outcome = session
            .add_item(&item("b", "r2", 700), &rest_b, |_, _| ConflictDecision::Keep)
            .unwrap();
        assert_eq!(outcome, AddOutcome::NotApplied);
        assert_eq!(store.save_count(), 2);

        session.clear().unwrap();
        assert_eq!(store.save_count(), 3);
        let record = store.snapshot().unwrap();
        assert!(record.items.is_empty());
        assert_eq!(record.restaurant_id, None);
    }

    #[test]
    fn test_session_restores_saved_cart() {
        let store = MemoryStore::new();
        store
            .save(&PersistedCart {
                items: vec![CartLine {
                    menu_item_id: "a".to_string(),
                    name: "Jollof".to_string(),
                    unit_price: 500,
                    quantity: 2,
                    image: None,
                }],
                restaurant_id: Some("r1".to_string()),
                restaurant_name: Some("Mama's Kitchen".to_string()),
            })
            .unwrap();

        let session = CartSession::restore(Box::new(store));
        assert_eq!(session.cart().item_count(), 2);
        assert_eq!(session.cart().restaurant_id(), Some("r1"));
        assert_eq!(session.cart().total().kobo(), 1000);
    }

    #[test]
    fn test_restore_defaults_malformed_record() {
        // Lines without a restaurant binding violate the invariant.
        let store = MemoryStore::new();
        store
            .save(&PersistedCart {
                items: vec![CartLine {
                    menu_item_id: "a".to_string(),
                    name: "Jollof".to_string(),
                    unit_price: 500,
                    quantity: 2,
                    image: None,
                }],
                restaurant_id: None,
                restaurant_name: None,
            })
            .unwrap();
        let session = CartSession::restore(Box::new(store));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_restore_drops_dead_and_duplicate_lines() {
        let line = |id: &str, qty: i64| CartLine {
            menu_item_id: id.to_string(),
            name: id.to_string(),
            unit_price: 100,
            quantity: qty,
            image: None,
        };

        let store = MemoryStore::new();
        store
            .save(&PersistedCart {
                items: vec![line("a", 0), line("b", 2), line("b", 9), line("", 1)],
                restaurant_id: Some("r1".to_string()),
                restaurant_name: Some("Mama's Kitchen".to_string()),
            })
            .unwrap();

        let session = CartSession::restore(Box::new(store));
        assert_eq!(session.cart().lines().len(), 1);
        assert_eq!(session.cart().lines()[0].menu_item_id, "b");
        assert_eq!(session.cart().lines()[0].quantity, 2);
    }

    #[test]
    fn test_restore_survives_store_failure() {
        struct BrokenStore;
        impl CartStore for BrokenStore {
            fn load(&self) -> Result<Option<PersistedCart>, StoreError> {
                Err(StoreError::Corrupt("not json".to_string()))
            }
            fn save(&self, _cart: &PersistedCart) -> Result<(), StoreError> {
                Ok(())
            }
        }

        let session = CartSession::restore(Box::new(BrokenStore));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_persisted_record_uses_camel_case_keys() {
        let mut cart = Cart::new();
        let rest = restaurant("r1", "Mama's Kitchen");
        cart.add_item(&item("a", "r1", 500), &rest, keep).unwrap();

        let json = serde_json::to_value(PersistedCart::from(&cart)).unwrap();
        assert!(json.get("items").is_some());
        assert_eq!(json["restaurantId"], "r1");
        assert_eq!(json["restaurantName"], "Mama's Kitchen");
    }
}
