//! 购物车上下文
//!
//! 购物车状态与持久化都在核心库的 [`CartStore`] 中，这里只负责把它放进信号并弹出提示。

use atelier::cart::{AddOutcome, CartLine, CartStore};
use leptos::prelude::*;

use crate::notify::Notifier;
use crate::web::BrowserStorage;

#[derive(Clone, Copy)]
pub struct CartContext {
    pub store: RwSignal<CartStore<BrowserStorage>>,
    notifier: Notifier,
}

impl CartContext {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            store: RwSignal::new(CartStore::new(BrowserStorage)),
            notifier,
        }
    }

    pub fn add(&self, line: CartLine) {
        let outcome = self.store.try_update(|cart| cart.add(line));
        if outcome == Some(AddOutcome::Added) {
            self.notifier.success("Added to cart");
        }
    }

    pub fn remove(&self, unique_id: &str) {
        if self.store.try_update(|cart| cart.remove(unique_id)) == Some(true) {
            self.notifier.success("Removed from cart");
        }
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.store.with(|cart| cart.lines().to_vec())
    }

    pub fn len(&self) -> usize {
        self.store.with(CartStore::len)
    }

    pub fn subtotal(&self) -> i64 {
        self.store.with(CartStore::subtotal)
    }

    pub fn is_open(&self) -> bool {
        self.store.with(CartStore::is_open)
    }

    pub fn set_open(&self, open: bool) {
        self.store.update(|cart| cart.set_open(open));
    }

    pub fn toggle(&self) {
        self.store.update(CartStore::toggle);
    }
}

pub fn use_cart() -> CartContext {
    expect_context::<CartContext>()
}
