//! Party inventory - capacity-bounded item storage plus money
//!
//! A full inventory is an everyday condition, not an error: `try_add`
//! reports refusal with `false` and the caller decides what to tell the
//! player.

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// The party's shared item storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    money: u32,
    capacity: usize,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            money: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Offer an item; `false` means the inventory is full and the item
    /// was not taken
    pub fn try_add(&mut self, item: Item) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the first item with this name, returning it
    pub fn remove(&mut self, name: &str) -> Option<Item> {
        let idx = self.items.iter().position(|item| item.name == name)?;
        Some(self.items.remove(idx))
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Potions currently carried, in storage order
    pub fn potions(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.is_potion())
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn add_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Take up to `amount`, returning what was actually removed
    pub fn take_money(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.money);
        self.money -= taken;
        taken
    }
}
