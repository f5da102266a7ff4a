//! In-memory record storage for both collections.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bill {
    pub id: Uuid,
    pub embasa: f64,
    pub coelba: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating or replacing a bill.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BillInput {
    #[serde(default)]
    pub embasa: f64,
    #[serde(default)]
    pub coelba: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: u64,
    pub nome: String,
    pub preco: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemInput {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub preco: f64,
}

#[derive(Debug, Default)]
pub struct Store {
    bills: Vec<Bill>,
    items: BTreeMap<u64, Item>,
    last_item_id: u64,
}

impl Store {
    /// Bills in insertion order.
    pub fn bills(&self) -> Vec<Bill> {
        self.bills.clone()
    }

    pub fn bill(&self, id: Uuid) -> Option<Bill> {
        self.bills.iter().find(|bill| bill.id == id).cloned()
    }

    /// Store a new bill under a fresh id; a missing `created_at` means `now`.
    pub fn create_bill(&mut self, input: BillInput, now: DateTime<Utc>) -> Bill {
        let bill = Bill {
            id: Uuid::new_v4(),
            embasa: input.embasa,
            coelba: input.coelba,
            created_at: input.created_at.unwrap_or(now),
            updated_at: input.updated_at,
        };
        self.bills.push(bill.clone());
        bill
    }

    /// Replace the amounts and stamp `updated_at`; `created_at` is kept.
    pub fn update_bill(&mut self, id: Uuid, input: BillInput, now: DateTime<Utc>) -> Option<Bill> {
        let bill = self.bills.iter_mut().find(|bill| bill.id == id)?;
        bill.embasa = input.embasa;
        bill.coelba = input.coelba;
        bill.updated_at = Some(now);
        Some(bill.clone())
    }

    pub fn delete_bill(&mut self, id: Uuid) -> bool {
        let before = self.bills.len();
        self.bills.retain(|bill| bill.id != id);
        self.bills.len() != before
    }

    /// Items ordered by id.
    pub fn items(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    pub fn item(&self, id: u64) -> Option<Item> {
        self.items.get(&id).cloned()
    }

    pub fn create_item(&mut self, input: ItemInput) -> Item {
        self.last_item_id += 1;
        let item = Item {
            id: self.last_item_id,
            nome: input.nome,
            preco: input.preco,
        };
        self.items.insert(item.id, item.clone());
        item
    }

    pub fn update_item(&mut self, id: u64, input: ItemInput) -> Option<Item> {
        let item = self.items.get_mut(&id)?;
        item.nome = input.nome;
        item.preco = input.preco;
        Some(item.clone())
    }

    pub fn delete_item(&mut self, id: u64) -> bool {
        self.items.remove(&id).is_some()
    }
}
