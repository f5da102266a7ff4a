//! Priced item record (`/itens`)

use serde::{Deserialize, Serialize};

use super::{amount, RecordId};

/// A named item with a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: RecordId,
    #[serde(default)]
    pub nome: String,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub preco: f64,
}

/// Request body for `POST /itens` and `PUT /itens/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPayload {
    pub nome: String,
    pub preco: f64,
}
