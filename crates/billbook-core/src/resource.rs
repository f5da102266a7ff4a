//! REST collections the client can work with.
//!
//! Each collection is a zero-sized type implementing [`Resource`], which ties
//! together the record shape, the form fields, the request payload and the
//! row template. Field names are part of the backend contract and are used
//! verbatim.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::form::{FormFields, FormMode};
use crate::models::{Bill, BillPayload, Item, ItemPayload, RecordId};
use crate::render::{currency, RecordRow};
use crate::time::{self, Clock};
use crate::util::parse_amount;

/// A REST collection and everything needed to edit its records through a form.
pub trait Resource: Send + Sync + 'static {
    type Record: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static;
    type Payload: Serialize + fmt::Debug + Send + Sync;

    /// Path segment of the collection under the base URL.
    const COLLECTION: &'static str;
    /// Singular noun used in messages.
    const NOUN: &'static str;
    /// Editable form fields, in display order.
    const FIELDS: &'static [&'static str];

    fn record_id(record: &Self::Record) -> &RecordId;

    /// Create-mode defaults.
    fn blank_form(_clock: &Clock) -> FormFields {
        FormFields::new(Self::FIELDS)
    }

    /// Form populated from an existing record for editing.
    fn form_from_record(record: &Self::Record, clock: &Clock) -> FormFields;

    /// Coerce raw form values into a request body.
    fn payload(form: &FormFields, mode: &FormMode, clock: &Clock) -> Result<Self::Payload>;

    /// Row template shared by the list and search regions.
    fn render(record: &Self::Record, clock: &Clock) -> RecordRow;
}

/// Utility bills at `/bills`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bills;

impl Resource for Bills {
    type Record = Bill;
    type Payload = BillPayload;

    const COLLECTION: &'static str = "bills";
    const NOUN: &'static str = "bill";
    const FIELDS: &'static [&'static str] = &["embasa", "coelba", "created_at"];

    fn record_id(record: &Bill) -> &RecordId {
        &record.id
    }

    fn blank_form(clock: &Clock) -> FormFields {
        FormFields::new(Self::FIELDS).with_value("created_at", clock.now_input_value())
    }

    fn form_from_record(record: &Bill, clock: &Clock) -> FormFields {
        let created_at = record.created_at.map_or_else(
            || clock.now_input_value(),
            |created_at| time::to_input_value(created_at.with_timezone(&Utc), clock.offset()),
        );

        FormFields::new(Self::FIELDS)
            .with_value("embasa", format!("{:.2}", record.embasa))
            .with_value("coelba", format!("{:.2}", record.coelba))
            .with_value("created_at", created_at)
    }

    fn payload(form: &FormFields, mode: &FormMode, clock: &Clock) -> Result<BillPayload> {
        let created_at = time::canonicalize_input(form.value("created_at"), clock)?;
        let updated_at = mode.is_editing().then(|| time::canonical(clock.now()));

        Ok(BillPayload {
            embasa: parse_amount(form.value("embasa")),
            coelba: parse_amount(form.value("coelba")),
            created_at,
            updated_at,
        })
    }

    fn render(record: &Bill, clock: &Clock) -> RecordRow {
        RecordRow::new(record.id.clone())
            .field("EMBASA", currency(record.embasa))
            .field("COELBA", currency(record.coelba))
            .field(
                "Created",
                time::display(record.created_at.as_ref(), clock.offset()),
            )
            .field(
                "Updated",
                time::display(record.updated_at.as_ref(), clock.offset()),
            )
    }
}

/// Priced items at `/itens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Items;

impl Resource for Items {
    type Record = Item;
    type Payload = ItemPayload;

    const COLLECTION: &'static str = "itens";
    const NOUN: &'static str = "item";
    const FIELDS: &'static [&'static str] = &["nome", "preco"];

    fn record_id(record: &Item) -> &RecordId {
        &record.id
    }

    fn form_from_record(record: &Item, _clock: &Clock) -> FormFields {
        FormFields::new(Self::FIELDS)
            .with_value("nome", record.nome.clone())
            .with_value("preco", format!("{:.2}", record.preco))
    }

    fn payload(form: &FormFields, _mode: &FormMode, _clock: &Clock) -> Result<ItemPayload> {
        Ok(ItemPayload {
            nome: form.value("nome").trim().to_string(),
            preco: parse_amount(form.value("preco")),
        })
    }

    fn render(record: &Item, _clock: &Clock) -> RecordRow {
        RecordRow::new(record.id.clone())
            .field("Name", record.nome.clone())
            .field("Price", currency(record.preco))
    }
}

/// Runtime selector for the supported collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResourceKind {
    #[default]
    Bills,
    Items,
}

impl ResourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bills => "bills",
            Self::Items => "items",
        }
    }

    pub const fn collection(self) -> &'static str {
        match self {
            Self::Bills => Bills::COLLECTION,
            Self::Items => Items::COLLECTION,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bills" | "bill" => Ok(Self::Bills),
            "items" | "item" | "itens" => Ok(Self::Items),
            other => Err(Error::Config(format!(
                "unknown resource '{other}' (expected bills or items)"
            ))),
        }
    }
}
