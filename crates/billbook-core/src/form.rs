//! Form state: raw field values and the create/edit binding.

use crate::error::{Error, Result};
use crate::models::RecordId;

/// Submit label while creating a record.
pub const SAVE_LABEL: &str = "Save";
/// Submit label while editing a record.
pub const UPDATE_LABEL: &str = "Update";

/// Which record, if any, the form is bound to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    /// Submitting creates a new record.
    #[default]
    Create,
    /// Submitting updates the record with this id.
    Editing(RecordId),
}

impl FormMode {
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub const fn bound_id(&self) -> Option<&RecordId> {
        match self {
            Self::Create => None,
            Self::Editing(id) => Some(id),
        }
    }
}

/// Raw, unvalidated field values keyed by the resource's field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    values: Vec<(&'static str, String)>,
}

impl FormFields {
    /// Empty form with the given field names, in display order.
    pub fn new(names: &'static [&'static str]) -> Self {
        Self {
            values: names.iter().map(|name| (*name, String::new())).collect(),
        }
    }

    /// Current raw value, empty for unknown names.
    pub fn value(&self, name: &str) -> &str {
        self.values
            .iter()
            .find(|(field, _)| *field == name)
            .map_or("", |(_, value)| value.as_str())
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let name = name.trim();
        let Some(index) = self.values.iter().position(|(field, _)| *field == name) else {
            return Err(Error::UnknownField {
                field: name.to_string(),
                expected: self.names().collect::<Vec<_>>().join(", "),
            });
        };
        self.values[index].1 = value.into();
        Ok(())
    }

    /// Builder-style assignment for names the caller knows the form defines.
    #[must_use]
    pub fn with_value(mut self, name: &str, value: impl Into<String>) -> Self {
        if let Some(slot) = self.values.iter_mut().find(|(field, _)| *field == name) {
            slot.1 = value.into();
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }
}

/// Everything a surface needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPresentation {
    pub mode: FormMode,
    pub fields: FormFields,
    pub submit_label: &'static str,
    pub cancel_visible: bool,
    /// "Updated at" display value; `None` keeps the field hidden.
    pub updated_at: Option<String>,
}

impl FormPresentation {
    pub fn new(mode: &FormMode, fields: &FormFields, now_input_value: String) -> Self {
        let editing = mode.is_editing();
        Self {
            mode: mode.clone(),
            fields: fields.clone(),
            submit_label: if editing { UPDATE_LABEL } else { SAVE_LABEL },
            cancel_visible: editing,
            updated_at: editing.then_some(now_input_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[&str] = &["embasa", "coelba"];

    #[test]
    fn set_and_read_known_field() {
        let mut form = FormFields::new(FIELDS);
        form.set("embasa", "12.50").unwrap();
        assert_eq!(form.value("embasa"), "12.50");
        assert_eq!(form.value("coelba"), "");
    }

    #[test]
    fn set_rejects_unknown_field() {
        let mut form = FormFields::new(FIELDS);
        let error = form.set("water", "1").unwrap_err();
        assert!(matches!(error, Error::UnknownField { .. }));
        assert!(error.to_string().contains("embasa, coelba"));
    }

    #[test]
    fn presentation_follows_mode() {
        let form = FormFields::new(FIELDS);
        let create = FormPresentation::new(&FormMode::Create, &form, "now".to_string());
        assert_eq!(create.submit_label, SAVE_LABEL);
        assert!(!create.cancel_visible);
        assert!(create.updated_at.is_none());

        let editing = FormMode::Editing(RecordId::parse("7").unwrap());
        let edit = FormPresentation::new(&editing, &form, "now".to_string());
        assert_eq!(edit.submit_label, UPDATE_LABEL);
        assert!(edit.cancel_visible);
        assert_eq!(edit.updated_at.as_deref(), Some("now"));
    }
}
