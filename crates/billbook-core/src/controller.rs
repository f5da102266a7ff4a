//! Create/edit form bound to a record collection.
//!
//! [`FormController`] owns the form state machine, the records currently
//! rendered in the list and search regions, and the single reporting path for
//! failures. Every operation awaits its request before returning, so at most
//! one request is in flight per controller.

use crate::api::{ApiError, RecordsApi};
use crate::error::{Error, Result};
use crate::form::{FormFields, FormMode, FormPresentation};
use crate::models::RecordId;
use crate::render::{ListRegion, SearchRegion, SEARCH_FAILED_MESSAGE};
use crate::resource::Resource;
use crate::time::Clock;
use crate::view::View;

/// Warning shown when a search is attempted without an id.
pub const EMPTY_SEARCH_WARNING: &str = "Enter an ID to search.";
/// Confirmation prompt shown before deleting.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this item?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// New record stored; the id is known when the backend echoed the record.
    Created(Option<RecordId>),
    Updated(RecordId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query, no request issued.
    Skipped,
    NotFound,
    Found(RecordId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation prompt.
    Cancelled,
    Deleted,
}

pub struct FormController<R: Resource, A, V> {
    api: A,
    view: V,
    clock: Clock,
    mode: FormMode,
    form: FormFields,
    listed: Vec<R::Record>,
    search_hit: Option<R::Record>,
}

impl<R, A, V> FormController<R, A, V>
where
    R: Resource,
    A: RecordsApi<R>,
    V: View,
{
    /// Controller in create mode; the initial form is rendered immediately.
    pub fn new(api: A, view: V, clock: Clock) -> Self {
        let form = R::blank_form(&clock);
        let mut controller = Self {
            api,
            view,
            clock,
            mode: FormMode::Create,
            form,
            listed: Vec::new(),
            search_hit: None,
        };
        controller.render_form();
        controller
    }

    /// Fetch the collection and replace the list region.
    ///
    /// On failure the previous list stays rendered.
    pub async fn load_list(&mut self) -> Result<usize> {
        match self.api.list().await {
            Ok(records) => {
                self.listed = records;
                let rows = self
                    .listed
                    .iter()
                    .map(|record| R::render(record, &self.clock))
                    .collect();
                self.view.render_list(&ListRegion::from_rows(rows));
                Ok(self.listed.len())
            }
            Err(error) => Err(self.report("load the list", error.into())),
        }
    }

    /// Write one raw form value.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        if let Err(error) = self.form.set(name, value) {
            return Err(self.report("set the field", error));
        }
        self.render_form();
        Ok(())
    }

    /// Create or update depending on the form binding, then reload the list.
    ///
    /// A failed submit leaves the form values and mode untouched.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let payload = match R::payload(&self.form, &self.mode, &self.clock) {
            Ok(payload) => payload,
            Err(error) => return Err(self.report("save", error)),
        };

        let outcome = match self.mode.clone() {
            FormMode::Create => match self.api.create(&payload).await {
                Ok(created) => {
                    self.reset_form();
                    let id = created.as_ref().map(|record| R::record_id(record).clone());
                    SubmitOutcome::Created(id)
                }
                Err(error) => return Err(self.report("save", error.into())),
            },
            FormMode::Editing(id) => match self.api.update(&id, &payload).await {
                Ok(()) => {
                    self.cancel_edit();
                    SubmitOutcome::Updated(id)
                }
                Err(error) => return Err(self.report("update", error.into())),
            },
        };

        tracing::debug!("{} saved: {:?}", R::NOUN, outcome);
        let reloaded = self.refresh_list().await;
        if let SubmitOutcome::Updated(id) = &outcome {
            self.refresh_search_hit(id, reloaded);
        }
        Ok(outcome)
    }

    /// Bind the form to a record currently shown in the list or search region.
    pub fn prepare_edit(&mut self, id: &RecordId) -> Result<()> {
        let Some(record) = self.rendered_record(id).cloned() else {
            return Err(self.report("edit", Error::UnknownRow(id.to_string())));
        };

        self.form = R::form_from_record(&record, &self.clock);
        self.mode = FormMode::Editing(id.clone());
        self.render_form();
        self.view.focus_form();
        Ok(())
    }

    /// Drop the binding and return to a blank create form.
    pub fn cancel_edit(&mut self) {
        self.mode = FormMode::Create;
        self.reset_form();
    }

    /// Look a record up by id and render the result region.
    ///
    /// A missing record, or any status the backend rejects the lookup with,
    /// renders the not-found row. Transport failures render an error row and
    /// are reported.
    pub async fn search(&mut self, query: &str) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            self.view.warn(EMPTY_SEARCH_WARNING);
            return Ok(SearchOutcome::Skipped);
        }
        let id = RecordId::parse(query)?;

        match self.api.fetch(&id).await {
            Ok(Some(record)) => {
                let row = R::render(&record, &self.clock);
                self.search_hit = Some(record);
                self.view.render_search(&SearchRegion::Found(row));
                Ok(SearchOutcome::Found(id))
            }
            Ok(None) | Err(ApiError::Status { .. }) => {
                self.search_hit = None;
                self.view.render_search(&SearchRegion::NotFound);
                Ok(SearchOutcome::NotFound)
            }
            Err(error) => {
                self.search_hit = None;
                self.view
                    .render_search(&SearchRegion::Failed(SEARCH_FAILED_MESSAGE.to_string()));
                Err(self.report("search", error.into()))
            }
        }
    }

    /// Delete after confirmation, then reload the list.
    pub async fn delete(&mut self, id: &RecordId) -> Result<DeleteOutcome> {
        if !self.view.confirm(DELETE_PROMPT) {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(error) = self.api.delete(id).await {
            return Err(self.report("delete", error.into()));
        }
        tracing::debug!("{} {} deleted", R::NOUN, id);

        if self
            .search_hit
            .as_ref()
            .is_some_and(|record| R::record_id(record) == id)
        {
            self.search_hit = None;
            self.view.render_search(&SearchRegion::Cleared);
        }
        if self.mode.bound_id() == Some(id) {
            self.cancel_edit();
        }

        self.refresh_list().await;
        Ok(DeleteOutcome::Deleted)
    }

    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub const fn form(&self) -> &FormFields {
        &self.form
    }

    /// Records in the list region, in rendered order.
    pub fn records(&self) -> &[R::Record] {
        &self.listed
    }

    /// Id of the list row at `index` (zero-based).
    pub fn row_id(&self, index: usize) -> Option<&RecordId> {
        self.listed.get(index).map(R::record_id)
    }

    pub const fn search_hit(&self) -> Option<&R::Record> {
        self.search_hit.as_ref()
    }

    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn presentation(&self) -> FormPresentation {
        FormPresentation::new(&self.mode, &self.form, self.clock.now_input_value())
    }

    fn rendered_record(&self, id: &RecordId) -> Option<&R::Record> {
        self.listed
            .iter()
            .chain(self.search_hit.iter())
            .find(|record| R::record_id(record) == id)
    }

    fn reset_form(&mut self) {
        self.form = R::blank_form(&self.clock);
        self.render_form();
    }

    fn render_form(&mut self) {
        let presentation = self.presentation();
        self.view.render_form(&presentation);
    }

    /// Reload after a successful write; a failure here is already reported.
    async fn refresh_list(&mut self) -> bool {
        if self.load_list().await.is_err() {
            tracing::debug!("{} list left stale after write", R::NOUN);
            return false;
        }
        true
    }

    /// Swap an updated search hit for its reloaded copy, or clear it when no
    /// fresh copy is available.
    fn refresh_search_hit(&mut self, id: &RecordId, reloaded: bool) {
        if !self
            .search_hit
            .as_ref()
            .is_some_and(|record| R::record_id(record) == id)
        {
            return;
        }

        let fresh = reloaded
            .then(|| {
                self.listed
                    .iter()
                    .find(|record| R::record_id(record) == id)
                    .cloned()
            })
            .flatten();
        match fresh {
            Some(record) => {
                let row = R::render(&record, &self.clock);
                self.search_hit = Some(record);
                self.view.render_search(&SearchRegion::Found(row));
            }
            None => {
                self.search_hit = None;
                self.view.render_search(&SearchRegion::Cleared);
            }
        }
    }

    fn report(&mut self, action: &str, error: Error) -> Error {
        tracing::debug!("Failed to {} {}: {}", action, R::NOUN, error);
        self.view
            .show_error(&format!("Could not {action} {}: {error}", R::NOUN));
        error
    }
}
