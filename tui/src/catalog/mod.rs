//! Catalog manager: owns product state and drives the CRUD round-trips.
//!
//! Network calls run on the tokio runtime and report back through
//! [`AppEvent::Catalog`]. Nothing here blocks the UI thread.

mod draft;
mod render;
mod requests;
mod store;

#[cfg(test)]
pub(crate) mod test_support;

use std::cell::Cell;
use std::future::Future;
use std::sync::Arc;

use catalog_client::{CatalogApi, Product, ProductId, ProductPayload};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::key_hint;

pub(crate) use draft::{DraftField, ProductDraft};
pub(crate) use requests::CatalogResponse;
use requests::{CatalogOutcome, Cancelled, RequestKey, RequestTicket, RequestTracker, or_cancel};
use store::{ProductStore, StoreAction};

pub(crate) const FETCH_ERROR: &str =
    "Failed to fetch products. Please check if the catalog backend is running.";
pub(crate) const CREATE_ERROR: &str = "Failed to create product";
pub(crate) const UPDATE_ERROR: &str = "Failed to update product";
pub(crate) const DELETE_ERROR: &str = "Failed to delete product";

/// Which surface currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CatalogMode {
    Grid,
    Form,
    ConfirmDelete,
}

pub(crate) struct CatalogManager {
    api: Arc<dyn CatalogApi>,
    app_event_tx: AppEventSender,
    currency: String,

    store: ProductStore,
    loading: bool,
    error: Option<String>,

    show_modal: bool,
    editing: Option<ProductId>,
    draft: ProductDraft,
    focus: DraftField,
    form_error: Option<String>,
    /// Bumped on every open so late submit results can tell whether the form
    /// they came from is still the one on screen.
    form_session: u64,
    last_submit: Option<RequestKey>,

    pending_delete: Option<ProductId>,
    selected: usize,
    /// Card columns from the last render; used for up/down navigation.
    columns: Cell<usize>,
    spinner_frame: usize,

    requests: RequestTracker,
}

impl CatalogManager {
    pub(crate) fn new(
        api: Arc<dyn CatalogApi>,
        app_event_tx: AppEventSender,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            api,
            app_event_tx,
            currency: currency.into(),
            store: ProductStore::default(),
            loading: false,
            error: None,
            show_modal: false,
            editing: None,
            draft: ProductDraft::default(),
            focus: DraftField::Name,
            form_error: None,
            form_session: 0,
            last_submit: None,
            pending_delete: None,
            selected: 0,
            columns: Cell::new(1),
            spinner_frame: 0,
            requests: RequestTracker::new(),
        }
    }

    pub(crate) fn mode(&self) -> CatalogMode {
        if self.pending_delete.is_some() {
            CatalogMode::ConfirmDelete
        } else if self.show_modal {
            CatalogMode::Form
        } else {
            CatalogMode::Grid
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(crate) fn products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.store.iter()
    }

    pub(crate) fn selected_product(&self) -> Option<&Product> {
        self.store.get_index(self.selected)
    }

    // ---- List -------------------------------------------------------------

    /// Fetch the full product list. A newer call supersedes an in-flight one.
    pub(crate) fn load_products(&mut self) {
        self.loading = true;
        let ticket = self.requests.issue_list();
        let api = Arc::clone(&self.api);
        tracing::info!("fetching products");
        self.spawn_request(ticket, async move {
            CatalogOutcome::Listed(api.list_products().await)
        });
    }

    // ---- Form -------------------------------------------------------------

    pub(crate) fn open_create(&mut self) {
        self.editing = None;
        self.draft = ProductDraft::default();
        self.open_modal();
    }

    pub(crate) fn open_edit(&mut self, product: &Product) {
        self.editing = Some(product.id.clone());
        self.draft = ProductDraft::from_product(product);
        self.open_modal();
    }

    fn open_modal(&mut self) {
        self.focus = DraftField::Name;
        self.form_error = None;
        self.form_session += 1;
        self.show_modal = true;
    }

    /// Close without touching the list. The draft is left as it was.
    pub(crate) fn close_modal(&mut self) {
        self.show_modal = false;
        self.form_error = None;
    }

    /// Create or update depending on whether a product is being edited.
    pub(crate) fn submit(&mut self) {
        let payload = match self.draft.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "rejected product draft");
                self.form_error = Some(err.to_string());
                return;
            }
        };
        self.form_error = None;

        match self.editing.clone() {
            Some(id) => self.update_product(id, payload),
            None => self.create_product(payload),
        }
    }

    fn create_product(&mut self, payload: ProductPayload) {
        let ticket = self.requests.issue_create();
        self.last_submit = Some(ticket.key().clone());
        let session = self.form_session;
        let api = Arc::clone(&self.api);
        tracing::info!(name = %payload.name, "creating product");
        self.spawn_request(ticket, async move {
            CatalogOutcome::Created {
                session,
                result: api.create_product(&payload).await,
            }
        });
    }

    fn update_product(&mut self, id: ProductId, payload: ProductPayload) {
        let ticket = self.requests.issue_for_product(id.clone());
        self.last_submit = Some(ticket.key().clone());
        let session = self.form_session;
        let api = Arc::clone(&self.api);
        tracing::info!(%id, "updating product");
        self.spawn_request(ticket, async move {
            CatalogOutcome::Updated {
                session,
                result: api.update_product(&id, &payload).await,
            }
        });
    }

    fn is_submitting(&self) -> bool {
        self.last_submit
            .as_ref()
            .is_some_and(|key| self.requests.is_pending(key))
    }

    // ---- Delete -----------------------------------------------------------

    /// Ask for confirmation before deleting `id`.
    pub(crate) fn request_delete(&mut self, id: ProductId) {
        self.pending_delete = Some(id);
    }

    pub(crate) fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub(crate) fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        let ticket = self.requests.issue_for_product(id.clone());
        let api = Arc::clone(&self.api);
        tracing::info!(%id, "deleting product");
        self.spawn_request(ticket, async move {
            let result = api.delete_product(&id).await;
            CatalogOutcome::Deleted { id, result }
        });
    }

    // ---- Responses --------------------------------------------------------

    pub(crate) fn on_response(&mut self, response: CatalogResponse) {
        let CatalogResponse { ticket, outcome } = response;
        if !self.requests.settle(&ticket) {
            tracing::debug!(key = ?ticket.key(), "discarding stale response");
            return;
        }

        match outcome {
            CatalogOutcome::Listed(Ok(products)) => {
                tracing::info!(count = products.len(), "products fetched");
                self.loading = false;
                self.error = None;
                self.apply(StoreAction::Reset(products));
            }
            CatalogOutcome::Listed(Err(err)) => {
                tracing::error!(error = %err, "error fetching products");
                self.loading = false;
                self.error = Some(FETCH_ERROR.to_string());
            }
            CatalogOutcome::Created { session, result } => match result {
                Ok(product) => {
                    tracing::info!(id = %product.id, "product created");
                    let id = product.id.clone();
                    self.apply(StoreAction::Insert(product));
                    if let Some(position) = self.store.position(&id) {
                        self.selected = position;
                    }
                    if self.is_current_form(session) && self.editing.is_none() {
                        self.show_modal = false;
                        self.draft = ProductDraft::default();
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "error creating product");
                    self.error = Some(CREATE_ERROR.to_string());
                }
            },
            CatalogOutcome::Updated { session, result } => match result {
                Ok(product) => {
                    tracing::info!(id = %product.id, "product updated");
                    let id = product.id.clone();
                    self.apply(StoreAction::Replace(product));
                    if self.is_current_form(session) && self.editing.as_ref() == Some(&id) {
                        self.show_modal = false;
                        self.editing = None;
                        self.draft = ProductDraft::default();
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "error updating product");
                    self.error = Some(UPDATE_ERROR.to_string());
                }
            },
            CatalogOutcome::Deleted { id, result } => match result {
                Ok(()) => {
                    tracing::info!(%id, "product deleted");
                    self.apply(StoreAction::Remove(id));
                }
                Err(err) => {
                    tracing::error!(%id, error = %err, "error deleting product");
                    self.error = Some(DELETE_ERROR.to_string());
                }
            },
        }
    }

    fn is_current_form(&self, session: u64) -> bool {
        self.show_modal && self.form_session == session
    }

    fn apply(&mut self, action: StoreAction) {
        self.store = std::mem::take(&mut self.store).reduce(action);
        self.selected = self.selected.min(self.store.len().saturating_sub(1));
    }

    // ---- Misc -------------------------------------------------------------

    pub(crate) fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Advance the spinner. Returns true when a redraw is needed.
    pub(crate) fn on_tick(&mut self) -> bool {
        if self.loading {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
            true
        } else {
            false
        }
    }

    /// Cancel everything in flight; late results are dropped.
    pub(crate) fn shutdown(&mut self) {
        self.requests.cancel_all();
    }

    fn spawn_request<F>(&self, ticket: RequestTicket, request: F)
    where
        F: Future<Output = CatalogOutcome> + Send + 'static,
    {
        let token = self.requests.cancellation_token();
        let tx = self.app_event_tx.clone();
        tokio::spawn(async move {
            match or_cancel(request, &token).await {
                Ok(outcome) => tx.send(AppEvent::Catalog(CatalogResponse { ticket, outcome })),
                Err(Cancelled) => tracing::debug!(key = ?ticket.key(), "request cancelled"),
            }
        });
    }

    // ---- Input ------------------------------------------------------------

    pub(crate) fn handle_key_event(&mut self, key_event: KeyEvent) {
        if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return;
        }
        match self.mode() {
            CatalogMode::ConfirmDelete => self.handle_confirm_key(key_event),
            CatalogMode::Form => self.handle_form_key(key_event),
            CatalogMode::Grid => self.handle_grid_key(key_event),
        }
    }

    pub(crate) fn handle_paste(&mut self, text: String) {
        if self.mode() != CatalogMode::Form {
            return;
        }
        let text = text.replace(['\r', '\n'], " ");
        self.draft.field_mut(self.focus).push_str(&text);
    }

    fn handle_confirm_key(&mut self, key_event: KeyEvent) {
        if key_hint::CONFIRM.is_press(key_event) || key_event.code == KeyCode::Enter {
            self.confirm_delete();
        } else if key_hint::DECLINE.is_press(key_event) || key_event.code == KeyCode::Esc {
            self.cancel_delete();
        }
    }

    fn handle_form_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => self.close_modal(),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Backspace => {
                self.draft.field_mut(self.focus).pop();
            }
            KeyCode::Char(c) if !key_hint::has_ctrl_or_alt(key_event.modifiers) => {
                self.draft.field_mut(self.focus).push(c);
            }
            _ => {}
        }
    }

    fn handle_grid_key(&mut self, key_event: KeyEvent) {
        if key_hint::ADD.is_press(key_event) {
            self.open_create();
        } else if key_hint::EDIT.is_press(key_event) || key_event.code == KeyCode::Enter {
            if let Some(product) = self.selected_product().cloned() {
                self.open_edit(&product);
            }
        } else if key_hint::DELETE.is_press(key_event) || key_event.code == KeyCode::Delete {
            if let Some(id) = self.selected_product().map(|p| p.id.clone()) {
                self.request_delete(id);
            }
        } else if key_hint::REFRESH.is_press(key_event) {
            self.load_products();
        } else if key_hint::QUIT.is_press(key_event) {
            self.app_event_tx.send(AppEvent::ExitRequest);
        } else {
            match key_event.code {
                KeyCode::Esc => self.dismiss_error(),
                KeyCode::Left | KeyCode::Char('h') => self.move_selection(-1),
                KeyCode::Right | KeyCode::Char('l') => self.move_selection(1),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection(-(self.columns.get() as isize));
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection(self.columns.get() as isize);
                }
                _ => {}
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let target = self.selected as isize + delta;
        if (0..len as isize).contains(&target) {
            self.selected = target as usize;
        }
    }
}

impl Drop for CatalogManager {
    fn drop(&mut self) {
        self.requests.cancel_all();
    }
}
