use crate::app::state::AppState;
use crate::components::record_table::BulkAction;
use crate::storage::WebStateStorage;
use sleepdex_core::AcquisitionState;
use sleepdex_core::constants::{BACKUP_FILE_NAME, IMPORT_ERROR_MESSAGE};
use yew::prelude::*;

/// Callbacks forwarded from the views back into the acquisition state.
#[derive(Clone, PartialEq)]
pub struct Handlers {
    pub on_toggle: Callback<String>,
    pub on_bulk: Callback<BulkAction>,
    pub on_export: Callback<()>,
    pub on_import: Callback<String>,
}

impl Handlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            on_toggle: build_toggle(state),
            on_bulk: build_bulk(state),
            on_export: build_export(state),
            on_import: build_import(state),
        }
    }
}

/// Persist first, then publish so every view re-renders from the saved state.
fn commit(handle: &UseStateHandle<AcquisitionState>, next: AcquisitionState) {
    if let Err(err) = next.save(&WebStateStorage::default()) {
        log::warn!("acquisition state not persisted: {err}");
    }
    handle.set(next);
}

pub(crate) fn toggled(current: &AcquisitionState, id: &str) -> AcquisitionState {
    let mut next = current.clone();
    let now = next.toggle(id);
    log::debug!("{id} -> {now}");
    next
}

pub(crate) fn bulk_applied(current: &AcquisitionState, action: &BulkAction) -> AcquisitionState {
    let mut next = current.clone();
    let changed = next.set_many(&action.ids, action.acquired);
    log::debug!(
        "bulk {} over {} rows changed {changed}",
        action.acquired,
        action.ids.len()
    );
    next
}

/// The replacement state for a backup text, or `None` after telling the
/// user it was rejected.
pub(crate) fn imported(text: &str) -> Option<AcquisitionState> {
    match AcquisitionState::parse(text) {
        Ok(next) => {
            log::info!("imported backup with {} acquired ids", next.len());
            Some(next)
        }
        Err(err) => {
            log::warn!("backup rejected: {err}");
            crate::dom::alert(IMPORT_ERROR_MESSAGE);
            None
        }
    }
}

pub fn build_toggle(state: &AppState) -> Callback<String> {
    let acquired = state.acquired.clone();
    Callback::from(move |id: String| commit(&acquired, toggled(&acquired, &id)))
}

pub fn build_bulk(state: &AppState) -> Callback<BulkAction> {
    let acquired = state.acquired.clone();
    Callback::from(move |action: BulkAction| commit(&acquired, bulk_applied(&acquired, &action)))
}

pub fn build_export(state: &AppState) -> Callback<()> {
    let acquired = state.acquired.clone();
    Callback::from(move |()| {
        if let Err(err) = crate::dom::download_json(BACKUP_FILE_NAME, &acquired.export()) {
            crate::dom::console_error(&crate::dom::js_error_message(&err));
        }
    })
}

pub fn build_import(state: &AppState) -> Callback<String> {
    let acquired = state.acquired.clone();
    Callback::from(move |text: String| {
        if let Some(next) = imported(&text) {
            commit(&acquired, next);
        }
    })
}
