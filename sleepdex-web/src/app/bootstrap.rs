use crate::app::state::{AppState, LoadStatus};
use crate::storage::WebDataError;
use sleepdex_core::{AcquisitionState, Catalog};
use std::rc::Rc;
use yew::prelude::*;

/// Publish the outcome of the catalog fetch. The acquisition state is only
/// installed once a catalog is available; a failed fetch leaves the page
/// empty with a visible error.
pub(crate) fn apply_catalog(
    state: &AppState,
    fetched: Result<Catalog, WebDataError>,
    stored: AcquisitionState,
) {
    match fetched {
        Ok(catalog) => {
            log::info!(
                "catalog ready: {} records, {} acquired",
                catalog.len(),
                stored.len()
            );
            state.catalog.set(Rc::new(catalog));
            state.acquired.set(stored);
            state.status.set(LoadStatus::Ready);
        }
        Err(err) => {
            let message = format!("図鑑データを読み込めませんでした: {err}");
            crate::dom::console_error(&message);
            state.status.set(LoadStatus::Failed(message.into()));
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let state = app_state.clone();

    use_effect_with((), move |()| {
        wasm_bindgen_futures::spawn_local(async move {
            let fetched = crate::storage::fetch_catalog(&crate::paths::catalog_url()).await;
            let stored = AcquisitionState::load(&crate::storage::WebStateStorage::default());
            apply_catalog(&state, fetched, stored);
        });
        || {}
    });
}
