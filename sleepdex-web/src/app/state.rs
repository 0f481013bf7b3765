use sleepdex_core::{AcquisitionState, Catalog};
use std::rc::Rc;
use yew::prelude::*;

/// Startup progress of the catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(AttrValue),
}

/// The single per-session context: catalog, acquisition state and load status.
#[derive(Clone)]
pub struct AppState {
    pub catalog: UseStateHandle<Rc<Catalog>>,
    pub acquired: UseStateHandle<AcquisitionState>,
    pub status: UseStateHandle<LoadStatus>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        catalog: use_state(|| Rc::new(Catalog::empty())),
        acquired: use_state(AcquisitionState::new),
        status: use_state(|| LoadStatus::Loading),
    }
}

impl AppState {
    #[must_use]
    pub fn data_ready(&self) -> bool {
        matches!(*self.status, LoadStatus::Ready)
    }
}
