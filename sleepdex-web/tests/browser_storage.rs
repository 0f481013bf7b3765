#![cfg(target_arch = "wasm32")]

use sleepdex_core::{AcquisitionState, StateStorage};
use sleepdex_web::dom;
use sleepdex_web::storage::WebStateStorage;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn scratch_storage(key: &str) -> WebStateStorage {
    if let Ok(storage) = dom::local_storage() {
        let _ = storage.remove_item(key);
    }
    WebStateStorage::new(key)
}

#[wasm_bindgen_test]
fn acquisition_state_survives_a_reload() {
    let storage = scratch_storage("sleepdex-test-roundtrip");
    let mut state = AcquisitionState::load(&storage);
    assert!(state.is_empty());

    state.toggle("0025-1");
    state.toggle("0133-2");
    state.save(&storage).expect("save to localStorage");

    let reloaded = AcquisitionState::load(&storage);
    assert_eq!(reloaded, state);
}

#[wasm_bindgen_test]
fn garbage_blob_loads_as_empty_state() {
    let storage = scratch_storage("sleepdex-test-garbage");
    storage.write("{not json").expect("write raw blob");
    assert!(AcquisitionState::load(&storage).is_empty());
}

#[wasm_bindgen_test]
fn dom_helpers_see_the_browser() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
}
