use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_export: Callback<()>,
    /// Receives the text of the chosen backup file.
    pub on_import: Callback<String>,
}

#[function_component(BackupBar)]
pub fn backup_bar(props: &Props) -> Html {
    let export = {
        let cb = props.on_export.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_file = {
        let on_import = props.on_import.clone();
        #[cfg(target_arch = "wasm32")]
        {
            Callback::from(move |e: Event| {
                let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() else {
                    return;
                };
                let Some(file) = input.files().and_then(|files| files.item(0)) else {
                    return;
                };
                input.set_value("");
                let on_import = on_import.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match crate::dom::read_blob_text(&file).await {
                        Ok(text) => on_import.emit(text),
                        Err(err) => crate::dom::console_error(&crate::dom::js_error_message(&err)),
                    }
                });
            })
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = on_import;
            Callback::from(|_e: Event| {})
        }
    };

    html! {
        <div class="backup-bar d-flex gap-2 align-items-center my-3">
            <button
                type="button"
                id="exportBtn"
                class="btn btn-sm btn-outline-secondary"
                onclick={export}
            >
                { "エクスポート" }
            </button>
            <label class="form-label mb-0" for="importFile">{ "インポート" }</label>
            <input
                type="file"
                id="importFile"
                class="form-control form-control-sm w-auto"
                accept="application/json,.json"
                onchange={on_file}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_export_and_import_controls() {
        let html = block_on(
            LocalServerRenderer::<BackupBar>::with_props(Props {
                on_export: Callback::noop(),
                on_import: Callback::noop(),
            })
            .render(),
        );
        assert!(html.contains("exportBtn"));
        assert!(html.contains("type=\"file\""));
    }
}
