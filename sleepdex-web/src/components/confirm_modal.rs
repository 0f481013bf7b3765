use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Yes/no dialog guarding bulk actions.
#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &Props) -> Html {
    let confirm = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_cancel.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };

    if !props.open {
        return Html::default();
    }

    html! {
        <div class="modal-backdrop" role="presentation">
            <div
                class="modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby="confirm-title"
                onkeydown={on_keydown}
            >
                <div class="modal__header">
                    <h2 id="confirm-title">{ "確認" }</h2>
                    <button
                        type="button"
                        class="modal__close"
                        aria-label="閉じる"
                        onclick={cancel.clone()}
                    >
                        {"X"}
                    </button>
                </div>
                <p class="modal__description">{ props.message.clone() }</p>
                <div class="modal__footer">
                    <button type="button" class="btn btn-secondary" onclick={cancel}>
                        { "実行しません" }
                    </button>
                    <button type="button" class="btn btn-primary confirm-ok" onclick={confirm}>
                        { "実行します" }
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn props(open: bool) -> Props {
        Props {
            open,
            message: AttrValue::from("全ての寝顔を取得済の状態にしますか？"),
            on_confirm: Callback::noop(),
            on_cancel: Callback::noop(),
        }
    }

    #[test]
    fn renders_message_only_when_open() {
        let html = block_on(LocalServerRenderer::<ConfirmModal>::with_props(props(true)).render());
        assert!(html.contains("全ての寝顔を取得済の状態にしますか？"));
        assert!(html.contains("confirm-ok"));

        let html = block_on(LocalServerRenderer::<ConfirmModal>::with_props(props(false)).hydratable(false).render());
        assert!(!html.contains("modal"));
    }
}
