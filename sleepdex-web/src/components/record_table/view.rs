use super::filters::FilterRow;
use crate::components::confirm_modal::ConfirmModal;
use sleepdex_core::catalog::distinct;
use sleepdex_core::constants::{ACQUIRED_LABEL, MISSING_LABEL};
use sleepdex_core::{AcquisitionState, Location, Record, RowFilter, apply_row_filter};
use std::rc::Rc;
use yew::prelude::*;

/// Set or clear every id in `ids`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkAction {
    pub ids: Vec<String>,
    pub acquired: bool,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub rows: Rc<Vec<Record>>,
    pub acquired: AcquisitionState,
    pub on_toggle: Callback<String>,
    pub on_bulk: Callback<BulkAction>,
}

fn header() -> Html {
    html! {
        <tr class="header-row">
            <th>{ "取得" }</th>
            <th>{ "図鑑No" }</th>
            <th>{ "ポケモン名" }</th>
            <th>{ "レア度" }</th>
            <th>{ "睡眠タイプ" }</th>
            { for Location::ALL.into_iter().map(|loc| html! { <th>{ loc.label() }</th> }) }
        </tr>
    }
}

fn record_row(record: &Record, acquired: bool, on_toggle: &Callback<String>) -> Html {
    let onchange = {
        let cb = on_toggle.clone();
        let id = record.id.clone();
        Callback::from(move |_: Event| cb.emit(id.clone()))
    };
    html! {
        <tr
            key={record.id.clone()}
            class={classes!(acquired.then_some("is-acquired"))}
            data-id={record.id.clone()}
        >
            <td><input type="checkbox" checked={acquired} {onchange} /></td>
            <td>{ record.catalog_number.clone() }</td>
            <td>{ record.name.clone() }</td>
            <td>{ record.rarity_label.clone() }</td>
            <td>{ record.style_label.clone() }</td>
            { for Location::ALL.into_iter().map(|loc| html! {
                <td>{ record.rank_at(loc).unwrap_or_default().to_string() }</td>
            })}
        </tr>
    }
}

/// Filterable checklist over `rows`. Bulk buttons act on the rows that pass
/// the current filter.
#[function_component(RecordTable)]
pub fn record_table(props: &Props) -> Html {
    let filter = use_state(RowFilter::default);
    let pending = use_state(|| None::<bool>);

    let rarity_options: Vec<AttrValue> =
        distinct(props.rows.iter().map(|r| r.rarity_label.as_str()))
            .into_iter()
            .map(|s| AttrValue::from(s.to_string()))
            .collect();
    let style_options: Vec<AttrValue> = distinct(props.rows.iter().map(|r| r.style_label.as_str()))
        .into_iter()
        .map(|s| AttrValue::from(s.to_string()))
        .collect();

    let visible = apply_row_filter(props.rows.iter(), &props.acquired, &filter);
    let visible_ids: Vec<String> = visible.iter().map(|r| r.id.clone()).collect();

    let on_filter = {
        let filter = filter.clone();
        Callback::from(move |next: RowFilter| filter.set(next))
    };
    let ask = |value: bool| {
        let pending = pending.clone();
        Callback::from(move |_: MouseEvent| pending.set(Some(value)))
    };
    let on_confirm = {
        let pending = pending.clone();
        let cb = props.on_bulk.clone();
        Callback::from(move |()| {
            if let Some(acquired) = *pending {
                cb.emit(BulkAction {
                    ids: visible_ids.clone(),
                    acquired,
                });
            }
            pending.set(None);
        })
    };
    let on_cancel = {
        let pending = pending.clone();
        Callback::from(move |()| pending.set(None))
    };
    let message = match *pending {
        Some(true) => format!("全ての寝顔を{ACQUIRED_LABEL}の状態にしますか？"),
        Some(false) => format!("全ての寝顔を{MISSING_LABEL}の状態にしますか？"),
        None => String::new(),
    };

    html! {
        <div class="record-table">
            <div class="mb-2 bulk-actions">
                <button
                    type="button"
                    class="btn btn-sm btn-outline-success me-2 bulk-check"
                    onclick={ask(true)}
                >
                    { format!("全てを{ACQUIRED_LABEL}にする") }
                </button>
                <button
                    type="button"
                    class="btn btn-sm btn-outline-danger bulk-uncheck"
                    onclick={ask(false)}
                >
                    { format!("全てを{MISSING_LABEL}にする") }
                </button>
            </div>
            <table class="table table-bordered table-hover table-sm">
                <thead>
                    <FilterRow
                        filter={(*filter).clone()}
                        {rarity_options}
                        {style_options}
                        on_change={on_filter}
                    />
                    { header() }
                </thead>
                <tbody>
                    { for visible.iter().map(|r| {
                        record_row(r, props.acquired.is_acquired(&r.id), &props.on_toggle)
                    }) }
                </tbody>
            </table>
            <ConfirmModal
                open={pending.is_some()}
                message={AttrValue::from(message)}
                {on_confirm}
                {on_cancel}
            />
        </div>
    }
}
