use sleepdex_core::constants::FILTER_ANY_LABEL;
use sleepdex_core::{AcquiredFilter, Location, RowFilter};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub filter: RowFilter,
    pub rarity_options: Vec<AttrValue>,
    pub style_options: Vec<AttrValue>,
    pub on_change: Callback<RowFilter>,
}

fn select_options(options: &[AttrValue], selected: &str) -> Html {
    html! {
        <>
            <option value="" selected={selected.is_empty()}>{ FILTER_ANY_LABEL }</option>
            { for options.iter().map(|opt| html! {
                <option value={opt.clone()} selected={opt.as_str() == selected}>
                    { opt.clone() }
                </option>
            })}
        </>
    }
}

/// Header row of per-column filters. Every edit emits the whole filter.
#[function_component(FilterRow)]
pub fn filter_row(props: &Props) -> Html {
    let on_acquired = {
        let cb = props.on_change.clone();
        let base = props.filter.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e.target_dyn_into::<HtmlSelectElement>() {
                cb.emit(RowFilter {
                    acquired: AcquiredFilter::parse(&sel.value()),
                    ..base.clone()
                });
            }
        })
    };
    let on_name = {
        let cb = props.on_change.clone();
        let base = props.filter.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                cb.emit(RowFilter {
                    name_query: input.value(),
                    ..base.clone()
                });
            }
        })
    };
    let on_rarity = {
        let cb = props.on_change.clone();
        let base = props.filter.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e.target_dyn_into::<HtmlSelectElement>() {
                cb.emit(RowFilter {
                    rarity: sel.value(),
                    ..base.clone()
                });
            }
        })
    };
    let on_style = {
        let cb = props.on_change.clone();
        let base = props.filter.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e.target_dyn_into::<HtmlSelectElement>() {
                cb.emit(RowFilter {
                    style: sel.value(),
                    ..base.clone()
                });
            }
        })
    };

    let current = props.filter.acquired;
    html! {
        <tr class="filter-row">
            <th>
                <select class="form-select form-select-sm filter-acquired" onchange={on_acquired}>
                    { for AcquiredFilter::ALL.into_iter().map(|f| html! {
                        <option value={f.value()} selected={f == current}>{ f.label() }</option>
                    })}
                </select>
            </th>
            <th></th>
            <th>
                <input
                    type="text"
                    class="form-control form-control-sm filter-name"
                    placeholder="名前で検索"
                    value={props.filter.name_query.clone()}
                    oninput={on_name}
                />
            </th>
            <th>
                <select class="form-select form-select-sm filter-rarity" onchange={on_rarity}>
                    { select_options(&props.rarity_options, &props.filter.rarity) }
                </select>
            </th>
            <th>
                <select class="form-select form-select-sm filter-style" onchange={on_style}>
                    { select_options(&props.style_options, &props.filter.style) }
                </select>
            </th>
            { for Location::ALL.iter().map(|_| html! { <th></th> }) }
        </tr>
    }
}
