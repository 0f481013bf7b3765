use sleepdex_core::constants::{MAX_STAR_TIER, MIN_STAR_TIER};
use sleepdex_core::{AcquisitionState, RarityGroup};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub groups: Rc<Vec<RarityGroup>>,
    pub acquired: AcquisitionState,
    pub on_toggle: Callback<String>,
}

fn variant_cell(
    id: Option<&str>,
    acquired: &AcquisitionState,
    on_toggle: &Callback<String>,
) -> Html {
    let Some(id) = id else {
        return html! { <td class="variant-missing">{ "-" }</td> };
    };
    let checked = acquired.is_acquired(id);
    let onchange = {
        let cb = on_toggle.clone();
        let id = id.to_string();
        Callback::from(move |_: Event| cb.emit(id.clone()))
    };
    html! {
        <td class={classes!("variant", checked.then_some("is-acquired"))}>
            <input type="checkbox" data-id={id.to_string()} {checked} {onchange} />
        </td>
    }
}

/// One row per name with a checkbox for each star tier that exists.
#[function_component(RarityChecklist)]
pub fn rarity_checklist(props: &Props) -> Html {
    let tiers = MIN_STAR_TIER..=MAX_STAR_TIER;
    html! {
        <table class="table table-bordered table-sm text-center rarity-checklist">
            <thead>
                <tr>
                    <th>{ "図鑑No" }</th>
                    <th>{ "ポケモン名" }</th>
                    { for tiers.clone().map(|tier| html! { <th>{ ("☆".repeat(tier)) }</th> }) }
                    <th>{ "取得" }</th>
                </tr>
            </thead>
            <tbody>
                { for props.groups.iter().map(|group| {
                    let (done, total) = group.progress(&props.acquired);
                    html! {
                        <tr key={group.name.clone()}>
                            <td>{ group.catalog_number.clone() }</td>
                            <td class="text-start">{ group.name.clone() }</td>
                            { for tiers.clone().map(|tier| {
                                variant_cell(group.variant(tier), &props.acquired, &props.on_toggle)
                            }) }
                            <td class="rarity-progress">{ format!("{done} / {total}") }</td>
                        </tr>
                    }
                })}
            </tbody>
        </table>
    }
}
