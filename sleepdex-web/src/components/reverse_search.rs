use super::record_table::{BulkAction, RecordTable};
use sleepdex_core::{AcquisitionState, Catalog, Location, Rank, Tier, reverse_lookup};
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub catalog: Rc<Catalog>,
    pub acquired: AcquisitionState,
    pub on_toggle: Callback<String>,
    pub on_bulk: Callback<BulkAction>,
}

/// Submitted search; results stay bound to it until the next submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Query {
    location: Location,
    rank: Rank,
}

/// Records still missing that `location` shows at `rank` or below.
#[function_component(ReverseSearch)]
pub fn reverse_search(props: &Props) -> Html {
    let ranks = use_memo((), |_| Rank::all());
    let location = use_state(|| Location::Wakakusa);
    let rank = use_state(|| Rank::new(Tier::Normal, 1));
    let query = use_state(|| None::<Query>);

    let on_location = {
        let location = location.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e.target_dyn_into::<HtmlSelectElement>()
                && let Some(next) = Location::parse(&sel.value())
            {
                location.set(next);
            }
        })
    };
    let on_rank = {
        let rank = rank.clone();
        Callback::from(move |e: Event| {
            if let Some(sel) = e.target_dyn_into::<HtmlSelectElement>()
                && let Some(next) = Rank::parse(&sel.value())
            {
                rank.set(next);
            }
        })
    };
    let on_search = {
        let query = query.clone();
        let location = *location;
        let rank = *rank;
        Callback::from(move |_: MouseEvent| {
            log::debug!("reverse search {location} <= {rank}");
            query.set(Some(Query { location, rank }));
        })
    };

    let results = (*query).map(|q| {
        Rc::new(
            reverse_lookup(&props.catalog, &props.acquired, q.location, q.rank)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>(),
        )
    });

    html! {
        <div class="reverse-search">
            <div class="row g-2 mb-3 align-items-end">
                <div class="col-auto">
                    <label class="form-label" for="reverse-location">{ "現在のフィールド" }</label>
                    <select id="reverse-location" class="form-select" onchange={on_location}>
                        { for Location::ALL.into_iter().map(|loc| html! {
                            <option value={loc.slug()} selected={loc == *location}>
                                { loc.label() }
                            </option>
                        })}
                    </select>
                </div>
                <div class="col-auto">
                    <label class="form-label" for="reverse-rank">{ "現在のランク" }</label>
                    <select id="reverse-rank" class="form-select" onchange={on_rank}>
                        { for ranks.iter().map(|r| html! {
                            <option value={r.to_string()} selected={*r == *rank}>
                                { r.to_string() }
                            </option>
                        })}
                    </select>
                </div>
                <div class="col-auto">
                    <button
                        type="button"
                        class="btn btn-primary reverse-submit"
                        onclick={on_search}
                    >
                        { "未取得の寝顔を表示" }
                    </button>
                </div>
            </div>
            {
                match results {
                    Some(rows) => html! {
                        <RecordTable
                            {rows}
                            acquired={props.acquired.clone()}
                            on_toggle={props.on_toggle.clone()}
                            on_bulk={props.on_bulk.clone()}
                        />
                    },
                    None => html! { <p class="text-muted">{ "フィールドとランクを選んで検索してください。" }</p> },
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use sleepdex_core::Record;
    use yew::LocalServerRenderer;

    #[test]
    fn offers_every_location_and_rank_before_searching() {
        let catalog = Rc::new(Catalog::from_records(vec![
            Record::new("a", "ピカチュウ").with_rank(Location::Wakakusa, "ノーマル1"),
        ]));
        let html = block_on(
            LocalServerRenderer::<ReverseSearch>::with_props(Props {
                catalog,
                acquired: AcquisitionState::new(),
                on_toggle: Callback::noop(),
                on_bulk: Callback::noop(),
            })
            .render(),
        );
        assert!(html.contains("ゴールド旧発電所"));
        assert!(html.contains("ノーマル1"));
        assert!(html.contains("マスター20"), "rank list incomplete: {html}");
        assert!(html.contains("フィールドとランクを選んで検索してください。"));
        assert!(!html.contains("record-table"));
    }
}
