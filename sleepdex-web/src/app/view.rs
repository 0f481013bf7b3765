use crate::app::handlers::Handlers;
use crate::app::state::{AppState, LoadStatus};
use crate::components::{
    BackupBar, RarityChecklist, RecordTable, ReverseSearch, SummaryTableView, TabNav,
};
use crate::router::Route;
use sleepdex_core::{AcquisitionState, Catalog, compute_summary, location_rows, rarity_groups};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::Link;

pub fn render_app(state: &AppState, route: Option<&Route>) -> Html {
    let handlers = Handlers::new(state);
    let route = route.cloned().unwrap_or(Route::NotFound);
    render_page(&state.catalog, &state.acquired, &state.status, &route, &handlers)
}

/// Whole page for one route. Every view reads the same catalog and state.
pub fn render_page(
    catalog: &Rc<Catalog>,
    acquired: &AcquisitionState,
    status: &LoadStatus,
    route: &Route,
    handlers: &Handlers,
) -> Html {
    let body = match status {
        LoadStatus::Loading => html! { <p class="loading">{ "読み込み中..." }</p> },
        LoadStatus::Failed(message) => html! {
            <div class="alert alert-danger" role="alert">{ message.clone() }</div>
        },
        LoadStatus::Ready => html! {
            <>
                <SummaryTableView table={compute_summary(catalog, acquired)} />
                <BackupBar
                    on_export={handlers.on_export.clone()}
                    on_import={handlers.on_import.clone()}
                />
                <TabNav active={route.clone()} />
                <div class="tab-content border border-top-0 p-3">
                    { render_tab(catalog, acquired, route, handlers) }
                </div>
            </>
        },
    };

    html! {
        <main class="container my-3">
            <h1 class="h3">{ "ポケモンスリープ 寝顔チェッカー" }</h1>
            <p class="text-muted">{ "フィールドごとの寝顔の取得状況を記録できます。" }</p>
            { body }
        </main>
    }
}

fn render_tab(
    catalog: &Rc<Catalog>,
    acquired: &AcquisitionState,
    route: &Route,
    handlers: &Handlers,
) -> Html {
    match route {
        Route::Records | Route::Field { .. } => {
            let location = route.location();
            if matches!(route, Route::Field { .. }) && location.is_none() {
                return not_found();
            }
            let rows: Vec<_> = location_rows(catalog, location)
                .into_iter()
                .cloned()
                .collect();
            html! {
                <RecordTable
                    key={route.tab_label()}
                    rows={Rc::new(rows)}
                    acquired={acquired.clone()}
                    on_toggle={handlers.on_toggle.clone()}
                    on_bulk={handlers.on_bulk.clone()}
                />
            }
        }
        Route::Reverse => html! {
            <ReverseSearch
                catalog={Rc::clone(catalog)}
                acquired={acquired.clone()}
                on_toggle={handlers.on_toggle.clone()}
                on_bulk={handlers.on_bulk.clone()}
            />
        },
        Route::Rarity => html! {
            <RarityChecklist
                groups={Rc::new(rarity_groups(catalog))}
                acquired={acquired.clone()}
                on_toggle={handlers.on_toggle.clone()}
            />
        },
        Route::NotFound => not_found(),
    }
}

fn not_found() -> Html {
    html! {
        <div class="not-found">
            <p>{ Route::NotFound.tab_label() }</p>
            <Link<Route> to={Route::Records}>{ Route::Records.tab_label() }</Link<Route>>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use sleepdex_core::{Location, Record};
    use yew::LocalServerRenderer;
    use yew_router::history::{AnyHistory, MemoryHistory};
    use yew_router::Router;

    #[derive(Properties, PartialEq)]
    struct PageProps {
        route: Route,
        status: LoadStatus,
    }

    fn handlers() -> Handlers {
        Handlers {
            on_toggle: Callback::noop(),
            on_bulk: Callback::noop(),
            on_export: Callback::noop(),
            on_import: Callback::noop(),
        }
    }

    #[function_component(PageHarness)]
    fn page_harness(props: &PageProps) -> Html {
        let catalog = Rc::new(Catalog::from_records(vec![
            Record::new("p1", "ピカチュウ")
                .with_rarity("☆")
                .with_style("うとうと")
                .with_rank(Location::Cyan, "ノーマル2"),
            Record::new("e1", "イーブイ")
                .with_rarity("☆")
                .with_style("すやすや")
                .with_rank(Location::Wakakusa, "スーパー1"),
        ]));
        let acquired = AcquisitionState::from_ids(["e1"]);
        let history = AnyHistory::from(MemoryHistory::new());
        html! {
            <Router {history}>
                { render_page(&catalog, &acquired, &props.status, &props.route, &handlers()) }
            </Router>
        }
    }

    fn render(route: Route, status: LoadStatus) -> String {
        block_on(
            LocalServerRenderer::<PageHarness>::with_props(PageProps { route, status }).render(),
        )
    }

    #[test]
    fn loading_and_failure_states_hide_tables() {
        let html = render(Route::Records, LoadStatus::Loading);
        assert!(html.contains("読み込み中"));
        assert!(!html.contains("summary-table"));

        let html = render(Route::Records, LoadStatus::Failed("offline".into()));
        assert!(html.contains("offline"));
        assert!(!html.contains("record-table"));
    }

    #[test]
    fn records_tab_lists_every_record_under_the_summary() {
        let html = render(Route::Records, LoadStatus::Ready);
        assert!(html.contains("summary-table"));
        assert!(html.contains("ピカチュウ"));
        assert!(html.contains("イーブイ"));
        assert!(html.contains("exportBtn"));
    }

    #[test]
    fn field_tab_keeps_only_present_records() {
        let html = render(Route::for_location(Location::Cyan), LoadStatus::Ready);
        let table = &html[html.find("record-table").expect("record table")..];
        assert!(table.contains("ピカチュウ"));
        assert!(!table.contains("イーブイ"), "{table}");
    }

    #[test]
    fn unknown_field_and_other_tabs_render() {
        let html = render(Route::Field { slug: "moon".into() }, LoadStatus::Ready);
        assert!(html.contains("not-found"));

        let html = render(Route::Rarity, LoadStatus::Ready);
        assert!(html.contains("rarity-checklist"));

        let html = render(Route::Reverse, LoadStatus::Ready);
        assert!(html.contains("reverse-submit"));
    }
}
