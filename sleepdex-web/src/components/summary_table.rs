use sleepdex_core::{SummaryCell, SummaryRowKind, SummaryTable};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub table: SummaryTable,
}

fn cell(cell: &SummaryCell) -> Html {
    html! {
        <td class="summary-cell">
            <span class="summary-count">{ cell.to_string() }</span>
            <br />
            <span class="summary-rate">{ cell.rate_text() }</span>
        </td>
    }
}

/// Completion counts per style and location.
#[function_component(SummaryTableView)]
pub fn summary_table_view(props: &Props) -> Html {
    let table = &props.table;
    html! {
        <table class="table table-bordered table-sm text-center summary-table">
            <thead>
                <tr>
                    <th></th>
                    { for table.columns.iter().map(|c| html! { <th>{ c.label() }</th> }) }
                </tr>
            </thead>
            <tbody>
                { for table.rows.iter().map(|row| html! {
                    <tr class={classes!(
                        (row.kind == SummaryRowKind::Total).then_some("summary-total")
                    )}>
                        <th>{ row.kind.label() }</th>
                        { for row.cells.iter().map(cell) }
                    </tr>
                })}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use sleepdex_core::{AcquisitionState, Catalog, Location, Record, compute_summary};
    use yew::LocalServerRenderer;

    #[test]
    fn renders_counts_and_rates() {
        let catalog = Catalog::from_records(vec![
            Record::new("a", "ピカチュウ")
                .with_style("うとうと")
                .with_rank(Location::Cyan, "ノーマル1"),
            Record::new("b", "イーブイ").with_style("すやすや"),
            Record::new("c", "ロコン").with_style("すやすや"),
        ]);
        let table = compute_summary(&catalog, &AcquisitionState::from_ids(["a"]));
        let html = block_on(
            LocalServerRenderer::<SummaryTableView>::with_props(Props { table }).render(),
        );
        assert!(html.contains("全寝顔"));
        assert!(html.contains("シアンの砂浜"));
        assert!(html.contains("合計"));
        assert!(html.contains("1 / 3"), "total cell missing: {html}");
        assert!(html.contains("取得率: 33%"));
        assert!(html.contains("取得率: 100%"));
        assert!(html.contains("summary-total"));
    }
}
