use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub active: Route,
}

#[function_component(TabNav)]
pub fn tab_nav(props: &Props) -> Html {
    html! {
        <ul class="nav nav-tabs" role="tablist">
            { for Route::tabs().into_iter().map(|route| {
                let active = route == props.active;
                let label = route.tab_label();
                html! {
                    <li class="nav-item" role="presentation">
                        <Link<Route>
                            to={route}
                            classes={classes!("nav-link", active.then_some("active"))}
                        >
                            { label }
                        </Link<Route>>
                    </li>
                }
            })}
        </ul>
    }
}
