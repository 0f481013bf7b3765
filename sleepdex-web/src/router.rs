use sleepdex_core::Location;
use yew_router::prelude::*;

/// One route per tab.
#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Records,
    #[at("/field/:slug")]
    Field { slug: String },
    #[at("/reverse")]
    Reverse,
    #[at("/rarity")]
    Rarity,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub fn for_location(location: Location) -> Self {
        Self::Field {
            slug: location.slug().to_string(),
        }
    }

    /// Location of a field tab; `None` for every other route.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::Field { slug } => Location::parse(slug),
            _ => None,
        }
    }

    /// Tabs in display order.
    #[must_use]
    pub fn tabs() -> Vec<Self> {
        std::iter::once(Self::Records)
            .chain(Location::ALL.into_iter().map(Self::for_location))
            .chain([Self::Reverse, Self::Rarity])
            .collect()
    }

    #[must_use]
    pub fn tab_label(&self) -> &'static str {
        match self {
            Self::Records => "すべての寝顔一覧",
            Self::Field { .. } => self.location().map_or("不明なフィールド", Location::label),
            Self::Reverse => "現在のフィールド・ランクから検索",
            Self::Rarity => "レア度別チェックリスト",
            Self::NotFound => "ページが見つかりません",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_routes_map_to_locations() {
        for location in Location::ALL {
            assert_eq!(Route::for_location(location).location(), Some(location));
        }
        assert_eq!(Route::Field { slug: "moon".into() }.location(), None);
        assert_eq!(Route::Records.location(), None);
    }

    #[test]
    fn tabs_cover_every_view() {
        let tabs = Route::tabs();
        assert_eq!(tabs.len(), 9);
        assert_eq!(tabs[0], Route::Records);
        assert_eq!(tabs[1].tab_label(), "ワカクサ本島");
        assert_eq!(tabs.last(), Some(&Route::Rarity));
    }

    #[test]
    fn routes_render_expected_paths() {
        assert_eq!(Route::Records.to_path(), "/");
        assert_eq!(Route::for_location(Location::Gold).to_path(), "/field/gold");
        assert_eq!(Route::recognize("/field/lapis"), Some(Route::for_location(Location::Lapis)));
    }
}
