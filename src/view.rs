// src/view.rs

use serde::Serialize;

use crate::geopoint::{Coordinate, WeightedPoint};
use crate::heat::HeatLayerStyle;
use crate::search::{SearchResult, SearchSnapshot};

pub const PAGE_TITLE: &str = "Crop Disease Risk Map";
pub const PAGE_SUBTITLE: &str =
    "AI-powered visualization of disease risk across farming regions in India.";
pub const SEARCH_PLACEHOLDER: &str = "Enter village / district / city";
pub const DEFAULT_ZOOM: u8 = 15;

/// Satellite imagery tiles, addressed as `{z}/{y}/{x}`.
pub const SATELLITE_TILES: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";

/// Pages the view can navigate to.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Treatment,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Treatment => "/treatment",
        }
    }
}

/// A tile-server URL with `{z}`, `{x}` and `{y}` placeholders.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct TileTemplate(String);

impl TileTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        TileTemplate(template.into())
    }

    pub fn satellite() -> Self {
        TileTemplate::new(SATELLITE_TILES)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expands the template for one tile.
    pub fn url(&self, zoom: u8, x: u32, y: u32) -> String {
        self.0
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SearchBar {
    pub placeholder: &'static str,
    pub query: String,
    pub button_label: &'static str,
    pub busy: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HeatLayer {
    pub points: Vec<WeightedPoint>,
    pub style: HeatLayerStyle,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub scroll_wheel_zoom: bool,
    pub tiles: TileTemplate,
    pub heat: HeatLayer,
}

impl MapView {
    fn for_result(result: &SearchResult) -> Self {
        MapView {
            center: result.center,
            zoom: DEFAULT_ZOOM,
            scroll_wheel_zoom: true,
            tiles: TileTemplate::satellite(),
            heat: HeatLayer {
                points: result.points.clone(),
                style: HeatLayerStyle::default(),
            },
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NavAction {
    pub label: &'static str,
    pub route: Route,
}

/// Declarative description of the risk map page for one state snapshot.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PageView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub search: SearchBar,
    pub status: Option<String>,
    pub map: Option<MapView>,
    /// Blocking message for the last failed search.
    pub alert: Option<String>,
    pub treatment: NavAction,
}

impl PageView {
    pub fn render(snapshot: &SearchSnapshot) -> Self {
        let busy = snapshot.is_loading();
        PageView {
            title: PAGE_TITLE,
            subtitle: PAGE_SUBTITLE,
            search: SearchBar {
                placeholder: SEARCH_PLACEHOLDER,
                query: snapshot.query.clone(),
                button_label: if busy { "Analyzing…" } else { "Analyze" },
                busy,
            },
            status: snapshot
                .displayed
                .as_ref()
                .map(|result| format!("Showing disease risk for {}", result.label)),
            map: snapshot.displayed.as_ref().map(MapView::for_result),
            alert: snapshot.error().map(|err| err.to_string()),
            // Always present, regardless of search state.
            treatment: NavAction {
                label: "View Treatment Recommendations",
                route: Route::Treatment,
            },
        }
    }
}
