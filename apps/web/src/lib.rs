//! Browser renderer for Tech Radar diagrams.
//!
//! Call `radar_visualization(config)` once the page has a diagram container
//! and a `#radar-legend` element, or `load_radar(url)` to fetch the
//! configuration first. The diagram is re-rendered on `themechange` so
//! themed ring colours follow the active theme.

mod console;
mod dom;
mod overlay;
mod theme;

use std::cell::RefCell;

use log::{error, info, LevelFilter};
use radar_core::{
    render, DetailOverlay, DismissTrigger, Legend, LegendView, Marker, OverlayController, Point,
    RadarConfig, RadarError, RenderBackend,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::dom::{dom_error, resolve_containers, DomBackend, MountedRadar};
use crate::overlay::DomOverlay;
use crate::theme::{CssTheme, MathRandomJitter};

/// The last configuration drawn and everything tied to its markup.
struct WebState {
    config: RadarConfig,
    legend_view: LegendView,
    overlay: OverlayController<DomOverlay>,
    _mounted: MountedRadar,
}

thread_local! {
    static STATE: RefCell<Option<WebState>> = const { RefCell::new(None) };
}

fn to_js(err: &RadarError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console::init(LevelFilter::Info);

    let window = web_sys::window().ok_or("no window")?;
    let on_theme_change = Closure::<dyn FnMut()>::wrap(Box::new(|| {
        if let Err(err) = rerender() {
            error!("Re-render after theme change failed: {err}");
        }
    }));
    window.add_event_listener_with_callback("themechange", on_theme_change.as_ref().unchecked_ref())?;
    on_theme_change.forget();
    Ok(())
}

/// Renders the radar described by `config` into the page.
#[wasm_bindgen(js_name = radarVisualization)]
pub fn radar_visualization(config: JsValue) -> Result<(), JsValue> {
    let config: RadarConfig = serde_wasm_bindgen::from_value(config)?;
    mount(config, RenderCause::Configure).map_err(|err| {
        error!("Failed to render radar: {err}");
        to_js(&err)
    })
}

/// Fetches a JSON configuration from `url` and renders it.
#[wasm_bindgen(js_name = loadRadar)]
pub async fn load_radar(url: String) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);
    let request = Request::new_with_str_and_init(&url, &opts)?;

    let response: Response = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    if !response.ok() {
        let message = format!("Failed to fetch {url}: HTTP {}", response.status());
        error!("{message}");
        return Err(JsValue::from_str(&message));
    }

    let json = wasm_bindgen_futures::JsFuture::from(response.json()?).await?;
    info!("Loaded radar configuration from {url}");
    radar_visualization(json)
}

/// Why the diagram is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderCause {
    /// A configuration handed in from JS; everything starts fresh.
    Configure,
    /// The page theme changed; the legend keeps its expanded state.
    ThemeChange,
}

impl RenderCause {
    fn legend_view(self, previous: Option<LegendView>) -> LegendView {
        match (self, previous) {
            (Self::ThemeChange, Some(view)) => view,
            _ => LegendView::collapsed(),
        }
    }
}

/// Draws the last configuration again, picking up the current theme.
fn rerender() -> Result<(), RadarError> {
    let config = STATE.with(|cell| cell.borrow().as_ref().map(|state| state.config.clone()));
    match config {
        Some(config) => mount(config, RenderCause::ThemeChange),
        None => Ok(()),
    }
}

fn mount(config: RadarConfig, cause: RenderCause) -> Result<(), RadarError> {
    let window = web_sys::window().ok_or_else(|| RadarError::Export("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| RadarError::Export("no document".to_string()))?;

    let containers = resolve_containers(&document, &config.container_id)?;

    let theme = CssTheme::for_document(&window, &document).map_err(dom_error)?;
    let scene = render(&config, &theme, &mut MathRandomJitter)?;
    let legend = Legend::from_scene(&scene);

    STATE.with(|cell| -> Result<(), RadarError> {
        let mut slot = cell.borrow_mut();
        let legend_view = cause.legend_view(slot.as_ref().map(|state| state.legend_view));
        if let Some(state) = slot.as_mut() {
            state.overlay.close();
        }

        // The previous state keeps its marker listeners alive until the new
        // markup is in place.
        replace_after(&mut *slot, || {
            let mounted = DomBackend::new(
                document,
                containers.diagram,
                containers.legend,
                legend_view,
                open_overlay,
                toggle_legend,
            )
            .draw(&scene, &legend)?;

            info!(
                "Rendered {} of {} entries",
                scene.markers.len(),
                config.entries.len()
            );
            Ok(WebState {
                config,
                legend_view,
                overlay: OverlayController::new(),
                _mounted: mounted,
            })
        })
    })
}

/// Builds the next value and only then replaces the current one, so a
/// failed build leaves `slot` untouched.
fn replace_after<S, E>(slot: &mut Option<S>, build: impl FnOnce() -> Result<S, E>) -> Result<(), E> {
    let next = build()?;
    *slot = Some(next);
    Ok(())
}

fn open_overlay(marker: &Marker, anchor: Point) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let overlay = DetailOverlay::for_marker(marker, anchor);

    STATE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(state) = slot.as_mut() else {
            return;
        };
        // Only one `#radar-tooltip` may exist at a time.
        state.overlay.close();
        match DomOverlay::show(&document, &overlay, dismiss_overlay) {
            Ok(shown) => {
                state.overlay.open(overlay, || shown);
            }
            Err(err) => error!("Failed to show details for {}: {err:?}", marker.entry.label),
        }
    });
}

/// Runs from inside one of the overlay's own listeners, so the overlay is
/// dropped after the current event has finished dispatching.
fn dismiss_overlay(trigger: DismissTrigger) {
    wasm_bindgen_futures::spawn_local(async move {
        STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.overlay.dismiss(trigger);
            }
        });
    });
}

fn toggle_legend() -> Option<LegendView> {
    STATE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let state = slot.as_mut()?;
        state.legend_view.toggle();
        Some(state.legend_view)
    })
}
