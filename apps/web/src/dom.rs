use radar_core::export::html::{legend_markup, LegendControls};
use radar_core::export::svg;
use radar_core::legend::{LEGEND_CONTAINER_ID, LEGEND_CONTENT_ID};
use radar_core::overlay::is_activation_key;
use radar_core::{Legend, LegendView, Marker, Point, RadarError, RenderBackend, Scene};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, KeyboardEvent, MouseEvent};

pub fn dom_error(err: JsValue) -> RadarError {
    RadarError::Export(
        err.as_string()
            .unwrap_or_else(|| format!("DOM operation failed: {err:?}")),
    )
}

pub fn marker_selector(number: usize) -> String {
    format!("g.blip[data-number=\"{number}\"]")
}

/// Looks elements up by id.
pub trait ElementLookup {
    type Element;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
}

impl ElementLookup for Document {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.get_element_by_id(id)
    }
}

/// The two elements a radar is mounted into.
#[derive(Debug)]
pub struct Containers<E> {
    pub diagram: E,
    pub legend: E,
}

/// Finds the diagram container and `#radar-legend`. Either one missing is
/// fatal.
pub fn resolve_containers<L: ElementLookup>(
    lookup: &L,
    container_id: &str,
) -> Result<Containers<L::Element>, RadarError> {
    let diagram = lookup
        .element_by_id(container_id)
        .ok_or_else(|| RadarError::MissingContainer(container_id.to_string()))?;
    let legend = lookup
        .element_by_id(LEGEND_CONTAINER_ID)
        .ok_or_else(|| RadarError::MissingContainer(LEGEND_CONTAINER_ID.to_string()))?;
    Ok(Containers { diagram, legend })
}

/// Called when a marker is clicked or activated from the keyboard, with the
/// page position the overlay should be anchored at.
pub type ActivateMarker = fn(&Marker, Point);

/// Called when the legend toggle is pressed; returns the new view.
pub type ToggleLegend = fn() -> Option<LegendView>;

type MouseListener = Closure<dyn FnMut(MouseEvent)>;
type KeyListener = Closure<dyn FnMut(KeyboardEvent)>;

/// Listeners attached to the mounted diagram and legend. They live exactly
/// as long as the markup they were attached to.
#[derive(Default)]
pub struct MountedRadar {
    _markers: Vec<(MouseListener, KeyListener)>,
    _legend_toggle: Option<MouseListener>,
}

/// Mounts the diagram into its container and the legend into
/// `#radar-legend`, replacing whatever an earlier draw put there.
pub struct DomBackend {
    document: Document,
    container: Element,
    legend_container: Element,
    view: LegendView,
    on_activate: ActivateMarker,
    on_toggle: ToggleLegend,
}

impl DomBackend {
    pub fn new(
        document: Document,
        container: Element,
        legend_container: Element,
        view: LegendView,
        on_activate: ActivateMarker,
        on_toggle: ToggleLegend,
    ) -> Self {
        Self {
            document,
            container,
            legend_container,
            view,
            on_activate,
            on_toggle,
        }
    }

    fn mount_svg(&self, scene: &Scene) -> Result<(), JsValue> {
        while let Some(previous) = self.container.query_selector(":scope > svg")? {
            previous.remove();
        }
        self.container
            .insert_adjacent_html("beforeend", &svg::to_string(scene))
    }

    fn wire_marker(&self, marker: &Marker) -> Result<Option<(MouseListener, KeyListener)>, JsValue> {
        let Some(element) = self
            .container
            .query_selector(&marker_selector(marker.number()))?
        else {
            log::warn!("No element for marker {}", marker.number());
            return Ok(None);
        };

        let on_activate = self.on_activate;
        let clicked = marker.clone();
        // The opening click must not reach the document's dismiss listener.
        let on_click = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            e.stop_propagation();
            let anchor = Point::new(f64::from(e.page_x()), f64::from(e.page_y()));
            on_activate(&clicked, anchor);
        }));

        let pressed = marker.clone();
        let target = element.clone();
        let on_keydown =
            Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
                if !is_activation_key(&e.key()) {
                    return;
                }
                e.prevent_default();
                e.stop_propagation();
                let rect = target.get_bounding_client_rect();
                let (scroll_x, scroll_y) = web_sys::window().map_or((0.0, 0.0), |window| {
                    (
                        window.page_x_offset().unwrap_or(0.0),
                        window.page_y_offset().unwrap_or(0.0),
                    )
                });
                on_activate(&pressed, Point::new(rect.left() + scroll_x, rect.top() + scroll_y));
            }));

        element.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        element.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
        Ok(Some((on_click, on_keydown)))
    }

    fn mount_legend(&self, legend: &Legend) -> Result<Option<MouseListener>, JsValue> {
        self.legend_container
            .set_inner_html(&legend_markup(legend, self.view, LegendControls::Toggle));

        let Some(button) = self
            .legend_container
            .query_selector(".radar-legend__toggle")?
        else {
            return Ok(None);
        };
        let content = self
            .document
            .get_element_by_id(LEGEND_CONTENT_ID)
            .ok_or_else(|| JsValue::from_str("legend content is missing"))?;

        let on_toggle = self.on_toggle;
        let target = button.clone();
        let listener = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_e: MouseEvent| {
            let Some(view) = on_toggle() else {
                return;
            };
            if let Err(err) = apply_legend_view(&target, &content, view) {
                log::error!("Failed to update legend: {err:?}");
            }
        }));
        button.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
        Ok(Some(listener))
    }
}

/// Mirrors `view` onto the toggle button and the legend content.
pub fn apply_legend_view(button: &Element, content: &Element, view: LegendView) -> Result<(), JsValue> {
    button.set_text_content(Some(view.button_label()));
    button.set_attribute("aria-expanded", view.aria_expanded())?;
    content.set_attribute("aria-hidden", view.content_hidden())
}

impl RenderBackend for DomBackend {
    type Output = MountedRadar;

    fn draw(&mut self, scene: &Scene, legend: &Legend) -> radar_core::Result<MountedRadar> {
        self.mount_svg(scene).map_err(dom_error)?;

        let mut markers = Vec::with_capacity(scene.markers.len());
        for marker in &scene.markers {
            if let Some(listeners) = self.wire_marker(marker).map_err(dom_error)? {
                markers.push(listeners);
            }
        }
        let legend_toggle = self.mount_legend(legend).map_err(dom_error)?;

        log::debug!(
            "Mounted {} markers into #{}",
            scene.markers.len(),
            self.container.id()
        );
        Ok(MountedRadar {
            _markers: markers,
            _legend_toggle: legend_toggle,
        })
    }
}
