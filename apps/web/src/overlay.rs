use radar_core::export::html::{overlay_markup, OVERLAY_STYLE};
use radar_core::overlay::OVERLAY_ID;
use radar_core::{DetailOverlay, DismissTrigger, Point};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent};

/// CSS `left`/`top` values for an overlay anchored at `anchor`.
pub fn position_style(anchor: Point) -> (String, String) {
    (format!("{}px", anchor.x), format!("{}px", anchor.y))
}

/// The `#radar-tooltip` element together with the document listeners that
/// dismiss it. Dropping the value removes both.
pub struct DomOverlay {
    document: Document,
    element: HtmlElement,
    on_click: Closure<dyn FnMut(MouseEvent)>,
    on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

impl DomOverlay {
    /// Shows `overlay` and subscribes `dismiss` to document clicks and to
    /// the Escape key.
    pub fn show(
        document: &Document,
        overlay: &DetailOverlay,
        dismiss: fn(DismissTrigger),
    ) -> Result<Self, JsValue> {
        let element = document.create_element("div")?.dyn_into::<HtmlElement>()?;
        element.set_id(OVERLAY_ID);
        element.set_class_name("radar-tooltip");
        element.set_attribute("role", "tooltip")?;
        element.set_inner_html(&overlay_markup(overlay));

        let (left, top) = position_style(overlay.anchor);
        let style = element.style();
        for (name, value) in OVERLAY_STYLE {
            style.set_property(name, value)?;
        }
        style.set_property("left", &left)?;
        style.set_property("top", &top)?;

        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&element)?;

        let on_click = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_e: MouseEvent| {
            dismiss(DismissTrigger::DocumentClick);
        }));
        let on_keydown =
            Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
                if let Some(trigger) = DismissTrigger::from_key(&e.key()) {
                    dismiss(trigger);
                }
            }));

        let shown = Self {
            document: document.clone(),
            element,
            on_click,
            on_keydown,
        };
        // Dropping `shown` on error undoes a partial subscription.
        document.add_event_listener_with_callback("click", shown.on_click.as_ref().unchecked_ref())?;
        document.add_event_listener_with_callback(
            "keydown",
            shown.on_keydown.as_ref().unchecked_ref(),
        )?;
        Ok(shown)
    }
}

impl Drop for DomOverlay {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
        let _ = self.document.remove_event_listener_with_callback(
            "keydown",
            self.on_keydown.as_ref().unchecked_ref(),
        );
        self.element.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_in_pixels() {
        assert_eq!(
            position_style(Point::new(130.0, 52.5)),
            ("130px".to_string(), "52.5px".to_string())
        );
    }

    #[test]
    fn tooltip_is_boxed_above_the_diagram() {
        let style = |name: &str| {
            OVERLAY_STYLE
                .iter()
                .find(|(property, _)| *property == name)
                .map(|(_, value)| *value)
        };
        assert_eq!(style("position"), Some("absolute"));
        assert_eq!(style("background"), Some("#fff"));
        assert_eq!(style("border"), Some("2px solid #0066cc"));
        assert_eq!(style("z-index"), Some("1000"));
    }
}
