use radar_core::{Jitter, ThemeResolver};
use wasm_bindgen::JsValue;
use web_sys::{CssStyleDeclaration, Document, Window};

/// Theme variables as currently computed on the document element, so
/// `var(--name)` colours follow whichever theme the page has active.
pub struct CssTheme {
    style: CssStyleDeclaration,
}

impl CssTheme {
    pub fn for_document(window: &Window, document: &Document) -> Result<Self, JsValue> {
        let root = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("document has no root element"))?;
        let style = window
            .get_computed_style(&root)?
            .ok_or_else(|| JsValue::from_str("no computed style for the root element"))?;
        Ok(Self { style })
    }
}

impl ThemeResolver for CssTheme {
    fn lookup(&self, variable: &str) -> Option<String> {
        self.style
            .get_property_value(variable)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Uniform jitter in `[-1, 1)` from `Math.random`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MathRandomJitter;

impl Jitter for MathRandomJitter {
    fn sample(&mut self) -> f64 {
        js_sys::Math::random().mul_add(2.0, -1.0)
    }
}
