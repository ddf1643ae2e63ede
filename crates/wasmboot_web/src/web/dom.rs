use wasm_bindgen::JsCast;

use wasmboot::{BootError, DiagnosticSink};

/// Look up a page element by its stable id.
pub(super) fn element_by_id<T: JsCast>(id: &str) -> Result<T, BootError> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| BootError::ElementNotFound { id: id.to_string() })
}

/// Diagnostic surface over the on-page console element, duplicated to the
/// browser console. Missing element degrades to console-only output.
pub(super) struct PageConsole {
    element: Option<web_sys::Element>,
}

impl PageConsole {
    pub(super) fn new(id: &str) -> Self {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        Self { element }
    }
}

impl DiagnosticSink for PageConsole {
    fn report(&mut self, message: &str) {
        web_sys::console::log_1(&message.into());
        if let Some(el) = &self.element {
            let mut html = el.inner_html();
            html.push_str(message);
            html.push_str("<br>");
            el.set_inner_html(&html);
        }
    }
}
