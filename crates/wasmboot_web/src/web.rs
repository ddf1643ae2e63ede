use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use wasmboot::{BootConfig, BootError, Bootstrapper, DiagnosticSink};

mod dom;
mod host;

use dom::PageConsole;
use host::BrowserHost;

/// The visible trigger button.
const TRIGGER_ID: &str = "FileIn";
/// The hidden file-selection input the trigger forwards to.
const FILE_INPUT_ID: &str = "fileInput";
/// The on-page diagnostic console.
const CONSOLE_ID: &str = "debug-console";

#[wasm_bindgen(start)]
pub fn start() {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => {
            web_sys::console::error_1(&"no document".into());
            return;
        }
    };

    // Wiring is deferred until the document is parsed, so an element lookup
    // failure means the element is truly absent, not merely not yet rendered.
    if document.ready_state() == "loading" {
        let cb = Closure::wrap(Box::new(init) as Box<dyn FnMut()>);
        if document
            .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())
            .is_err()
        {
            web_sys::console::error_1(&"failed to defer init".into());
        }
        cb.forget();
    } else {
        init();
    }
}

fn init() {
    if let Err(e) = wire_file_forwarding() {
        web_sys::console::error_1(&e.to_string().into());
    }

    spawn_local(async {
        let config = BootConfig::default();
        let mut console = PageConsole::new(CONSOLE_ID);
        let mut host = BrowserHost::new(&config.runtime_global);

        let imports = match host.import_object() {
            Ok(imports) => imports,
            Err(e) => {
                console.report(&e.to_string());
                return;
            }
        };

        // Failures are reported to the page console by the bootstrapper;
        // success is silent.
        let mut boot = Bootstrapper::new(config);
        let _ = boot.boot(&mut host, &imports, &mut console).await;
    });
}

/// Forward a click on the trigger button to the hidden file input, which
/// makes the browser present its native file picker.
fn wire_file_forwarding() -> Result<(), BootError> {
    let input: web_sys::HtmlElement = dom::element_by_id(FILE_INPUT_ID)?;
    let trigger: web_sys::HtmlElement = dom::element_by_id(TRIGGER_ID)?;

    let cb = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
        input.click();
    }) as Box<dyn FnMut(_)>);
    if trigger
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .is_err()
    {
        web_sys::console::error_1(&"failed to attach click forwarder".into());
    }
    cb.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> web_sys::Document {
        web_sys::window()
            .expect("window")
            .document()
            .expect("document")
    }

    fn install_element(tag: &str, id: &str) -> web_sys::HtmlElement {
        let el: web_sys::HtmlElement = document()
            .create_element(tag)
            .expect("create_element")
            .dyn_into()
            .expect("HtmlElement cast");
        el.set_id(id);
        document()
            .body()
            .expect("body")
            .append_child(&el)
            .expect("append_child");
        el
    }

    fn remove_if_present(id: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            el.remove();
        }
    }

    fn count_clicks(target: &web_sys::HtmlElement) -> Rc<Cell<u32>> {
        let hits = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&hits);
        let cb = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            seen.set(seen.get() + 1);
        }) as Box<dyn FnMut(_)>);
        target
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .expect("addEventListener");
        cb.forget();
        hits
    }

    #[wasm_bindgen_test]
    fn trigger_click_forwards_exactly_one_click_to_file_input() {
        let trigger = install_element("button", TRIGGER_ID);
        let input = install_element("input", FILE_INPUT_ID);
        let bystander = install_element("div", "bystander");

        wire_file_forwarding().expect("wiring should succeed");

        let input_clicks = count_clicks(&input);
        let bystander_clicks = count_clicks(&bystander);

        trigger.click();

        assert_eq!(input_clicks.get(), 1);
        assert_eq!(bystander_clicks.get(), 0);

        trigger.remove();
        input.remove();
        bystander.remove();
    }

    #[wasm_bindgen_test]
    fn wiring_fails_with_element_not_found_when_input_is_absent() {
        remove_if_present(TRIGGER_ID);
        remove_if_present(FILE_INPUT_ID);

        let err = wire_file_forwarding().expect_err("missing elements must fail wiring");
        assert!(matches!(
            err,
            BootError::ElementNotFound { ref id } if id == FILE_INPUT_ID
        ));
    }
}
