//! `ModuleHost` over the real browser capabilities.
//!
//! Capability probes go through `Reflect` on the global object so a host
//! without any `WebAssembly` namespace is detected rather than trapped on.
//! The import table and the entry point come from the page-provided runtime
//! shim (`new Go()` for Go-toolchain modules); both are opaque pass-through.

use js_sys::{Reflect, Uint8Array, WebAssembly};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use wasmboot::{BootError, LoadStage, ModuleHost};

pub(super) struct BrowserHost {
    runtime_global: String,
    shim: Option<JsValue>,
}

impl BrowserHost {
    pub(super) fn new(runtime_global: &str) -> Self {
        Self {
            runtime_global: runtime_global.to_string(),
            shim: None,
        }
    }

    /// Construct the runtime shim and hand back its import table.
    pub(super) fn import_object(&mut self) -> Result<JsValue, BootError> {
        let ctor = Reflect::get(&js_sys::global(), &self.runtime_global.as_str().into())
            .ok()
            .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(|| {
                BootError::load(
                    LoadStage::Instantiate,
                    format!("runtime shim `{}` not found", self.runtime_global),
                )
            })?;

        let shim = Reflect::construct(&ctor, &js_sys::Array::new()).map_err(|e| {
            BootError::load(
                LoadStage::Instantiate,
                format!("runtime shim construction failed: {}", js_reason(&e)),
            )
        })?;

        let imports = Reflect::get(&shim, &"importObject".into()).map_err(|e| {
            BootError::load(
                LoadStage::Instantiate,
                format!("runtime shim has no importObject: {}", js_reason(&e)),
            )
        })?;

        self.shim = Some(shim);
        Ok(imports)
    }
}

impl ModuleHost for BrowserHost {
    type Response = web_sys::Response;
    type Instance = WebAssembly::Instance;
    type Imports = JsValue;

    fn engine_available(&self) -> bool {
        Reflect::get(&js_sys::global(), &"WebAssembly".into())
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false)
    }

    fn streaming_available(&self) -> bool {
        Reflect::get(&js_sys::global(), &"WebAssembly".into())
            .and_then(|ns| Reflect::get(&ns, &"instantiateStreaming".into()))
            .map(|v| v.is_function())
            .unwrap_or(false)
    }

    async fn fetch(&mut self, url: &str) -> Result<web_sys::Response, BootError> {
        let window = web_sys::window()
            .ok_or_else(|| BootError::load(LoadStage::Fetch, "no window"))?;

        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| BootError::load(LoadStage::Fetch, js_reason(&e)))?;
        let response: web_sys::Response = response
            .dyn_into()
            .map_err(|_| BootError::load(LoadStage::Fetch, "fetch did not yield a Response"))?;

        if !response.ok() {
            return Err(BootError::load(
                LoadStage::Fetch,
                format!("HTTP {} for {url}", response.status()),
            ));
        }
        Ok(response)
    }

    async fn instantiate_streaming(
        &mut self,
        response: web_sys::Response,
        imports: &JsValue,
    ) -> Result<WebAssembly::Instance, BootError> {
        let promise = WebAssembly::instantiate_streaming(
            &js_sys::Promise::resolve(response.as_ref()),
            imports.unchecked_ref(),
        );
        let result = JsFuture::from(promise)
            .await
            .map_err(|e| BootError::load(LoadStage::Instantiate, js_reason(&e)))?;
        extract_instance(&result)
    }

    async fn response_bytes(&mut self, response: web_sys::Response) -> Result<Vec<u8>, BootError> {
        let promise = response
            .array_buffer()
            .map_err(|e| BootError::load(LoadStage::Fetch, js_reason(&e)))?;
        let buf = JsFuture::from(promise)
            .await
            .map_err(|e| BootError::load(LoadStage::Fetch, js_reason(&e)))?;

        let arr = Uint8Array::new(&buf);
        let mut out = vec![0u8; arr.length() as usize];
        arr.copy_to(&mut out);
        Ok(out)
    }

    async fn instantiate_buffered(
        &mut self,
        bytes: &[u8],
        imports: &JsValue,
    ) -> Result<WebAssembly::Instance, BootError> {
        let promise = WebAssembly::instantiate_buffer(bytes, imports.unchecked_ref());
        let result = JsFuture::from(promise)
            .await
            .map_err(|e| BootError::load(LoadStage::Instantiate, js_reason(&e)))?;
        extract_instance(&result)
    }

    fn start(
        &mut self,
        instance: WebAssembly::Instance,
    ) -> Result<WebAssembly::Instance, BootError> {
        let shim = self
            .shim
            .as_ref()
            .ok_or_else(|| BootError::load(LoadStage::Start, "runtime shim not initialized"))?;

        let run = Reflect::get(shim, &"run".into())
            .ok()
            .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
            .ok_or_else(|| BootError::load(LoadStage::Start, "runtime shim has no run()"))?;

        // The shim's run() returns a promise that settles when the module
        // exits; the module keeps running on its own, so it is not awaited.
        run.call1(shim, instance.as_ref())
            .map_err(|e| BootError::load(LoadStage::Start, js_reason(&e)))?;
        Ok(instance)
    }
}

fn extract_instance(result: &JsValue) -> Result<WebAssembly::Instance, BootError> {
    Reflect::get(result, &"instance".into())
        .ok()
        .and_then(|v| v.dyn_into::<WebAssembly::Instance>().ok())
        .ok_or_else(|| {
            BootError::load(LoadStage::Instantiate, "result carried no instance")
        })
}

fn js_reason(v: &JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{v:?}"))
}
