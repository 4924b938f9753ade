//! DOM host
//!
//! [`DomHost`] implements the layout and transport primitives over the page
//! DOM. The transport itself is not reimplemented here: the page supplies a
//! Penpal-compatible `connectToChild({ url, appendTo, methods })` function
//! and this module only converts the [`MethodTable`] into a plain object of
//! JavaScript functions.
//!
//! Exposed methods take at most one argument (the transaction), so each
//! function receives a single value; `undefined` means no arguments.

use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::layout::{ContainerStyle, FrameLayout, FrameStyle};
use bridge_traits::transport::{
    ChildConnection, FrameTransport, MethodTable, RemoteError, RemoteMethod,
};
use js_sys::{Function, Object, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::future_to_promise;
use web_sys::{Document, HtmlElement, HtmlIFrameElement};

use crate::error::{WasmError, WasmResult};

/// Page-backed layout and transport.
#[derive(Clone)]
pub struct DomHost {
    document: Document,
    connect_to_child: Option<Function>,
}

impl DomHost {
    /// Host for the current page, exposing methods through `connect_to_child`.
    pub fn new(connect_to_child: Option<Function>) -> WasmResult<Self> {
        let document = web_sys::window()
            .ok_or_else(|| WasmError::Unavailable("window".to_string()))?
            .document()
            .ok_or_else(|| WasmError::Unavailable("document".to_string()))?;
        Ok(Self {
            document,
            connect_to_child,
        })
    }

    /// Whether a `connectToChild` function was supplied.
    pub fn has_transport(&self) -> bool {
        self.connect_to_child.is_some()
    }

    fn create_html(&self, tag: &str) -> WasmResult<HtmlElement> {
        self.document
            .create_element(tag)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WasmError::UnexpectedValue(format!("<{}> is not an HTML element", tag)))
    }

    fn apply_css(
        element: &HtmlElement,
        declarations: Vec<(&'static str, String)>,
    ) -> WasmResult<()> {
        let style = element.style();
        for (property, value) in declarations {
            style.set_property(property, &value)?;
        }
        Ok(())
    }
}

impl FrameLayout for DomHost {
    type Element = HtmlElement;

    fn insert_container(
        &self,
        parent: &HtmlElement,
        style: &ContainerStyle,
    ) -> BridgeResult<HtmlElement> {
        let container = self.create_html("div")?;
        Self::apply_css(&container, style.css_declarations())?;
        parent.append_child(&container).map_err(WasmError::from)?;
        Ok(container)
    }

    fn create_frame(&self, url: &Url, append_to: &HtmlElement) -> BridgeResult<HtmlElement> {
        let frame = self
            .document
            .create_element("iframe")
            .map_err(WasmError::from)?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(|_| WasmError::UnexpectedValue("<iframe> element".to_string()))?;
        frame.set_src(url.as_str());
        append_to.append_child(&frame).map_err(WasmError::from)?;
        Ok(frame.unchecked_into::<HtmlElement>())
    }

    fn style_frame(&self, frame: &HtmlElement, style: &FrameStyle) -> BridgeResult<()> {
        frame
            .set_attribute("scrolling", if style.scrolling { "yes" } else { "no" })
            .map_err(WasmError::from)?;
        Self::apply_css(frame, style.css_declarations())?;
        Ok(())
    }
}

impl FrameTransport for DomHost {
    fn connect_to_child(
        &self,
        url: &Url,
        append_to: &HtmlElement,
        methods: MethodTable,
    ) -> BridgeResult<ChildConnection<HtmlElement>> {
        let connect = self
            .connect_to_child
            .as_ref()
            .ok_or_else(|| BridgeError::NotAvailable("connectToChild".to_string()))?;

        let options = Object::new();
        set(&options, "url", &JsValue::from_str(url.as_str()))?;
        set(&options, "appendTo", append_to)?;
        set(&options, "methods", &methods_object(&methods)?)?;

        let connection = connect
            .call1(&JsValue::NULL, &options)
            .map_err(WasmError::from)?;
        let frame = Reflect::get(&connection, &JsValue::from_str("iframe"))
            .map_err(WasmError::from)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| {
                WasmError::UnexpectedValue("connectToChild did not return an iframe".to_string())
            })?;

        debug!(%url, methods = methods.len(), "Connected to widget frame");
        Ok(ChildConnection { frame })
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> WasmResult<()> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

/// Plain object mapping each method name to a JavaScript function.
pub fn methods_object(methods: &MethodTable) -> WasmResult<Object> {
    let object = Object::new();
    for (name, method) in methods.iter() {
        let function = match method.clone() {
            RemoteMethod::Async(method) => {
                Closure::<dyn Fn(JsValue) -> Promise>::new(move |arg: JsValue| {
                    let pending = js_args(arg).map(|args| method.call(args));
                    future_to_promise(async move {
                        let value = pending?.await.map_err(remote_error_to_js)?;
                        to_js(&value).map_err(JsValue::from)
                    })
                })
                .into_js_value()
            }
            RemoteMethod::Sync(method) => {
                Closure::<dyn Fn(JsValue) -> Result<JsValue, JsValue>>::new(move |arg: JsValue| {
                    let value = method.call(js_args(arg)?).map_err(remote_error_to_js)?;
                    to_js(&value).map_err(JsValue::from)
                })
                .into_js_value()
            }
        };
        set(&object, name, &function)?;
    }
    Ok(object)
}

fn js_args(arg: JsValue) -> Result<Vec<Value>, JsValue> {
    if arg.is_undefined() {
        return Ok(Vec::new());
    }
    let value: Value = serde_wasm_bindgen::from_value(arg).map_err(|e| {
        remote_error_to_js(RemoteError::invalid_arguments("remote call", e))
    })?;
    Ok(vec![value])
}

/// Convert a Rust value into a plain JavaScript value (objects, not maps).
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> WasmResult<JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

/// `Error` carrying `kind` and, when present, `code`, so the frame can tell a
/// user rejection from a broken integration.
pub fn remote_error_to_js(err: RemoteError) -> JsValue {
    let error = js_sys::Error::new(&err.message);
    let kind = serde_json::to_value(err.kind)
        .ok()
        .and_then(|kind| kind.as_str().map(str::to_string))
        .unwrap_or_default();
    let _ = Reflect::set(&error, &JsValue::from_str("kind"), &JsValue::from_str(&kind));
    if let Some(code) = err.code {
        let _ = Reflect::set(&error, &JsValue::from_str("code"), &JsValue::from_f64(code as f64));
    }
    error.into()
}
