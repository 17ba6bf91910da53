//! WebAssembly binding (`feature = "wasm"`), mirroring [`crate::capi`]'s
//! entry points for JS embedders. Unlike the raw C ABI, `wasm-bindgen`
//! lets these take and return `String`/`JsValue` directly instead of
//! byte-counted pointer pairs, so there is no `dim_alloc`/`dim_free`
//! equivalent — `wasm-bindgen` manages that marshalling itself.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

use crate::engine::Engine;

static ENGINE: Lazy<Mutex<Engine>> = Lazy::new(|| Mutex::new(Engine::new()));

/// Installs a panic hook that forwards Rust panics to the browser
/// console instead of a silent abort trap. Call once at module init.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Mirrors `dim_eval`: evaluates one line, returning the rendered text on
/// success or the error message, distinguished by `ok`.
#[wasm_bindgen]
pub fn dim_eval(src: &str) -> JsValue {
    let mut engine = ENGINE.lock().expect("engine mutex poisoned");
    match engine.eval(src) {
        Ok(text) => encode_result(true, &text),
        Err(err) => {
            log::error!("dim_eval failed: {err}");
            encode_result(false, &err.to_string())
        }
    }
}

/// Mirrors `dim_define`.
#[wasm_bindgen]
pub fn dim_define(name: &str, expr_src: &str) -> JsValue {
    let mut engine = ENGINE.lock().expect("engine mutex poisoned");
    match engine.define(name, expr_src) {
        Ok(()) => encode_result(true, ""),
        Err(err) => encode_result(false, &err.to_string()),
    }
}

/// Mirrors `dim_clear`.
#[wasm_bindgen]
pub fn dim_clear(name: &str) {
    let mut engine = ENGINE.lock().expect("engine mutex poisoned");
    engine.clear(name);
}

/// Mirrors `dim_clear_all`.
#[wasm_bindgen]
pub fn dim_clear_all() {
    let mut engine = ENGINE.lock().expect("engine mutex poisoned");
    engine.clear_all();
}

#[derive(serde::Serialize)]
struct EvalResult<'a> {
    ok: bool,
    text: &'a str,
}

fn encode_result(ok: bool, text: &str) -> JsValue {
    serde_wasm_bindgen::to_value(&EvalResult { ok, text }).unwrap_or(JsValue::NULL)
}
