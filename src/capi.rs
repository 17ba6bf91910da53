//! The C-style ABI (§6): `dim_eval`, `dim_define`, `dim_clear`,
//! `dim_clear_all`, `dim_alloc`, `dim_free`. A single process-wide
//! [`Engine`] backs these entry points for ABI callers that cannot hold a
//! Rust-side handle; embedders that need isolation should use
//! [`Engine`](crate::engine::Engine) directly instead.
//!
//! All buffers are byte-counted; nul termination is never required or
//! produced. Every non-zero return code means "diagnostic detail was
//! written to stderr, if available" (§7).

use std::slice;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::engine::Engine;

static ENGINE: Lazy<Mutex<Engine>> = Lazy::new(|| Mutex::new(Engine::new()));

unsafe fn str_from_raw(ptr: *const u8, len: usize) -> Option<String> {
    if ptr.is_null() && len != 0 {
        return None;
    }
    let bytes = if len == 0 { &[] } else { slice::from_raw_parts(ptr, len) };
    std::str::from_utf8(bytes).ok().map(str::to_string)
}

fn write_out_buffer(text: &str, out_ptr: *mut *mut u8, out_len: *mut usize) {
    let boxed = text.as_bytes().to_vec().into_boxed_slice();
    unsafe {
        *out_len = boxed.len();
        *out_ptr = Box::into_raw(boxed) as *mut u8;
    }
}

/// `dim_eval(in_ptr, in_len, &out_ptr, &out_len) -> i32`. `0` on success;
/// non-zero otherwise. On success, `*out_ptr` points to a freshly
/// allocated UTF-8 buffer of `*out_len` bytes, owned by this module and
/// freed via [`dim_free`].
///
/// # Safety
/// `in_ptr` must point to `in_len` readable bytes (or be any value when
/// `in_len == 0`); `out_ptr` and `out_len` must point to valid, writable
/// locations.
#[no_mangle]
pub unsafe extern "C" fn dim_eval(in_ptr: *const u8, in_len: usize, out_ptr: *mut *mut u8, out_len: *mut usize) -> i32 {
    let Some(src) = str_from_raw(in_ptr, in_len) else {
        return -1;
    };
    let mut engine = match ENGINE.lock() {
        Ok(g) => g,
        Err(_) => return -1,
    };
    match engine.eval(&src) {
        Ok(text) => {
            write_out_buffer(&text, out_ptr, out_len);
            0
        }
        Err(err) => {
            log::error!("dim_eval failed: {err}");
            write_out_buffer(&err.to_string(), out_ptr, out_len);
            1
        }
    }
}

/// `dim_define(name_ptr, name_len, expr_ptr, expr_len) -> i32`.
///
/// # Safety
/// See [`dim_eval`]; both input buffers follow the same contract.
#[no_mangle]
pub unsafe extern "C" fn dim_define(name_ptr: *const u8, name_len: usize, expr_ptr: *const u8, expr_len: usize) -> i32 {
    let (Some(name), Some(expr)) = (str_from_raw(name_ptr, name_len), str_from_raw(expr_ptr, expr_len)) else {
        return -1;
    };
    let mut engine = match ENGINE.lock() {
        Ok(g) => g,
        Err(_) => return -1,
    };
    match engine.define(&name, &expr) {
        Ok(()) => 0,
        Err(err) => {
            log::error!("dim_define failed: {err}");
            1
        }
    }
}

/// `dim_clear(name_ptr, name_len) -> i32`. `0` whether or not the name
/// was present; non-zero only on a malformed input buffer.
///
/// # Safety
/// See [`dim_eval`].
#[no_mangle]
pub unsafe extern "C" fn dim_clear(name_ptr: *const u8, name_len: usize) -> i32 {
    let Some(name) = str_from_raw(name_ptr, name_len) else {
        return -1;
    };
    match ENGINE.lock() {
        Ok(mut g) => {
            g.clear(&name);
            0
        }
        Err(_) => -1,
    }
}

/// `dim_clear_all() -> i32`.
#[no_mangle]
pub extern "C" fn dim_clear_all() -> i32 {
    match ENGINE.lock() {
        Ok(mut g) => {
            g.clear_all();
            0
        }
        Err(_) => -1,
    }
}

/// `dim_alloc(n) -> *u8`: allocates an `n`-byte buffer the caller owns
/// until it passes it back through [`dim_free`].
#[no_mangle]
pub extern "C" fn dim_alloc(n: usize) -> *mut u8 {
    let boxed = vec![0u8; n].into_boxed_slice();
    Box::into_raw(boxed) as *mut u8
}

/// `dim_free(ptr, len)`: releases a buffer previously returned by
/// [`dim_eval`] or [`dim_alloc`].
///
/// # Safety
/// `ptr` must have been returned by [`dim_alloc`] or as an out-buffer
/// from [`dim_eval`], with the same `len`, and must not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn dim_free(ptr: *mut u8, len: usize) {
    if ptr.is_null() {
        return;
    }
    let slice_ptr = slice::from_raw_parts_mut(ptr, len);
    drop(Box::from_raw(slice_ptr as *mut [u8]));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_roundtrip_through_raw_buffers() {
        let src = "2 m + 3 m";
        let mut out_ptr: *mut u8 = std::ptr::null_mut();
        let mut out_len: usize = 0;
        let rc = unsafe { dim_eval(src.as_ptr(), src.len(), &mut out_ptr, &mut out_len) };
        assert_eq!(rc, 0);
        let text = unsafe { std::str::from_utf8(slice::from_raw_parts(out_ptr, out_len)).unwrap().to_string() };
        assert_eq!(text, "5 m");
        unsafe { dim_free(out_ptr, out_len) };
    }

    #[test]
    fn clear_all_always_succeeds() {
        assert_eq!(dim_clear_all(), 0);
    }
}
