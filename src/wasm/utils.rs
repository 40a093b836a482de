use crate::error::KdTreeError;
use js_sys::Array;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

pub fn to_js_error(err: KdTreeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Reads a JS array of numbers. Returns `None` if any entry is not a number.
pub fn parse_js_point(val: &JsValue) -> Option<Vec<f64>> {
    let arr = val.dyn_ref::<Array>()?;
    (0..arr.length()).map(|i| arr.get(i).as_f64()).collect()
}

/// Reads a JS array of number arrays.
pub fn parse_js_points(val: &JsValue) -> Option<Vec<Vec<f64>>> {
    let arr = val.dyn_ref::<Array>()?;
    (0..arr.length()).map(|i| parse_js_point(&arr.get(i))).collect()
}

/// Splits a flat coordinate buffer into points of `dim` coordinates each.
pub fn split_flat(coords: &[f64], dim: usize) -> Result<Vec<Vec<f64>>, String> {
    if dim == 0 {
        return Err("dimension must be at least 1 to split a flat buffer".to_string());
    }
    if coords.len() % dim != 0 {
        return Err(format!(
            "buffer of {} values is not a multiple of dimension {}",
            coords.len(),
            dim
        ));
    }
    Ok(coords.chunks_exact(dim).map(<[f64]>::to_vec).collect())
}

pub fn flatten<'a>(points: impl IntoIterator<Item = &'a crate::Point>) -> Vec<f64> {
    points
        .into_iter()
        .flat_map(|p| p.coords().iter().copied())
        .collect()
}
