pub mod utils;

use crate::tree::KdTree;
use crate::wasm::utils::{flatten, parse_js_points, split_flat, to_js_error};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(typescript_custom_section)]
const TS_KDTREE_NOTES: &'static str = r#"
// Points cross the boundary as flat Float64Arrays: [x0, y0, z0, x1, y1, z1, ...].
"#;

/// WASM wrapper for the k-d tree.
#[wasm_bindgen(js_name = KdTree)]
pub struct KdTreeWASM {
    inner: KdTree,
}

#[wasm_bindgen(js_class = KdTree)]
impl KdTreeWASM {
    /// Builds a tree from a flat coordinate buffer holding points of `dim` coordinates.
    #[wasm_bindgen(constructor)]
    pub fn new(points: &[f64], dim: usize, k: usize) -> Result<KdTreeWASM, JsValue> {
        let points = split_flat(points, dim).map_err(|e| JsValue::from_str(&e))?;
        let inner = KdTree::build(points, k).map_err(to_js_error)?;
        Ok(KdTreeWASM { inner })
    }

    /// Builds a tree from an array of coordinate arrays.
    #[wasm_bindgen(js_name = fromArrays)]
    pub fn from_arrays(points: JsValue, k: usize) -> Result<KdTreeWASM, JsValue> {
        let points = parse_js_points(&points)
            .ok_or_else(|| JsValue::from_str("points must be an array of number arrays"))?;
        let inner = KdTree::build(points, k).map_err(to_js_error)?;
        Ok(KdTreeWASM { inner })
    }

    /// The `k` approximate nearest neighbours of `point`, flattened, closest first.
    pub fn knn(&self, point: &[f64]) -> Result<Vec<f64>, JsValue> {
        let neighbors = self.inner.knn(point).map_err(to_js_error)?;
        Ok(flatten(&neighbors))
    }

    /// Distances matching the order of [`knn`](Self::knn).
    pub fn knn_distances(&self, point: &[f64]) -> Result<Vec<f64>, JsValue> {
        let neighbors = self.inner.knn_with_distances(point).map_err(to_js_error)?;
        Ok(neighbors.into_iter().map(|n| n.distance).collect())
    }

    /// Runs `knn` for every point in a flat buffer, returning all results concatenated.
    pub fn knn_batch(&self, queries: &[f64]) -> Result<Vec<f64>, JsValue> {
        let queries = split_flat(queries, self.inner.dim()).map_err(|e| JsValue::from_str(&e))?;
        let results = self.inner.knn_batch(&queries).map_err(to_js_error)?;
        Ok(flatten(results.iter().flatten()))
    }

    pub fn leaf_axis_average(&self, point: &[f64], axis: usize) -> Result<f64, JsValue> {
        self.inner.leaf_axis_average(point, axis).map_err(to_js_error)
    }

    pub fn z_average(&self, point: &[f64]) -> Result<f64, JsValue> {
        self.inner.z_average(point).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn dim(&self) -> usize {
        self.inner.dim()
    }

    #[wasm_bindgen(getter)]
    pub fn k(&self) -> usize {
        self.inner.k()
    }

    #[wasm_bindgen(getter)]
    pub fn count_points(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(getter)]
    pub fn depth(&self) -> usize {
        self.inner.depth()
    }

    #[wasm_bindgen(getter)]
    pub fn count_leaves(&self) -> usize {
        self.inner.leaf_count()
    }
}
