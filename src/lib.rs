#![allow(non_local_definitions)]
use crate::extract::{ContainerMode, Extraction, Extractor, PathCache};
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use std::sync::OnceLock;

pub mod extract;
pub mod utils;

/// Result buffer size of the original UDF binding.
pub const DEFAULT_CAPACITY: usize = 255;

fn shared_cache() -> &'static PathCache {
    static CACHE: OnceLock<PathCache> = OnceLock::new();
    CACHE.get_or_init(PathCache::new)
}

fn invalid_path(err: extract::PathError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(format!("Invalid path: {}", err))
}

/// 绑定到单个调用点的点分路径提取器：路径只编译一次，逐行复用。
#[pyclass]
struct JsonExtractor {
    inner: Extractor,
    capacity: usize,
}

#[pymethods]
impl JsonExtractor {
    #[new]
    #[pyo3(signature = (path, capacity = DEFAULT_CAPACITY, raw_containers = true))]
    fn new(path: &[u8], capacity: usize, raw_containers: bool) -> PyResult<Self> {
        let mode = if raw_containers {
            ContainerMode::Raw
        } else {
            ContainerMode::Reject
        };
        let inner = Extractor::new(path)
            .map_err(invalid_path)?
            .with_container_mode(mode);
        Ok(JsonExtractor { inner, capacity })
    }

    /// `None` is the null result; `bytes` is the (possibly truncated)
    /// value text. Malformed JSON never raises; it is a null result.
    fn extract(&self, py: Python, text: &[u8]) -> Option<Py<PyBytes>> {
        let mut buf = vec![0u8; self.capacity];
        match self.inner.extract_into(text, &mut buf) {
            Extraction::Value(len) => Some(PyBytes::new(py, &buf[..len]).into()),
            Extraction::Null => None,
        }
    }
}

/// 一次性调用形式。Compiled paths are cached process-wide, so repeated
/// calls with the same literal path skip recompilation.
#[pyfunction]
#[pyo3(signature = (path, text, capacity = DEFAULT_CAPACITY))]
fn json_extract(
    py: Python,
    path: &[u8],
    text: &[u8],
    capacity: usize,
) -> PyResult<Option<Py<PyBytes>>> {
    let compiled = shared_cache().compile(path).map_err(invalid_path)?;
    let extractor = Extractor::from_path(compiled);
    let mut buf = vec![0u8; capacity];
    Ok(match extractor.extract_into(text, &mut buf) {
        Extraction::Value(len) => Some(PyBytes::new(py, &buf[..len]).into()),
        Extraction::Null => None,
    })
}

#[pymodule]
fn json_extract_udf(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(json_extract, m)?)?;
    m.add_class::<JsonExtractor>()?;
    Ok(())
}
