use ahash::AHashMap;
use smallvec::SmallVec;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The expression produced no usable component (empty, or only `.`s).
    Empty,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "path has no usable component"),
        }
    }
}

impl std::error::Error for PathError {}

/// 编译后的点分路径：按顺序下钻的对象键。
/// Components are taken verbatim (no escaping, no quoting, no
/// normalization) and compared byte-exact during navigation.
#[derive(Debug, Clone)]
pub struct Path {
    components: SmallVec<[Vec<u8>; 8]>,
}

impl Path {
    /// 按 `.` 切分并丢弃空段：`ab....cdef.g...` 编译结果等同于
    /// `ab.cdef.g`。
    pub fn compile(expr: &[u8]) -> Result<Self, PathError> {
        let mut components: SmallVec<[Vec<u8>; 8]> = SmallVec::new();
        for segment in expr.split(|&b| b == b'.') {
            if !segment.is_empty() {
                components.push(segment.to_vec());
            }
        }
        if components.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { components })
    }

    #[inline]
    pub fn components(&self) -> &[Vec<u8>] {
        &self.components
    }
}

/// 进程级的已编译路径缓存。Compilation is a pure function of the
/// expression, so entries are `Arc`-shared and never mutated after
/// insertion.
#[derive(Default)]
pub struct PathCache {
    map: Mutex<AHashMap<Vec<u8>, Arc<Path>>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compile(&self, expr: &[u8]) -> Result<Arc<Path>, PathError> {
        let mut map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = map.get(expr) {
            return Ok(hit.clone());
        }
        let compiled = Arc::new(Path::compile(expr)?);
        map.insert(expr.to_vec(), compiled.clone());
        Ok(compiled)
    }
}
