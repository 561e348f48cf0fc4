//! Path-directed JSON value extraction without building a parse tree.
//!
//! A dotted path like `z.bc.def` names a chain of object keys. One pass
//! over the input byte buffer navigates to the leaf, skipping every
//! non-matching member with balanced bracket scanning, then copies the
//! leaf's text into a caller-supplied buffer of fixed capacity.

pub mod navigator;
pub mod path;
pub mod render;
pub mod scanner;

pub use path::{Path, PathCache, PathError};
pub use scanner::{ScanError, Span, ValueKind};

use std::sync::Arc;

/// Policy for paths that resolve to an object or array: emit the
/// serialized span, or treat the match as a null result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerMode {
    #[default]
    Raw,
    Reject,
}

/// Outcome of one extraction call. `Null` covers every "no value" case:
/// unresolved path, non-object input, or malformed JSON along the
/// traversal. A zero-length `Value` is distinct from `Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// A value was found; the payload is the byte count written, at most
    /// the destination capacity.
    Value(usize),
    Null,
}

/// A compiled path plus extraction policy, reusable across calls. Each
/// call is a pure function of (path, input, capacity): no state survives
/// between extractions.
pub struct Extractor {
    path: Arc<Path>,
    containers: ContainerMode,
}

impl Extractor {
    pub fn new(expr: &[u8]) -> Result<Self, PathError> {
        Ok(Self::from_path(Arc::new(Path::compile(expr)?)))
    }

    pub fn from_path(path: Arc<Path>) -> Self {
        Self {
            path,
            containers: ContainerMode::Raw,
        }
    }

    pub fn with_container_mode(mut self, mode: ContainerMode) -> Self {
        self.containers = mode;
        self
    }

    /// Writes the matched value's text into `out`, truncating to its
    /// capacity, and reports how many bytes were written.
    pub fn extract_into(&self, input: &[u8], out: &mut [u8]) -> Extraction {
        match navigator::find_value(&self.path, input) {
            Some(span) => {
                if self.containers == ContainerMode::Reject
                    && matches!(span.kind, ValueKind::Object | ValueKind::Array)
                {
                    return Extraction::Null;
                }
                let src = render::rendered(input, &span);
                Extraction::Value(render::write_bounded(src, out))
            }
            None => Extraction::Null,
        }
    }
}
