//! Traversal state threaded through rendering.

/// Position-dependent formatting state.
///
/// A context is a plain value: each node receives one from its parent and
/// derives a new one for its own children. Siblings never observe each
/// other's context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Inside a preformatted block; inline code passes through unwrapped
    pub in_preformatted: bool,

    /// Number of enclosing lists
    pub list_depth: usize,

    /// Ordinal of the enclosing ordered-list item, if any
    pub ordinal: Option<usize>,
}

impl RenderContext {
    /// Fresh context for a section root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for the descendants of a preformatted block.
    pub fn preformatted(self) -> Self {
        Self {
            in_preformatted: true,
            ..self
        }
    }

    /// Context for the items of a nested list. The ordinal does not leak in.
    pub fn enter_list(self) -> Self {
        Self {
            list_depth: self.list_depth + 1,
            ordinal: None,
            ..self
        }
    }

    /// Context for the children of a list item.
    pub fn with_ordinal(self, ordinal: Option<usize>) -> Self {
        Self { ordinal, ..self }
    }
}
