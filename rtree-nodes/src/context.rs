//! Tree-wide configuration passed to every node construction.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_CHILDREN, DEFAULT_MIN_FILL_RATIO, MIN_MAX_CHILDREN};
use crate::errors::{NodeError, NodeResult};

/// Shared configuration of one tree instance.
///
/// The context is fixed when the tree is built and handed to the node factory
/// on every call. Conventional nodes keep a copy of it; compact leaves only use
/// it as a size hint when reserving their buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    min_children: usize,
    max_children: usize,
}

impl Context {
    /// Creates a validated context.
    ///
    /// Fails with [`NodeError::Configuration`] unless
    /// `1 <= min_children < max_children` and `max_children >= 3`.
    pub fn new(min_children: usize, max_children: usize) -> NodeResult<Self> {
        let context = Self {
            min_children,
            max_children,
        };
        context.validate()?;
        Ok(context)
    }

    /// Starts a [`ContextBuilder`] with default settings.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    pub fn min_children(&self) -> usize {
        self.min_children
    }

    pub fn max_children(&self) -> usize {
        self.max_children
    }

    /// Checks the invariants a tree relies on.
    ///
    /// Contexts read through serde skip [`Context::new`], so callers loading a
    /// context from configuration should validate it before use.
    pub fn validate(&self) -> NodeResult<()> {
        if self.max_children < MIN_MAX_CHILDREN {
            return Err(NodeError::Configuration(format!(
                "max_children must be at least {}, got {}",
                MIN_MAX_CHILDREN, self.max_children
            )));
        }
        if self.min_children < 1 {
            return Err(NodeError::Configuration(
                "min_children must be at least 1".into(),
            ));
        }
        if self.min_children >= self.max_children {
            return Err(NodeError::Configuration(format!(
                "min_children ({}) must be less than max_children ({})",
                self.min_children, self.max_children
            )));
        }
        Ok(())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            min_children: default_min_children(DEFAULT_MAX_CHILDREN),
            max_children: DEFAULT_MAX_CHILDREN,
        }
    }
}

fn default_min_children(max_children: usize) -> usize {
    ((max_children as f64 * DEFAULT_MIN_FILL_RATIO).round() as usize).max(1)
}

/// Builder for [`Context`].
///
/// When only `max_children` is set, `min_children` is derived from it as
/// `round(max_children * 0.4)`.
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    min_children: Option<usize>,
    max_children: Option<usize>,
}

impl ContextBuilder {
    pub fn max_children(mut self, max_children: usize) -> Self {
        self.max_children = Some(max_children);
        self
    }

    pub fn min_children(mut self, min_children: usize) -> Self {
        self.min_children = Some(min_children);
        self
    }

    pub fn build(self) -> NodeResult<Context> {
        let max_children = self.max_children.unwrap_or(DEFAULT_MAX_CHILDREN);
        let min_children = self
            .min_children
            .unwrap_or_else(|| default_min_children(max_children));
        Context::new(min_children, max_children)
    }
}
