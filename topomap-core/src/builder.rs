//! Builder for configuring [`TopoMap`] instances.

use std::num::NonZeroUsize;

use crate::{Result, error::TopoMapError, topomap::TopoMap};

/// Configures and constructs [`TopoMap`] instances.
///
/// # Examples
/// ```
/// use topomap_core::TopoMapBuilder;
///
/// let topomap = TopoMapBuilder::new()
///     .with_leaf_size(16)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(topomap.leaf_size().get(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct TopoMapBuilder {
    leaf_size: usize,
}

impl Default for TopoMapBuilder {
    fn default() -> Self {
        Self { leaf_size: 1 }
    }
}

impl TopoMapBuilder {
    /// Creates a builder with a leaf size of one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the maximum number of points per kd-tree leaf used while
    /// building the spanning tree.
    ///
    /// # Examples
    /// ```
    /// use topomap_core::TopoMapBuilder;
    ///
    /// let builder = TopoMapBuilder::new().with_leaf_size(8);
    /// assert_eq!(builder.leaf_size(), 8);
    /// ```
    #[must_use]
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Returns the configured leaf size.
    #[must_use]
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// Validates the configuration and constructs a [`TopoMap`].
    ///
    /// # Errors
    /// Returns [`TopoMapError::InvalidLeafSize`] when the leaf size is zero.
    ///
    /// # Examples
    /// ```
    /// use topomap_core::{TopoMapBuilder, TopoMapErrorCode};
    ///
    /// let err = TopoMapBuilder::new().with_leaf_size(0).build().unwrap_err();
    /// assert_eq!(err.code(), TopoMapErrorCode::InvalidLeafSize);
    /// ```
    pub fn build(self) -> Result<TopoMap> {
        let leaf_size = NonZeroUsize::new(self.leaf_size).ok_or(TopoMapError::InvalidLeafSize {
            got: self.leaf_size,
        })?;
        Ok(TopoMap::new(leaf_size))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_leaf_size_is_one() {
        let topomap = TopoMapBuilder::new().build().expect("defaults are valid");
        assert_eq!(topomap.leaf_size(), NonZeroUsize::MIN);
    }

    #[rstest]
    #[case(1)]
    #[case(40)]
    fn accepts_positive_leaf_sizes(#[case] leaf_size: usize) {
        let topomap = TopoMapBuilder::new()
            .with_leaf_size(leaf_size)
            .build()
            .expect("positive leaf sizes are valid");
        assert_eq!(topomap.leaf_size().get(), leaf_size);
    }

    #[test]
    fn rejects_zero_leaf_size() {
        let err = TopoMapBuilder::new()
            .with_leaf_size(0)
            .build()
            .expect_err("zero leaf size must fail");
        assert_eq!(err, TopoMapError::InvalidLeafSize { got: 0 });
        assert_eq!(err.code().as_str(), "TOPOMAP_INVALID_LEAF_SIZE");
    }
}
