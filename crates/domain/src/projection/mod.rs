//! Join projector — maps flat joined rows to nested views and back.
//!
//! A join shape is declared once as a [`JoinShape`] implementation: the
//! flat row type, the [`Column`] table assigning every source column to
//! exactly one field of one nested part, and the two conversions. Storage
//! adapters build their SELECT lists from [`JoinShape::COLUMNS`], so the
//! single-row and list queries of a shape cannot diverge.
//!
//! Unflattening never invents values: a reference that is set on the row
//! but whose joined target came back empty is a [`NotFoundError`].

mod box_view;
mod item_view;

pub use box_view::{BoxRow, BoxView};
pub use item_view::{ItemRow, ItemView};

use crate::error::{DepotError, NotFoundError};

/// Nested destination of a flat column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Item,
    Box,
    Store,
    Manager,
    Equipment,
}

/// One entry of a shape's mapping table: `alias` is the column name on the
/// flat row, `part`/`field` its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub alias: &'static str,
    pub part: Part,
    pub field: &'static str,
}

impl Column {
    #[must_use]
    pub const fn new(alias: &'static str, part: Part, field: &'static str) -> Self {
        Self { alias, part, field }
    }
}

/// A nested view backed by a flat joined row.
pub trait JoinShape: Sized {
    /// The flat record produced by the join query.
    type Row;

    /// Source column → destination table; aliases and `(part, field)`
    /// pairs are each unique.
    const COLUMNS: &'static [Column];

    /// Spread the nested view over a flat row.
    fn flatten(&self) -> Self::Row;

    /// Rebuild the nested view from a flat row.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when a set reference has no joined
    /// row behind it.
    fn unflatten(row: Self::Row) -> Result<Self, DepotError>;
}

/// Unflatten every row, preserving order. Empty input yields an empty list.
///
/// # Errors
///
/// Fails with the first row's error; no partial list is returned.
pub fn project_all<S: JoinShape>(
    rows: impl IntoIterator<Item = S::Row>,
) -> Result<Vec<S>, DepotError> {
    rows.into_iter().map(S::unflatten).collect()
}

/// Unwrap a joined value, reporting the referenced identity when absent.
pub(crate) fn resolve<T>(
    value: Option<T>,
    entity: &'static str,
    id: impl ToString,
) -> Result<T, DepotError> {
    value.ok_or_else(|| NotFoundError::new(entity, id).into())
}
