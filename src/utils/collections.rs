//! Helpers for building and inspecting small collections.

use bevy::prelude::*;

/// Builds an `x_len × y_len` grid where every cell is `default`.
///
/// The grid is indexed `[x][y]`: the outer vector has `x_len` columns and
/// each column holds `y_len` cells.
///
/// A `None` default yields `None` for the whole grid rather than a grid of
/// empty cells. [`make_filled_1d`] does not special-case absence.
pub fn make_filled_2d<T: Clone>(
  x_len: usize,
  y_len: usize,
  default: Option<T>,
) -> Option<Vec<Vec<T>>> {
  let default = default?;
  Some(vec![vec![default; y_len]; x_len])
}

/// Builds a vector of `length` copies of `default`.
pub fn make_filled_1d<T: Clone>(length: usize, default: T) -> Vec<T> {
  vec![default; length]
}

/// Maps each handle through `lookup`, keeping index correspondence.
///
/// Handles without the capability produce `None` in their slot.
pub fn extract_with<H, C, F>(handles: &[H], lookup: F) -> Vec<Option<C>>
where
  F: FnMut(&H) -> Option<C>,
{
  handles.iter().map(lookup).collect()
}

/// Fetches component `C` from every entity, in order.
///
/// Entities that lack `C`, or no longer exist, produce `None`.
pub fn extract_components<'w, C: Component>(
  world: &'w World,
  entities: &[Entity],
) -> Vec<Option<&'w C>> {
  extract_with(entities, |&entity| world.get::<C>(entity))
}

/// Checks whether every element equals the first one.
///
/// Returns `None` for an empty slice. Stops at the first mismatch.
pub fn all_equal<T: PartialEq>(list: &[T]) -> Option<bool> {
  let (first, rest) = list.split_first()?;
  Some(rest.iter().all(|item| item == first))
}
