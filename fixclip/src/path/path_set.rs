use super::Path;
use crate::error::{ClipError, Result};
use crate::scale::ScaleFactor;
use static_aabb2d_index::AABB;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Collection of paths sharing one coordinate scale.
///
/// `scale` records the [ScaleFactor] the integer coordinates were produced with, it is `None` for
/// raw integer input. Operations combining sets require matching scales and carry the scale
/// through to their output.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSet {
    pub paths: Vec<Path>,
    pub scale: Option<ScaleFactor>,
}

impl PathSet {
    #[inline]
    pub fn new() -> Self {
        PathSet {
            paths: Vec::new(),
            scale: None,
        }
    }

    /// Create an empty set tagged with `scale`.
    #[inline]
    pub fn with_scale(scale: Option<ScaleFactor>) -> Self {
        PathSet {
            paths: Vec::new(),
            scale,
        }
    }

    /// Create an untagged set from `paths`.
    #[inline]
    pub fn from_paths(paths: Vec<Path>) -> Self {
        PathSet { paths, scale: None }
    }

    #[inline]
    pub fn push(&mut self, path: Path) {
        self.paths.push(path);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.paths.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Path> {
        self.paths.iter_mut()
    }

    /// Reverse every path in the set.
    pub fn reverse_all(&mut self) {
        for path in self.paths.iter_mut() {
            path.reverse();
        }
    }

    /// Sum of the signed areas of the closed paths in the set (integer units squared).
    pub fn signed_area(&self) -> f64 {
        self.paths
            .iter()
            .filter(|p| p.is_closed)
            .map(|p| p.signed_area())
            .sum()
    }

    /// Integer bounding box of every point in the set, `None` if there are no points.
    pub fn extents(&self) -> Option<AABB<i64>> {
        let mut iter = self.paths.iter().filter_map(|p| p.extents());
        let mut result = iter.next()?;
        for ext in iter {
            result.min_x = result.min_x.min(ext.min_x);
            result.min_y = result.min_y.min(ext.min_y);
            result.max_x = result.max_x.max(ext.max_x);
            result.max_y = result.max_y.max(ext.max_y);
        }

        Some(result)
    }

    /// Returns the scale shared by `self` and `other`, an error if both are tagged with
    /// different scales.
    pub fn common_scale(&self, other: &PathSet) -> Result<Option<ScaleFactor>> {
        match (self.scale, other.scale) {
            (Some(a), Some(b)) if a != b => Err(ClipError::config(format!(
                "path sets use different scale factors ({} and {})",
                a.factor(),
                b.factor()
            ))),
            (a, b) => Ok(a.or(b)),
        }
    }
}

impl Index<usize> for PathSet {
    type Output = Path;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.paths[index]
    }
}

impl IndexMut<usize> for PathSet {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.paths[index]
    }
}

impl FromIterator<Path> for PathSet {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        PathSet::from_paths(iter.into_iter().collect())
    }
}

impl IntoIterator for PathSet {
    type Item = Path;
    type IntoIter = std::vec::IntoIter<Path>;
    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;
    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
