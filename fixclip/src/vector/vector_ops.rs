use super::VectorPath;
use crate::core::math::Vector2;
use crate::core::traits::Real;
use crate::error::Result;
use crate::path::{
    clip_by_offset, clip_opt, offset_opt, point_in_polygon_set, simplify, ClipOperation,
    ClipOptions, EndStyle, FillRule, JoinStyle, OffsetConfig, OffsetOptions, PathSet,
    PointContainment,
};
use crate::scale::ScaleFactor;

/// Boolean operation between floating point `subjects` and `clips`.
///
/// Both collections are scaled with `scale`, clipped with [clip_opt](crate::path::clip_opt) and
/// the result is unscaled.
///
/// # Examples
///
/// ```
/// # use fixclip::path::*;
/// # use fixclip::scale::ScaleFactor;
/// # use fixclip::vector::*;
/// # use fixclip::core::math::vec2;
/// # use fixclip::assert_fuzzy_eq;
/// let a = VectorPath::from_points(
///     vec![vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)],
///     true,
/// );
/// let b = VectorPath::from_points(
///     vec![vec2(0.5, 0.5), vec2(1.5, 0.5), vec2(1.5, 1.5), vec2(0.5, 1.5)],
///     true,
/// );
/// let result = clip_vector_paths(
///     &[a],
///     &[b],
///     ClipOperation::Intersection,
///     FillRule::EvenOdd,
///     &ClipOptions::new(),
///     ScaleFactor::Int3,
/// )
/// .unwrap();
/// assert_eq!(result.len(), 1);
/// assert_fuzzy_eq!(result[0].signed_area(), 0.25);
/// ```
pub fn clip_vector_paths<T>(
    subjects: &[VectorPath<T>],
    clips: &[VectorPath<T>],
    op: ClipOperation,
    fill: FillRule,
    options: &ClipOptions,
    scale: ScaleFactor,
) -> Result<Vec<VectorPath<T>>>
where
    T: Real,
{
    let subjects = scale.scale_paths(subjects)?;
    let clips = scale.scale_paths(clips)?;
    let result = clip_opt(&subjects, &clips, op, fill, options)?;
    Ok(scale.unscale_paths(&result, false))
}

/// Offset floating point `paths`, `config` distances are in external units.
pub fn offset_vector_paths<T>(
    paths: &[VectorPath<T>],
    config: &OffsetConfig,
    default_join: JoinStyle,
    default_end: EndStyle,
    options: &OffsetOptions,
    scale: ScaleFactor,
) -> Result<Vec<VectorPath<T>>>
where
    T: Real,
{
    let paths = scale.scale_paths(paths)?;
    let result = offset_opt(&paths, config, default_join, default_end, options)?;
    Ok(scale.unscale_paths(&result, false))
}

/// Remove self intersections from a floating point path, see [simplify](crate::path::simplify).
pub fn simplify_vector_path<T>(
    path: &VectorPath<T>,
    scale: ScaleFactor,
) -> Result<Vec<VectorPath<T>>>
where
    T: Real,
{
    let int_path = scale.scale_path(path)?;
    let result = simplify(&int_path)?;
    Ok(scale.unscale_paths(&result, false))
}

/// Floating point form of [clip_by_offset](crate::path::clip_by_offset), `config` distances are
/// in external units.
pub fn clip_by_offset_vector_path<T>(
    path: &VectorPath<T>,
    config: &OffsetConfig,
    join: JoinStyle,
    end: EndStyle,
    options: &OffsetOptions,
    scale: ScaleFactor,
) -> Result<Vec<VectorPath<T>>>
where
    T: Real,
{
    let int_path = scale.scale_path(path)?;
    let factor = scale.factor();
    let int_config = OffsetConfig {
        delta: config.delta * factor,
        miter_limit: config.miter_limit,
        arc_tolerance: config.arc_tolerance * factor,
    };
    let result = clip_by_offset(&int_path, &int_config, join, end, options)?;
    Ok(scale.unscale_paths(&result, false))
}

/// Classify `pt` against floating point `paths`, returning the first result that is not
/// outside.
///
/// The point and the paths are scaled with the same factor so boundary classification is exact
/// at that resolution.
pub fn point_in_vector_paths<T>(
    pt: Vector2<T>,
    paths: &[VectorPath<T>],
    scale: ScaleFactor,
) -> Result<PointContainment>
where
    T: Real,
{
    let pt = scale.try_scale_point(pt)?;
    let paths = scale.scale_paths(paths)?;
    Ok(point_in_polygon_set(pt, &paths))
}

/// Index of the floating point path with the greatest absolute area, `None` only for an empty
/// input.
pub fn largest_vector_path<T>(paths: &[VectorPath<T>]) -> Option<usize>
where
    T: Real,
{
    let mut result = None;
    let mut max_area = -T::one();
    for (i, path) in paths.iter().enumerate() {
        let area = path.signed_area().abs();
        if area > max_area {
            max_area = area;
            result = Some(i);
        }
    }

    result
}

/// Concatenate the points of every path into one path, taking the closed flag of the first.
///
/// Points pass through the fixed point space so the result matches what
/// [ScaleFactor::unscale_paths] produces for the same input with `flatten` set.
pub fn flatten_vector_paths<T>(
    paths: &[VectorPath<T>],
    scale: ScaleFactor,
) -> Result<Vec<VectorPath<T>>>
where
    T: Real,
{
    let paths: PathSet = scale.scale_paths(paths)?;
    Ok(scale.unscale_paths(&paths, true))
}
