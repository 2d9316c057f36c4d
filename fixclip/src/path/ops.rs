use super::internal::{ClipEngine, OffsetEngine};
use super::{
    ClipOperation, ClipOptions, EndStyle, FillRule, JoinStyle, OffsetConfig, OffsetOptions, Path,
    PathRole, PathSet,
};
use crate::error::{ClipError, Result};

/// Boolean operation between `subjects` and `clips`, both using the `fill` rule.
///
/// Closed output paths are counter clockwise for outer contours and clockwise for holes. Open
/// subject paths are clipped to open output paths. See [clip_opt] for separate fill rules and
/// output reversal.
///
/// # Errors
///
/// * [ClipError::InvalidConfiguration] if the sets carry different scales or `clips` contains an
///   open path.
/// * [ClipError::NumericOverflow] if a coordinate is outside the supported range.
///
/// # Examples
///
/// ```
/// # use fixclip::path::*;
/// # use fixclip::path_closed;
/// let a = PathSet::from_paths(vec![path_closed![(0, 0), (10, 0), (10, 10), (0, 10)]]);
/// let b = PathSet::from_paths(vec![path_closed![(5, 5), (15, 5), (15, 15), (5, 15)]]);
/// let union = clip(&a, &b, ClipOperation::Union, FillRule::NonZero, false).unwrap();
/// assert_eq!(union.len(), 1);
/// assert_eq!(union[0].signed_area(), 175.0);
/// ```
pub fn clip(
    subjects: &PathSet,
    clips: &PathSet,
    op: ClipOperation,
    fill: FillRule,
    preserve_collinear: bool,
) -> Result<PathSet> {
    let options = ClipOptions {
        preserve_collinear,
        ..ClipOptions::new()
    };
    clip_opt(subjects, clips, op, fill, &options)
}

/// Same as [clip] with additional options, `subject_fill` applies to the subjects and to the
/// clips unless [ClipOptions::clip_fill] is set.
pub fn clip_opt(
    subjects: &PathSet,
    clips: &PathSet,
    op: ClipOperation,
    subject_fill: FillRule,
    options: &ClipOptions,
) -> Result<PathSet> {
    let scale = subjects.common_scale(clips)?;
    let clip_fill = options.clip_fill.unwrap_or(subject_fill);

    let mut engine = ClipEngine::new(options.preserve_collinear, options.reverse_output);
    engine.add_paths(subjects.iter(), PathRole::Subject)?;
    engine.add_paths(clips.iter(), PathRole::Clip)?;
    let paths = engine.execute(op, subject_fill, clip_fill)?;

    log::debug!(
        "clip {:?} ({:?}/{:?}): {} subjects, {} clips -> {} paths",
        op,
        subject_fill,
        clip_fill,
        subjects.len(),
        clips.len(),
        paths.len()
    );

    Ok(PathSet { paths, scale })
}

/// Remove self intersections from `path` by an even odd union of the path with itself.
///
/// The path is always treated as closed. A self intersecting polygon is split into simple
/// polygons.
///
/// # Examples
///
/// ```
/// # use fixclip::path::*;
/// # use fixclip::path_closed;
/// let bowtie = path_closed![(0, 0), (10, 10), (10, 0), (0, 10)];
/// let result = simplify(&bowtie).unwrap();
/// assert_eq!(result.len(), 2);
/// assert_eq!(result.signed_area(), 50.0);
/// ```
pub fn simplify(path: &Path) -> Result<PathSet> {
    let mut closed = path.clone();
    closed.is_closed = true;

    let mut engine = ClipEngine::new(false, false);
    engine.add_path(&closed, PathRole::Subject)?;
    let paths = engine.execute(ClipOperation::Union, FillRule::EvenOdd, FillRule::EvenOdd)?;
    log::debug!(
        "simplify: {} points -> {} paths",
        path.len(),
        paths.len()
    );

    Ok(PathSet::from_paths(paths))
}

/// Union of every path in `paths` under `fill`, the first path is the subject and the rest are
/// clips.
pub fn simplify_paths(
    paths: &PathSet,
    fill: FillRule,
    preserve_collinear: bool,
) -> Result<PathSet> {
    let mut engine = ClipEngine::new(preserve_collinear, false);
    let mut iter = paths.iter();
    if let Some(first) = iter.next() {
        engine.add_path(first, PathRole::Subject)?;
    }
    engine.add_paths(iter, PathRole::Clip)?;
    let result = engine.execute(ClipOperation::Union, fill, fill)?;
    log::debug!(
        "simplify_paths ({:?}): {} paths -> {} paths",
        fill,
        paths.len(),
        result.len()
    );

    Ok(PathSet {
        paths: result,
        scale: paths.scale,
    })
}

/// Offset every path of `paths` by `config.delta`.
///
/// Each path uses its own join and end style when set, `default_join` and `default_end`
/// otherwise. Positive deltas grow closed polygons and negative deltas shrink them regardless of
/// the input orientation. Closed polygons are simplified first, see [offset_opt] to change that.
///
/// # Errors
///
/// * [ClipError::InvalidConfiguration] for an invalid `config` or a negative delta with an open
///   end style.
/// * [ClipError::NumericOverflow] if the offset geometry leaves the supported coordinate range.
///
/// # Examples
///
/// ```
/// # use fixclip::path::*;
/// # use fixclip::path_closed;
/// let square = PathSet::from_paths(vec![path_closed![(0, 0), (10, 0), (10, 10), (0, 10)]]);
/// let config = OffsetConfig::with_delta(2.0);
/// let grown = offset(&square, &config, JoinStyle::Square, EndStyle::ClosedPolygon).unwrap();
/// assert_eq!(grown.len(), 1);
/// assert_eq!(grown[0].signed_area(), 196.0);
/// ```
pub fn offset(
    paths: &PathSet,
    config: &OffsetConfig,
    default_join: JoinStyle,
    default_end: EndStyle,
) -> Result<PathSet> {
    offset_opt(paths, config, default_join, default_end, &OffsetOptions::new())
}

/// Same as [offset] with additional options.
pub fn offset_opt(
    paths: &PathSet,
    config: &OffsetConfig,
    default_join: JoinStyle,
    default_end: EndStyle,
    options: &OffsetOptions,
) -> Result<PathSet> {
    config.validate()?;

    // distances are in external units when the set is scaled
    let factor = paths.scale.map_or(1.0, |s| s.factor());
    let delta = config.delta * factor;
    let arc_tolerance = config.arc_tolerance * factor;

    let styled = paths
        .iter()
        .map(|p| {
            (
                p,
                p.join.unwrap_or(default_join),
                p.end.unwrap_or(default_end),
            )
        })
        .collect::<Vec<_>>();

    if delta < 0.0 {
        if let Some((_, _, end)) = styled.iter().find(|(_, _, end)| !end.is_closed()) {
            return Err(ClipError::config(format!(
                "negative offset delta ({}) requires a closed end style, got {:?}",
                config.delta, end
            )));
        }
    }

    let mut prepared = Vec::with_capacity(styled.len());
    for (path, join, end) in styled {
        if options.simplify && end == EndStyle::ClosedPolygon {
            // pieces keep the source orientation so holes stay holes
            let reversed = path.signed_area() < 0.0;
            for mut piece in simplify(path)?.paths {
                if reversed {
                    piece.reverse();
                }
                piece.join = path.join;
                piece.end = path.end;
                prepared.push((piece, join, end));
            }
        } else {
            prepared.push((path.clone(), join, end));
        }
    }

    let mut result = if delta == 0.0 {
        prepared.into_iter().map(|(path, _, _)| path).collect()
    } else {
        let mut engine = OffsetEngine::new(config.miter_limit, arc_tolerance);
        for (path, join, end) in prepared.iter() {
            engine.add_path(path, *join, *end);
        }
        engine.execute(delta)?
    };

    if options.reverse_output {
        for path in result.iter_mut() {
            path.reverse();
        }
    }

    log::debug!(
        "offset by {} ({:?}/{:?}, simplify: {}): {} paths -> {} paths",
        config.delta,
        default_join,
        default_end,
        options.simplify,
        paths.len(),
        result.len()
    );

    Ok(PathSet {
        paths: result,
        scale: paths.scale,
    })
}

/// The part of `path` not covered by its own offset: the even odd difference of the path minus
/// the offset of it.
///
/// The path is treated as closed and `config` distances are in integer units. With a negative
/// delta the result is the band between the path and its inset, with a positive delta the result
/// is empty.
pub fn clip_by_offset(
    path: &Path,
    config: &OffsetConfig,
    join: JoinStyle,
    end: EndStyle,
    options: &OffsetOptions,
) -> Result<PathSet> {
    let mut source = path.clone();
    source.is_closed = true;
    source.join = Some(join);
    source.end = Some(end);
    let source = PathSet::from_paths(vec![source]);

    let offsets = offset_opt(&source, config, join, end, options)?;
    let clip_options = ClipOptions {
        reverse_output: options.reverse_output,
        ..ClipOptions::new()
    };
    clip_opt(
        &source,
        &offsets,
        ClipOperation::Difference,
        FillRule::EvenOdd,
        &clip_options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleFactor;

    fn square(x: i64, y: i64, size: i64) -> Path {
        path_closed![(x, y), (x + size, y), (x + size, y + size), (x, y + size)]
    }

    #[test]
    fn mixed_scales_rejected() {
        let mut a = PathSet::from_paths(vec![square(0, 0, 10)]);
        a.scale = Some(ScaleFactor::Int2);
        let mut b = PathSet::from_paths(vec![square(5, 5, 10)]);
        b.scale = Some(ScaleFactor::Int3);
        let result = clip(&a, &b, ClipOperation::Union, FillRule::EvenOdd, false);
        assert!(matches!(result, Err(ClipError::InvalidConfiguration(_))));
    }

    #[test]
    fn scale_carried_to_output() {
        let mut a = PathSet::from_paths(vec![square(0, 0, 10)]);
        a.scale = Some(ScaleFactor::Int4);
        let b = PathSet::from_paths(vec![square(5, 5, 10)]);
        let result = clip(&a, &b, ClipOperation::Union, FillRule::EvenOdd, false).unwrap();
        assert_eq!(result.scale, Some(ScaleFactor::Int4));
    }

    #[test]
    fn negative_delta_open_end_rejected() {
        let paths = PathSet::from_paths(vec![path_open![(0, 0), (10, 0)]]);
        let config = OffsetConfig::with_delta(-1.0);
        let result = offset(&paths, &config, JoinStyle::Round, EndStyle::OpenRound);
        assert!(matches!(result, Err(ClipError::InvalidConfiguration(_))));
    }

    #[test]
    fn negative_delta_closed_line_is_empty() {
        let paths = PathSet::from_paths(vec![square(0, 0, 10)]);
        let config = OffsetConfig::with_delta(-1.0);
        let result = offset(&paths, &config, JoinStyle::Miter, EndStyle::ClosedLine).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn invalid_miter_limit_rejected() {
        let paths = PathSet::from_paths(vec![square(0, 0, 10)]);
        let config = OffsetConfig {
            miter_limit: 0.0,
            ..OffsetConfig::with_delta(1.0)
        };
        let result = offset(&paths, &config, JoinStyle::Miter, EndStyle::ClosedPolygon);
        assert!(matches!(result, Err(ClipError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_delta_returns_input() {
        let paths = PathSet::from_paths(vec![square(0, 0, 10)]);
        let config = OffsetConfig::with_delta(0.0);
        let options = OffsetOptions {
            simplify: false,
            reverse_output: true,
        };
        let result = offset_opt(
            &paths,
            &config,
            JoinStyle::Miter,
            EndStyle::ClosedPolygon,
            &options,
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].signed_area(), -100.0);
    }

    #[test]
    fn scaled_delta() {
        let mut paths = PathSet::from_paths(vec![square(0, 0, 1000)]);
        paths.scale = Some(ScaleFactor::Int3);
        let config = OffsetConfig::with_delta(0.5);
        let result = offset(&paths, &config, JoinStyle::Miter, EndStyle::ClosedPolygon).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].signed_area(), 2000.0 * 2000.0);
    }

    #[test]
    fn clip_by_offset_rim() {
        let config = OffsetConfig::with_delta(-2.0);
        let rim = clip_by_offset(
            &square(0, 0, 10),
            &config,
            JoinStyle::Miter,
            EndStyle::ClosedPolygon,
            &OffsetOptions::new(),
        )
        .unwrap();
        assert_eq!(rim.signed_area(), 100.0 - 36.0);

        let config = OffsetConfig::with_delta(2.0);
        let nothing = clip_by_offset(
            &square(0, 0, 10),
            &config,
            JoinStyle::Miter,
            EndStyle::ClosedPolygon,
            &OffsetOptions::new(),
        )
        .unwrap();
        assert!(nothing.is_empty());
    }
}
