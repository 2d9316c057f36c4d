//! This module contains the C foreign function interface for fixclip.
//!
//! Paths cross the boundary in floating point external units, every operation takes the
//! [ScaleFactor] used to convert them to the fixed point space as a decimal digit count
//! (2, 3, 4 or 8).
//!
//! All functions return 0 on success, 1 for a null argument, -1 if a panic was caught, and the
//! function specific codes listed in their docs. When an operation itself fails (invalid
//! configuration, coordinate overflow, internal error) the message can be read back with
//! [fxc_last_error_msg].
#![allow(non_camel_case_types)]
pub mod error_handling;

use core::slice;
use error_handling::{clear_last_error, set_last_error, LAST_ERROR};
use fixclip::{
    core::math::{vec2, Vector2},
    path::{
        ClipOperation, ClipOptions, EndStyle, FillRule, JoinStyle, OffsetConfig, OffsetOptions,
        PointContainment,
    },
    scale::ScaleFactor,
    vector::{
        clip_by_offset_vector_path, clip_vector_paths, largest_vector_path, offset_vector_paths,
        point_in_vector_paths, simplify_vector_path, VectorPath,
    },
    ClipError,
};
use std::{ffi::c_char, panic};

/// Helper macro to catch unwind and return -1 if panic was caught otherwise returns whatever the
/// expression returned.
macro_rules! ffi_catch_unwind {
    ($body: expr) => {
        match panic::catch_unwind(move || $body) {
            Ok(r) => r,
            Err(_) => -1,
        }
    };
}

/// Error code returned when the operation itself fails, see [fxc_last_error_msg].
pub const FXC_OPERATION_FAILED: i32 = 5;

/// Represents a simple 2D point with x and y coordinate values.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fxc_point {
    pub x: f64,
    pub y: f64,
}

impl fxc_point {
    pub fn new(x: f64, y: f64) -> Self {
        fxc_point { x, y }
    }

    pub fn from_internal(v: Vector2<f64>) -> Self {
        fxc_point::new(v.x, v.y)
    }
}

/// Opaque type that wraps a list of [VectorPath].
///
/// Note the internal member is only public for composing in other Rust libraries wanting to use the
/// FFI opaque type as part of their FFI API.
#[derive(Debug, Clone)]
pub struct fxc_pathlist(pub Vec<VectorPath<f64>>);

impl fxc_pathlist {
    fn into_raw(paths: Vec<VectorPath<f64>>) -> *const fxc_pathlist {
        Box::into_raw(Box::new(fxc_pathlist(paths)))
    }
}

fn scale_from_u32(digits: u32) -> Option<ScaleFactor> {
    match digits {
        2 => Some(ScaleFactor::Int2),
        3 => Some(ScaleFactor::Int3),
        4 => Some(ScaleFactor::Int4),
        8 => Some(ScaleFactor::Int8),
        _ => None,
    }
}

fn scale_to_u32(scale: ScaleFactor) -> u32 {
    match scale {
        ScaleFactor::Int2 => 2,
        ScaleFactor::Int3 => 3,
        ScaleFactor::Int4 => 4,
        ScaleFactor::Int8 => 8,
    }
}

fn clip_op_from_u32(i: u32) -> Option<ClipOperation> {
    match i {
        0 => Some(ClipOperation::Intersection),
        1 => Some(ClipOperation::Union),
        2 => Some(ClipOperation::Difference),
        3 => Some(ClipOperation::Xor),
        _ => None,
    }
}

fn fill_rule_from_u32(i: u32) -> Option<FillRule> {
    match i {
        0 => Some(FillRule::EvenOdd),
        1 => Some(FillRule::NonZero),
        2 => Some(FillRule::Positive),
        3 => Some(FillRule::Negative),
        _ => None,
    }
}

fn fill_rule_to_u32(fill: FillRule) -> u32 {
    match fill {
        FillRule::EvenOdd => 0,
        FillRule::NonZero => 1,
        FillRule::Positive => 2,
        FillRule::Negative => 3,
    }
}

fn join_style_from_u32(i: u32) -> Option<JoinStyle> {
    match i {
        0 => Some(JoinStyle::Square),
        1 => Some(JoinStyle::Round),
        2 => Some(JoinStyle::Miter),
        _ => None,
    }
}

fn end_style_from_u32(i: u32) -> Option<EndStyle> {
    match i {
        0 => Some(EndStyle::ClosedPolygon),
        1 => Some(EndStyle::ClosedLine),
        2 => Some(EndStyle::OpenButt),
        3 => Some(EndStyle::OpenSquare),
        4 => Some(EndStyle::OpenRound),
        _ => None,
    }
}

/// Record `err` as the last error and return [FXC_OPERATION_FAILED].
fn operation_failed(err: ClipError, function: &str) -> i32 {
    set_last_error(err.to_string(), format!("{function}: {err:?}"));
    FXC_OPERATION_FAILED
}

/// FFI representation of [ClipOptions] plus the scale used for the operation.
///
/// `clip_fill` uses the fill rule codes of [fxc_clip], any other value (e.g. -1) means the clip
/// paths use the same fill rule as the subject paths.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fxc_clip_o {
    pub clip_fill: i32,
    pub preserve_collinear: u8,
    pub reverse_output: u8,
    pub scale: u32,
}

impl fxc_clip_o {
    /// Convert FFI clip options type to internal types, `None` if `scale` is unrecognized.
    pub fn to_internal(&self) -> Option<(ClipOptions, ScaleFactor)> {
        let scale = scale_from_u32(self.scale)?;
        let clip_fill = u32::try_from(self.clip_fill)
            .ok()
            .and_then(fill_rule_from_u32);
        let options = ClipOptions {
            clip_fill,
            preserve_collinear: self.preserve_collinear != 0,
            reverse_output: self.reverse_output != 0,
        };
        Some((options, scale))
    }
}

impl Default for fxc_clip_o {
    fn default() -> Self {
        let d = ClipOptions::default();
        Self {
            clip_fill: d
                .clip_fill
                .map_or(-1, |f| fill_rule_to_u32(f) as i32),
            preserve_collinear: d.preserve_collinear as u8,
            reverse_output: d.reverse_output as u8,
            scale: scale_to_u32(ScaleFactor::default()),
        }
    }
}

/// Write default option values to a [fxc_clip_o].
///
/// ## Specific Error Codes
/// * 1 = `options` is null.
///
/// # Safety
///
/// `options` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_clip_o_init(options: *mut fxc_clip_o) -> i32 {
    ffi_catch_unwind!({
        if options.is_null() {
            return 1;
        }

        options.write(Default::default());
        0
    })
}

/// FFI representation of [OffsetConfig] (without the delta) and [OffsetOptions] plus the scale
/// used for the operation.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct fxc_offset_o {
    pub miter_limit: f64,
    pub arc_tolerance: f64,
    pub simplify: u8,
    pub reverse_output: u8,
    pub scale: u32,
}

impl fxc_offset_o {
    /// Convert FFI offset options type to internal types, `None` if `scale` is unrecognized.
    pub fn to_internal(&self, delta: f64) -> Option<(OffsetConfig, OffsetOptions, ScaleFactor)> {
        let scale = scale_from_u32(self.scale)?;
        let config = OffsetConfig {
            delta,
            miter_limit: self.miter_limit,
            arc_tolerance: self.arc_tolerance,
        };
        let options = OffsetOptions {
            simplify: self.simplify != 0,
            reverse_output: self.reverse_output != 0,
        };
        Some((config, options, scale))
    }
}

impl Default for fxc_offset_o {
    fn default() -> Self {
        let c = OffsetConfig::default();
        let o = OffsetOptions::default();
        Self {
            miter_limit: c.miter_limit,
            arc_tolerance: c.arc_tolerance,
            simplify: o.simplify as u8,
            reverse_output: o.reverse_output as u8,
            scale: scale_to_u32(ScaleFactor::default()),
        }
    }
}

/// Write default option values to a [fxc_offset_o].
///
/// ## Specific Error Codes
/// * 1 = `options` is null.
///
/// # Safety
///
/// `options` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_offset_o_init(options: *mut fxc_offset_o) -> i32 {
    ffi_catch_unwind!({
        if options.is_null() {
            return 1;
        }

        options.write(Default::default());
        0
    })
}

/// Create a new [fxc_pathlist] object.
///
/// `capacity` is the number of paths to pre-allocate space for. May be zero.
/// `pathlist` is an out parameter to hold the created list.
///
/// ## Specific Error Codes
/// * 1 = `pathlist` is null.
///
/// # Safety
///
/// `pathlist` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_pathlist_create(
    capacity: usize,
    pathlist: *mut *const fxc_pathlist,
) -> i32 {
    ffi_catch_unwind!({
        if pathlist.is_null() {
            return 1;
        }

        pathlist.write(fxc_pathlist::into_raw(Vec::with_capacity(capacity)));
        0
    })
}

/// Free an existing [fxc_pathlist] object and all paths owned by it.
///
/// Nothing happens if `pathlist` is null.
///
/// # Safety
///
/// `pathlist` must be null or a valid [fxc_pathlist] object that has not already been freed.
#[no_mangle]
pub unsafe extern "C" fn fxc_pathlist_f(pathlist: *mut fxc_pathlist) {
    if !pathlist.is_null() {
        drop(Box::from_raw(pathlist))
    }
}

/// Append a path to the end of a [fxc_pathlist].
///
/// `points` is an array of [fxc_point] to create the path with (may be null if `n_points` is 0).
/// `n_points` contains the number of points in the array.
/// `is_closed` sets the path to be closed if non-zero.
///
/// ## Specific Error Codes
/// * 1 = `pathlist` is null.
///
/// # Safety
///
/// `pathlist` must be null or a valid [fxc_pathlist] object.
/// `points` may be null if `n_points` is 0 or must point to a valid contiguous buffer of
/// [fxc_point] with length of at least `n_points`.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_pathlist_add(
    pathlist: *mut fxc_pathlist,
    points: *const fxc_point,
    n_points: u32,
    is_closed: u8,
) -> i32 {
    ffi_catch_unwind!({
        if pathlist.is_null() {
            return 1;
        }

        let mut path = VectorPath::with_capacity(n_points as usize, is_closed != 0);
        if !points.is_null() && n_points != 0 {
            let data = slice::from_raw_parts(points, n_points as usize);
            for p in data {
                path.push(vec2(p.x, p.y));
            }
        }

        (*pathlist).0.push(path);
        0
    })
}

/// Get the number of paths inside a [fxc_pathlist].
///
/// `count` used as out parameter to hold the path count.
///
/// ## Specific Error Codes
/// * 1 = `pathlist` is null.
///
/// # Safety
///
/// `pathlist` must be null or a valid [fxc_pathlist] object.
/// `count` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_pathlist_get_count(
    pathlist: *const fxc_pathlist,
    count: *mut u32,
) -> i32 {
    ffi_catch_unwind!({
        if pathlist.is_null() {
            return 1;
        }

        // using try_from to catch odd case of path count greater than u32::MAX to prevent
        // memory corruption/access errors but just panic as internal error if it does occur
        count.write(u32::try_from((*pathlist).0.len()).unwrap());
        0
    })
}

/// Get the point count and closed flag of the path at `position` in the [fxc_pathlist].
///
/// ## Specific Error Codes
/// * 1 = `pathlist` is null.
/// * 2 = `position` out of range for the [fxc_pathlist].
///
/// # Safety
///
/// `pathlist` must be null or a valid [fxc_pathlist] object.
/// `point_count` and `is_closed` must point to valid places in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_pathlist_get_path_info(
    pathlist: *const fxc_pathlist,
    position: u32,
    point_count: *mut u32,
    is_closed: *mut u8,
) -> i32 {
    ffi_catch_unwind!({
        if pathlist.is_null() {
            return 1;
        }

        match (&(*pathlist).0).get(position as usize) {
            Some(path) => {
                point_count.write(u32::try_from(path.len()).unwrap());
                is_closed.write(path.is_closed as u8);
                0
            }
            None => 2,
        }
    })
}

/// Fills the buffer given with the point data of the path at `position` in the [fxc_pathlist].
///
/// You must use [fxc_pathlist_get_path_info] to ensure the buffer given has adequate length
/// to be filled with all points!
///
/// ## Specific Error Codes
/// * 1 = `pathlist` is null.
/// * 2 = `position` out of range for the [fxc_pathlist].
///
/// # Safety
///
/// `pathlist` must be null or a valid [fxc_pathlist] object.
/// `point_data` must point to a buffer that is large enough to hold all the points or a buffer
/// overrun will happen.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_pathlist_get_path_data(
    pathlist: *const fxc_pathlist,
    position: u32,
    point_data: *mut fxc_point,
) -> i32 {
    ffi_catch_unwind!({
        if pathlist.is_null() {
            return 1;
        }

        let Some(path) = (&(*pathlist).0).get(position as usize) else {
            return 2;
        };

        let buffer = slice::from_raw_parts_mut(point_data, path.len());
        for (i, p) in path.iter().enumerate() {
            buffer[i] = fxc_point::from_internal(*p);
        }
        0
    })
}

/// Signed area of the path at `position` in the [fxc_pathlist], positive for counter clockwise.
///
/// ## Specific Error Codes
/// * 1 = `pathlist` is null.
/// * 2 = `position` out of range for the [fxc_pathlist].
///
/// # Safety
///
/// `pathlist` must be null or a valid [fxc_pathlist] object.
/// `area` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_pathlist_get_area(
    pathlist: *const fxc_pathlist,
    position: u32,
    area: *mut f64,
) -> i32 {
    ffi_catch_unwind!({
        if pathlist.is_null() {
            return 1;
        }

        match (&(*pathlist).0).get(position as usize) {
            Some(path) => {
                area.write(path.signed_area());
                0
            }
            None => 2,
        }
    })
}

/// Index of the path with the greatest absolute area in the [fxc_pathlist].
///
/// ## Specific Error Codes
/// * 1 = `pathlist` is null.
/// * 2 = `pathlist` is empty.
///
/// # Safety
///
/// `pathlist` must be null or a valid [fxc_pathlist] object.
/// `position` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_pathlist_largest(
    pathlist: *const fxc_pathlist,
    position: *mut u32,
) -> i32 {
    ffi_catch_unwind!({
        if pathlist.is_null() {
            return 1;
        }

        match largest_vector_path(&(*pathlist).0) {
            Some(i) => {
                position.write(u32::try_from(i).unwrap());
                0
            }
            None => 2,
        }
    })
}

/// Wraps [clip_vector_paths].
///
/// `options` is allowed to be null (default options will be used).
///
/// Clip operations are:
/// * 0 = [ClipOperation::Intersection]
/// * 1 = [ClipOperation::Union]
/// * 2 = [ClipOperation::Difference]
/// * 3 = [ClipOperation::Xor]
///
/// Fill rules are:
/// * 0 = [FillRule::EvenOdd]
/// * 1 = [FillRule::NonZero]
/// * 2 = [FillRule::Positive]
/// * 3 = [FillRule::Negative]
///
/// ## Specific Error Codes
/// * 1 = `subjects`, `clips` and/or `result` is null.
/// * 2 = `operation` is unrecognized (must be one of the values listed).
/// * 3 = `fill` is unrecognized (must be one of the values listed).
/// * 4 = `options` has an unrecognized scale.
/// * 5 = the clip failed, see [fxc_last_error_msg].
///
/// # Safety
///
/// `subjects` and `clips` must each be null or a valid [fxc_pathlist] object.
/// `options` must be null or point to a valid [fxc_clip_o].
/// `result` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_clip(
    subjects: *const fxc_pathlist,
    clips: *const fxc_pathlist,
    operation: u32,
    fill: u32,
    options: *const fxc_clip_o,
    result: *mut *const fxc_pathlist,
) -> i32 {
    ffi_catch_unwind!({
        if subjects.is_null() || clips.is_null() || result.is_null() {
            return 1;
        }

        let Some(op) = clip_op_from_u32(operation) else {
            return 2;
        };
        let Some(fill) = fill_rule_from_u32(fill) else {
            return 3;
        };
        let options = options.as_ref().copied().unwrap_or_default();
        let Some((options, scale)) = options.to_internal() else {
            return 4;
        };

        clear_last_error();
        match clip_vector_paths(&(*subjects).0, &(*clips).0, op, fill, &options, scale) {
            Ok(paths) => {
                result.write(fxc_pathlist::into_raw(paths));
                0
            }
            Err(e) => operation_failed(e, "fxc_clip"),
        }
    })
}

/// Wraps [offset_vector_paths], `delta` is in external units.
///
/// `options` is allowed to be null (default options will be used).
///
/// Join styles are:
/// * 0 = [JoinStyle::Square]
/// * 1 = [JoinStyle::Round]
/// * 2 = [JoinStyle::Miter]
///
/// End styles are:
/// * 0 = [EndStyle::ClosedPolygon]
/// * 1 = [EndStyle::ClosedLine]
/// * 2 = [EndStyle::OpenButt]
/// * 3 = [EndStyle::OpenSquare]
/// * 4 = [EndStyle::OpenRound]
///
/// ## Specific Error Codes
/// * 1 = `paths` and/or `result` is null.
/// * 2 = `join` is unrecognized (must be one of the values listed).
/// * 3 = `end` is unrecognized (must be one of the values listed).
/// * 4 = `options` has an unrecognized scale.
/// * 5 = the offset failed, see [fxc_last_error_msg].
///
/// # Safety
///
/// `paths` must be null or a valid [fxc_pathlist] object.
/// `options` must be null or point to a valid [fxc_offset_o].
/// `result` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_offset(
    paths: *const fxc_pathlist,
    delta: f64,
    join: u32,
    end: u32,
    options: *const fxc_offset_o,
    result: *mut *const fxc_pathlist,
) -> i32 {
    ffi_catch_unwind!({
        if paths.is_null() || result.is_null() {
            return 1;
        }

        let Some(join) = join_style_from_u32(join) else {
            return 2;
        };
        let Some(end) = end_style_from_u32(end) else {
            return 3;
        };
        let options = options.as_ref().copied().unwrap_or_default();
        let Some((config, options, scale)) = options.to_internal(delta) else {
            return 4;
        };

        clear_last_error();
        match offset_vector_paths(&(*paths).0, &config, join, end, &options, scale) {
            Ok(paths) => {
                result.write(fxc_pathlist::into_raw(paths));
                0
            }
            Err(e) => operation_failed(e, "fxc_offset"),
        }
    })
}

/// Wraps [simplify_vector_path] for the path at `position` in `paths`.
///
/// ## Specific Error Codes
/// * 1 = `paths` and/or `result` is null.
/// * 2 = `position` out of range for `paths`.
/// * 4 = `scale` is unrecognized.
/// * 5 = the simplify failed, see [fxc_last_error_msg].
///
/// # Safety
///
/// `paths` must be null or a valid [fxc_pathlist] object.
/// `result` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_simplify(
    paths: *const fxc_pathlist,
    position: u32,
    scale: u32,
    result: *mut *const fxc_pathlist,
) -> i32 {
    ffi_catch_unwind!({
        if paths.is_null() || result.is_null() {
            return 1;
        }

        let Some(path) = (&(*paths).0).get(position as usize) else {
            return 2;
        };
        let Some(scale) = scale_from_u32(scale) else {
            return 4;
        };

        clear_last_error();
        match simplify_vector_path(path, scale) {
            Ok(paths) => {
                result.write(fxc_pathlist::into_raw(paths));
                0
            }
            Err(e) => operation_failed(e, "fxc_simplify"),
        }
    })
}

/// Wraps [clip_by_offset_vector_path] for the path at `position` in `paths`, `delta` is in
/// external units.
///
/// `options` is allowed to be null (default options will be used). `join` and `end` use the
/// codes listed for [fxc_offset].
///
/// ## Specific Error Codes
/// * 1 = `paths` and/or `result` is null.
/// * 2 = `position` out of range for `paths`.
/// * 3 = `join` or `end` is unrecognized.
/// * 4 = `options` has an unrecognized scale.
/// * 5 = the operation failed, see [fxc_last_error_msg].
///
/// # Safety
///
/// `paths` must be null or a valid [fxc_pathlist] object.
/// `options` must be null or point to a valid [fxc_offset_o].
/// `result` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_clip_by_offset(
    paths: *const fxc_pathlist,
    position: u32,
    delta: f64,
    join: u32,
    end: u32,
    options: *const fxc_offset_o,
    result: *mut *const fxc_pathlist,
) -> i32 {
    ffi_catch_unwind!({
        if paths.is_null() || result.is_null() {
            return 1;
        }

        let Some(path) = (&(*paths).0).get(position as usize) else {
            return 2;
        };
        let (Some(join), Some(end)) = (join_style_from_u32(join), end_style_from_u32(end)) else {
            return 3;
        };
        let options = options.as_ref().copied().unwrap_or_default();
        let Some((config, options, scale)) = options.to_internal(delta) else {
            return 4;
        };

        clear_last_error();
        match clip_by_offset_vector_path(path, &config, join, end, &options, scale) {
            Ok(paths) => {
                result.write(fxc_pathlist::into_raw(paths));
                0
            }
            Err(e) => operation_failed(e, "fxc_clip_by_offset"),
        }
    })
}

/// Wraps [point_in_vector_paths].
///
/// `containment` is written as 0 when the point is outside every path, 1 when inside and -1 when
/// on a boundary.
///
/// ## Specific Error Codes
/// * 1 = `paths` and/or `containment` is null.
/// * 4 = `scale` is unrecognized.
/// * 5 = the point or paths could not be scaled, see [fxc_last_error_msg].
///
/// # Safety
///
/// `paths` must be null or a valid [fxc_pathlist] object.
/// `containment` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_point_in_paths(
    paths: *const fxc_pathlist,
    point: fxc_point,
    scale: u32,
    containment: *mut i32,
) -> i32 {
    ffi_catch_unwind!({
        if paths.is_null() || containment.is_null() {
            return 1;
        }

        let Some(scale) = scale_from_u32(scale) else {
            return 4;
        };

        clear_last_error();
        match point_in_vector_paths(vec2(point.x, point.y), &(*paths).0, scale) {
            Ok(r) => {
                containment.write(match r {
                    PointContainment::Outside => 0,
                    PointContainment::Inside => 1,
                    PointContainment::OnBoundary => -1,
                });
                0
            }
            Err(e) => operation_failed(e, "fxc_point_in_paths"),
        }
    })
}

/// Get the message of the last operation failure on the calling thread.
///
/// `msg` is written with a pointer to a nul terminated string owned by the library, it stays
/// valid until the next fixclip FFI call on the same thread.
///
/// ## Specific Error Codes
/// * 1 = `msg` is null.
/// * 2 = no error has been recorded.
///
/// # Safety
///
/// `msg` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn fxc_last_error_msg(msg: *mut *const c_char) -> i32 {
    ffi_catch_unwind!({
        if msg.is_null() {
            return 1;
        }

        LAST_ERROR.with(|last| match last.borrow().as_ref() {
            Some(data) => {
                msg.write(data.error_msg.as_ptr());
                0
            }
            None => 2,
        })
    })
}
