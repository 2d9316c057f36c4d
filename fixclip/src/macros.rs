/// Assert two values are fuzzy equal using [FuzzyEq](crate::core::traits::FuzzyEq), an epsilon may
/// be given as a third argument.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                use $crate::core::traits::FuzzyEq;
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                use $crate::core::traits::FuzzyEq;
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Used by the path macros to count repetitions for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct an open integer [Path](crate::path::Path) from a list of (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use fixclip::path_open;
/// # use fixclip::core::math::IntPoint;
/// let path = path_open![(0, 1), (2, 0)];
/// assert!(!path.is_closed);
/// assert_eq!(path[1], IntPoint::new(2, 0));
/// ```
#[macro_export]
macro_rules! path_open {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut path = $crate::path::Path::with_capacity(size, false);
            $(
                path.add($x.0, $x.1);
            )*
            path
        }
    };
}

/// Construct a closed integer [Path](crate::path::Path) from a list of (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use fixclip::path_closed;
/// # use fixclip::core::math::IntPoint;
/// let path = path_closed![(0, 0), (4, 0), (4, 4)];
/// assert!(path.is_closed);
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[2], IntPoint::new(4, 4));
/// ```
#[macro_export]
macro_rules! path_closed {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut path = $crate::path::Path::with_capacity(size, true);
            $(
                path.add($x.0, $x.1);
            )*
            path
        }
    };
}
