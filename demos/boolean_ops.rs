use fixclip::{
    path::{clip, clip_opt, ClipOperation, ClipOptions, FillRule, PathSet},
    path_closed, path_open,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    closed_operations();
    fill_rules();
    open_subjects();
}

fn squares() -> (PathSet, PathSet) {
    let a = PathSet::from_paths(vec![path_closed![(0, 0), (10, 0), (10, 10), (0, 10)]]);
    let b = PathSet::from_paths(vec![path_closed![(5, 5), (15, 5), (15, 15), (5, 15)]]);
    (a, b)
}

fn closed_operations() {
    println!("Testing boolean operations on overlapping squares...");
    let (a, b) = squares();

    for (op, expected_area) in [
        (ClipOperation::Intersection, 25.0),
        (ClipOperation::Union, 175.0),
        (ClipOperation::Difference, 75.0),
        (ClipOperation::Xor, 150.0),
    ] {
        let result = clip(&a, &b, op, FillRule::EvenOdd, false).unwrap();
        log::info!(
            "{:?}: {} path(s), area {:.1}",
            op,
            result.len(),
            result.signed_area()
        );
        assert_eq!(result.signed_area(), expected_area);
        // outer rings come out counter clockwise
        assert!(result.iter().all(|p| p.signed_area() > 0.0));
    }

    let options = ClipOptions {
        reverse_output: true,
        ..ClipOptions::new()
    };
    let reversed = clip_opt(&a, &b, ClipOperation::Union, FillRule::EvenOdd, &options).unwrap();
    log::info!("Union reversed: area {:.1}", reversed.signed_area());
    assert_eq!(reversed.signed_area(), -175.0);
}

fn fill_rules() {
    println!("Testing fill rules on nested squares with the same winding...");
    // both squares counter clockwise, the inner region has winding number 2
    let nested = PathSet::from_paths(vec![
        path_closed![(0, 0), (20, 0), (20, 20), (0, 20)],
        path_closed![(5, 5), (15, 5), (15, 15), (5, 15)],
    ]);
    let empty = PathSet::new();

    let even_odd = clip(&nested, &empty, ClipOperation::Union, FillRule::EvenOdd, false).unwrap();
    log::info!("EvenOdd area: {:.1}", even_odd.signed_area());
    assert_eq!(even_odd.signed_area(), 300.0);

    let non_zero = clip(&nested, &empty, ClipOperation::Union, FillRule::NonZero, false).unwrap();
    log::info!("NonZero area: {:.1}", non_zero.signed_area());
    assert_eq!(non_zero.signed_area(), 400.0);

    let negative =
        clip(&nested, &empty, ClipOperation::Union, FillRule::Negative, false).unwrap();
    log::info!("Negative area: {:.1}", negative.signed_area());
    assert!(negative.is_empty());
}

fn open_subjects() {
    println!("Testing clipping an open line by a square...");
    let line = PathSet::from_paths(vec![path_open![(-5, 5), (25, 5)]]);
    let square = PathSet::from_paths(vec![path_closed![(0, 0), (10, 0), (10, 10), (0, 10)]]);

    let inside = clip(&line, &square, ClipOperation::Intersection, FillRule::NonZero, false).unwrap();
    assert_eq!(inside.len(), 1);
    assert!(!inside[0].is_closed);
    log::info!("Inside: {:?}", inside[0].iter().collect::<Vec<_>>());

    let outside = clip(&line, &square, ClipOperation::Difference, FillRule::NonZero, false).unwrap();
    log::info!("Outside pieces: {}", outside.len());
    assert_eq!(outside.len(), 2);
}
