use fixclip::{
    core::math::{vec2, IntPoint},
    path::{largest_by_area, point_in_polygon_set, signed_area, PathSet, PointContainment},
    path_closed,
    scale::ScaleFactor,
    vector::{flatten_vector_paths, point_in_vector_paths, VectorPath},
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    integer_queries();
    vector_queries();
}

fn integer_queries() {
    println!("Testing point containment and area queries...");
    let paths = PathSet::from_paths(vec![
        path_closed![(0, 0), (10, 0), (10, 10), (0, 10)],
        path_closed![(20, 0), (40, 0), (40, 20), (20, 20)],
    ]);

    for (pt, expected) in [
        (IntPoint::new(5, 5), PointContainment::Inside),
        (IntPoint::new(30, 20), PointContainment::OnBoundary),
        (IntPoint::new(15, 5), PointContainment::Outside),
    ] {
        let result = point_in_polygon_set(pt, &paths);
        log::info!("{:?}: {:?}", pt, result);
        assert_eq!(result, expected);
    }

    for path in paths.iter() {
        log::info!("Area: {:.1}", signed_area(path));
    }
    assert_eq!(largest_by_area(&paths.paths), Some(1));
}

fn vector_queries() {
    println!("Testing floating point queries...");
    let scale = ScaleFactor::Int2;
    let triangle = VectorPath::from_points(
        vec![vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0)],
        true,
    );
    let paths = vec![triangle];

    let inside = point_in_vector_paths(vec2(0.25, 0.25), &paths, scale).unwrap();
    let on_edge = point_in_vector_paths(vec2(0.5, 0.5), &paths, scale).unwrap();
    log::info!("(0.25, 0.25): {:?}, (0.5, 0.5): {:?}", inside, on_edge);
    assert_eq!(inside, PointContainment::Inside);
    assert_eq!(on_edge, PointContainment::OnBoundary);

    let flat = flatten_vector_paths(&paths, scale).unwrap();
    log::info!("Flattened point count: {}", flat[0].len());
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].len(), 3);
}
