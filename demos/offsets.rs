use fixclip::{
    core::math::vec2,
    path::{offset, EndStyle, JoinStyle, OffsetConfig, OffsetOptions, PathSet},
    path_closed,
    scale::ScaleFactor,
    vector::{clip_by_offset_vector_path, offset_vector_paths, VectorPath},
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    integer_offsets();
    vector_offsets();
    rim_extraction();
}

fn integer_offsets() {
    println!("Testing integer offsets of a square...");
    let square = PathSet::from_paths(vec![path_closed![(0, 0), (10, 0), (10, 10), (0, 10)]]);

    for join in [JoinStyle::Square, JoinStyle::Miter, JoinStyle::Round] {
        let grown = offset(
            &square,
            &OffsetConfig::with_delta(2.0),
            join,
            EndStyle::ClosedPolygon,
        )
        .unwrap();
        log::info!(
            "{:?} grown: {} point(s), area {:.1}",
            join,
            grown[0].len(),
            grown.signed_area()
        );
        assert!(grown.signed_area() > 180.0 && grown.signed_area() <= 196.0);

        let shrunk = offset(
            &square,
            &OffsetConfig::with_delta(-2.0),
            join,
            EndStyle::ClosedPolygon,
        )
        .unwrap();
        assert_eq!(shrunk.signed_area(), 36.0);
    }

    let collapsed = offset(
        &square,
        &OffsetConfig::with_delta(-7.0),
        JoinStyle::Miter,
        EndStyle::ClosedPolygon,
    )
    .unwrap();
    log::info!("Shrunk past collapse: {} path(s)", collapsed.len());
    assert!(collapsed.is_empty());
}

fn vector_offsets() {
    println!("Testing floating point offsets of an open polyline...");
    let line = VectorPath::from_points(vec![vec2(0.0, 0.0), vec2(10.0, 0.0)], false);

    for end in [EndStyle::OpenButt, EndStyle::OpenSquare, EndStyle::OpenRound] {
        let result = offset_vector_paths(
            std::slice::from_ref(&line),
            &OffsetConfig::with_delta(0.5),
            JoinStyle::Round,
            end,
            &OffsetOptions::new(),
            ScaleFactor::Int4,
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        log::info!("{:?}: area {:.4}", end, result[0].signed_area());
    }
}

fn rim_extraction() {
    println!("Testing the rim left by clipping a shape with its own inward offset...");
    let square = VectorPath::from_points(
        vec![
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(1.0, 1.0),
            vec2(0.0, 1.0),
        ],
        true,
    );
    let rim = clip_by_offset_vector_path(
        &square,
        &OffsetConfig::with_delta(-0.1),
        JoinStyle::Miter,
        EndStyle::ClosedPolygon,
        &OffsetOptions::new(),
        ScaleFactor::Int3,
    )
    .unwrap();
    let area: f64 = rim.iter().map(|p| p.signed_area()).sum();
    log::info!("Rim: {} path(s), area {:.3}", rim.len(), area);
    assert_eq!(rim.len(), 2);
    assert!((area - 0.36).abs() < 1e-9);
}
