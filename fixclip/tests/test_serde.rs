#![cfg(feature = "serde")]
mod test_utils;

use fixclip::path::{clip, ClipOperation, FillRule, OffsetConfig, Path, PathSet};
use fixclip::path_closed;
use test_utils::{init_logging, to_debug_json_str};

#[test]
fn path_set_from_json() {
    init_logging();
    let json = r#"{
  "paths": [
    {
      "points": [{"x": 0, "y": 0}, {"x": 10, "y": 0}, {"x": 10, "y": 10}, {"x": 0, "y": 10}],
      "isClosed": true,
      "join": null,
      "end": null
    },
    {
      "points": [{"x": 5, "y": 5}, {"x": 15, "y": 5}, {"x": 15, "y": 15}, {"x": 5, "y": 15}],
      "isClosed": true,
      "join": "Round",
      "end": null
    }
  ],
  "scale": "Int3"
}"#;

    let set: PathSet = serde_json::from_str(json).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set[0], path_closed![(0, 0), (10, 0), (10, 10), (0, 10)]);

    let (subjects, clips) = (
        PathSet {
            paths: vec![set[0].clone()],
            scale: set.scale,
        },
        PathSet {
            paths: vec![set[1].clone()],
            scale: set.scale,
        },
    );
    let result = clip(&subjects, &clips, ClipOperation::Union, FillRule::NonZero, false).unwrap();
    assert_eq!(result.signed_area(), 175.0);
}

#[test]
fn round_trip_output() {
    init_logging();
    let path = path_closed![(0, 0), (4, 0), (4, 4)];
    let json = serde_json::to_string(&path).unwrap();
    let back: Path = serde_json::from_str(&json).unwrap();
    assert_eq!(back, path);
    assert!(to_debug_json_str(&path).contains("\"isClosed\": true"));

    let config: OffsetConfig =
        serde_json::from_str(r#"{"delta": 2.5, "miterLimit": 3.0, "arcTolerance": 0.0}"#).unwrap();
    assert_eq!(config.delta, 2.5);
    assert_eq!(config.miter_limit, 3.0);
}
