use fixclip::{core::traits::FuzzyEq, path::Path, AABB};

/// Compare AABB values field by field
pub fn aabb_eq(a: &AABB<i64>, b: &AABB<i64>) -> bool {
    a.min_x == b.min_x && a.min_y == b.min_y && a.max_x == b.max_x && a.max_y == b.max_y
}

/// Holds a set of properties of a path for comparison in tests
#[derive(Debug, Copy, Clone)]
pub struct PathProperties {
    pub point_count: usize,
    pub area: f64,
    pub extents: AABB<i64>,
}

impl PathProperties {
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-4;

    pub fn new(
        point_count: usize,
        area: f64,
        min_x: i64,
        min_y: i64,
        max_x: i64,
        max_y: i64,
    ) -> Self {
        Self {
            point_count,
            area,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    pub fn from_path(path: &Path, invert_area: bool) -> Self {
        let area = {
            let a = path.signed_area();
            if invert_area {
                -a
            } else {
                a
            }
        };

        Self {
            point_count: path.len(),
            area,
            extents: path.extents().unwrap(),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.point_count == other.point_count
            && self.area.fuzzy_eq_eps(other.area, eps)
            && aabb_eq(&self.extents, &other.extents)
    }

    pub fn fuzzy_eq_eps_abs_a(&self, other: &Self, eps: f64) -> bool {
        self.point_count == other.point_count
            && self.area.abs().fuzzy_eq_eps(other.area.abs(), eps)
            && aabb_eq(&self.extents, &other.extents)
    }
}

pub fn create_property_set<'a, I>(paths: I, invert_area: bool) -> Vec<PathProperties>
where
    I: IntoIterator<Item = &'a Path>,
{
    paths
        .into_iter()
        .map(|p| PathProperties::from_path(p, invert_area))
        .collect()
}

fn sets_match_by<F>(result_set: &[PathProperties], expected_set: &[PathProperties], eq: F) -> bool
where
    F: Fn(&PathProperties, &PathProperties) -> bool,
{
    let mut sets_match = true;
    if result_set.len() != expected_set.len() {
        sets_match = false;
    } else {
        // using simple N^2 comparisons to compare property sets (sets are always relatively small,
        // e.g. N < 10)
        for properties_expected in expected_set {
            let match_count = result_set
                .iter()
                .filter(|properties_result| eq(properties_expected, properties_result))
                .count();

            if match_count != 1 {
                sets_match = false;
                break;
            }
        }
    }

    if !sets_match {
        eprintln!("result:\n{:?}", result_set);
        eprintln!("expected:\n{:?}", expected_set);
    }

    sets_match
}

pub fn property_sets_match(result_set: &[PathProperties], expected_set: &[PathProperties]) -> bool {
    sets_match_by(result_set, expected_set, |a, b| {
        a.fuzzy_eq_eps(b, PathProperties::PROP_CMP_EPS)
    })
}

pub fn property_sets_match_abs_a(
    result_set: &[PathProperties],
    expected_set: &[PathProperties],
) -> bool {
    sets_match_by(result_set, expected_set, |a, b| {
        a.fuzzy_eq_eps_abs_a(b, PathProperties::PROP_CMP_EPS)
    })
}
