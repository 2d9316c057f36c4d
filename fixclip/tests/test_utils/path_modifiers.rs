use fixclip::path::Path;

/// Cycles all the point index positions forward by `n`. E.g. index 0 becomes 1, last index becomes
/// 0, etc. (only applicable to closed paths)
pub fn cycle_start_index_forward(input: &Path, n: usize) -> Path {
    assert!(n > 0, "cycling forward by 0 just returns the same path");
    assert!(
        n < input.len(),
        "cycling forward by more than the path length is unnecessary"
    );
    assert!(
        input.is_closed,
        "cycling point index positions not possible with open path"
    );
    let mut result = Path::from_points(
        input.iter().cycle().skip(n).take(input.len()).copied().collect(),
        input.is_closed,
    );
    result.join = input.join;
    result.end = input.end;
    result
}

#[derive(Debug, Clone, Copy)]
pub struct ModifiedPathState {
    pub inverted_direction: bool,
    pub cycle_position: usize,
}

impl ModifiedPathState {
    pub fn new(inverted_direction: bool, cycle_position: usize) -> Self {
        Self {
            inverted_direction,
            cycle_position,
        }
    }
}

/// Visits every variant of a path that should give the same clipping and offset results: the
/// path itself, optionally reversed, and optionally with every start index.
#[derive(Debug, Clone)]
pub struct ModifiedPathSet<'a> {
    pub input: &'a Path,
    pub invert_direction: bool,
    pub cycle_index_positions: bool,
}

impl<'a> ModifiedPathSet<'a> {
    pub fn new(input: &'a Path, invert_direction: bool, cycle_index_positions: bool) -> Self {
        Self {
            input,
            invert_direction,
            cycle_index_positions,
        }
    }

    pub fn accept_closure<F>(&self, visitor: &mut F)
    where
        F: FnMut(Path, ModifiedPathState),
    {
        visitor(self.input.clone(), ModifiedPathState::new(false, 0));
        let inverted = {
            let mut p = self.input.clone();
            p.reverse();
            p
        };

        if self.invert_direction {
            visitor(inverted.clone(), ModifiedPathState::new(true, 0));
        }

        if self.cycle_index_positions && self.input.is_closed {
            for i in 1..self.input.len() {
                let cycled = cycle_start_index_forward(self.input, i);
                visitor(cycled, ModifiedPathState::new(false, i));
            }

            if self.invert_direction {
                for i in 1..self.input.len() {
                    let cycled = cycle_start_index_forward(&inverted, i);
                    visitor(cycled, ModifiedPathState::new(true, i));
                }
            }
        }
    }
}
