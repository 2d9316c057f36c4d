//! Integer paths and the operations on them: boolean clipping, offsetting, simplification and
//! point/area queries.
mod int_path;
mod internal;
mod ops;
mod path_set;
mod path_types;
mod queries;

pub use int_path::*;
pub use ops::*;
pub use path_set::*;
pub use path_types::*;
pub use queries::*;
