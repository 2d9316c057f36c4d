#![allow(dead_code)]
mod debug;
mod path_modifiers;
mod path_test_properties;

pub use debug::*;
pub use path_modifiers::*;
pub use path_test_properties::*;

/// Route `log` records to the test output, safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
