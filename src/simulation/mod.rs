pub mod driver;
pub mod path;

pub use driver::run_simulation;
pub use path::{simulate_path, simulate_terminal};
