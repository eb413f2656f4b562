// Pure data model for vx: the environment handle, the module-name sets, and
// the missing-set difference. No I/O lives in this crate.

mod env;
mod imports;
mod stdlib;

pub use env::EnvHandle;
pub use imports::missing_modules;
pub use stdlib::{is_standard_lib, STANDARD_LIBS};
