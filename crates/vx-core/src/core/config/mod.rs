pub(crate) mod context;
mod settings;

pub use settings::{Config, EnvTable, GlobalOptions, Manifest, DEFAULT_ENV_DIR, MANIFEST_FILE};
pub(crate) use settings::EnvSnapshot;
