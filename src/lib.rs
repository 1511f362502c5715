#[macro_use]
extern crate lazy_static;

use std::sync::Once;

pub mod config;
pub mod content;
pub mod engine;
mod errors;
pub mod file;
pub mod normalize;
pub mod params;
pub mod path;
pub mod unescape;

pub use config::IoOptions;
pub use content::ByteString;
pub use engine::{Bootstrap, Resources, VocabularyKind};
pub use errors::{EmmetIoError, Result};
pub use file::FileInterface;
pub use normalize::{ConfigLoader, UserData};
pub use params::ReadParams;
pub use path::{ResourceKind, ResourcePath};

pub static INIT: Once = Once::new();

/// Install the logger. Safe to call any number of times; only the first call
/// has an effect, and a logger installed by the host is left alone.
pub fn initialize() {
    INIT.call_once(|| {
        let _ = env_logger::try_init();
        log::info!("Initializing emmet-io");
    });
}
