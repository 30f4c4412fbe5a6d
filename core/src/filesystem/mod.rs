pub mod local;

pub use local::LocalFileSystem;

use crate::traits::FileSystem;
use std::sync::Arc;

pub fn create_filesystem() -> Arc<dyn FileSystem> {
    Arc::new(LocalFileSystem::new())
}
