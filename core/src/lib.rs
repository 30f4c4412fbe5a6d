pub mod config;
pub mod filesystem;
pub mod locator;
pub mod ops;
pub mod traits;
pub mod tree;
pub mod watch;

pub use config::Config;
pub use filesystem::{LocalFileSystem, create_filesystem};
pub use locator::{ConfigKind, ConfigLocator, ConfigPresence, Scope};
pub use ops::{EntryKind, EntryOps};
pub use traits::*;
pub use tree::{Action, Badge, ConfigTree, ExpandState, NodeId, NodeKind, TreeNode, TreeSnapshot};
pub use watch::{RefreshFilter, RefreshRequest, RefreshWatcher};
