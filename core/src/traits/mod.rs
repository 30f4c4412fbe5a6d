pub mod filesystem;

pub use filesystem::{DirEntryInfo, EntryType, FileSystem};
