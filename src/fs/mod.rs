pub mod read;
pub mod write;

pub use read::{list_plain_files, read_file_if_exists};
pub use write::{atomic_write, fsync_dir, remove_file_if_exists, write_file};
