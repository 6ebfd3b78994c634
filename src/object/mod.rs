pub mod blob;
pub mod commit;
pub mod store;

pub use blob::{blob_exists, read_blob, write_blob};
pub use commit::{commit_exists, read_commit, write_commit};
pub use store::{list_objects, object_path};
