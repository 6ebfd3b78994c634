mod commit;
mod object;

pub use commit::Commit;
pub use object::Object;
