pub mod drafts;
pub mod store;

pub use drafts::*;
pub use store::*;
