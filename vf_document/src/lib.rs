pub mod content;
pub mod defaults;
pub mod document;
pub mod error;
pub mod mode;
pub mod schema;
pub mod wire;

pub use content::*;
pub use defaults::*;
pub use document::*;
pub use error::*;
pub use mode::*;
pub use schema::*;
pub use wire::*;

#[cfg(test)]
mod tests;
