mod command;
mod password;
mod query;
pub(crate) mod repository;
mod token;
pub mod validate;

pub use command::*;
pub use query::*;
pub use token::{Claims, TokenSigner};
