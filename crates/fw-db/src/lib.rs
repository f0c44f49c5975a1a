pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::user_repository::{UserPage, UserRepository};

#[cfg(test)]
mod tests;
