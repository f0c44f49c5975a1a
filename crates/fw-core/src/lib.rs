pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::kyc_status::KycStatus;
pub use models::user::{User, normalize_email};

#[cfg(test)]
mod tests;
