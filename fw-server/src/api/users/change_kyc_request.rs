use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChangeKycRequest {
    /// Requested KYC status; must be a permitted transition from the
    /// user's current status
    pub status: String,
}
