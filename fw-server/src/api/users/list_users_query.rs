use serde::Deserialize;

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// Filter by KYC status; omitted = all users
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}
