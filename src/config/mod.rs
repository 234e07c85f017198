use crate::utils::error::{Result, UploadError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use std::env;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_MEDIA_API_BASE: &str = "https://api.cloudinary.com";

/// Settings for the repository content gateway. The three secrets are
/// required and must never be echoed back to callers; the remaining fields
/// default to the public endpoints and the `main` branch.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub api_base: String,
    pub raw_base: String,
    pub branch: String,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            token: require(&get, "GITHUB_TOKEN")?,
            owner: require(&get, "GITHUB_USERNAME")?,
            repo: require(&get, "GITHUB_REPO")?,
            api_base: get("GITHUB_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            raw_base: get("GITHUB_RAW_BASE").unwrap_or_else(|| DEFAULT_RAW_BASE.to_string()),
            branch: get("GITHUB_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        })
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("token", &self.token)?;
        validate_non_empty_string("owner", &self.owner)?;
        validate_non_empty_string("repo", &self.repo)?;
        validate_non_empty_string("branch", &self.branch)?;
        validate_url("api_base", &self.api_base)?;
        validate_url("raw_base", &self.raw_base)?;
        Ok(())
    }
}

/// Settings for the media host client. Upload authorization is
/// preset-based, so both fields are identifiers rather than secrets, but
/// they are still injected instead of baked into source.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub api_base: String,
}

impl MediaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            cloud_name: require(&get, "CLOUDINARY_CLOUD_NAME")?,
            upload_preset: require(&get, "CLOUDINARY_UPLOAD_PRESET")?,
            api_base: get("CLOUDINARY_API_BASE")
                .unwrap_or_else(|| DEFAULT_MEDIA_API_BASE.to_string()),
        })
    }
}

impl Validate for MediaConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("cloud_name", &self.cloud_name)?;
        validate_non_empty_string("upload_preset", &self.upload_preset)?;
        validate_url("api_base", &self.api_base)?;
        Ok(())
    }
}

fn require<F>(get: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| UploadError::MissingConfig {
            field: name.to_string(),
        })
}
