use anyhow::{Result, bail};
use clap::Args;

pub const DEFAULT_DOCS_ENDPOINT: &str = "https://docs.googleapis.com/v1";

/// Connection settings shared by `serve` and the one-shot commands.
#[derive(Args, Clone, Debug)]
pub struct ConnectionArgs {
    /// OAuth access token with the Docs scope.
    #[arg(long, env = "GOOGLE_DOCS_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
    /// Base URL of the Docs REST API.
    #[arg(long, env = "GOOGLE_DOCS_ENDPOINT", default_value = DEFAULT_DOCS_ENDPOINT)]
    endpoint: String,
    /// Only expose tools that never modify documents.
    #[arg(long, env = "GDOCS_READ_ONLY")]
    read_only: bool,
}

/// Explicit per-instance configuration; nothing here is process-global.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub endpoint: String,
    pub access_token: String,
    pub read_only: bool,
}

impl ConnectionArgs {
    pub fn into_config(self) -> Result<ServerConfig> {
        let access_token = self.access_token.unwrap_or_default();
        if access_token.trim().is_empty() {
            bail!("an access token is required (--access-token or GOOGLE_DOCS_ACCESS_TOKEN)");
        }
        Ok(ServerConfig {
            endpoint: normalize_endpoint(&self.endpoint)?,
            access_token: access_token.trim().to_string(),
            read_only: self.read_only,
        })
    }
}

fn normalize_endpoint(endpoint: &str) -> Result<String> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        bail!("endpoint must not be empty");
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(token: Option<&str>, endpoint: &str) -> ConnectionArgs {
        ConnectionArgs {
            access_token: token.map(str::to_string),
            endpoint: endpoint.to_string(),
            read_only: true,
        }
    }

    #[test]
    fn endpoint_is_trimmed() {
        let config = args(Some(" tok "), " https://example.test/v1/ ")
            .into_config()
            .expect("config");
        assert_eq!(config.endpoint, "https://example.test/v1");
        assert_eq!(config.access_token, "tok");
        assert!(config.read_only);
    }

    #[test]
    fn missing_token_or_endpoint_is_rejected() {
        assert!(args(None, DEFAULT_DOCS_ENDPOINT).into_config().is_err());
        assert!(args(Some("  "), DEFAULT_DOCS_ENDPOINT).into_config().is_err());
        let err = args(Some("tok"), "   ").into_config().expect_err("empty endpoint");
        assert!(err.to_string().contains("endpoint must not be empty"));
    }
}
