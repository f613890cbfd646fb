use thiserror::Error;

pub const PRODUCTION_API_URL: &str = "https://www.pesapal.com/api";
pub const SANDBOX_API_URL: &str = "https://demo.pesapal.com/api";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Gateway configuration, read once at process start and read-only after.
///
/// Consumer credentials must come from the environment; there is no
/// compiled-in fallback for them. Non-secret fields fall back to defaults.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub api_url: String,
    pub callback_url: String,
    pub ipn_url: String,
    pub use_sandbox: bool,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let consumer_key = get("PESAPAL_CONSUMER_KEY")
            .ok_or(ConfigError::MissingVar("PESAPAL_CONSUMER_KEY"))?;
        let consumer_secret = get("PESAPAL_CONSUMER_SECRET")
            .ok_or(ConfigError::MissingVar("PESAPAL_CONSUMER_SECRET"))?;
        let use_sandbox = get("PESAPAL_USE_SANDBOX")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let default_api_url = if use_sandbox {
            SANDBOX_API_URL
        } else {
            PRODUCTION_API_URL
        };

        Ok(Self {
            consumer_key,
            consumer_secret,
            api_url: get("PESAPAL_API_URL").unwrap_or_else(|| default_api_url.to_string()),
            callback_url: get("PESAPAL_CALLBACK_URL").unwrap_or_else(|| {
                "https://vertex-trading.vercel.app/api/payments/callback".to_string()
            }),
            ipn_url: get("PESAPAL_IPN_URL")
                .unwrap_or_else(|| "https://vertex-trading.vercel.app/api/payments/ipn".to_string()),
            use_sandbox,
        })
    }
}
