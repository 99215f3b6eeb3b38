/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | HTTP_HOST | 0.0.0.0 | Bind address |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_URL | sqlite://wahana.db?mode=rwc | SQLite database |
/// | GATEWAY_API_URL | https://api.xendit.co | Hosted payment gateway base URL |
/// | GATEWAY_SECRET_KEY | (unset) | Gateway secret key; gateway disabled when missing |
/// | PUBLIC_BASE_URL | http://localhost:3000 | Base for gateway redirect URLs |
/// | ENVIRONMENT | development | development \| staging \| production |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_host: String,
    pub http_port: u16,
    pub database_url: String,
    pub gateway_api_url: String,
    /// Secret key for the hosted payment gateway; `None` disables it
    pub gateway_secret_key: Option<String>,
    /// Public base URL used for gateway success/failure redirects
    pub public_base_url: String,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, using defaults for
    /// anything unset
    pub fn from_env() -> Self {
        Self {
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://wahana.db?mode=rwc".into()),
            gateway_api_url: std::env::var("GATEWAY_API_URL")
                .unwrap_or_else(|_| "https://api.xendit.co".into()),
            gateway_secret_key: std::env::var("GATEWAY_SECRET_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
