use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the transaction rows; takes precedence over `database_url`
    #[serde(default)]
    pub dataset_path: Option<String>,

    /// PostgreSQL database connection URL
    #[serde(default)]
    pub database_url: Option<String>,

    /// Product lines dropped while cleaning (comma separated in the environment)
    #[serde(default = "default_excluded_product_lines")]
    pub excluded_product_lines: Vec<String>,

    /// Radius used when a request does not carry one
    #[serde(default = "default_radius_meters")]
    pub default_radius_meters: f64,

    #[serde(default = "default_min_radius_meters")]
    pub min_radius_meters: f64,

    #[serde(default = "default_max_radius_meters")]
    pub max_radius_meters: f64,

    /// Number of recommendations returned when a request does not ask for a count
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_excluded_product_lines() -> Vec<String> {
    vec![
        "BONIFICACION N/C 72".to_string(),
        "BONIFICACION 77".to_string(),
    ]
}

fn default_radius_meters() -> f64 {
    30_000.0
}

fn default_min_radius_meters() -> f64 {
    1_000.0
}

fn default_max_radius_meters() -> f64 {
    50_000.0
}

fn default_top_n() -> usize {
    5
}

fn default_max_top_n() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dataset_path: None,
            database_url: None,
            excluded_product_lines: default_excluded_product_lines(),
            default_radius_meters: default_radius_meters(),
            min_radius_meters: default_min_radius_meters(),
            max_radius_meters: default_max_radius_meters(),
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the radius and top N bounds are consistent
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.min_radius_meters >= 0.0 && self.min_radius_meters <= self.max_radius_meters) {
            anyhow::bail!(
                "MIN_RADIUS_METERS ({}) must be non-negative and not exceed MAX_RADIUS_METERS ({})",
                self.min_radius_meters,
                self.max_radius_meters
            );
        }

        if !(self.min_radius_meters..=self.max_radius_meters).contains(&self.default_radius_meters)
        {
            anyhow::bail!(
                "DEFAULT_RADIUS_METERS ({}) must lie within [{}, {}]",
                self.default_radius_meters,
                self.min_radius_meters,
                self.max_radius_meters
            );
        }

        if self.default_top_n == 0 || self.default_top_n > self.max_top_n {
            anyhow::bail!(
                "DEFAULT_TOP_N ({}) must lie within [1, {}]",
                self.default_top_n,
                self.max_top_n
            );
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
