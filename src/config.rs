use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the CSV movie catalog
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Separator between genre names inside the `genre` column
    #[serde(default = "default_genre_delimiter")]
    pub genre_delimiter: String,

    /// Number of recommendations returned when the caller omits `n`
    #[serde(default = "default_results")]
    pub default_results: usize,

    /// Upper bound on the number of recommendations per request
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_path() -> String {
    "data/movies.csv".to_string()
}

fn default_genre_delimiter() -> String {
    ",".to_string()
}

fn default_results() -> usize {
    5
}

fn default_max_results() -> usize {
    50
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            genre_delimiter: default_genre_delimiter(),
            default_results: default_results(),
            max_results: default_max_results(),
            host: default_host(),
            port: default_port(),
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

    /// The genre delimiter as a single character
    pub fn genre_delimiter(&self) -> anyhow::Result<char> {
        let mut chars = self.genre_delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(anyhow::anyhow!(
                "GENRE_DELIMITER must be exactly one character, got {:?}",
                self.genre_delimiter
            )),
        }
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.genre_delimiter()?;
        if self.default_results > self.max_results {
            anyhow::bail!(
                "DEFAULT_RESULTS ({}) must not exceed MAX_RESULTS ({})",
                self.default_results,
                self.max_results
            );
        }
        Ok(())
    }
}
