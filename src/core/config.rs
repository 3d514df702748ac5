use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Upper bound for a single uploaded vlog, in bytes
    pub max_vlog_size: usize,
}

/// MongoDB connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    /// GridFS bucket that holds vlog payloads
    pub gridfs_bucket: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout: Duration,
    pub server_selection_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_VLOG_SIZE: usize = 100 * 1024 * 1024; // 100MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let max_vlog_size = env::var("MAX_VLOG_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_VLOG_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_VLOG_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_vlog_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_GRIDFS_BUCKET: &'static str = "vlogs";
    const DEFAULT_MAX_POOL_SIZE: u32 = 10;
    const DEFAULT_MIN_POOL_SIZE: u32 = 0;
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_SERVER_SELECTION_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let uri = required_var("MONGODB_URI")?;
        let name = required_var("DB_NAME")?;

        let gridfs_bucket =
            env::var("GRIDFS_BUCKET").unwrap_or_else(|_| Self::DEFAULT_GRIDFS_BUCKET.to_string());

        let max_pool_size = env::var("DB_MAX_POOL_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_POOL_SIZE.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_POOL_SIZE must be a valid number".to_string())?;

        let min_pool_size = env::var("DB_MIN_POOL_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_POOL_SIZE.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_POOL_SIZE must be a valid number".to_string())?;

        let connect_timeout_secs = env::var("DB_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CONNECT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_CONNECT_TIMEOUT_SECS must be a valid number".to_string())?;

        let server_selection_timeout_secs = env::var("DB_SERVER_SELECTION_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SERVER_SELECTION_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_SERVER_SELECTION_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            uri,
            name,
            gridfs_bucket,
            max_pool_size,
            min_pool_size,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            server_selection_timeout: Duration::from_secs(server_selection_timeout_secs),
        })
    }

    /// Connection string with credentials masked, safe for logs
    pub fn redacted_uri(&self) -> String {
        match self.uri.split_once("://") {
            Some((scheme, rest)) => match rest.rsplit_once('@') {
                Some((_, host)) => format!("{}://***@{}", scheme, host),
                None => self.uri.clone(),
            },
            None => "***".to_string(),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "EmoGo Backend API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Ingestion and export API for the EmoGo app".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

fn required_var(key: &str) -> Result<String, String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| format!("{} environment variable is required", key))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
