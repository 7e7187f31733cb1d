use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickHouseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobBackend {
    Memory,
    Filesystem { root: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentBackend {
    Memory,
    ClickHouse(ClickHouseSettings),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub http_port: u16,
    pub catalog_endpoint: String,
    /// Name handed to the secret resolver to obtain the catalog API key.
    pub catalog_secret_name: String,
    /// `None` keeps the HTTP client's default.
    pub catalog_timeout: Option<Duration>,
    pub movie_bucket: String,
    pub movie_table: String,
    pub blob_public_domain: String,
    pub blob_backend: BlobBackend,
    pub document_backend: DocumentBackend,
    /// Run ensure-bucket / ensure-table once at start-up.
    pub provision_on_startup: bool,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_port(self.http_port)?;
        validate_non_empty("CATALOG_ENDPOINT", &self.catalog_endpoint)?;
        validate_non_empty("CATALOG_SECRET_NAME", &self.catalog_secret_name)?;
        validate_non_empty("MOVIE_BUCKET", &self.movie_bucket)?;
        validate_non_empty("MOVIE_TABLE", &self.movie_table)?;
        validate_non_empty("BLOB_PUBLIC_DOMAIN", &self.blob_public_domain)?;
        if let DocumentBackend::ClickHouse(ch) = &self.document_backend {
            validate_non_empty("APP_CLICKHOUSE_HOST", &ch.host)?;
            validate_port(ch.port)?;
        }
        Ok(())
    }
}

fn validate_non_empty(name: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Config(format!("{name} cannot be empty")));
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), ServiceError> {
    if port == 0 {
        return Err(ServiceError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

/// Read a value from environment variable, with support for _FILE suffix (Docker Secrets)
fn get_env_or_file(
    lookup: &impl Fn(&str) -> Option<String>,
    env_name: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let file_env = format!("{env_name}_FILE");
    if let Some(file_path) = lookup(&file_env) {
        return match fs::read_to_string(&file_path) {
            Ok(content) => Ok(content.trim().to_string()),
            Err(e) => Err(format!("Failed to read {file_env}: {e}").into()),
        };
    }

    lookup(env_name).ok_or_else(|| {
        format!("Missing required environment variable: {env_name} or {file_env}").into()
    })
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    lookup(name).ok_or_else(|| format!("Missing required environment variable: {name}").into())
}

fn or_default(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    lookup(name).unwrap_or_else(|| default.to_string())
}

fn parse_bool(value: &str) -> Result<bool, Box<dyn std::error::Error>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("invalid boolean: {other}").into()),
    }
}

pub fn get_configuration() -> Result<Settings, Box<dyn std::error::Error>> {
    configuration_from(|name| env::var(name).ok())
}

/// Build settings from an arbitrary variable source. `get_configuration`
/// passes the process environment.
pub fn configuration_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, Box<dyn std::error::Error>> {
    let http_port = or_default(&lookup, "HTTP_PORT", "9700").parse::<u16>()?;

    let catalog_endpoint = or_default(&lookup, "CATALOG_ENDPOINT", "http://www.omdbapi.com/");
    let catalog_secret_name = or_default(&lookup, "CATALOG_SECRET_NAME", "OMDbAPIKey");
    let catalog_timeout = lookup("CATALOG_TIMEOUT_MS")
        .map(|ms| ms.parse::<u64>().map(Duration::from_millis))
        .transpose()?;

    let movie_bucket = or_default(&lookup, "MOVIE_BUCKET", "movie-api.bucket-1");
    let movie_table = or_default(&lookup, "MOVIE_TABLE", "movie2-api-table-1");
    let blob_public_domain = or_default(&lookup, "BLOB_PUBLIC_DOMAIN", "s3.amazonaws.com");

    let blob_backend = match or_default(&lookup, "BLOB_STORE_BACKEND", "memory").as_str() {
        "memory" => BlobBackend::Memory,
        "filesystem" => BlobBackend::Filesystem {
            root: PathBuf::from(or_default(&lookup, "BLOB_STORE_ROOT", "./data/blobs")),
        },
        other => return Err(format!("unknown BLOB_STORE_BACKEND: {other}").into()),
    };

    let document_backend = match or_default(&lookup, "DOCUMENT_STORE_BACKEND", "memory").as_str()
    {
        "memory" => DocumentBackend::Memory,
        "clickhouse" => DocumentBackend::ClickHouse(ClickHouseSettings {
            host: required(&lookup, "APP_CLICKHOUSE_HOST")?,
            port: required(&lookup, "APP_CLICKHOUSE_PORT")?.parse::<u16>()?,
            user: required(&lookup, "APP_CLICKHOUSE_USER")?,
            password: get_env_or_file(&lookup, "APP_CLICKHOUSE_PASSWORD")?,
            database: required(&lookup, "APP_CLICKHOUSE_DATABASE")?,
        }),
        other => return Err(format!("unknown DOCUMENT_STORE_BACKEND: {other}").into()),
    };

    let provision_on_startup = parse_bool(&or_default(&lookup, "PROVISION_ON_STARTUP", "true"))?;

    let settings = Settings {
        http_port,
        catalog_endpoint,
        catalog_secret_name,
        catalog_timeout,
        movie_bucket,
        movie_table,
        blob_public_domain,
        blob_backend,
        document_backend,
        provision_on_startup,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}
