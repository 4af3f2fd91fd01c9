use anyhow::Context;

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint (MinIO, localstack). `None` means the AWS default for `region`.
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub public_base_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub s3: S3Config,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 10);
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_or("APP_PORT", 8080);

        let bucket = std::env::var("S3_BUCKET").context("S3_BUCKET is not set")?;
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".into());
        let endpoint = non_empty_var("S3_ENDPOINT");
        let public_base_url = non_empty_var("S3_PUBLIC_BASE_URL")
            .unwrap_or_else(|| default_public_base_url(&bucket, &region, endpoint.as_deref()));

        let s3 = S3Config {
            access_key: non_empty_var("AWS_ACCESS_KEY_ID"),
            secret_key: non_empty_var("AWS_SECRET_ACCESS_KEY"),
            bucket,
            region,
            endpoint,
            public_base_url,
        };

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            s3,
        })
    }
}

/// Virtual-hosted style URL on AWS, path style on a custom endpoint.
pub fn default_public_base_url(bucket: &str, region: &str, endpoint: Option<&str>) -> String {
    match endpoint {
        Some(ep) => format!("{}/{}", ep.trim_end_matches('/'), bucket),
        None => format!("https://{bucket}.s3.{region}.amazonaws.com"),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
