use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub qr: QrConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    /// Optional directory with page templates overriding the embedded ones
    pub template_dir: PathBuf,
}

/// Filesystem locations for generated artifacts and transient uploads
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Persistent directory holding every generated artifact, served under `/output`
    pub output_dir: PathBuf,
    /// Transient directory holding one spooled file per CSV upload
    pub upload_dir: PathBuf,
}

/// Rendering defaults applied when a request leaves a field empty
#[derive(Debug, Clone)]
pub struct QrConfig {
    pub default_width: u32,
    pub max_width: u32,
    pub default_dark: String,
    pub default_light: String,
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
            storage: StorageConfig::from_env()?,
            qr: QrConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB
    const DEFAULT_TEMPLATE_DIR: &'static str = "templates/pages";

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let template_dir = env::var("TEMPLATE_DIR")
            .unwrap_or_else(|_| Self::DEFAULT_TEMPLATE_DIR.to_string())
            .into();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
            template_dir,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    const DEFAULT_OUTPUT_DIR: &'static str = "output";
    const DEFAULT_UPLOAD_DIR: &'static str = "uploads";

    pub fn from_env() -> Result<Self, String> {
        let output_dir = env::var("OUTPUT_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_OUTPUT_DIR.to_string());

        let upload_dir = env::var("UPLOAD_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_UPLOAD_DIR.to_string());

        if output_dir == upload_dir {
            return Err("OUTPUT_DIR and UPLOAD_DIR must be different directories".to_string());
        }

        Ok(Self {
            output_dir: output_dir.into(),
            upload_dir: upload_dir.into(),
        })
    }
}

impl QrConfig {
    pub const DEFAULT_WIDTH: u32 = 300;
    pub const DEFAULT_MAX_WIDTH: u32 = 4096;
    pub const DEFAULT_DARK: &'static str = "#000000";
    pub const DEFAULT_LIGHT: &'static str = "#ffffff";

    pub fn from_env() -> Result<Self, String> {
        let default_width = env::var("QR_DEFAULT_WIDTH")
            .unwrap_or_else(|_| Self::DEFAULT_WIDTH.to_string())
            .parse::<u32>()
            .map_err(|_| "QR_DEFAULT_WIDTH must be a valid number".to_string())?;

        let max_width = env::var("QR_MAX_WIDTH")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_WIDTH.to_string())
            .parse::<u32>()
            .map_err(|_| "QR_MAX_WIDTH must be a valid number".to_string())?;

        if default_width == 0 || default_width > max_width {
            return Err(format!(
                "QR_DEFAULT_WIDTH must be between 1 and QR_MAX_WIDTH ({})",
                max_width
            ));
        }

        let default_dark =
            env::var("QR_DEFAULT_DARK").unwrap_or_else(|_| Self::DEFAULT_DARK.to_string());
        let default_light =
            env::var("QR_DEFAULT_LIGHT").unwrap_or_else(|_| Self::DEFAULT_LIGHT.to_string());

        Ok(Self {
            default_width,
            max_width,
            default_dark,
            default_light,
        })
    }
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            default_width: Self::DEFAULT_WIDTH,
            max_width: Self::DEFAULT_MAX_WIDTH,
            default_dark: Self::DEFAULT_DARK.to_string(),
            default_light: Self::DEFAULT_LIGHT.to_string(),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "QR Generator API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Generate QR code images from CSV files or forms".to_string());

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
