use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML + 环境变量加载，启动时使用）
///
/// 包含：
/// - server: 监听地址、端口、worker 数量
/// - database: 数据库连接配置
/// - logging: 日志配置
/// - admin: 管理端 Basic 认证凭据
/// - public: 对外访问的 base URL（用于生成二维码内容）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub public: PublicConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：旧版环境变量 > QRL 前缀环境变量 > config.toml > 默认值
    /// ENV 前缀：QRL，分隔符：__
    /// 示例：QRL__SERVER__PORT=9999
    ///
    /// 旧版变量：BASE_URL、ADMIN_USER、ADMIN_PASS、PORT、DATABASE_URL
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 QRL，分隔符 __
            .add_source(
                Environment::with_prefix("QRL")
                    .separator("__")
                    .try_parsing(true),
            );

        // 3. 兼容旧部署使用的裸环境变量
        let builder = Self::LEGACY_ENV
            .iter()
            .try_fold(builder, |builder, (var, key)| {
                builder.set_override_option(*key, std::env::var(var).ok())
            });

        let builder = match builder {
            Ok(builder) => builder,
            Err(e) => {
                eprintln!("[ERROR] Failed to apply legacy env overrides: {}", e);
                return Self::default();
            }
        };

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    const LEGACY_ENV: [(&'static str, &'static str); 5] = [
        ("BASE_URL", "public.base_url"),
        ("ADMIN_USER", "admin.username"),
        ("ADMIN_PASS", "admin.password"),
        ("PORT", "server.port"),
        ("DATABASE_URL", "database.database_url"),
    ];

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 去掉末尾 `/` 的 base URL
    pub fn base_url(&self) -> &str {
        self.public.base_url.trim_end_matches('/')
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default)]
    pub enable_rotation: bool,
}

/// 管理端认证配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_admin_realm")]
    pub realm: String,
}

/// 对外访问配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://qrlinker.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_admin_realm() -> String {
    "Admin Area".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: false,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            realm: default_admin_realm(),
        }
    }
}

impl Default for PublicConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}
