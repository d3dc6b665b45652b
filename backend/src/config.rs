use clap::Parser;
use std::path::PathBuf;

/// Server configuration. Every option can also be set through its environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "helper-server", about = "Report templates, reports and document export")]
pub struct Config {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "HELPER_HOST")]
    pub host: String,

    #[arg(long, default_value_t = 8080, env = "HELPER_PORT")]
    pub port: u16,

    /// SQLite database file
    #[arg(long, default_value = "helper.sqlite", env = "HELPER_DATABASE")]
    pub database: PathBuf,

    /// Directory uploaded template and report files are stored under
    #[arg(long, default_value = "./media", env = "HELPER_MEDIA_ROOT")]
    pub media_root: PathBuf,

    /// Directory holding the TTF families used for PDF output
    #[arg(long, default_value = "./fonts", env = "HELPER_FONTS_DIR")]
    pub fonts_dir: PathBuf,

    /// Organization the permissions are evaluated in
    #[arg(long, default_value_t = 1, env = "HELPER_ORG_ID")]
    pub org_id: i64,

    /// Application name the permissions are evaluated for
    #[arg(long, default_value = "Backend", env = "HELPER_APP_NAME")]
    pub app_name: String,

    #[arg(long, default_value = "en", env = "HELPER_LANGUAGE")]
    pub default_language: String,

    /// Maximum size in bytes of one multipart request
    #[arg(long, default_value_t = 32 * 1024 * 1024, env = "HELPER_UPLOAD_LIMIT")]
    pub upload_limit: usize,

    /// Account that receives every Helper permission at startup
    #[arg(long, env = "HELPER_ADMIN_ACCOUNT")]
    pub admin_account: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["helper-server"]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.app_name, "Backend");
        assert_eq!(config.upload_limit, 32 * 1024 * 1024);
        assert!(config.admin_account.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::parse_from([
            "helper-server",
            "--port",
            "9000",
            "--database",
            "/tmp/h.sqlite",
            "--admin-account",
            "1",
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.database, PathBuf::from("/tmp/h.sqlite"));
        assert_eq!(config.admin_account, Some(1));
    }
}
