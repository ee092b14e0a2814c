use super::requests_logging::RequestsLoggingLevel;

#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    pub port: u16,
    pub requests_logging_level: RequestsLoggingLevel,
    /// When set, the directory is served statically instead of the stats
    /// endpoint at `/`.
    pub frontend_dir_path: Option<String>,
}
