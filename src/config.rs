use std::path::PathBuf;

/// Runtime settings, read from `WORKROOM_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    /// Name reported by the health check.
    pub service_name: String,
    pub rooms_dir: PathBuf,
    pub work_room_config: PathBuf,
    /// Room shown at `/game`.
    pub default_room: String,
    pub assets_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            database_url: "sqlite::memory:".to_string(),
            service_name: "workroom".to_string(),
            rooms_dir: PathBuf::from("rooms"),
            work_room_config: PathBuf::from("config/work_room.json"),
            default_room: "work".to_string(),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// unset or blank values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            bind_addr: get("WORKROOM_BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: get("WORKROOM_DATABASE_URL").unwrap_or(defaults.database_url),
            service_name: get("WORKROOM_SERVICE_NAME").unwrap_or(defaults.service_name),
            rooms_dir: get("WORKROOM_ROOMS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.rooms_dir),
            work_room_config: get("WORKROOM_WORK_ROOM_CONFIG")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_room_config),
            default_room: get("WORKROOM_DEFAULT_ROOM").unwrap_or(defaults.default_room),
            assets_dir: get("WORKROOM_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.service_name, "workroom");
        assert_eq!(config.default_room, "work");
        assert_eq!(config.rooms_dir, PathBuf::from("rooms"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let vars = HashMap::from([
            ("WORKROOM_SERVICE_NAME", "office"),
            ("WORKROOM_DATABASE_URL", "sqlite://office.db"),
            ("WORKROOM_ROOMS_DIR", "/srv/rooms"),
            ("WORKROOM_DEFAULT_ROOM", "   "),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.service_name, "office");
        assert_eq!(config.database_url, "sqlite://office.db");
        assert_eq!(config.rooms_dir, PathBuf::from("/srv/rooms"));
        // blank values fall back
        assert_eq!(config.default_room, "work");
    }
}
