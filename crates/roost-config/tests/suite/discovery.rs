use std::ffi::OsString;

use pretty_assertions::assert_eq;
use roost_config::{
    discover_config_path, load_for_workspace, with_config_env_lock, RoostConfig,
    ROOST_CONFIG_ENV_VAR,
};
use tempfile::tempdir;

struct EnvVarGuard {
    key: &'static str,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: impl Into<OsString>) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value.into());
        Self { key, prev }
    }

    fn unset(key: &'static str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn missing_config_falls_back_to_defaults() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(ROOST_CONFIG_ENV_VAR);
        let dir = tempdir().unwrap();

        let (config, path) = load_for_workspace(dir.path()).unwrap();
        assert_eq!(config, RoostConfig::default());
        assert_eq!(path, None);
    });
}

#[test]
fn roost_toml_wins_over_dotfile() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(ROOST_CONFIG_ENV_VAR);
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(".roost.toml"), "[finder]\ndepth = 3\n").unwrap();
        std::fs::write(dir.path().join("roost.toml"), "[finder]\ndepth = 2\n").unwrap();

        let (config, path) = load_for_workspace(dir.path()).unwrap();
        assert_eq!(config.finder.depth, 2);
        assert_eq!(
            path.unwrap(),
            dir.path().join("roost.toml").canonicalize().unwrap()
        );
    });
}

#[test]
fn dotfile_is_used_when_alone() {
    with_config_env_lock(|| {
        let _env = EnvVarGuard::unset(ROOST_CONFIG_ENV_VAR);
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(".roost.toml"), "[finder]\nalias = \"e\"\n").unwrap();

        let (config, _) = load_for_workspace(dir.path()).unwrap();
        assert_eq!(config.finder.alias, "e");
    });
}

#[test]
fn env_var_overrides_discovery_relative_to_root() {
    with_config_env_lock(|| {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("conf")).unwrap();
        std::fs::write(dir.path().join("roost.toml"), "[finder]\ndepth = 2\n").unwrap();
        std::fs::write(
            dir.path().join("conf/custom.toml"),
            "[finder]\ncount_queries = false\n",
        )
        .unwrap();
        let _env = EnvVarGuard::set(ROOST_CONFIG_ENV_VAR, "conf/custom.toml");

        let path = discover_config_path(dir.path()).unwrap();
        assert_eq!(
            path,
            dir.path().join("conf/custom.toml").canonicalize().unwrap()
        );
        let (config, _) = load_for_workspace(dir.path()).unwrap();
        assert!(!config.finder.count_queries);
        assert_eq!(config.finder.depth, 1);
    });
}

#[test]
fn unreadable_env_path_is_an_io_error() {
    with_config_env_lock(|| {
        let dir = tempdir().unwrap();
        let _env = EnvVarGuard::set(ROOST_CONFIG_ENV_VAR, dir.path().join("missing.toml"));

        let err = load_for_workspace(dir.path()).unwrap_err();
        assert!(
            matches!(err, roost_config::ConfigError::Io { .. }),
            "{err:?}"
        );
    });
}

#[test]
fn diagnostics_are_read_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roost.toml");
    std::fs::write(&path, "[finder]\ndepth = 0\nexclude = [\"\"]\n").unwrap();

    let (_, diagnostics) = RoostConfig::load_from_path_with_diagnostics(&path).unwrap();
    let paths: Vec<_> = diagnostics
        .warnings
        .iter()
        .map(|w| w.toml_path().to_owned())
        .collect();
    assert_eq!(paths, vec!["finder.depth", "finder.exclude[0]"]);
    assert!(diagnostics.unknown_keys.is_empty());
}
