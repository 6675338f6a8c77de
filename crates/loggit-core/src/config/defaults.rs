//! Default configuration values

use super::types::Config;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "loggit.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "loggit.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".loggit.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".loggit.toml",
    ]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# loggit configuration

repository:
  path: .
  reference: HEAD

filter:
  # limit: 50
  # start_tag: v1.0.0
  # end_tag: v0.9.0
  include: ".*"
  include_flags: ""
  # exclude: "^Merge "
  exclude_flags: ""

output:
  file: gitlog.xml
  # raw | digest | custom
  format: raw
  # template: changelog.tpl
"#;
