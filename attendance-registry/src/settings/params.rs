// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::Deserialize;
use tracing::error;

use crate::config::{Config, Logging, LoggingOutput, StoreSettings};

const TARGET_PARAMS: &str = "Attendance-Registry-Params";

#[derive(Debug, Deserialize, Default)]
pub struct Params {
    attendance: AttendanceParams,
}

impl Params {
    pub fn from_env() -> Self {
        Self {
            attendance: AttendanceParams::from_env("ATTENDANCE"),
        }
    }

    pub fn mix_config(&self, other_config: Params) -> Self {
        Self {
            attendance: self.attendance.mix_config(other_config.attendance),
        }
    }
}

impl From<Params> for Config {
    fn from(params: Params) -> Self {
        Self {
            store: StoreSettings {
                url: params.attendance.store.url,
                database: params.attendance.store.database,
                collection: params.attendance.store.collection,
                request_timeout_secs: params
                    .attendance
                    .store
                    .request_timeout_secs,
            },
            logging: Logging {
                output: LoggingOutput {
                    stdout: params.attendance.logging.output.contains("stdout"),
                    file: params.attendance.logging.output.contains("file"),
                },
                file_path: params.attendance.logging.file_path,
                level: params.attendance.logging.level,
            },
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct AttendanceParams {
    #[serde(default)]
    store: StoreParams,
    #[serde(default)]
    logging: LoggingParams,
}

impl AttendanceParams {
    fn from_env(parent: &str) -> Self {
        Self {
            store: StoreParams::from_env(&format!("{parent}_")),
            logging: LoggingParams::from_env(&format!("{parent}_")),
        }
    }

    fn mix_config(&self, other_config: AttendanceParams) -> Self {
        Self {
            store: self.store.mix_config(other_config.store),
            logging: self.logging.mix_config(other_config.logging),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
struct StoreParams {
    #[serde(default = "default_store_url")]
    url: String,
    #[serde(default = "default_store_database")]
    database: String,
    #[serde(default = "default_store_collection")]
    collection: String,
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

impl StoreParams {
    fn from_env(parent: &str) -> Self {
        let mut config = config::Config::builder();
        config = config.add_source(
            config::Environment::with_prefix(&format!("{parent}STORE"))
                .try_parsing(true),
        );

        let config = config
            .build()
            .map_err(|e| {
                error!(TARGET_PARAMS, "Error building config: {}", e);
            })
            .unwrap();

        config
            .try_deserialize()
            .map_err(|e| {
                error!(TARGET_PARAMS, "Error try deserialize config: {}", e);
            })
            .unwrap()
    }

    fn mix_config(&self, other_config: StoreParams) -> Self {
        let url = if other_config.url != default_store_url() {
            other_config.url
        } else {
            self.url.clone()
        };

        let database = if other_config.database != default_store_database() {
            other_config.database
        } else {
            self.database.clone()
        };

        let collection =
            if other_config.collection != default_store_collection() {
                other_config.collection
            } else {
                self.collection.clone()
            };

        let request_timeout_secs = if other_config.request_timeout_secs
            != default_request_timeout_secs()
        {
            other_config.request_timeout_secs
        } else {
            self.request_timeout_secs
        };

        Self {
            url,
            database,
            collection,
            request_timeout_secs,
        }
    }
}

impl Default for StoreParams {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            database: default_store_database(),
            collection: default_store_collection(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_store_url() -> String {
    "mongodb://localhost:27017".to_owned()
}

fn default_store_database() -> String {
    "attendanceSystem".to_owned()
}

fn default_store_collection() -> String {
    "subjects".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Deserialize, Clone)]
struct LoggingParams {
    #[serde(default = "default_log_output")]
    pub output: String, // "stdout(Docker)" | "file" | "stdout,file"
    #[serde(default = "default_log_file_path")]
    pub file_path: String,
    #[serde(default = "default_log_level")]
    pub level: String, // "info", "debug", …
}

fn default_log_output() -> String {
    "stdout".into()
}
fn default_log_file_path() -> String {
    "logs".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingParams {
    fn default() -> Self {
        LoggingParams {
            output: default_log_output(),
            file_path: default_log_file_path(),
            level: default_log_level(),
        }
    }
}

impl LoggingParams {
    fn from_env(parent: &str) -> Self {
        let mut cfg = config::Config::builder();
        cfg = cfg.add_source(
            config::Environment::with_prefix(&format!("{parent}LOGGING"))
                .try_parsing(true),
        );
        let built = cfg.build().unwrap();
        built.try_deserialize().unwrap_or_default()
    }

    fn mix_config(&self, other: LoggingParams) -> LoggingParams {
        LoggingParams {
            output: if other.output != default_log_output() {
                other.output
            } else {
                self.output.clone()
            },
            file_path: if other.file_path != default_log_file_path() {
                other.file_path
            } else {
                self.file_path.clone()
            },
            level: if other.level != default_log_level() {
                other.level
            } else {
                self.level.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_build_default_config() {
        let config = Config::from(Params::default());
        assert_eq!(config.store.url, "mongodb://localhost:27017");
        assert_eq!(config.store.database, "attendanceSystem");
        assert_eq!(config.store.collection, "subjects");
        assert_eq!(config.store.request_timeout_secs, 5);
        assert!(config.logging.output.stdout);
        assert!(!config.logging.output.file);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_file_params_override_env_params() {
        let env = Params {
            attendance: AttendanceParams {
                store: StoreParams {
                    url: "mongodb://env:27017".to_owned(),
                    ..Default::default()
                },
                logging: LoggingParams::default(),
            },
        };
        let file = Params {
            attendance: AttendanceParams {
                store: StoreParams {
                    url: "mongodb://file:27017".to_owned(),
                    database: "classes".to_owned(),
                    ..Default::default()
                },
                logging: LoggingParams {
                    level: "debug".to_owned(),
                    ..Default::default()
                },
            },
        };

        let config = Config::from(env.mix_config(file));
        assert_eq!(config.store.url, "mongodb://file:27017");
        assert_eq!(config.store.database, "classes");
        assert_eq!(config.store.collection, "subjects");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_combined_output_enables_both_sinks() {
        let params = Params {
            attendance: AttendanceParams {
                store: StoreParams::default(),
                logging: LoggingParams {
                    output: "stdout,file".to_owned(),
                    ..Default::default()
                },
            },
        };

        let config = Config::from(params);
        assert!(config.logging.output.stdout);
        assert!(config.logging.output.file);
    }
}
