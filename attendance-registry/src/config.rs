// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Document store connection settings.
    pub store: StoreSettings,
    /// Logging parameters.
    pub logging: Logging,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StoreSettings {
    /// Connection string of the document store.
    pub url: String,
    /// Database holding the subjects collection.
    pub database: String,
    /// Collection holding the subject records.
    pub collection: String,
    /// Seconds before an operation against an unreachable store fails.
    pub request_timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Logging {
    /// Enabled log outputs.
    pub output: LoggingOutput,
    /// Directory for the log file output.
    pub file_path: String,
    /// Default level when RUST_LOG is not set.
    pub level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoggingOutput {
    pub stdout: bool,
    pub file: bool,
}
