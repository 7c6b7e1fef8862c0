// crates/nostrust-cli/src/config.rs
//
// Configuration for the nostrust binary.
// Loaded from a TOML file or populated with the reference defaults.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use nostrust_core::EngineConfig;

/// Where the config file is looked for when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "~/.nostrust/config.toml";

/// Runtime configuration for one invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Relay websocket URL.
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Seed used when `--npub` is not given.
    #[serde(default = "default_npub")]
    pub default_npub: String,

    /// Keys reported separately in benchmark mode.
    #[serde(default = "default_benchmark_npubs")]
    pub benchmark_npubs: Vec<String>,

    /// Bound on one social graph lookup, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Bound on one profile lookup, in seconds.
    #[serde(default = "default_name_timeout_secs")]
    pub name_timeout_secs: u64,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Scoring parameters.
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_relay_url() -> String {
    "ws://127.0.0.1:7777".to_string()
}

fn default_npub() -> String {
    "npub1zc4r69x9nxg7h0qcs705k6c5yt7xaydtjrlsthk99vmgg2t2xgssd7mdde".to_string()
}

fn default_benchmark_npubs() -> Vec<String> {
    [
        "npub1sn0wdenkukak0d9dfczzeacvhkrgz92ak56egt7vdgzn8pv2wfqqhrjdv9",
        "npub1xtscya34g58tk0z605fvr788k263gsu6cy9x0mhnm87echrgufzsevkk5s",
        "npub1wmr34t36fy03m8hvgl96zl3znndyzyaqhwmwdtshwmtkg03fetaqhjg240",
        "npub1tjkc9jycaenqzdc3j3wkslmaj4ylv3dqzxzx0khz7h38f3vc6mls4ys9w3",
        "npub14tq8m9ggnnn2muytj9tdg0q6f26ef3snpd7ukyhvrxgq33vpnghs8shy62",
        "npub1psjwxg6j9re7u5mf6j52gm4f9u50r2pexm0xrtrtgqpagq6y6s3qhfa504",
        "npub1zfwrn5gnl9gml2lnr8kmarqdsd9yle7l5rvv84prz0ghjq8nerrs73sl0t",
        "npub1y0gvydcezdjkg6r3gnudhx8ttjzgvsn5sw0um7ucrdrphapwzn5qy68zn4",
        "npub14rj7arqrd5dwu927p4wm4m85lwma8c8ccupxxrkzy6hpj6glcw9qmse63g",
        "npub16g0r66400k8j3d5c7v9ucjr6vd4xg3nhzknrxvnvh72gg2w39kksfmqpk7",
        "npub14ah9dgcedd4xza3dzpvg3urjq8qy2jr6xecz3w4y006kqjcygplq9xgrvk",
        "npub19qharf5037zxxp8dgws7ukcxqjvxt9vq3rf3gqye94ga85jmu2dsvyy3ww",
        "npub1guux40z0lnx7zmwcts7qshnf2emx4rsd2e5sncj23h75s7meg7xsj9vsy9",
        "npub1wgdxae2recdf3h4ss9w9cdn7dse4hvfckjh2pw3kwxwd5x5e8kdqqaxhkm",
        "npub14jmwlyhcl7ac93p96y67rw8vrz96p46d7f6venpscyfsczahqx2s6xxwm3",
        "npub1sckm8y5d4a6p73zjhu7thhsjmzfetyuvdx2ch0lr3h8wwnx4z97qujqktv",
        "npub1tkd09vxhv687dgevp50usmkrlkdquc8nceq6qusumf93ggfytqaqxzujpk",
        "npub1e537pwwunau3wxzh8ed6k6wevly53afq6km3g723kcesgkd4fdds2ahq3m",
        "npub1049yaplj3c8rtqw542frf9xlkka59z4a4ssdk72kpc4aajznhw5q8ra7md",
        "npub15d9enu3v0yxyud4jk0pvxk3kmvrzymjpc6f0eq4ck44vr32qck7smrxq6k",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_name_timeout_secs() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            default_npub: default_npub(),
            benchmark_npubs: default_benchmark_npubs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            name_timeout_secs: default_name_timeout_secs(),
            log_level: default_log_level(),
            engine: EngineConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_home(path))?;
        let config: CliConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn name_timeout(&self) -> Duration {
        Duration::from_secs(self.name_timeout_secs)
    }
}

/// Resolve a leading `~/` against the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
