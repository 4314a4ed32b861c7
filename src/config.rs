use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub seed_demo_data: bool,
    pub seed_job_count: usize,
    pub seed_candidate_count: usize,
    /// Probability in `[0, 1]` that a write request is rejected by the fault injector.
    pub simulated_failure_rate: f64,
    pub simulated_latency_min_ms: u64,
    pub simulated_latency_max_ms: u64,
    pub default_actor_id: String,
    pub default_actor_name: String,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            seed_demo_data: get_env_or("SEED_DEMO_DATA", true)?,
            seed_job_count: get_env_or("SEED_JOB_COUNT", 25)?,
            seed_candidate_count: get_env_or("SEED_CANDIDATE_COUNT", 1000)?,
            simulated_failure_rate: get_env_or("SIMULATED_FAILURE_RATE", 0.0)?,
            simulated_latency_min_ms: get_env_or("SIMULATED_LATENCY_MIN_MS", 0)?,
            simulated_latency_max_ms: get_env_or("SIMULATED_LATENCY_MAX_MS", 0)?,
            default_actor_id: env::var("DEFAULT_ACTOR_ID")
                .unwrap_or_else(|_| "current-user".to_string()),
            default_actor_name: env::var("DEFAULT_ACTOR_NAME")
                .unwrap_or_else(|_| "HR Manager".to_string()),
            log_json: get_env_or("LOG_JSON", false)?,
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.simulated_failure_rate) {
            return Err(Error::Config(format!(
                "SIMULATED_FAILURE_RATE must be within [0, 1], got {}",
                self.simulated_failure_rate
            )));
        }
        if self.simulated_latency_min_ms > self.simulated_latency_max_ms {
            return Err(Error::Config(
                "SIMULATED_LATENCY_MIN_MS must not exceed SIMULATED_LATENCY_MAX_MS".to_string(),
            ));
        }
        Ok(())
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
