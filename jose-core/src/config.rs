//! Configuration for JOSE Core
//!
//! The algorithm functions themselves only enforce what the algorithms need
//! to be correct. Recommended minimums (PBES2 iteration counts, RSA modulus
//! sizes, HMAC key lengths) are policies that belong to the caller, and
//! `JoseConfig` is where a caller keeps them.

use crate::error::{Error, Result};
use crate::jwa::{HashAlgorithm, KeyManagementAlgorithm};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Caller-side policy for the JOSE algorithm suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoseConfig {
    /// Minimum accepted PBKDF2 iteration count
    pub pbes2_min_iterations: u32,

    /// Maximum accepted PBKDF2 iteration count.
    /// Bounds the work an attacker-chosen `p2c` header can demand.
    pub pbes2_max_iterations: u32,

    /// Minimum length of the random PBES2 salt input in bytes
    pub pbes2_min_salt_len: usize,

    /// Minimum RSA modulus size in bits
    pub min_rsa_modulus_bits: usize,

    /// Accept legacy RSAES-PKCS1-v1_5 key encryption
    pub allow_rsa1_5: bool,

    /// Require HMAC keys to be at least as long as the hash output
    pub enforce_hmac_key_len: bool,
}

impl Default for JoseConfig {
    fn default() -> Self {
        Self {
            pbes2_min_iterations: 1000,
            pbes2_max_iterations: 1_000_000,
            pbes2_min_salt_len: 8,
            min_rsa_modulus_bits: 2048,
            allow_rsa1_5: false,
            enforce_hmac_key_len: true,
        }
    }
}

impl JoseConfig {
    /// Creates a configuration with the recommended defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads overrides from `JOSE_*` environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("JOSE_PBES2_MIN_ITERATIONS") {
            config.pbes2_min_iterations = parse_var("JOSE_PBES2_MIN_ITERATIONS", &value)?;
        }
        if let Some(value) = lookup("JOSE_PBES2_MAX_ITERATIONS") {
            config.pbes2_max_iterations = parse_var("JOSE_PBES2_MAX_ITERATIONS", &value)?;
        }
        if let Some(value) = lookup("JOSE_PBES2_MIN_SALT_LEN") {
            config.pbes2_min_salt_len = parse_var("JOSE_PBES2_MIN_SALT_LEN", &value)?;
        }
        if let Some(value) = lookup("JOSE_MIN_RSA_BITS") {
            config.min_rsa_modulus_bits = parse_var("JOSE_MIN_RSA_BITS", &value)?;
        }
        if let Some(value) = lookup("JOSE_ALLOW_RSA1_5") {
            config.allow_rsa1_5 = parse_bool("JOSE_ALLOW_RSA1_5", &value)?;
        }
        if let Some(value) = lookup("JOSE_ENFORCE_HMAC_KEY_LEN") {
            config.enforce_hmac_key_len = parse_bool("JOSE_ENFORCE_HMAC_KEY_LEN", &value)?;
        }

        config.validate()?;
        debug!(?config, "Loaded JOSE configuration");
        Ok(config)
    }

    /// Sets the PBES2 iteration bounds
    pub fn with_pbes2_iterations(mut self, min: u32, max: u32) -> Self {
        self.pbes2_min_iterations = min;
        self.pbes2_max_iterations = max;
        self
    }

    /// Sets the minimum PBES2 salt input length
    pub fn with_pbes2_min_salt_len(mut self, len: usize) -> Self {
        self.pbes2_min_salt_len = len;
        self
    }

    /// Sets the minimum RSA modulus size
    pub fn with_min_rsa_modulus_bits(mut self, bits: usize) -> Self {
        self.min_rsa_modulus_bits = bits;
        self
    }

    /// Allows or forbids RSA1_5
    pub fn with_rsa1_5(mut self, allow: bool) -> Self {
        self.allow_rsa1_5 = allow;
        self
    }

    /// Turns the HMAC key length check on or off
    pub fn with_hmac_key_len_enforced(mut self, enforce: bool) -> Self {
        self.enforce_hmac_key_len = enforce;
        self
    }

    /// Checks the configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.pbes2_min_iterations == 0 {
            return Err(Error::Config(
                "pbes2_min_iterations must be at least 1".to_string(),
            ));
        }
        if self.pbes2_min_iterations > self.pbes2_max_iterations {
            return Err(Error::Config(format!(
                "pbes2_min_iterations ({}) exceeds pbes2_max_iterations ({})",
                self.pbes2_min_iterations, self.pbes2_max_iterations
            )));
        }
        Ok(())
    }

    /// Checks PBES2 parameters taken from a JWE header
    ///
    /// # Arguments
    /// * `iterations` - The `p2c` iteration count
    /// * `salt_input` - The decoded `p2s` salt input (before the algorithm prefix)
    pub fn check_pbes2(&self, iterations: u32, salt_input: &[u8]) -> Result<()> {
        if iterations < self.pbes2_min_iterations {
            return Err(Error::PolicyViolation(format!(
                "PBES2 iteration count {} is below the minimum of {}",
                iterations, self.pbes2_min_iterations
            )));
        }
        if iterations > self.pbes2_max_iterations {
            return Err(Error::PolicyViolation(format!(
                "PBES2 iteration count {} exceeds the maximum of {}",
                iterations, self.pbes2_max_iterations
            )));
        }
        if salt_input.len() < self.pbes2_min_salt_len {
            return Err(Error::PolicyViolation(format!(
                "PBES2 salt input of {} bytes is shorter than {}",
                salt_input.len(),
                self.pbes2_min_salt_len
            )));
        }
        Ok(())
    }

    /// Checks an RSA modulus size
    pub fn check_rsa_key_size(&self, modulus_bits: usize) -> Result<()> {
        if modulus_bits < self.min_rsa_modulus_bits {
            return Err(Error::PolicyViolation(format!(
                "RSA modulus of {} bits is below the minimum of {}",
                modulus_bits, self.min_rsa_modulus_bits
            )));
        }
        Ok(())
    }

    /// Checks whether a key management algorithm is acceptable
    pub fn check_key_management(&self, alg: KeyManagementAlgorithm) -> Result<()> {
        if alg == KeyManagementAlgorithm::Rsa1_5 && !self.allow_rsa1_5 {
            return Err(Error::PolicyViolation(
                "RSA1_5 key encryption is disabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks an HMAC key length against the hash output size
    pub fn check_hmac_key(&self, hash: HashAlgorithm, key_len: usize) -> Result<()> {
        if self.enforce_hmac_key_len && key_len < hash.output_size() {
            return Err(Error::PolicyViolation(format!(
                "HMAC key of {} bytes is shorter than the {} output size",
                key_len, hash
            )));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", name, value)))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!(
            "Invalid value for {}: {}",
            name, value
        ))),
    }
}
