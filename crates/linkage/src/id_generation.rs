//! Hash-based edge id generation.
//!
//! Connector ids are derived from SHA256 content hashes with base36
//! encoding, giving short, collision-resistant ids that stay stable-looking
//! across a diagram's life:
//!
//! - **Adaptive length**: id length grows with snapshot size (4-6 characters)
//! - **Collision resistant**: nonce retry against the set of registered ids
//! - **Format**: `{prefix}-{hash}` (e.g., "wire-k3f8")
//!
//! # Example
//!
//! ```
//! use linkage::id_generation::{EdgeIdGenerator, EdgeIdGeneratorConfig};
//!
//! let config = EdgeIdGeneratorConfig {
//!     prefix: "wire".to_string(),
//!     snapshot_size: 12,
//! };
//!
//! let mut generator = EdgeIdGenerator::new(config);
//! let id = generator.generate("node-a", "node-b", "depends-on").unwrap();
//! assert!(id.starts_with("wire-"));
//! ```

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

const BASE36_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_NONCE: u32 = 100;

/// Errors that can occur during edge id generation.
#[derive(Debug, Error)]
pub enum IdGenerationError {
    /// Unable to generate a unique id after exhausting all nonces and length increases.
    #[error("Unable to generate unique ID after {attempts} attempts")]
    CollisionExhausted {
        /// Number of nonces tried before giving up.
        attempts: u32,
    },

    /// Base36 encoding failed.
    #[error("Base36 encoding failed: {0}")]
    EncodingFailed(String),

    /// Invalid length parameter.
    #[error("Length must be greater than 0")]
    InvalidLength,
}

/// Configuration for edge id generation.
#[derive(Debug, Clone)]
pub struct EdgeIdGeneratorConfig {
    /// Prefix for all ids (e.g., "wire").
    pub prefix: String,

    /// Current number of edges in the snapshot (affects adaptive length).
    pub snapshot_size: usize,
}

/// Hash-based edge id generator with collision detection.
///
/// The generator tracks every id it has produced or registered, so loading
/// a snapshot must register its existing ids before new edges are created.
/// Memory overhead is negligible at diagram scale (tens to low hundreds of
/// connectors).
pub struct EdgeIdGenerator {
    config: EdgeIdGeneratorConfig,
    existing_ids: HashSet<String>,
}

impl EdgeIdGenerator {
    /// Create a new generator with the given configuration.
    #[must_use]
    pub fn new(config: EdgeIdGeneratorConfig) -> Self {
        Self {
            config,
            existing_ids: HashSet::new(),
        }
    }

    /// Register an existing id to prevent collisions.
    pub fn register_id(&mut self, id: String) {
        self.existing_ids.insert(id);
    }

    /// Number of edges the generator believes the snapshot holds.
    #[must_use]
    pub fn snapshot_size(&self) -> usize {
        self.config.snapshot_size
    }

    /// Generate a new unique edge id from the connector's endpoints and tag.
    ///
    /// # Errors
    ///
    /// Returns an error if unable to generate a unique id after trying all
    /// nonces at the maximum length.
    pub fn generate(
        &mut self,
        source: &str,
        target: &str,
        dependency_type: &str,
    ) -> Result<String, IdGenerationError> {
        let id_length = self.adaptive_length();

        for nonce in 0..MAX_NONCE {
            let id = self.generate_hash_id(source, target, dependency_type, nonce, id_length)?;

            if !self.existing_ids.contains(&id) {
                if nonce > 0 {
                    debug!(
                        nonce,
                        id_length, "Generated unique ID after {} collision retries", nonce
                    );
                }
                self.existing_ids.insert(id.clone());
                return Ok(id);
            }
        }

        // If all nonces collide, try with increased length
        if id_length < 6 {
            warn!(
                id_length,
                max_nonce = MAX_NONCE,
                "All nonces exhausted, increasing ID length to {}",
                id_length + 1
            );
            let longer_id =
                self.generate_hash_id(source, target, dependency_type, 0, id_length + 1)?;
            self.existing_ids.insert(longer_id.clone());
            return Ok(longer_id);
        }

        Err(IdGenerationError::CollisionExhausted {
            attempts: MAX_NONCE,
        })
    }

    /// Generate a hash-based id with the given parameters.
    fn generate_hash_id(
        &self,
        source: &str,
        target: &str,
        dependency_type: &str,
        nonce: u32,
        length: usize,
    ) -> Result<String, IdGenerationError> {
        // Timestamp keeps ids for repeated identical connectors distinct
        // across sessions even before the nonce kicks in.
        let timestamp = Utc::now().timestamp();
        let content = format!("{source}|{target}|{dependency_type}|{timestamp}|{nonce}");

        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        let hash_bytes = hasher.finalize();

        let hash_str = encode_base36(&hash_bytes[..8], length)?;

        Ok(format!("{}-{}", self.config.prefix, hash_str))
    }

    /// Determine id length based on snapshot size.
    ///
    /// - 0-100 edges: 4 chars
    /// - 101-1,000: 5 chars
    /// - 1,000+: 6 chars
    fn adaptive_length(&self) -> usize {
        match self.config.snapshot_size {
            0..=100 => 4,
            101..=1000 => 5,
            _ => 6,
        }
    }
}

/// Encode bytes as a base36 string of the requested length.
///
/// The input is limited to the first 8 bytes of the SHA256 hash so the
/// intermediate fits a u64; wrapping arithmetic keeps the conversion
/// deterministic.
fn encode_base36(bytes: &[u8], length: usize) -> Result<String, IdGenerationError> {
    if length == 0 {
        return Err(IdGenerationError::InvalidLength);
    }

    let mut num: u64 = 0;
    for &byte in bytes {
        num = num.wrapping_shl(8).wrapping_add(u64::from(byte));
    }

    let mut chars = Vec::with_capacity(length);
    for _ in 0..length {
        let digit = (num % 36) as usize;
        chars.push(BASE36_CHARS[digit]);
        num /= 36;
    }
    chars.reverse();

    String::from_utf8(chars).map_err(|e| IdGenerationError::EncodingFailed(e.to_string()))
}
