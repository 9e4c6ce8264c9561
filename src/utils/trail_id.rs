//! Trail id generation and validation.
//!
//! Ids are fixed-length strings drawn uniformly from a configured alphabet.
//! The same alphabet and length are used to reject malformed ids at the HTTP
//! boundary before they reach the engine.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Default alphabet: digits and ASCII letters, without the ambiguous `0`.
pub const DEFAULT_ALPHABET: &str = "123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Default id length (61^6 ≈ 51 billion ids).
pub const DEFAULT_ID_LENGTH: usize = 6;

/// Ids that would be shadowed by fixed routes.
const RESERVED_IDS: &[&str] = &["health", "api"];

/// Random generator of fixed-length trail ids.
#[derive(Debug, Clone)]
pub struct TrailIdGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl TrailIdGenerator {
    /// Creates a generator over `alphabet` producing ids of `length` chars.
    ///
    /// Duplicate characters in `alphabet` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the alphabet has fewer than two distinct
    /// characters or `length` is zero.
    pub fn new(alphabet: &str, length: usize) -> anyhow::Result<Self> {
        let mut chars: Vec<char> = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }

        if chars.len() < 2 {
            anyhow::bail!("Trail id alphabet needs at least 2 distinct characters");
        }
        if length == 0 {
            anyhow::bail!("Trail id length must be greater than 0");
        }

        Ok(Self {
            alphabet: chars,
            length,
        })
    }

    /// Creates a generator with the default alphabet and the given length.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is zero.
    pub fn with_length(length: usize) -> anyhow::Result<Self> {
        Self::new(DEFAULT_ALPHABET, length)
    }

    /// Length of generated ids.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct ids this generator can produce.
    pub fn id_space(&self) -> f64 {
        (self.alphabet.len() as f64).powi(self.length as i32)
    }

    /// Draws a random id, skipping reserved route names.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();

        loop {
            let id: String = (0..self.length)
                .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
                .collect();

            if !RESERVED_IDS.contains(&id.as_str()) {
                return id;
            }
        }
    }

    /// Checks that `id` has the configured length and only alphabet characters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either rule is violated.
    pub fn validate(&self, id: &str) -> Result<(), AppError> {
        if id.chars().count() != self.length {
            return Err(AppError::bad_request(
                format!("Trail id must be {} characters", self.length),
                json!({ "trail_id": id }),
            ));
        }

        if !id.chars().all(|c| self.alphabet.contains(&c)) {
            return Err(AppError::bad_request(
                "Trail id fails to match the required pattern",
                json!({ "trail_id": id }),
            ));
        }

        Ok(())
    }
}

impl Default for TrailIdGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_ID_LENGTH,
        }
    }
}
