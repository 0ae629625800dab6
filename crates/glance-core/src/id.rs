use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CoreError;

/// A 20-byte SHA-1 object identifier. Canonical textual form is 40
/// lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId([u8; 20]);

impl ObjectId {
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidObjectId(e.to_string()))?;
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidObjectId("expected 20 bytes".into()))?;
        Ok(Self(arr))
    }

    /// Reads a raw 20-byte identifier out of an object payload.
    pub fn from_raw(bytes: &[u8]) -> Result<Self, CoreError> {
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidObjectId("expected 20 bytes".into()))?;
        Ok(Self(arr))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self)
    }
}
