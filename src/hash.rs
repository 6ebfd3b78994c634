use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::Error;

/// SHA-256 hash used for content addressing
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; 32]);

impl Hash {
    /// zero hash (useful as sentinel)
    pub const ZERO: Hash = Hash([0u8; 32]);

    /// length of the hex form
    pub const HEX_LEN: usize = 64;

    /// create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// parse from hex string
    pub fn from_hex(s: &str) -> crate::Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidHashHex(s.to_string()))?;
        if bytes.len() != 32 {
            return Err(Error::InvalidHashHex(s.to_string()));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// get raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// abbreviated hex form used in log output
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }

    /// does the hex form start with the given (case-insensitive) prefix
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.to_hex().starts_with(&prefix.to_ascii_lowercase())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &self.to_hex()[..12])
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// the two kinds of stored object
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Commit,
}

impl ObjectKind {
    /// tag byte written ahead of the payload on disk
    pub fn tag(self) -> u8 {
        match self {
            ObjectKind::Blob => b'b',
            ObjectKind::Commit => b'c',
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'b' => Some(ObjectKind::Blob),
            b'c' => Some(ObjectKind::Commit),
            _ => None,
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Commit => "commit",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// compute object hash over (kind, length, payload)
///
/// format:
///   kind name: ascii ("blob" / "commit")
///   space
///   payload length: ascii decimal
///   NUL
///   payload: bytes
///
/// the kind header keeps a blob and a commit with the same payload apart.
pub fn compute_object_hash(kind: ObjectKind, payload: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(kind.type_name().as_bytes());
    hasher.update(b" ");
    hasher.update(payload.len().to_string().as_bytes());
    hasher.update([0u8]);
    hasher.update(payload);
    Hash(hasher.finalize().into())
}

/// hash file content the way the store would identify it as a blob
pub fn compute_blob_hash(content: &[u8]) -> Hash {
    compute_object_hash(ObjectKind::Blob, content)
}
