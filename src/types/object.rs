use crate::hash::ObjectKind;

/// a decoded object as held in the store: kind tag plus payload
///
/// blob payloads are raw file bytes; commit payloads are the CBOR
/// encoding of a `Commit`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    pub kind: ObjectKind,
    pub payload: Vec<u8>,
}

impl Object {
    pub fn new(kind: ObjectKind, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }

    /// on-disk body before compression: tag byte followed by payload
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.payload.len() + 1);
        bytes.push(self.kind.tag());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// inverse of `encode`; None when the tag is missing or unknown
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let (&tag, payload) = bytes.split_first()?;
        let kind = ObjectKind::from_tag(tag)?;
        Some(Self::new(kind, payload))
    }
}
