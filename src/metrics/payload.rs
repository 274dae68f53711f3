//! Payload - opaque, self-describing bytes handed to the benchmark sink
//!
//! ## Wire Format (version 1)
//!
//! Every payload is a UTF-8 JSON envelope:
//!
//! ```text
//! {"version": 1, "measure_type": "<tag>", "data": <body>}
//! ```
//!
//! The body schema is fixed per measure type (see the codec of each
//! measurement). The envelope repeats the tag so a payload handed to the
//! wrong decoder fails loudly instead of decoding into garbage.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::MeasureType;
use crate::{Error, Result};

/// Current payload schema version.
pub const WIRE_VERSION: u32 = 1;

/// Opaque encoded form of one measurement.
///
/// Immutable once produced. The only artifact that crosses the boundary to
/// the benchmark log sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Payload(Vec<u8>);

impl Payload {
    /// Wrap raw bytes previously retrieved from a sink.
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the payload, returning the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Encoded length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the payload holds no bytes (never produced by a codec).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Serialize)]
struct EnvelopeOut<'a, T> {
    version: u32,
    measure_type: MeasureType,
    data: &'a T,
}

#[derive(Deserialize)]
struct EnvelopeIn {
    version: u32,
    measure_type: String,
    data: serde_json::Value,
}

/// Wrap `data` in a versioned envelope tagged with `measure_type`.
pub(crate) fn seal<T: Serialize>(measure_type: MeasureType, data: &T) -> Result<Payload> {
    let envelope = EnvelopeOut {
        version: WIRE_VERSION,
        measure_type,
        data,
    };
    serde_json::to_vec(&envelope)
        .map(Payload)
        .map_err(|e| Error::Other(format!("failed to encode {measure_type} payload: {e}")))
}

/// Unwrap an envelope, checking version and tag before decoding the body.
pub(crate) fn open<T: DeserializeOwned>(measure_type: MeasureType, payload: &Payload) -> Result<T> {
    let envelope: EnvelopeIn = serde_json::from_slice(payload.as_bytes())
        .map_err(|e| {
            Error::corrupt(measure_type.as_str(), format!("not a payload envelope: {e}"))
        })?;

    if envelope.version != WIRE_VERSION {
        return Err(Error::corrupt(
            measure_type.as_str(),
            format!("unsupported payload version {}", envelope.version),
        ));
    }
    if envelope.measure_type != measure_type.as_str() {
        return Err(Error::corrupt(
            measure_type.as_str(),
            format!("payload is tagged '{}'", envelope.measure_type),
        ));
    }

    serde_json::from_value(envelope.data).map_err(|e| {
        Error::corrupt(
            measure_type.as_str(),
            format!("body does not match schema: {e}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_writes_envelope() {
        let payload = seal(MeasureType::Loss, &vec![1.0, 2.0]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(payload.as_bytes()).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["measure_type"], "loss");
        assert_eq!(value["data"], serde_json::json!([1.0, 2.0]));
    }

    #[test]
    fn test_open_rejects_wrong_tag() {
        let payload = seal(MeasureType::Loss, &vec![1.0]).unwrap();
        let err = open::<Vec<f64>>(MeasureType::Tta, &payload).unwrap_err();

        match err {
            Error::CorruptPayload {
                measure_type,
                reason,
            } => {
                assert_eq!(measure_type, "tta");
                assert!(reason.contains("'loss'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_open_rejects_unknown_version() {
        let payload = Payload::from_bytes(
            br#"{"version":7,"measure_type":"tta","data":[0.5]}"#.to_vec(),
        );
        let err = open::<Vec<f64>>(MeasureType::Tta, &payload).unwrap_err();
        assert!(err.to_string().contains("unsupported payload version 7"));
    }

    #[test]
    fn test_open_rejects_garbage() {
        let payload = Payload::from_bytes(vec![0x80, 0x04, 0x95]);
        assert!(matches!(
            open::<Vec<f64>>(MeasureType::Tta, &payload),
            Err(Error::CorruptPayload { .. })
        ));
    }

    #[test]
    fn test_payload_accessors() {
        let payload = Payload::from(b"abc".to_vec());
        assert_eq!(payload.len(), 3);
        assert!(!payload.is_empty());
        assert_eq!(payload.as_ref(), b"abc");
        assert_eq!(payload.into_bytes(), b"abc".to_vec());
    }
}
