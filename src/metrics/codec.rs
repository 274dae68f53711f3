//! Codec - encode a typed measurement into a [`Payload`] and back

use serde::{Deserialize, Serialize};

use super::{MeasureType, Payload};
use crate::{Error, Result};

/// Encode/decode capability shared by every measurement kind.
///
/// `decode(encode(m)) == m` for every well-formed `m`. Byte identity of two
/// encodings is not promised, only semantic identity.
pub trait Codec: Sized {
    /// Tag under which payloads of this kind are logged.
    const MEASURE_TYPE: MeasureType;

    /// Encode the measurement into a self-describing payload.
    ///
    /// # Errors
    /// Returns error if the measurement cannot be serialized.
    fn encode(&self) -> Result<Payload>;

    /// Decode a payload produced by [`Codec::encode`].
    ///
    /// # Errors
    /// Returns [`Error::CorruptPayload`] if the payload is not a valid
    /// encoding of this measure type.
    fn decode(payload: &Payload) -> Result<Self>;
}

/// JSON has no NaN or infinity, so non-finite values travel as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireFloat {
    Finite(f64),
    Special(String),
}

impl From<f64> for WireFloat {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Finite(value)
        } else if value.is_nan() {
            Self::Special("NaN".to_string())
        } else if value.is_sign_positive() {
            Self::Special("inf".to_string())
        } else {
            Self::Special("-inf".to_string())
        }
    }
}

impl TryFrom<WireFloat> for f64 {
    type Error = String;

    fn try_from(value: WireFloat) -> std::result::Result<Self, Self::Error> {
        match value {
            WireFloat::Finite(v) => Ok(v),
            WireFloat::Special(s) => match s.as_str() {
                "NaN" => Ok(Self::NAN),
                "inf" => Ok(Self::INFINITY),
                "-inf" => Ok(Self::NEG_INFINITY),
                _ => Err(format!("'{s}' is not a number")),
            },
        }
    }
}

pub(crate) fn to_wire(values: &[f64]) -> Vec<WireFloat> {
    values.iter().copied().map(WireFloat::from).collect()
}

pub(crate) fn from_wire(measure_type: MeasureType, values: Vec<WireFloat>) -> Result<Vec<f64>> {
    values
        .into_iter()
        .map(f64::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|reason| Error::corrupt(measure_type.as_str(), reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_float_finite_passthrough() {
        let wire = to_wire(&[0.25, -3.0]);
        let back = from_wire(MeasureType::Loss, wire).unwrap();
        assert_eq!(back, vec![0.25, -3.0]);
    }

    #[test]
    fn test_wire_float_non_finite() {
        let wire = to_wire(&[f64::NAN, f64::INFINITY, f64::NEG_INFINITY]);
        let json = serde_json::to_string(&wire).unwrap();
        assert_eq!(json, r#"["NaN","inf","-inf"]"#);

        let parsed: Vec<WireFloat> = serde_json::from_str(&json).unwrap();
        let back = from_wire(MeasureType::Loss, parsed).unwrap();
        assert!(back[0].is_nan());
        assert_eq!(back[1], f64::INFINITY);
        assert_eq!(back[2], f64::NEG_INFINITY);
    }

    #[test]
    fn test_wire_float_rejects_text() {
        let parsed: Vec<WireFloat> = serde_json::from_str(r#"[1.0, "high"]"#).unwrap();
        let err = from_wire(MeasureType::Tta, parsed).unwrap_err();
        assert!(err.to_string().contains("'high' is not a number"));
    }

    #[test]
    fn test_wire_float_accepts_integers() {
        let parsed: Vec<WireFloat> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(from_wire(MeasureType::Loss, parsed).unwrap(), vec![1.0, 2.0]);
    }
}
