//! Measure Type - the string tag that selects a payload schema

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Closed set of measure types understood by the crate.
///
/// The string form is what crosses the sink boundary; it must never change
/// for an existing variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureType {
    /// Square confusion matrix with class labels.
    #[serde(rename = "confusion-matrix")]
    ConfusionMatrix,
    /// Hyperparameter sweep table.
    #[serde(rename = "hyperparameters")]
    Hyperparameters,
    /// Time-to-accuracy curve, one accuracy per epoch.
    #[serde(rename = "tta")]
    Tta,
    /// Loss trajectory, one value per step or epoch.
    #[serde(rename = "loss")]
    Loss,
}

impl MeasureType {
    /// All measure types, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::ConfusionMatrix,
        Self::Hyperparameters,
        Self::Tta,
        Self::Loss,
    ];

    /// Wire tag for this measure type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfusionMatrix => "confusion-matrix",
            Self::Hyperparameters => "hyperparameters",
            Self::Tta => "tta",
            Self::Loss => "loss",
        }
    }

    /// Unit logged alongside payloads of this type, if any.
    #[must_use]
    pub const fn unit(self) -> Option<&'static str> {
        match self {
            Self::ConfusionMatrix | Self::Hyperparameters => None,
            Self::Tta => Some("accuracy"),
            Self::Loss => Some("loss"),
        }
    }
}

impl fmt::Display for MeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasureType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mt| mt.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown measure type '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_type_tags() {
        assert_eq!(MeasureType::ConfusionMatrix.as_str(), "confusion-matrix");
        assert_eq!(MeasureType::Hyperparameters.as_str(), "hyperparameters");
        assert_eq!(MeasureType::Tta.as_str(), "tta");
        assert_eq!(MeasureType::Loss.as_str(), "loss");
    }

    #[test]
    fn test_measure_type_units() {
        assert_eq!(MeasureType::ConfusionMatrix.unit(), None);
        assert_eq!(MeasureType::Hyperparameters.unit(), None);
        assert_eq!(MeasureType::Tta.unit(), Some("accuracy"));
        assert_eq!(MeasureType::Loss.unit(), Some("loss"));
    }

    #[test]
    fn test_measure_type_from_str() {
        for mt in MeasureType::ALL {
            assert_eq!(mt.as_str().parse::<MeasureType>().unwrap(), mt);
        }
        assert!(matches!(
            "accuracy".parse::<MeasureType>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_measure_type_serde_matches_tag() {
        let json = serde_json::to_string(&MeasureType::ConfusionMatrix).unwrap();
        assert_eq!(json, "\"confusion-matrix\"");
    }
}
