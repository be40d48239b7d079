//! Session classification and the trimmed public result.

/// Why a session was (or was not) withheld from point awarding.
///
/// `InvalidData` and `InvalidItem` describe malformed input; the other
/// non-`None` variants are statistical bot signals. Only `None` authorizes
/// points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum FraudReason {
    #[default]
    None,
    TooFastBridge,
    DurationVarianceTooLow,
    TooFastBetweenMoves,
    TimingVarianceTooLow,
    PerfectRateTooHigh,
    TooManyConsecutivePerfects,
    InvalidData,
    InvalidItem,
}

impl FraudReason {
    /// Stable code for storage and logs.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub const fn authorizes_points(&self) -> bool {
        matches!(self, Self::None)
    }

    /// True for heuristic (bot-like play) classifications.
    pub const fn is_fraud(&self) -> bool {
        !matches!(self, Self::None | Self::InvalidData | Self::InvalidItem)
    }

    /// True for malformed-input classifications.
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidData | Self::InvalidItem)
    }
}

impl core::fmt::Display for FraudReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authoritative summary of one replayed session.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidationResult {
    /// Latest move end observed, in ms.
    pub time_played: f64,
    pub score: u32,
    pub blocks_passed: u32,
    pub is_fraud: bool,
    pub fraud_reason: FraudReason,
}

impl ValidationResult {
    /// Zero-score result for malformed moves.
    pub fn invalid_data(time_played: f64) -> Self {
        Self {
            time_played,
            fraud_reason: FraudReason::InvalidData,
            ..Self::default()
        }
    }

    /// Zero-score result for rejected item usage.
    pub fn invalid_item() -> Self {
        Self {
            fraud_reason: FraudReason::InvalidItem,
            ..Self::default()
        }
    }

    pub fn points_awardable(&self) -> bool {
        self.fraud_reason.authorizes_points()
    }
}
