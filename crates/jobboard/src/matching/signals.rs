use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Working arrangement advertised by a posting or preferred by a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkModel {
    Remote,
    Hybrid,
    Onsite,
    /// Any value outside the known arrangements. Never matches.
    #[serde(other)]
    Unrecognized,
}

impl WorkModel {
    /// Lenient parse used for loosely typed inputs such as CSV exports.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "remote" => Self::Remote,
            "hybrid" => Self::Hybrid,
            "onsite" | "on_site" => Self::Onsite,
            _ => Self::Unrecognized,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WorkModel::Remote => "remote",
            WorkModel::Hybrid => "hybrid",
            WorkModel::Onsite => "onsite",
            WorkModel::Unrecognized => "unrecognized",
        }
    }

    pub const fn is_recognized(self) -> bool {
        !matches!(self, WorkModel::Unrecognized)
    }

    /// Equality restricted to recognized arrangements.
    pub fn matches(self, other: WorkModel) -> bool {
        self.is_recognized() && self == other
    }
}

/// Non-negative money amount with two decimal places, held as integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must not be negative")]
    Negative,
    #[error("amount allows at most two decimal places")]
    Precision,
    #[error("amount is too large")]
    Overflow,
    #[error("'{0}' is not a decimal amount")]
    Invalid(String),
}

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn from_units(units: u64) -> Result<Self, AmountError> {
        units
            .checked_mul(100)
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn try_from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::Invalid(value.to_string()));
        }
        if value < 0.0 {
            return Err(AmountError::Negative);
        }

        // Shortest round-trip decimal, never in exponent form.
        value.to_string().parse()
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(AmountError::Negative);
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !digits_only(whole) || !digits_only(fraction)
        {
            return Err(AmountError::Invalid(trimmed.to_string()));
        }
        if fraction.len() > 2 {
            return Err(AmountError::Precision);
        }

        let units: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| AmountError::Overflow)?
        };
        let fraction_cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().unwrap_or(0) * 10,
            _ => fraction.parse::<u64>().unwrap_or(0),
        };

        units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction_cents))
            .map(Self)
            .ok_or(AmountError::Overflow)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative amount with at most two decimal places")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
                Amount::from_units(value).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
                if value < 0 {
                    return Err(E::custom(AmountError::Negative));
                }
                self.visit_u64(value as u64)
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Amount, E> {
                Amount::try_from_f64(value).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Amount, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Candidate-side inputs to the match scorer, materialized by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSignals {
    pub work_model_preference: WorkModel,
    #[serde(default)]
    pub salary_expectation: Option<Amount>,
    #[serde(default)]
    pub experience_count: u32,
    #[serde(default)]
    pub has_completed_education: bool,
    #[serde(default)]
    pub has_any_education: bool,
}

/// Job-side inputs to the match scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSignals {
    pub work_model: WorkModel,
    #[serde(default)]
    pub salary_ceiling: Option<Amount>,
}
