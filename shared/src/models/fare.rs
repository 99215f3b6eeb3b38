//! Fare dimension enums
//!
//! The three axes of ticket pricing: passenger variant, date-derived fare
//! class, and purchaser role.

use serde::{Deserialize, Serialize};

/// Passenger category for ticket pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Adult,
    Child,
    /// Catch-all single-price variant ("umum" in the legacy data)
    #[serde(alias = "umum")]
    General,
}

/// Date-derived pricing tier for tickets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FareClass {
    Regular,
    Weekend,
    HighSeason,
}

/// Classification of a calendar date
///
/// `Closed` means no sales at all; the other variants map 1:1 onto
/// [`FareClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateClass {
    Regular,
    Weekend,
    HighSeason,
    Closed,
}

impl DateClass {
    /// The fare class sold on this date, or `None` when the venue is closed
    pub fn fare_class(self) -> Option<FareClass> {
        match self {
            DateClass::Regular => Some(FareClass::Regular),
            DateClass::Weekend => Some(FareClass::Weekend),
            DateClass::HighSeason => Some(FareClass::HighSeason),
            DateClass::Closed => None,
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, DateClass::Closed)
    }
}

/// Purchaser category affecting price resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    Admin,
    Reseller,
}

impl Role {
    pub fn is_reseller(self) -> bool {
        matches!(self, Role::Reseller)
    }
}
