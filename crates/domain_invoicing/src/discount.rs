//! Invoice-level discounts
//!
//! On the wire a discount is two independent optional fields,
//! `discount_type` and `discount_value`. Internally it is a single
//! [`Discount`] value, so the two halves can never disagree.

use std::fmt;
use std::str::FromStr;

use core_kernel::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::InvoicingError;

/// How a discount value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Value is a percent of the subtotal
    Percentage,
    /// Value is a currency amount
    Fixed,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::Percentage => "percentage",
            DiscountKind::Fixed => "fixed",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountKind {
    type Err = InvoicingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(DiscountKind::Percentage),
            "fixed" => Ok(DiscountKind::Fixed),
            other => Err(InvoicingError::InvalidDiscountKind(other.to_string())),
        }
    }
}

/// Discount applied to an invoice subtotal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DiscountFields", into = "DiscountFields")]
pub enum Discount {
    #[default]
    None,
    /// Percent of the subtotal (10 means 10%)
    Percentage(Decimal),
    /// Flat amount, not capped at the subtotal
    Fixed(Decimal),
}

impl Discount {
    /// Builds a discount from the two optional wire fields
    ///
    /// A missing kind, a missing value, or a value of exactly zero all mean
    /// "no discount".
    pub fn from_parts(kind: Option<DiscountKind>, value: Option<Decimal>) -> Self {
        match (kind, value) {
            (Some(kind), Some(value)) if !value.is_zero() => match kind {
                DiscountKind::Percentage => Discount::Percentage(value),
                DiscountKind::Fixed => Discount::Fixed(value),
            },
            _ => Discount::None,
        }
    }

    pub fn kind(&self) -> Option<DiscountKind> {
        match self {
            Discount::None => None,
            Discount::Percentage(_) => Some(DiscountKind::Percentage),
            Discount::Fixed(_) => Some(DiscountKind::Fixed),
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Discount::None => None,
            Discount::Percentage(v) | Discount::Fixed(v) => Some(*v),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Discount::None)
    }

    /// Amount taken off `amount`
    ///
    /// Fixed discounts are returned as-is even when larger than `amount`;
    /// keeping totals non-negative is the caller's job.
    pub fn amount_off(&self, amount: Decimal) -> Decimal {
        match self {
            Discount::None => Decimal::ZERO,
            Discount::Percentage(percent) => Percentage::new(*percent).of(amount),
            Discount::Fixed(value) => *value,
        }
    }
}

/// Wire form of a [`Discount`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<Decimal>,
}

impl From<DiscountFields> for Discount {
    fn from(fields: DiscountFields) -> Self {
        Discount::from_parts(fields.discount_type, fields.discount_value)
    }
}

impl From<Discount> for DiscountFields {
    fn from(discount: Discount) -> Self {
        DiscountFields {
            discount_type: discount.kind(),
            discount_value: discount.value(),
        }
    }
}
