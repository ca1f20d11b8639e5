//! # Pricing
//!
//! Turns a nightly rate, a stay length and a room count into a
//! [`PriceBreakdown`].
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal  = price_per_night × nights × rooms                           │
//! │  discount  = original_per_night × nights × rooms − subtotal   (≥ 0)     │
//! │              only when the listing advertises a discount                │
//! │  taxes     = round(subtotal × 18%)                                      │
//! │  fee       = 299 (flat, per booking)                                    │
//! │  total     = subtotal − discount + taxes + fee                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is deterministic: same inputs, same breakdown.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PriceBreakdown, Property, StayRequest, TaxRate};
use crate::validation::validate_tax_rate_bps;

/// GST on accommodation, in basis points.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// Flat service fee added to every booking.
pub const DEFAULT_SERVICE_FEE: i64 = 299;

// =============================================================================
// Pricing Policy
// =============================================================================

/// Tax rate and service fee applied to every breakdown.
///
/// [`PricingPolicy::default`] is the 18% / ₹299 policy the booking page uses;
/// a host may load a different one from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    pub tax_rate: TaxRate,
    pub service_fee: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            service_fee: Money::from_units(DEFAULT_SERVICE_FEE),
        }
    }
}

impl PricingPolicy {
    /// Creates a policy, rejecting tax rates above 100% and negative fees.
    pub fn new(tax_rate_bps: u32, service_fee: i64) -> CoreResult<Self> {
        validate_tax_rate_bps(tax_rate_bps)?;

        if service_fee < 0 {
            return Err(CoreError::InvalidPrice {
                reason: format!("service fee cannot be negative (got {})", service_fee),
            });
        }

        Ok(PricingPolicy {
            tax_rate: TaxRate::from_bps(tax_rate_bps),
            service_fee: Money::from_units(service_fee),
        })
    }

    /// Computes the breakdown for a stay.
    ///
    /// ## Arguments
    /// * `price_per_night` - current nightly rate
    /// * `nights` - stay length; values below 1 are treated as 1
    /// * `rooms` - room count; values below 1 are treated as 1
    /// * `discount_percent` - the listing's advertised discount (0 = none)
    /// * `original_price_per_night` - pre-discount nightly rate, if known
    ///
    /// ## Example
    /// ```rust
    /// use stayhub_core::money::Money;
    /// use stayhub_core::pricing::PricingPolicy;
    ///
    /// let b = PricingPolicy::default().compute(
    ///     Money::from_units(8999), 3, 1, 20, Some(Money::from_units(11249)),
    /// );
    /// assert_eq!(b.subtotal.units(), 26997);
    /// assert_eq!(b.discount_amount.units(), 6750);
    /// assert_eq!(b.taxes.units(), 4859);
    /// assert_eq!(b.total.units(), 25405);
    /// ```
    pub fn compute(
        &self,
        price_per_night: Money,
        nights: u32,
        rooms: u32,
        discount_percent: u8,
        original_price_per_night: Option<Money>,
    ) -> PriceBreakdown {
        let nights = nights.max(1);
        let rooms = rooms.max(1);

        let subtotal = price_per_night * nights * rooms;

        let discount_amount = match original_price_per_night {
            Some(original) if discount_percent > 0 => {
                (original * nights * rooms - subtotal).non_negative()
            }
            _ => Money::zero(),
        };

        let taxes = subtotal.calculate_tax(self.tax_rate);
        let total = subtotal - discount_amount + taxes + self.service_fee;

        PriceBreakdown {
            nights,
            price_per_night,
            subtotal,
            discount_amount,
            taxes,
            service_fee: self.service_fee,
            total,
        }
    }

    /// Computes the breakdown for `stay` at `property`.
    ///
    /// Nights and rooms come from the stay request; the discount percent and
    /// original price come from the listing.
    pub fn quote(&self, property: &Property, stay: &StayRequest) -> PriceBreakdown {
        self.compute(
            property.price,
            stay.nights(),
            stay.rooms,
            property.discount_percent().unwrap_or(0),
            property.original_price(),
        )
    }
}

/// Computes a breakdown with the default 18% / ₹299 policy.
pub fn compute_breakdown(
    price_per_night: Money,
    nights: u32,
    rooms: u32,
    discount_percent: u8,
    original_price_per_night: Option<Money>,
) -> PriceBreakdown {
    PricingPolicy::default().compute(
        price_per_night,
        nights,
        rooms,
        discount_percent,
        original_price_per_night,
    )
}

/// Quotes `stay` at `property` with the default policy.
pub fn quote(property: &Property, stay: &StayRequest) -> PriceBreakdown {
    PricingPolicy::default().quote(property, stay)
}

// =============================================================================
// Unit Tests
// =============================================================================
