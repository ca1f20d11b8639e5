//! # stayhub-core: Pure Booking Logic for StayHub
//!
//! This crate holds the booking rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StayHub Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation layer                           │   │
//! │  │   Search ──► Listing ──► Wishlist ──► Book Now ──► My Bookings  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stayhub-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │ Property  │  │   Money   │  │  Policy   │  │   stay    │  │   │
//! │  │   │ Booking   │  │  TaxRate  │  │ Breakdown │  │  request  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK READS • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              stayhub-store (Durable Local Storage)              │   │
//! │  │          wishlist, myBookings, searchData keys                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Property, StayRequest, BookingRecord, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Price breakdown calculation
//! - [`error`] - Domain error types
//! - [`validation`] - Stay request validation
//!
//! ## Example Usage
//!
//! ```rust
//! use stayhub_core::money::Money;
//! use stayhub_core::pricing::compute_breakdown;
//!
//! let breakdown = compute_breakdown(Money::from_units(2500), 2, 1, 0, None);
//!
//! // 5000 + 18% GST (900) + ₹299 service fee
//! assert_eq!(breakdown.total.units(), 6199);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, CURRENCY_SYMBOL};
pub use pricing::{compute_breakdown, PricingPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key holding the wishlist array.
pub const WISHLIST_KEY: &str = "wishlist";

/// Storage key holding the booking array.
pub const BOOKINGS_KEY: &str = "myBookings";

/// Storage key holding the last submitted stay request.
pub const SEARCH_DATA_KEY: &str = "searchData";
