//! # stayhub-store: Durable Local Storage for StayHub
//!
//! Wishlist, bookings and the last search, kept in a string-keyed JSON store
//! and rehydrated on startup.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StayHub Data Flow                                │
//! │                                                                         │
//! │  Presentation layer (toggle heart, "Confirm Booking", "Cancel")        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stayhub-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    StayHub    │    │    Stores     │    │   Storage    │  │   │
//! │  │   │   (hub.rs)    │    │ WishlistStore │    │ (storage.rs) │  │   │
//! │  │   │               │───►│ BookingStore  │───►│ FileStorage  │  │   │
//! │  │   │ StayConfig    │    │ LastSearch    │    │ MemoryStorage│  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   <data_dir>/wishlist.json  myBookings.json  searchData.json    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - Key-value storage trait and backends
//! - [`persist`] - JSON load/save helpers
//! - [`wishlist`] - Favorited properties
//! - [`booking`] - Booking records
//! - [`search`] - Last submitted search
//! - [`config`] - TOML + environment configuration
//! - [`hub`] - Container wiring the stores together
//! - [`telemetry`] - Logging setup
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stayhub_core::{Money, Property, StayRequest};
//! use stayhub_store::{MemoryStorage, StayConfig, StayHub};
//!
//! let mut hub = StayHub::open(MemoryStorage::new(), StayConfig::in_memory())?;
//!
//! let property = Property {
//!     id: "3".into(), name: "Lake House".into(), image: "lake.jpg".into(),
//!     price: Money::from_units(4500), location: "Udaipur".into(),
//!     property_type: "Villa".into(), rating: 4.7, reviews: 128,
//!     discount: None, featured: None, original_price: None,
//! };
//! let stay = StayRequest::new(
//!     "Udaipur",
//!     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
//! );
//!
//! hub.wishlist_mut().toggle(property.clone())?;
//! let booking = hub.book(&property, &stay)?;
//! hub.bookings_mut().cancel(&booking.booking_id)?;
//! # Ok::<(), stayhub_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod booking;
pub mod config;
pub mod error;
pub mod hub;
pub mod persist;
pub mod search;
pub mod storage;
pub mod telemetry;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use booking::BookingStore;
pub use config::{StayConfig, StorageBackend};
pub use error::{ErrorKind, StoreError, StoreResult};
pub use hub::StayHub;
pub use search::LastSearchStore;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, Storage};
pub use telemetry::init_tracing;
pub use wishlist::WishlistStore;
