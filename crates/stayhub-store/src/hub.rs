//! # StayHub
//!
//! The application-lifetime container for every store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Hub Architecture                                     │
//! │                                                                         │
//! │  Host startup                                                           │
//! │    StayConfig::load() ──► StayHub::from_config() ──► passed to pages    │
//! │                                   │                                     │
//! │                one Storage, shared by cloning the handle                │
//! │          ┌────────────────────────┼────────────────────────┐            │
//! │          ▼                        ▼                        ▼            │
//! │  ┌───────────────┐       ┌────────────────┐       ┌─────────────────┐   │
//! │  │ WishlistStore │       │  BookingStore  │       │ LastSearchStore │   │
//! │  │  "wishlist"   │       │  "myBookings"  │       │  "searchData"   │   │
//! │  └───────────────┘       └────────────────┘       └─────────────────┘   │
//! │                                   ▲                                     │
//! │                                   │ book() = quote + save search        │
//! │                           PricingPolicy (config)     + create           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Construct one hub per process and hand out references. Tests build a fresh
//! hub over [`MemoryStorage`](crate::storage::MemoryStorage) each time.

use stayhub_core::{BookingRecord, Money, PriceBreakdown, PricingPolicy, Property, StayRequest};
use tracing::{info, warn};

use crate::booking::BookingStore;
use crate::config::StayConfig;
use crate::error::StoreResult;
use crate::search::LastSearchStore;
use crate::storage::{KeyValueStorage, Storage};
use crate::wishlist::WishlistStore;

#[derive(Debug)]
pub struct StayHub<S> {
    wishlist: WishlistStore<S>,
    bookings: BookingStore<S>,
    last_search: LastSearchStore<S>,
    pricing: PricingPolicy,
    config: StayConfig,
}

impl StayHub<Storage> {
    /// Builds the configured storage backend and opens every store on it.
    pub fn from_config(config: StayConfig) -> StoreResult<Self> {
        let storage = config.build_storage()?;
        StayHub::open(storage, config)
    }
}

impl<S: KeyValueStorage + Clone> StayHub<S> {
    /// Opens every store over `storage`, rehydrating each exactly once.
    pub fn open(storage: S, config: StayConfig) -> StoreResult<Self> {
        config.validate()?;
        let pricing = config.pricing_policy()?;

        let wishlist = WishlistStore::open(storage.clone());
        let bookings = BookingStore::open(storage.clone());
        let last_search = LastSearchStore::new(storage);

        info!(
            wishlist = wishlist.count(),
            bookings = bookings.len(),
            "StayHub opened"
        );

        Ok(StayHub {
            wishlist,
            bookings,
            last_search,
            pricing,
            config,
        })
    }

    pub fn wishlist(&self) -> &WishlistStore<S> {
        &self.wishlist
    }

    pub fn wishlist_mut(&mut self) -> &mut WishlistStore<S> {
        &mut self.wishlist
    }

    pub fn bookings(&self) -> &BookingStore<S> {
        &self.bookings
    }

    pub fn bookings_mut(&mut self) -> &mut BookingStore<S> {
        &mut self.bookings
    }

    pub fn last_search(&self) -> &LastSearchStore<S> {
        &self.last_search
    }

    pub fn pricing(&self) -> PricingPolicy {
        self.pricing
    }

    pub fn config(&self) -> &StayConfig {
        &self.config
    }

    /// Prices `stay` at `property` with the configured policy.
    pub fn quote(&self, property: &Property, stay: &StayRequest) -> PriceBreakdown {
        self.pricing.quote(property, stay)
    }

    /// Formats `amount` with the configured currency symbol.
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.config.display.currency_symbol)
    }

    /// Shareable wishlist summary, priced with the configured currency symbol.
    pub fn share_wishlist(&self) -> String {
        self.wishlist
            .share_text_with(&self.config.display.currency_symbol)
    }

    /// Quotes and records a booking, remembering `stay` as the last search.
    ///
    /// A failure to save the last search is logged and does not block the
    /// booking.
    pub fn book(&mut self, property: &Property, stay: &StayRequest) -> StoreResult<BookingRecord> {
        let breakdown = self.quote(property, stay);
        let record = self.bookings.create(property, stay, breakdown)?;

        if let Err(e) = self.last_search.save(stay) {
            warn!(error = %e, "Failed to remember last search");
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use stayhub_core::BookingFilter;

    fn property() -> Property {
        Property {
            id: "7".to_string(),
            name: "Grand Luxury Resort & Spa".to_string(),
            image: "resort.jpg".to_string(),
            price: Money::from_units(8999),
            location: "Goa".to_string(),
            property_type: "Resort".to_string(),
            rating: 4.8,
            reviews: 2847,
            discount: Some(20),
            featured: None,
            original_price: Some(Money::from_units(11249)),
        }
    }

    fn stay() -> StayRequest {
        StayRequest::new(
            "Goa",
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
        )
    }

    #[test]
    fn test_book_prices_and_remembers_search() {
        let storage = MemoryStorage::new();
        let mut hub = StayHub::open(storage.clone(), StayConfig::in_memory()).unwrap();

        let record = hub.book(&property(), &stay()).unwrap();
        assert_eq!(record.price_breakdown.total.units(), 25405);
        assert_eq!(hub.last_search().load(), Some(stay()));

        let reopened = StayHub::open(storage, StayConfig::in_memory()).unwrap();
        assert_eq!(reopened.bookings().list(BookingFilter::All), vec![record]);
    }

    #[test]
    fn test_configured_pricing_applies() {
        let mut config = StayConfig::in_memory();
        config.pricing.tax_rate_bps = 0;
        config.pricing.service_fee = 0;

        let hub = StayHub::open(MemoryStorage::new(), config).unwrap();
        let quote = hub.quote(&property(), &stay());
        assert_eq!(quote.total.units(), 26997 - 6750);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = StayConfig::in_memory();
        config.pricing.tax_rate_bps = 20000;
        assert!(StayHub::open(MemoryStorage::new(), config).is_err());
    }

    #[test]
    fn test_stores_share_storage() {
        let storage = MemoryStorage::new();
        let mut hub = StayHub::open(storage.clone(), StayConfig::in_memory()).unwrap();
        hub.wishlist_mut().add(property()).unwrap();

        let reopened = StayHub::open(storage, StayConfig::in_memory()).unwrap();
        assert!(reopened.wishlist().is_member("7"));
    }

    #[test]
    fn test_configured_currency_symbol_is_used() {
        let mut config = StayConfig::in_memory();
        config.display.currency_symbol = "$".to_string();

        let mut hub = StayHub::open(MemoryStorage::new(), config).unwrap();
        let mut lake = property();
        lake.name = "Lake".to_string();
        lake.price = Money::from_units(4500);
        hub.wishlist_mut().add(lake).unwrap();

        assert_eq!(hub.share_wishlist(), "My Property Wishlist:\nLake - $4,500/night");
        assert_eq!(hub.format_money(Money::from_units(25405)), "$25,405");
    }

    #[test]
    fn test_default_currency_symbol() {
        let hub = StayHub::open(MemoryStorage::new(), StayConfig::in_memory()).unwrap();
        assert_eq!(hub.format_money(Money::from_units(299)), "₹299");
        assert_eq!(hub.share_wishlist(), hub.wishlist().share_text());
    }

    #[test]
    fn test_from_config_memory_backend() {
        let hub = StayHub::from_config(StayConfig::in_memory()).unwrap();
        assert!(hub.bookings().is_empty());
        assert_eq!(hub.pricing(), PricingPolicy::default());
    }
}
