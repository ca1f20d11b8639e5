//! # Domain Types
//!
//! Core domain types used throughout StayHub.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Property     │   │   StayRequest   │   │ PriceBreakdown  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  destination    │   │  nights         │       │
//! │  │  name, image    │   │  check_in/out   │   │  subtotal       │       │
//! │  │  price          │   │  rooms          │   │  discount       │       │
//! │  │  discount %     │   │  adults/children│   │  taxes, total   │       │
//! │  └────────┬────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │           └──────────────┬──────┴─────────────────────┘                │
//! │                          ▼                                              │
//! │                 ┌─────────────────┐    ┌─────────────────┐             │
//! │                 │  BookingRecord  │───►│  BookingStatus  │             │
//! │                 │  snapshot of    │    │  Confirmed      │             │
//! │                 │  all three      │    │  Cancelled      │             │
//! │                 └─────────────────┘    └─────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Layout
//! Every type here serializes to the camelCase JSON stored under the
//! `wishlist`, `myBookings` and `searchData` keys.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (GST on accommodation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Property
// =============================================================================

/// A bookable listing, owned by the listing data and only ever read here.
///
/// Wishlist entries use this exact shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Listing identifier; wishlist entries are unique by this.
    ///
    /// Listing data may carry it as a number; it is read into its decimal text.
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,

    pub name: String,

    /// Image URL.
    pub image: String,

    /// Current nightly rate.
    pub price: Money,

    pub location: String,

    /// Hotel, Villa, Resort, Apartment...
    #[serde(rename = "type")]
    pub property_type: String,

    pub rating: f64,

    pub reviews: u32,

    /// Discount percent advertised on the listing (e.g. 20 = 20% off).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,

    /// Nightly rate before the discount, when the listing states it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
}

impl Property {
    /// Returns the advertised discount percent, treating 0 as no discount.
    pub fn discount_percent(&self) -> Option<u8> {
        self.discount.filter(|d| *d > 0)
    }

    /// Returns the pre-discount nightly rate.
    ///
    /// Uses the explicit `original_price` when present, otherwise derives it
    /// from the discount percent: `round(price / (1 - discount/100))`.
    ///
    /// ## Example
    /// ```rust
    /// # use stayhub_core::{Money, Property};
    /// # let p = Property {
    /// #     id: "1".into(), name: "Sea View".into(), image: String::new(),
    /// #     price: Money::from_units(8000), location: "Goa".into(),
    /// #     property_type: "Resort".into(), rating: 4.5, reviews: 10,
    /// #     discount: Some(20), featured: None, original_price: None,
    /// # };
    /// // 8000 / 0.8 = 10000
    /// assert_eq!(p.original_price(), Some(Money::from_units(10000)));
    /// ```
    pub fn original_price(&self) -> Option<Money> {
        if let Some(original) = self.original_price {
            return Some(original);
        }

        let discount = self.discount_percent()?;
        if discount >= 100 {
            return None;
        }

        let remaining = 100 - discount as i64;
        let scaled = self.price.units() * 100;
        Some(Money::from_units((scaled * 2 + remaining) / (2 * remaining)))
    }
}

// =============================================================================
// Stay Request
// =============================================================================

/// Maximum rooms (and adults, and children) selectable in one stay request.
pub const MAX_OCCUPANCY: u32 = 10;

/// A user's desired destination, dates and occupancy.
///
/// Also persisted as the last submitted search under `searchData` so other
/// pages can prefill their forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct StayRequest {
    pub destination: String,

    #[serde(deserialize_with = "lenient_date")]
    #[ts(as = "Option<String>")]
    pub check_in: Option<NaiveDate>,

    #[serde(deserialize_with = "lenient_date")]
    #[ts(as = "Option<String>")]
    pub check_out: Option<NaiveDate>,

    pub rooms: u32,

    pub adults: u32,

    pub children: u32,
}

impl Default for StayRequest {
    /// One room, two adults, no dates: the search form's initial state.
    fn default() -> Self {
        StayRequest {
            destination: String::new(),
            check_in: None,
            check_out: None,
            rooms: 1,
            adults: 2,
            children: 0,
        }
    }
}

impl StayRequest {
    /// Creates a stay request for the given dates with one room and two adults.
    pub fn new(destination: impl Into<String>, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        StayRequest {
            destination: destination.into(),
            check_in: Some(check_in),
            check_out: Some(check_out),
            ..StayRequest::default()
        }
    }

    /// Number of nights between check-in and check-out.
    ///
    /// Whole days between the two dates, floored to 1. Missing dates or a
    /// check-out on/before check-in also count as one night, which is what
    /// the booking form displays while the user is still picking dates.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use stayhub_core::StayRequest;
    ///
    /// let stay = StayRequest::new(
    ///     "Goa",
    ///     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
    /// );
    /// assert_eq!(stay.nights(), 3);
    /// ```
    pub fn nights(&self) -> u32 {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => {
                let days = (check_out - check_in).num_days();
                if days > 0 {
                    days as u32
                } else {
                    1
                }
            }
            _ => 1,
        }
    }

    /// Total guests (adults + children).
    pub fn guest_count(&self) -> u32 {
        self.adults + self.children
    }

    /// Check-in as an instant (midnight UTC of the check-in date).
    pub fn check_in_at(&self) -> Option<DateTime<Utc>> {
        self.check_in.map(midnight_utc)
    }

    /// Check-out as an instant (midnight UTC of the check-out date).
    pub fn check_out_at(&self) -> Option<DateTime<Utc>> {
        self.check_out.map(midnight_utc)
    }

    /// Validates the request before it becomes a booking.
    ///
    /// See [`crate::validation::validate_stay_request`].
    pub fn validate_for_booking(&self) -> Result<(), ValidationError> {
        crate::validation::validate_stay_request(self)
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Accepts `null`, `""`, `"2024-03-15"` or a full ISO timestamp.
///
/// The search form stores an empty string for a date not yet picked; treating
/// that as a parse failure would discard the whole persisted collection.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(None),
    };

    let date_part = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(serde::de::Error::custom)
}

/// Accepts an identifier as a string or a whole number.
///
/// `7` and `"7"` both read as `"7"`, so membership checks work the same for
/// records written with numeric ids.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Signed(id) => id.to_string(),
        RawId::Unsigned(id) => id.to_string(),
    })
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Itemized cost of a stay request against a property.
///
/// Derived, never edited: recomputed from property + stay request on demand,
/// and frozen into the booking record at confirmation time.
///
/// ## Invariants
/// - `subtotal = price_per_night × nights × rooms`
/// - `total = subtotal − discount_amount + taxes + service_fee`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub nights: u32,
    pub price_per_night: Money,
    pub subtotal: Money,
    #[serde(rename = "discount", alias = "discountAmount")]
    pub discount_amount: Money,
    pub taxes: Money,
    pub service_fee: Money,
    pub total: Money,
}

// =============================================================================
// Booking Status
// =============================================================================

/// The lifecycle state of a booking.
///
/// ```text
///   create() ──► Confirmed ──cancel()──► Cancelled
///                    │                       │
///                    └───────delete()────────┴──► (removed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// =============================================================================
// Booking Record
// =============================================================================

/// A confirmed stay, frozen at booking time.
///
/// Uses the snapshot pattern: property name, image and location are copied in
/// so the booking list still renders if the listing changes or disappears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub booking_id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub property_id: String,
    pub property_name: String,
    /// Empty for records saved before the image was snapshotted.
    #[serde(default)]
    pub property_image: String,
    #[serde(default)]
    pub property_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(rename = "searchData", alias = "stayRequest")]
    pub stay_request: StayRequest,
    #[serde(rename = "priceDetails", alias = "priceBreakdown")]
    pub price_breakdown: PriceBreakdown,
    #[ts(as = "String")]
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
}

impl BookingRecord {
    /// Confirmed and checking in after `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == BookingStatus::Confirmed
            && self.stay_request.check_in_at().is_some_and(|at| at > now)
    }

    /// Confirmed and checked out before `now`.
    pub fn is_completed(&self, now: DateTime<Utc>) -> bool {
        self.status == BookingStatus::Confirmed
            && self.stay_request.check_out_at().is_some_and(|at| at < now)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Whether the booking falls under `filter` at instant `now`.
    ///
    /// A confirmed stay in progress (`check_in <= now <= check_out`) matches
    /// neither `Upcoming` nor `Completed`.
    pub fn matches(&self, filter: BookingFilter, now: DateTime<Utc>) -> bool {
        match filter {
            BookingFilter::All => true,
            BookingFilter::Upcoming => self.is_upcoming(now),
            BookingFilter::Completed => self.is_completed(now),
            BookingFilter::Cancelled => self.is_cancelled(),
        }
    }

    /// Only upcoming confirmed stays offer a cancel action.
    pub fn is_cancellable(&self, now: DateTime<Utc>) -> bool {
        self.is_upcoming(now)
    }

    /// Badge shown on the booking card.
    ///
    /// Unlike the list filters, the badge classifies every confirmed stay:
    /// anything not checking in after `now` shows as completed.
    pub fn status_badge(&self, now: DateTime<Utc>) -> StatusBadge {
        if self.is_cancelled() {
            StatusBadge::Cancelled
        } else if self.is_upcoming(now) {
            StatusBadge::Upcoming
        } else {
            StatusBadge::Completed
        }
    }
}

/// Card badge for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum StatusBadge {
    Upcoming,
    Completed,
    Cancelled,
}

impl StatusBadge {
    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::Upcoming => "Upcoming",
            StatusBadge::Completed => "Completed",
            StatusBadge::Cancelled => "Cancelled",
        }
    }
}

// =============================================================================
// Booking Filter & Stats
// =============================================================================

/// Tabs of the "My Bookings" page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BookingFilter {
    #[default]
    All,
    Upcoming,
    Completed,
    Cancelled,
}

impl fmt::Display for BookingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingFilter::All => write!(f, "all"),
            BookingFilter::Upcoming => write!(f, "upcoming"),
            BookingFilter::Completed => write!(f, "completed"),
            BookingFilter::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for BookingFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(BookingFilter::All),
            "upcoming" => Ok(BookingFilter::Upcoming),
            "completed" => Ok(BookingFilter::Completed),
            "cancelled" | "canceled" => Ok(BookingFilter::Cancelled),
            other => Err(ValidationError::InvalidFormat {
                field: "filter".to_string(),
                reason: format!(
                    "unknown filter '{}'; expected all, upcoming, completed or cancelled",
                    other
                ),
            }),
        }
    }
}

/// Counts per booking tab.
///
/// `upcoming + completed + cancelled` may be less than `total`: stays in
/// progress belong to neither time-based tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total: usize,
    pub upcoming: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl BookingStats {
    /// Tallies `records` at instant `now`.
    pub fn tally<'a>(
        records: impl IntoIterator<Item = &'a BookingRecord>,
        now: DateTime<Utc>,
    ) -> Self {
        records
            .into_iter()
            .fold(BookingStats::default(), |mut stats, record| {
                stats.total += 1;
                if record.is_upcoming(now) {
                    stats.upcoming += 1;
                }
                if record.is_completed(now) {
                    stats.completed += 1;
                }
                if record.is_cancelled() {
                    stats.cancelled += 1;
                }
                stats
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(check_in: NaiveDate, check_out: NaiveDate, status: BookingStatus) -> BookingRecord {
        BookingRecord {
            booking_id: "BK-1".to_string(),
            property_id: "7".to_string(),
            property_name: "Grand Luxury Resort & Spa".to_string(),
            property_image: "resort.jpg".to_string(),
            property_location: "Goa".to_string(),
            property_type: None,
            stay_request: StayRequest::new("Goa", check_in, check_out),
            price_breakdown: PriceBreakdown {
                nights: 3,
                price_per_night: Money::from_units(100),
                subtotal: Money::from_units(300),
                discount_amount: Money::zero(),
                taxes: Money::from_units(54),
                service_fee: Money::from_units(299),
                total: Money::from_units(653),
            },
            booking_date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            status,
        }
    }

    #[test]
    fn test_nights_between_dates() {
        let stay = StayRequest::new("Goa", date(2024, 3, 15), date(2024, 3, 18));
        assert_eq!(stay.nights(), 3);
    }

    #[test]
    fn test_nights_clamped_to_one() {
        let same_day = StayRequest::new("Goa", date(2024, 3, 15), date(2024, 3, 15));
        assert_eq!(same_day.nights(), 1);

        let reversed = StayRequest::new("Goa", date(2024, 3, 18), date(2024, 3, 15));
        assert_eq!(reversed.nights(), 1);

        assert_eq!(StayRequest::default().nights(), 1);
    }

    #[test]
    fn test_stay_request_accepts_empty_date_strings() {
        let json = r#"{"destination":"Goa","checkIn":"","checkOut":"2024-03-18","rooms":2,"adults":2,"children":1}"#;
        let stay: StayRequest = serde_json::from_str(json).unwrap();
        assert_eq!(stay.check_in, None);
        assert_eq!(stay.check_out, Some(date(2024, 3, 18)));
        assert_eq!(stay.guest_count(), 3);
    }

    #[test]
    fn test_stay_request_accepts_iso_timestamps() {
        let json = r#"{"checkIn":"2024-03-15T00:00:00.000Z"}"#;
        let stay: StayRequest = serde_json::from_str(json).unwrap();
        assert_eq!(stay.check_in, Some(date(2024, 3, 15)));
        assert_eq!(stay.rooms, 1);
    }

    #[test]
    fn test_property_serializes_type_field() {
        let property = Property {
            id: "1".to_string(),
            name: "Lake House".to_string(),
            image: "lake.jpg".to_string(),
            price: Money::from_units(4500),
            location: "Udaipur".to_string(),
            property_type: "Villa".to_string(),
            rating: 4.7,
            reviews: 128,
            discount: None,
            featured: Some(true),
            original_price: None,
        };
        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["type"], "Villa");
        assert_eq!(json["price"], 4500);
        assert!(json.get("discount").is_none());
        assert_eq!(property.original_price(), None);
    }

    #[test]
    fn test_property_explicit_original_price_wins() {
        let json = r#"{"id":"7","name":"Resort","image":"","price":8999,"location":"Goa",
            "type":"Resort","rating":4.8,"reviews":2847,"discount":20,"originalPrice":11249}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.original_price(), Some(Money::from_units(11249)));
        assert_eq!(property.discount_percent(), Some(20));
    }

    #[test]
    fn test_property_accepts_numeric_id() {
        let json = r#"{"id":1,"name":"Grand Luxury Resort & Spa","image":"resort.jpg",
            "price":8999,"location":"Goa","type":"Resort","rating":4.8,"reviews":1247}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.id, "1");
        assert_eq!(property.price.units(), 8999);

        // Written back as a string; the next read still matches.
        let written = serde_json::to_value(&property).unwrap();
        assert_eq!(written["id"], "1");
    }

    #[test]
    fn test_property_rejects_fractional_id() {
        let json = r#"{"id":1.5,"name":"Resort","image":"","price":8999,"location":"Goa",
            "type":"Resort","rating":4.8,"reviews":1}"#;
        assert!(serde_json::from_str::<Property>(json).is_err());
    }

    #[test]
    fn test_booking_record_reads_booking_page_layout() {
        // Numeric property id, float taxes and total, no image or location.
        let json = r#"{
            "bookingId": "BK12345678",
            "propertyId": 1,
            "propertyName": "Grand Luxury Resort & Spa",
            "searchData": {"destination":"Goa","checkIn":"2024-03-15","checkOut":"2024-03-18",
                "rooms":1,"adults":2,"children":0},
            "priceDetails": {"nights":3,"pricePerNight":8999,"subtotal":26997,"discount":6750,
                "taxes":4859.46,"serviceFee":299,"total":32155.46},
            "bookingDate": "2024-03-01T09:00:00.000Z",
            "status": "confirmed"
        }"#;
        let record: BookingRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.booking_id, "BK12345678");
        assert_eq!(record.property_id, "1");
        assert_eq!(record.property_image, "");
        assert_eq!(record.price_breakdown.taxes.units(), 4859);
        assert_eq!(record.price_breakdown.total.units(), 32155);
        assert_eq!(record.stay_request.nights(), 3);
    }

    #[test]
    fn test_upcoming_and_completed_partition() {
        let now = Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap();

        let future = record(date(2024, 4, 1), date(2024, 4, 3), BookingStatus::Confirmed);
        assert!(future.matches(BookingFilter::Upcoming, now));
        assert!(!future.matches(BookingFilter::Completed, now));

        let past = record(date(2024, 3, 1), date(2024, 3, 3), BookingStatus::Confirmed);
        assert!(past.matches(BookingFilter::Completed, now));

        let cancelled = record(date(2024, 4, 1), date(2024, 4, 3), BookingStatus::Cancelled);
        assert!(cancelled.matches(BookingFilter::Cancelled, now));
        assert!(!cancelled.matches(BookingFilter::Upcoming, now));
    }

    #[test]
    fn test_stay_in_progress_is_unclassified() {
        let now = Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap();
        let ongoing = record(date(2024, 3, 15), date(2024, 3, 18), BookingStatus::Confirmed);

        assert!(!ongoing.matches(BookingFilter::Upcoming, now));
        assert!(!ongoing.matches(BookingFilter::Completed, now));
        assert!(ongoing.matches(BookingFilter::All, now));
        // The card badge still needs something to show.
        assert_eq!(ongoing.status_badge(now), StatusBadge::Completed);
        assert!(!ongoing.is_cancellable(now));
    }

    #[test]
    fn test_stats_tally() {
        let now = Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap();
        let records = vec![
            record(date(2024, 4, 1), date(2024, 4, 3), BookingStatus::Confirmed),
            record(date(2024, 3, 1), date(2024, 3, 3), BookingStatus::Confirmed),
            record(date(2024, 3, 15), date(2024, 3, 18), BookingStatus::Confirmed),
            record(date(2024, 4, 1), date(2024, 4, 3), BookingStatus::Cancelled),
        ];

        let stats = BookingStats::tally(&records, now);
        assert_eq!(
            stats,
            BookingStats {
                total: 4,
                upcoming: 1,
                completed: 1,
                cancelled: 1,
            }
        );
    }

    #[test]
    fn test_booking_record_uses_persisted_key_names() {
        let json = serde_json::to_value(record(
            date(2024, 3, 15),
            date(2024, 3, 18),
            BookingStatus::Confirmed,
        ))
        .unwrap();

        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["searchData"]["checkIn"], "2024-03-15");
        assert_eq!(json["priceDetails"]["discount"], 0);
        assert_eq!(json["priceDetails"]["serviceFee"], 299);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("upcoming".parse::<BookingFilter>().unwrap(), BookingFilter::Upcoming);
        assert_eq!("".parse::<BookingFilter>().unwrap(), BookingFilter::All);
        assert_eq!("Canceled".parse::<BookingFilter>().unwrap(), BookingFilter::Cancelled);
        assert!("ongoing".parse::<BookingFilter>().is_err());
        assert_eq!(BookingFilter::Completed.to_string(), "completed");
    }
}
