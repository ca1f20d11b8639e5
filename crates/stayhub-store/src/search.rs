//! Last submitted search, kept under `searchData` so other pages can prefill
//! their forms.

use stayhub_core::{StayRequest, SEARCH_DATA_KEY};
use tracing::debug;

use crate::error::StoreResult;
use crate::persist::{load_value, save_value};
use crate::storage::KeyValueStorage;

#[derive(Debug)]
pub struct LastSearchStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> LastSearchStore<S> {
    pub fn new(storage: S) -> Self {
        LastSearchStore { storage }
    }

    /// Overwrites the last search with `stay`.
    pub fn save(&self, stay: &StayRequest) -> StoreResult<()> {
        debug!(destination = %stay.destination, "Saving last search");
        save_value(&self.storage, SEARCH_DATA_KEY, stay)
    }

    /// The last search, or `None` if nothing readable is stored.
    pub fn load(&self) -> Option<StayRequest> {
        load_value(&self.storage, SEARCH_DATA_KEY)
    }

    /// The last search, or the form's initial state.
    pub fn load_or_default(&self) -> StayRequest {
        self.load().unwrap_or_default()
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.storage.remove_item(SEARCH_DATA_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    #[test]
    fn test_save_load_clear() {
        let searches = LastSearchStore::new(MemoryStorage::new());
        assert!(searches.load().is_none());
        assert_eq!(searches.load_or_default().adults, 2);

        let stay = StayRequest::new(
            "Manali",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
        );
        searches.save(&stay).unwrap();
        assert_eq!(searches.load(), Some(stay));

        searches.clear().unwrap();
        assert!(searches.load().is_none());
    }

    #[test]
    fn test_loads_form_data_with_blank_dates() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                SEARCH_DATA_KEY,
                r#"{"destination":"Jaipur","checkIn":"","checkOut":"","rooms":2,"adults":3,"children":1}"#,
            )
            .unwrap();

        let stay = LastSearchStore::new(storage).load().unwrap();
        assert_eq!(stay.destination, "Jaipur");
        assert_eq!(stay.check_in, None);
        assert_eq!(stay.rooms, 2);
    }
}
