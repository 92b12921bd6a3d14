//! Correlation lookup: calendar event id → existing record.

use tracing::{debug, warn};

use crate::constants::PROP_GCAL_ID;
use crate::ports::{RecordFilter, RecordStore};
use crate::record::RecordId;

pub struct CorrelationResolver<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> CorrelationResolver<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Id of the first non-archived record whose GCAL ID equals `event_id`.
    ///
    /// A failed query is reported as "not found". The caller may then create
    /// a duplicate instead of updating; a failed lookup never aborts a pass.
    pub async fn resolve(&self, event_id: &str) -> Option<RecordId> {
        let filter = RecordFilter::Equals {
            property: PROP_GCAL_ID.to_string(),
            value: event_id.to_string(),
        };

        match self.store.query(&filter).await {
            Ok(records) => {
                debug!(event_id, matches = records.len(), "correlation lookup");
                records.into_iter().next().map(|r| r.id)
            }
            Err(e) => {
                warn!(event_id, error = %e, "correlation lookup failed, treating as not found");
                None
            }
        }
    }
}
