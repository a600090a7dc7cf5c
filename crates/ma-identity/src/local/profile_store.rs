use crate::ProfileStore;
use crate::local::{LocalRecord, LocalState};

use ma_core::{Profile, StoreError, StoreResult};

use std::sync::Arc;

use async_trait::async_trait;

pub struct LocalProfileStore {
    state: Arc<LocalState>,
}

impl LocalProfileStore {
    pub(crate) fn new(state: Arc<LocalState>) -> Self {
        Self { state }
    }

    fn load(&self) -> StoreResult<Option<LocalRecord>> {
        self.state
            .record
            .load_or_discard::<LocalRecord>()
            .map_err(|e| StoreError::read(e.to_string()))
    }

    fn save(&self, record: &LocalRecord) -> StoreResult<()> {
        self.state
            .record
            .save(record)
            .map_err(|e| StoreError::write(e.to_string()))
    }
}

#[async_trait]
impl ProfileStore for LocalProfileStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Profile>> {
        Ok(self
            .load()?
            .filter(|record| record.matches(id))
            .map(|record| record.to_profile()))
    }

    async fn create(&self, profile: &Profile) -> StoreResult<()> {
        if !profile.id.eq_ignore_ascii_case(&profile.email) {
            return Err(StoreError::write(
                "local backend keys profiles by email; id must equal email",
            ));
        }

        self.save(&LocalRecord::from(profile))
    }

    async fn set_onboarded(&self, id: &str) -> StoreResult<()> {
        match self.load()? {
            Some(record) if record.matches(id) && record.onboarded => Ok(()),
            Some(mut record) if record.matches(id) => {
                record.onboarded = true;
                self.save(&record)
            }
            _ => Err(StoreError::write(format!("no local profile for {id}"))),
        }
    }
}
