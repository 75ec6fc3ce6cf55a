use super::provider::ConfidentialityProvider;
use super::session::Session;
use super::verifier::{ConditionVerifier, ImmediateVerifier};
use crate::core::{
    CategoryPolicy, LegacyError, LegacyRecord, LegacyStatus, LegacyTransition, NewLegacy, Result,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Owns the record state machine: `active -> inherited` and
/// `active -> expired`, both terminal, both owner-only.
#[derive(Clone)]
pub struct LifecycleManager {
    provider: Arc<dyn ConfidentialityProvider>,
    verifier: Arc<dyn ConditionVerifier>,
    category_policy: CategoryPolicy,
}

impl LifecycleManager {
    pub fn new(provider: Arc<dyn ConfidentialityProvider>) -> Self {
        Self {
            provider,
            verifier: Arc::new(ImmediateVerifier),
            category_policy: CategoryPolicy::default(),
        }
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn ConditionVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_category_policy(mut self, policy: CategoryPolicy) -> Self {
        self.category_policy = policy;
        self
    }

    pub fn category_policy(&self) -> CategoryPolicy {
        self.category_policy
    }

    /// Registers a new active record owned by the session's caller and
    /// returns its id.
    ///
    /// The payload is written before the index entry. If the index write
    /// fails the record exists but is not listed; the error is returned and
    /// the caller may retry with [`LegacyStore::register_record`](crate::facade::LegacyStore::register_record).
    pub async fn create(&self, session: &Session, fields: NewLegacy) -> Result<String> {
        if session.caller().is_empty() {
            return Err(LegacyError::validation("caller identity is required"));
        }
        let fields = fields.normalized(self.category_policy)?;
        session.store().ensure_available().await?;

        let encrypted_payload = self.provider.protect(&fields).await?;
        let record = LegacyRecord::new(
            generate_legacy_id(),
            session.caller().as_str(),
            fields.category,
            encrypted_payload,
            fields.beneficiary,
            fields.conditions,
            Utc::now().timestamp(),
            LegacyStatus::Active,
        );

        session.store().register_record(&record).await?;
        info!(
            id = record.id(),
            owner = record.owner(),
            category = record.category(),
            "legacy created"
        );
        Ok(record.id().to_string())
    }

    /// Marks the record inherited once the external condition check passes.
    pub async fn trigger_inheritance(&self, session: &Session, id: &str) -> Result<LegacyRecord> {
        self.transition(session, id, LegacyTransition::Inherit).await
    }

    pub async fn expire(&self, session: &Session, id: &str) -> Result<LegacyRecord> {
        self.transition(session, id, LegacyTransition::Expire).await
    }

    /// All records of all owners, newest first.
    pub async fn list(&self, session: &Session) -> Result<Vec<LegacyRecord>> {
        session.store().list_all().await
    }

    pub async fn get(&self, session: &Session, id: &str) -> Result<LegacyRecord> {
        session
            .store()
            .load(id)
            .await?
            .ok_or_else(|| LegacyError::not_found(id))
    }

    async fn transition(
        &self,
        session: &Session,
        id: &str,
        transition: LegacyTransition,
    ) -> Result<LegacyRecord> {
        let mut record = self.get(session, id).await?;

        if !session.caller().matches(record.owner()) {
            return Err(LegacyError::Unauthorized {
                id: id.to_string(),
                caller: session.caller().to_string(),
            });
        }
        if record.status().is_terminal() {
            return Err(LegacyError::InvalidState {
                id: id.to_string(),
                status: record.status().to_string(),
            });
        }

        if transition == LegacyTransition::Inherit {
            debug!(id, "awaiting condition verification");
            if !self.verifier.verify(&record).await? {
                return Err(LegacyError::ConditionsUnmet(id.to_string()));
            }
        }

        record.apply(transition)?;
        session.store().update_status(id, record.status()).await?;
        info!(
            id,
            owner = record.owner(),
            event = transition.event_type(),
            status = %record.status(),
            "legacy status changed"
        );
        Ok(record)
    }
}

/// `<unix-millis>-<uuid>`: time-ordered prefix, random suffix.
fn generate_legacy_id() -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple())
}
