use super::error::{LegacyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a legacy record. `Inherited` and `Expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyStatus {
    #[default]
    Active,
    Inherited,
    Expired,
}

impl LegacyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inherited => "inherited",
            Self::Expired => "expired",
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl fmt::Display for LegacyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegacyStatus {
    type Err = LegacyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(Self::Active),
            "inherited" => Ok(Self::Inherited),
            "expired" => Ok(Self::Expired),
            other => Err(LegacyError::decode(format!("unknown status '{}'", other))),
        }
    }
}

/// The two status-changing commands a record owner may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyTransition {
    Inherit,
    Expire,
}

impl LegacyTransition {
    pub fn target_status(self) -> LegacyStatus {
        match self {
            Self::Inherit => LegacyStatus::Inherited,
            Self::Expire => LegacyStatus::Expired,
        }
    }

    pub fn event_type(self) -> &'static str {
        match self {
            Self::Inherit => "legacy_inherited",
            Self::Expire => "legacy_expired",
        }
    }
}

/// Asset categories offered when a legacy is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    CryptoWallet,
    SocialMedia,
    FinancialAccount,
    DigitalAssets,
    PersonalDocuments,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 5] = [
        Self::CryptoWallet,
        Self::SocialMedia,
        Self::FinancialAccount,
        Self::DigitalAssets,
        Self::PersonalDocuments,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::CryptoWallet => "Crypto Wallet",
            Self::SocialMedia => "Social Media",
            Self::FinancialAccount => "Financial Account",
            Self::DigitalAssets => "Digital Assets",
            Self::PersonalDocuments => "Personal Documents",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How strictly `category` is checked at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryPolicy {
    /// Any non-empty string.
    #[default]
    Open,
    /// Only labels of [`AssetCategory`].
    Known,
}

/// Creation form for a legacy. Everything here is handed to the
/// confidentiality provider; only `category`, `beneficiary` and
/// `conditions` are also stored in the clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLegacy {
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub sensitive_info: String,
    pub beneficiary: String,
    #[serde(default)]
    pub conditions: String,
}

impl NewLegacy {
    pub fn new(
        category: impl Into<String>,
        sensitive_info: impl Into<String>,
        beneficiary: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            sensitive_info: sensitive_info.into(),
            beneficiary: beneficiary.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn conditions(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = conditions.into();
        self
    }

    /// Trims every field and checks the required ones.
    pub fn normalized(self, policy: CategoryPolicy) -> Result<Self> {
        let normalized = Self {
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
            sensitive_info: self.sensitive_info.trim().to_string(),
            beneficiary: self.beneficiary.trim().to_string(),
            conditions: self.conditions.trim().to_string(),
        };

        if normalized.category.is_empty() {
            return Err(LegacyError::validation("category is required"));
        }
        if normalized.sensitive_info.is_empty() {
            return Err(LegacyError::validation("sensitive information is required"));
        }
        if normalized.beneficiary.is_empty() {
            return Err(LegacyError::validation("beneficiary is required"));
        }
        if policy == CategoryPolicy::Known
            && AssetCategory::from_label(&normalized.category).is_none()
        {
            return Err(LegacyError::validation(format!(
                "unknown category '{}'",
                normalized.category
            )));
        }

        Ok(normalized)
    }
}

/// A single digital-legacy entry.
///
/// Only `status` changes after creation, and only through
/// [`LegacyRecord::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRecord {
    id: String,
    owner: String,
    category: String,
    encrypted_payload: String,
    beneficiary: String,
    inheritance_conditions: String,
    created_at: i64,
    status: LegacyStatus,
}

impl LegacyRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        owner: impl Into<String>,
        category: impl Into<String>,
        encrypted_payload: impl Into<String>,
        beneficiary: impl Into<String>,
        inheritance_conditions: impl Into<String>,
        created_at: i64,
        status: LegacyStatus,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            category: category.into(),
            encrypted_payload: encrypted_payload.into(),
            beneficiary: beneficiary.into(),
            inheritance_conditions: inheritance_conditions.into(),
            created_at,
            status,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn encrypted_payload(&self) -> &str {
        &self.encrypted_payload
    }

    pub fn beneficiary(&self) -> &str {
        &self.beneficiary
    }

    pub fn inheritance_conditions(&self) -> &str {
        &self.inheritance_conditions
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn status(&self) -> LegacyStatus {
        self.status
    }

    /// Moves an active record to the transition's terminal status.
    pub fn apply(&mut self, transition: LegacyTransition) -> Result<()> {
        if self.status != LegacyStatus::Active {
            return Err(LegacyError::InvalidState {
                id: self.id.clone(),
                status: self.status.to_string(),
            });
        }
        self.status = transition.target_status();
        Ok(())
    }
}
