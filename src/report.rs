//! Dashboard helpers over a listing. None of this touches the store.

use crate::core::{Identity, LegacyRecord, LegacyStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacyStats {
    pub total: usize,
    pub active: usize,
    pub inherited: usize,
    pub expired: usize,
}

impl LegacyStats {
    pub fn from_records(records: &[LegacyRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            match record.status() {
                LegacyStatus::Active => stats.active += 1,
                LegacyStatus::Inherited => stats.inherited += 1,
                LegacyStatus::Expired => stats.expired += 1,
            }
            stats
        })
    }

    /// Share of `status` in percent, 0 for an empty listing.
    pub fn percentage(&self, status: LegacyStatus) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = match status {
            LegacyStatus::Active => self.active,
            LegacyStatus::Inherited => self.inherited,
            LegacyStatus::Expired => self.expired,
        };
        count as f64 * 100.0 / self.total as f64
    }
}

/// Records whose owner matches `identity`, order preserved.
pub fn owned_by<'a>(records: &'a [LegacyRecord], identity: &Identity) -> Vec<&'a LegacyRecord> {
    records
        .iter()
        .filter(|record| identity.matches(record.owner()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, owner: &str, status: LegacyStatus) -> LegacyRecord {
        LegacyRecord::new(id, owner, "Digital Assets", "FHE-x", "0xB", "", 0, status)
    }

    #[test]
    fn test_stats() {
        let records = vec![
            record("1", "0xAAA", LegacyStatus::Active),
            record("2", "0xAAA", LegacyStatus::Inherited),
            record("3", "0xBBB", LegacyStatus::Active),
            record("4", "0xBBB", LegacyStatus::Expired),
        ];
        let stats = LegacyStats::from_records(&records);
        assert_eq!(
            stats,
            LegacyStats {
                total: 4,
                active: 2,
                inherited: 1,
                expired: 1
            }
        );
        assert_eq!(stats.percentage(LegacyStatus::Active), 50.0);
        assert_eq!(LegacyStats::default().percentage(LegacyStatus::Expired), 0.0);
    }

    #[test]
    fn test_owned_by_ignores_case() {
        let records = vec![
            record("1", "0xAbC", LegacyStatus::Active),
            record("2", "0xDEF", LegacyStatus::Active),
            record("3", "0xabc", LegacyStatus::Expired),
        ];
        let mine = owned_by(&records, &Identity::new("0xABC"));
        let ids: Vec<_> = mine.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
