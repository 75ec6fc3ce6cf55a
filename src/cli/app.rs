use super::args::{Cli, Command};
use anyhow::{Context, Result, anyhow};
use chrono::DateTime;
use legacyvault::{AssetCategory, CategoryPolicy, LegacyRecord, LegacyVault, NewLegacy, VaultConfig};
use std::fs;
use std::time::Duration;

pub struct App {
    config: VaultConfig,
    caller: Option<String>,
}

impl App {
    /// Applies command line overrides on top of the environment config.
    pub fn new(mut config: VaultConfig, cli: &Cli) -> Self {
        if let Some(path) = &cli.data {
            config = config.data_path(path.clone());
        }
        if let Some(millis) = cli.verify_delay_ms {
            config = config.verify_delay(Duration::from_millis(millis));
        }
        if cli.strict_categories {
            config = config.category_policy(CategoryPolicy::Known);
        }
        Self {
            config,
            caller: cli.caller.clone(),
        }
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Categories => {
                for category in AssetCategory::ALL {
                    println!("{}", category);
                }
                Ok(())
            }
            Command::Create {
                category,
                beneficiary,
                secret,
                description,
                conditions,
            } => {
                let vault = self.vault(true)?;
                let fields = NewLegacy::new(category, secret, beneficiary)
                    .description(description)
                    .conditions(conditions);
                let id = vault.create(fields).await?;
                println!("Created legacy {}", id);
                Ok(())
            }
            Command::List { mine } => {
                let vault = self.vault(mine)?;
                let records = if mine {
                    vault.list_mine().await?
                } else {
                    vault.list().await?
                };
                if records.is_empty() {
                    println!("No legacies found");
                }
                for record in &records {
                    println!("{}", summary_line(record));
                }
                Ok(())
            }
            Command::Show { id } => {
                let record = self.vault(false)?.get(&id).await?;
                print_record(&record);
                Ok(())
            }
            Command::Inherit { id } => {
                let record = self.vault(true)?.trigger_inheritance(&id).await?;
                println!("Legacy {} is now {}", record.id(), record.status());
                Ok(())
            }
            Command::Expire { id } => {
                let record = self.vault(true)?.expire(&id).await?;
                println!("Legacy {} is now {}", record.id(), record.status());
                Ok(())
            }
            Command::Stats => {
                let stats = self.vault(false)?.stats().await?;
                println!("Total:     {}", stats.total);
                println!("Active:    {}", stats.active);
                println!("Inherited: {}", stats.inherited);
                println!("Expired:   {}", stats.expired);
                Ok(())
            }
            Command::Audit => {
                let audit = self.vault(false)?.audit().await?;
                println!("Indexed entries: {}", audit.indexed);
                if audit.is_clean() {
                    println!("Index is consistent");
                }
                for id in &audit.dangling {
                    println!("dangling:    {}", id);
                }
                for id in &audit.undecodable {
                    println!("undecodable: {}", id);
                }
                for id in &audit.duplicates {
                    println!("duplicate:   {}", id);
                }
                Ok(())
            }
        }
    }

    fn vault(&self, caller_required: bool) -> Result<LegacyVault> {
        let caller = match (&self.caller, caller_required) {
            (Some(caller), _) => caller.clone(),
            (None, false) => String::new(),
            (None, true) => return Err(anyhow!("--caller (or LEGACY_VAULT_CALLER) is required")),
        };

        if let Some(parent) = self.config.data_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create data directory '{}'", parent.display())
                })?;
            }
        }

        LegacyVault::open(&self.config, caller).with_context(|| {
            format!("Failed to open store '{}'", self.config.data_path.display())
        })
    }
}

fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

fn summary_line(record: &LegacyRecord) -> String {
    format!(
        "{}  {:<18}  {:<10}  {}  owner={}",
        record.id(),
        record.category(),
        record.status(),
        format_date(record.created_at()),
        record.owner()
    )
}

fn print_record(record: &LegacyRecord) {
    println!("Id:          {}", record.id());
    println!("Owner:       {}", record.owner());
    println!("Category:    {}", record.category());
    println!("Beneficiary: {}", record.beneficiary());
    println!("Conditions:  {}", record.inheritance_conditions());
    println!("Created:     {}", format_date(record.created_at()));
    println!("Status:      {}", record.status());
    println!("Payload:     {}", record.encrypted_payload());
}
