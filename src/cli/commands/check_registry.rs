//! Check-registry command implementation

use super::{report_failure, EXIT_SUCCESS};
use crate::core::reconcile::IndexSettings;
use crate::core::registry::{verify_registry, INDEX_SETTING_KEYS};
use clap::Args;

/// Arguments for the check-registry command
#[derive(Args, Debug, Default)]
pub struct CheckRegistryArgs {
    /// List every registered key
    #[arg(long)]
    pub list: bool,
}

impl CheckRegistryArgs {
    /// Execute the check-registry command
    ///
    /// Needs no configuration or cluster.
    pub async fn execute(&self) -> anyhow::Result<i32> {
        println!("🔍 Checking setting key registry");
        println!();

        if let Err(e) = verify_registry::<IndexSettings>(&INDEX_SETTING_KEYS) {
            return Ok(report_failure("Registry check", &e.into()));
        }

        println!("✅ Registry matches the settings record");
        println!();
        println!("  Static keys: {}", INDEX_SETTING_KEYS.static_keys().len());
        println!("  Dynamic keys: {}", INDEX_SETTING_KEYS.dynamic_keys().len());
        println!("  Total: {}", INDEX_SETTING_KEYS.len());

        if self.list {
            println!();
            println!("Static:");
            for key in INDEX_SETTING_KEYS.static_keys() {
                println!("  {key}");
            }
            println!("Dynamic:");
            for key in INDEX_SETTING_KEYS.dynamic_keys() {
                println!("  {key}");
            }
        }
        println!();

        Ok(EXIT_SUCCESS)
    }
}
