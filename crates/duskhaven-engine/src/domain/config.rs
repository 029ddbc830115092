//! Engine tuning knobs.

use duskhaven_core::ids::LocationId;
use duskhaven_inventory::domain::inventory::InventoryLimits;
use serde::{Deserialize, Serialize};

/// Configuration for one `GameWorld`. Delays are in virtual milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where new actors appear and where actors with an unknown location go.
    pub start_location: LocationId,
    /// Where dead actors wake up.
    pub safe_location: LocationId,
    pub limits: InventoryLimits,
    pub counter_attack_delay_ms: u64,
    pub death_display_delay_ms: u64,
    pub dialogue_delay_ms: u64,
    pub aggro_delay_ms: u64,
    pub idle_timeout_ms: u64,
    /// Share of max health a dead actor comes back with.
    pub death_heal_fraction: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_location: LocationId::from("square"),
            safe_location: LocationId::from("temple"),
            limits: InventoryLimits::default(),
            counter_attack_delay_ms: 1_500,
            death_display_delay_ms: 2_000,
            dialogue_delay_ms: 1_000,
            aggro_delay_ms: 1_500,
            idle_timeout_ms: 30 * 60 * 1_000,
            death_heal_fraction: 0.5,
        }
    }
}
