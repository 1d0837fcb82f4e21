use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Options for a seeding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOptions {
    /// Base seed; each entity gets its own stream derived from it.
    pub seed: u64,
    /// Number of synthetic suppliers.
    pub suppliers: usize,
    /// Number of synthetic deliveries.
    pub deliveries: usize,
    /// Deliveries are dated within `[today - window_days, today]`.
    pub window_days: u64,
    /// Lead times are drawn from `[1, max_delivery_days]`.
    pub max_delivery_days: i32,
    /// Quantities are drawn from `[1, max_quantity]`.
    pub max_quantity: i32,
    /// Last day of the delivery window.
    pub today: NaiveDate,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            suppliers: 4,
            deliveries: 22,
            window_days: 30,
            max_delivery_days: 7,
            max_quantity: 100,
            today: Local::now().date_naive(),
        }
    }
}

impl SeedOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.max_delivery_days < 1 {
            return Err(GenerationError::InvalidOptions(format!(
                "max_delivery_days must be at least 1, got {}",
                self.max_delivery_days
            )));
        }
        if self.max_quantity < 1 {
            return Err(GenerationError::InvalidOptions(format!(
                "max_quantity must be at least 1, got {}",
                self.max_quantity
            )));
        }
        if self.today.checked_sub_days(chrono::Days::new(self.window_days)).is_none() {
            return Err(GenerationError::InvalidOptions(format!(
                "window of {} days reaches before the earliest date",
                self.window_days
            )));
        }
        Ok(())
    }
}

/// Rows written by a seeding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedReport {
    pub seed: u64,
    pub suppliers: usize,
    pub materials: usize,
    pub deliveries: usize,
    pub duration_ms: u64,
}
