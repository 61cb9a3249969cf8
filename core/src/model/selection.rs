use anyhow::{anyhow, Result};
use chrono::Month;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ManagerType {
    #[default]
    RBM,
    ZBM,
    ABM,
}

impl ManagerType {
    pub const ALL: [ManagerType; 3] = [ManagerType::RBM, ManagerType::ZBM, ManagerType::ABM];

    pub fn as_str(self) -> &'static str {
        match self {
            ManagerType::RBM => "RBM",
            ManagerType::ZBM => "ZBM",
            ManagerType::ABM => "ABM",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ManagerType::RBM => ManagerType::ZBM,
            ManagerType::ZBM => ManagerType::ABM,
            ManagerType::ABM => ManagerType::RBM,
        }
    }
}

impl fmt::Display for ManagerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManagerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "RBM" => Ok(ManagerType::RBM),
            "ZBM" => Ok(ManagerType::ZBM),
            "ABM" => Ok(ManagerType::ABM),
            _ => Err(anyhow!("Unknown manager type: '{}' (expected RBM, ZBM or ABM)", s)),
        }
    }
}

/// Week of the month a sheet was filed under. "All" is expressed as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week(u8);

impl Week {
    pub const MAX: u8 = 5;

    pub fn new(n: u8) -> Result<Self> {
        if (1..=Self::MAX).contains(&n) {
            Ok(Week(n))
        } else {
            Err(anyhow!("Week must be between 1 and {}, got {}", Self::MAX, n))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// All → Week 1 → … → Week 5 → All.
    pub fn cycle(current: Option<Week>) -> Option<Week> {
        match current {
            None => Some(Week(1)),
            Some(Week(n)) if n < Self::MAX => Some(Week(n + 1)),
            Some(_) => None,
        }
    }

    pub fn label(week: Option<Week>) -> String {
        week.map(|w| w.to_string()).unwrap_or_else(|| "All".to_string())
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Week {}", self.0)
    }
}

impl FromStr for Week {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("Week")
            .or_else(|| trimmed.strip_prefix("week"))
            .unwrap_or(trimmed)
            .trim();
        let n: u8 = digits.parse().map_err(|_| anyhow!("Invalid week: '{}'", s))?;
        Week::new(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Latest,
    Monthly {
        year: i32,
        month: Month,
        week: Option<Week>,
    },
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Latest
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Latest => f.write_str("Latest Data"),
            Timeframe::Monthly { year, month, week } => {
                write!(f, "{} {} ({})", month.name(), year, Week::label(*week))
            }
        }
    }
}

/// What the dashboard is currently looking at. Immutable: every change
/// produces a new value, and the record set is refetched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub manager_type: ManagerType,
    pub brand_id: String,
    pub timeframe: Timeframe,
}

impl Selection {
    pub fn latest(brand_id: impl Into<String>, manager_type: ManagerType) -> Self {
        Self {
            manager_type,
            brand_id: brand_id.into(),
            timeframe: Timeframe::Latest,
        }
    }

    pub fn with_manager_type(&self, manager_type: ManagerType) -> Self {
        Self {
            manager_type,
            ..self.clone()
        }
    }

    pub fn with_timeframe(&self, timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            ..self.clone()
        }
    }

    /// Query parameters for the backend listing that matches this selection.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("managerType", self.manager_type.to_string())];
        match &self.timeframe {
            Timeframe::Latest => {
                params.push(("brandId", self.brand_id.clone()));
            }
            Timeframe::Monthly { year, month, week } => {
                params.push(("year", year.to_string()));
                params.push(("month", month.name().to_string()));
                params.push(("brandId", self.brand_id.clone()));
                if let Some(w) = week {
                    params.push(("week", w.to_string()));
                }
            }
        }
        params
    }
}
