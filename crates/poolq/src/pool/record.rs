use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use vmobj::ObjectReference;

/// Priority level of a resource allocation share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharesLevel {
    Low,
    Normal,
    High,
    Custom,
}

impl Display for SharesLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SharesLevel::Low => write!(f, "Low"),
            SharesLevel::Normal => write!(f, "Normal"),
            SharesLevel::High => write!(f, "High"),
            SharesLevel::Custom => write!(f, "Custom"),
        }
    }
}

/// Wire form of shares. `shares` is only meaningful when `level` is `custom`,
/// so it stays undecoded until the level has been checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharesInfo {
    pub level: SharesLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<Value>,
}

/// Relative priority of a pool when its resource is contested.
///
/// `Level` never holds [`SharesLevel::Custom`], an explicit weight is always `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SharesInfo", into = "SharesInfo")]
pub enum Shares {
    Level(SharesLevel),
    Custom(i32),
}

impl Shares {
    pub fn level(&self) -> SharesLevel {
        match self {
            Shares::Level(level) => *level,
            Shares::Custom(_) => SharesLevel::Custom,
        }
    }
}

impl Default for Shares {
    fn default() -> Self {
        Shares::Level(SharesLevel::Normal)
    }
}

impl TryFrom<SharesInfo> for Shares {
    type Error = String;

    fn try_from(info: SharesInfo) -> Result<Self, Self::Error> {
        match info.level {
            SharesLevel::Custom => {
                let count = info
                    .shares
                    .ok_or_else(|| "custom shares without a share count".to_string())?;
                i32::deserialize(&count)
                    .map(Shares::Custom)
                    .map_err(|e| format!("invalid share count: {e}"))
            }
            level => Ok(Shares::Level(level)),
        }
    }
}

impl From<Shares> for SharesInfo {
    fn from(shares: Shares) -> Self {
        match shares {
            Shares::Level(level) => SharesInfo {
                level,
                shares: None,
            },
            Shares::Custom(count) => SharesInfo {
                level: SharesLevel::Custom,
                shares: Some(Value::from(count)),
            },
        }
    }
}

impl Display for Shares {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Shares::Level(level) => write!(f, "{level}"),
            Shares::Custom(count) => write!(f, "{} ({count})", SharesLevel::Custom),
        }
    }
}

pub const UNLIMITED: i64 = -1;

/// Configured allocation of one resource dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationInfo {
    pub shares: Shares,
    #[serde(default)]
    pub reservation: i64,
    #[serde(default = "unlimited")]
    pub limit: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expandable_reservation: Option<bool>,
}

fn unlimited() -> i64 {
    UNLIMITED
}

impl Default for AllocationInfo {
    fn default() -> Self {
        Self {
            shares: Shares::default(),
            reservation: 0,
            limit: UNLIMITED,
            expandable_reservation: None,
        }
    }
}

impl AllocationInfo {
    /// Only `-1` means unlimited, other negative values are kept as they are.
    pub fn is_unlimited(&self) -> bool {
        self.limit == UNLIMITED
    }

    /// Whether the reservation may borrow from the parent pool.
    /// An absent value reads as `false`.
    pub fn expandable(&self) -> bool {
        self.expandable_reservation.unwrap_or(false)
    }
}

/// Live usage counters of one resource dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    #[serde(default)]
    pub overall_usage: i64,
    #[serde(default)]
    pub max_usage: i64,
}

impl UsageSnapshot {
    /// Utilization in percent; `0.0` when there is no usage ceiling.
    pub fn utilization(&self) -> f64 {
        if self.max_usage == 0 {
            0.0
        } else {
            100.0 * self.overall_usage as f64 / self.max_usage as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceDimension {
    Cpu,
    Memory,
}

impl ResourceDimension {
    pub const ALL: [ResourceDimension; 2] = [ResourceDimension::Cpu, ResourceDimension::Memory];

    pub fn label(&self) -> &'static str {
        match self {
            ResourceDimension::Cpu => "CPU",
            ResourceDimension::Memory => "Mem",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ResourceDimension::Cpu => "MHz",
            ResourceDimension::Memory => "MB",
        }
    }
}

/// Typed view of one resource pool, built from a single retrieval.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePoolRecord {
    #[serde(rename = "self")]
    pub reference: ObjectReference,
    pub name: String,
    pub cpu_allocation: AllocationInfo,
    pub memory_allocation: AllocationInfo,
    pub cpu_usage: UsageSnapshot,
    pub memory_usage: UsageSnapshot,
    /// Complete delivered property set, only kept for full retrievals.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
}

impl ResourcePoolRecord {
    pub fn new(reference: ObjectReference) -> Self {
        Self {
            reference,
            name: String::new(),
            cpu_allocation: AllocationInfo::default(),
            memory_allocation: AllocationInfo::default(),
            cpu_usage: UsageSnapshot::default(),
            memory_usage: UsageSnapshot::default(),
            properties: BTreeMap::new(),
        }
    }

    pub fn allocation(&self, dimension: ResourceDimension) -> &AllocationInfo {
        match dimension {
            ResourceDimension::Cpu => &self.cpu_allocation,
            ResourceDimension::Memory => &self.memory_allocation,
        }
    }

    pub fn usage(&self, dimension: ResourceDimension) -> &UsageSnapshot {
        match dimension {
            ResourceDimension::Cpu => &self.cpu_usage,
            ResourceDimension::Memory => &self.memory_usage,
        }
    }
}
