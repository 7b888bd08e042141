use std::fmt;

/// Hosting plan the site runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingPlan {
    pub tier: PlanTier,
    /// Number of instances the plan is scaled to, as reported. Not clamped:
    /// zero or a negative count is neither single nor multi-instance.
    pub capacity: i64,
    pub zone_redundant: bool,
}

impl Default for HostingPlan {
    fn default() -> Self {
        Self {
            tier: PlanTier::Unknown,
            capacity: 1,
            zone_redundant: false,
        }
    }
}

/// Pricing tier of a hosting plan.
///
/// `Unknown` is a missing or empty tier. It is neither free/shared nor
/// dedicated, so tier-gated checks stay silent for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PlanTier {
    #[default]
    Unknown,
    Free,
    Shared,
    Basic,
    Standard,
    Premium,
    PremiumV2,
    PremiumV3,
    /// Any other named tier (Isolated, ElasticPremium, Dynamic, ...), stored
    /// lowercased.
    Other(String),
}

impl PlanTier {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" => Self::Unknown,
            "free" => Self::Free,
            "shared" => Self::Shared,
            "basic" => Self::Basic,
            "standard" => Self::Standard,
            "premium" => Self::Premium,
            "premiumv2" => Self::PremiumV2,
            "premiumv3" => Self::PremiumV3,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_free_or_shared(&self) -> bool {
        matches!(self, Self::Free | Self::Shared)
    }

    /// A known tier with dedicated compute (anything but free/shared).
    pub fn is_dedicated(&self) -> bool {
        !matches!(self, Self::Unknown | Self::Free | Self::Shared)
    }

    /// Standard and Premium tiers, where backups and deployment slots exist.
    pub fn is_standard_or_premium(&self) -> bool {
        matches!(
            self,
            Self::Standard | Self::Premium | Self::PremiumV2 | Self::PremiumV3
        )
    }

    pub fn supports_zone_redundancy(&self) -> bool {
        matches!(self, Self::PremiumV2 | Self::PremiumV3)
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Free => write!(f, "free"),
            Self::Shared => write!(f, "shared"),
            Self::Basic => write!(f, "basic"),
            Self::Standard => write!(f, "standard"),
            Self::Premium => write!(f, "premium"),
            Self::PremiumV2 => write!(f, "premiumv2"),
            Self::PremiumV3 => write!(f, "premiumv3"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}
