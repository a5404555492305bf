use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw match request as submitted by the intake form
///
/// Enum-like fields stay as strings here; `core::normalizer` turns this
/// into a `MatchCriteria` or rejects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub blockchain: Option<String>,
    #[serde(rename = "projectType", default)]
    pub project_type: Option<String>,
    #[serde(rename = "budgetRange")]
    pub budget_range: BudgetRange,
    pub timeline: String,
    pub complexity: String,
}

/// Budget bounds in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

/// How soon the requester needs the audit to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeline {
    Asap,
    Normal,
    Flexible,
}

impl Timeline {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asap" => Some(Self::Asap),
            "normal" => Some(Self::Normal),
            "flexible" => Some(Self::Flexible),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Project categories known to the expertise scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Defi,
    Nft,
    Dao,
    Bridge,
    Layer2,
    Gaming,
    Infrastructure,
    Token,
}

impl ProjectType {
    /// Map a project-type key to its category. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "defi" => Some(Self::Defi),
            "nft" => Some(Self::Nft),
            "dao" => Some(Self::Dao),
            "bridge" => Some(Self::Bridge),
            "layer2" => Some(Self::Layer2),
            "gaming" => Some(Self::Gaming),
            "infrastructure" => Some(Self::Infrastructure),
            "token" => Some(Self::Token),
            _ => None,
        }
    }

    /// Specialization tags that define this category
    pub fn reference_tags(self) -> &'static [&'static str] {
        match self {
            Self::Defi => &["DeFi", "Smart Contracts"],
            Self::Nft => &["NFT", "Smart Contracts"],
            Self::Dao => &["DAO", "Governance"],
            Self::Bridge => &["Cross-chain", "Bridge"],
            Self::Layer2 => &["Layer 2", "ZK Proofs"],
            Self::Gaming => &["Gaming", "NFT"],
            Self::Infrastructure => &["Infrastructure", "Consensus"],
            Self::Token => &["Token", "Smart Contracts"],
        }
    }
}

/// Validated, canonical form of a `MatchRequest`
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCriteria {
    /// `None` means no ecosystem preference
    pub blockchain: Option<String>,
    pub project_type: Option<ProjectType>,
    pub budget_range: BudgetRange,
    pub timeline: Timeline,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
}

/// Service provider profile, supplied read-only by the provider directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "blockchainExpertise", default)]
    pub blockchain_expertise: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(rename = "yearsExperience", default)]
    pub years_experience: f64,
    pub availability: Availability,
    #[serde(rename = "maxConcurrentAudits")]
    pub max_concurrent_audits: u32,
    #[serde(rename = "currentAuditCount", default)]
    pub current_audit_count: u32,
    #[serde(rename = "hourlyRateMin")]
    pub hourly_rate_min: f64,
    #[serde(rename = "hourlyRateMax")]
    pub hourly_rate_max: f64,
    #[serde(rename = "responseTime")]
    pub response_time: String,
    #[serde(rename = "averageRating", default)]
    pub average_rating: f64,
    #[serde(rename = "totalAuditsCompleted", default)]
    pub total_audits_completed: u32,
}

impl ProviderProfile {
    /// Midpoint of the provider's hourly rate band
    pub fn average_hourly_rate(&self) -> f64 {
        (self.hourly_rate_min + self.hourly_rate_max) / 2.0
    }

    pub fn has_expertise_in(&self, blockchain: &str) -> bool {
        self.blockchain_expertise
            .iter()
            .any(|b| b.eq_ignore_ascii_case(blockchain))
    }

    pub fn has_specialization(&self, tag: &str) -> bool {
        self.specializations
            .iter()
            .any(|s| s.eq_ignore_ascii_case(tag))
    }

    /// Check the structural invariants a directory must uphold
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("provider id must not be empty".to_string());
        }
        if self.current_audit_count > self.max_concurrent_audits {
            return Err(format!(
                "provider {}: currentAuditCount {} exceeds maxConcurrentAudits {}",
                self.id, self.current_audit_count, self.max_concurrent_audits
            ));
        }
        if !(self.hourly_rate_min > 0.0 && self.hourly_rate_min <= self.hourly_rate_max) {
            return Err(format!(
                "provider {}: hourly rate band [{}, {}] is invalid",
                self.id, self.hourly_rate_min, self.hourly_rate_max
            ));
        }
        if !(0.0..=5.0).contains(&self.average_rating) {
            return Err(format!(
                "provider {}: averageRating {} outside 0-5",
                self.id, self.average_rating
            ));
        }
        Ok(())
    }
}

/// Per-axis compatibility scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub expertise: f64,
    pub availability: f64,
    pub budget: f64,
    pub timeline: f64,
}

/// One ranked provider with its scores and justifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "providerId")]
    pub provider_id: String,
    #[serde(rename = "compositeScore")]
    pub composite_score: f64,
    #[serde(rename = "dimensionScores")]
    pub dimension_scores: DimensionScores,
    pub reasons: Vec<String>,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub expertise: f64,
    pub availability: f64,
    pub budget: f64,
    pub timeline: f64,
}

impl ScoringWeights {
    /// The fixed weights used by the aggregator
    pub const FIXED: Self = Self {
        expertise: 0.40,
        availability: 0.25,
        budget: 0.20,
        timeline: 0.15,
    };

    pub fn sum(&self) -> f64 {
        self.expertise + self.availability + self.budget + self.timeline
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Coarse pre-filter handed to the provider directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CandidateFilter {
    /// Restrict to providers with expertise in this ecosystem
    pub blockchain: Option<String>,
}

impl CandidateFilter {
    pub fn for_criteria(criteria: &MatchCriteria) -> Self {
        Self {
            blockchain: criteria.blockchain.clone(),
        }
    }

    pub fn admits(&self, profile: &ProviderProfile) -> bool {
        match &self.blockchain {
            Some(chain) => profile.has_expertise_in(chain),
            None => true,
        }
    }
}

impl fmt::Display for CandidateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.blockchain {
            Some(chain) => write!(f, "blockchain={}", chain),
            None => write!(f, "all"),
        }
    }
}
