use crate::error::{GramSathiError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeCategory {
    Agriculture,
    Health,
    Business,
}

impl SchemeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeCategory::Agriculture => "agriculture",
            SchemeCategory::Health => "health",
            SchemeCategory::Business => "business",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "agriculture" => Some(SchemeCategory::Agriculture),
            "health" => Some(SchemeCategory::Health),
            "business" => Some(SchemeCategory::Business),
            _ => None,
        }
    }
}

impl std::fmt::Display for SchemeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Scheme {
    pub id: &'static str,
    pub name: &'static str,
    pub category: SchemeCategory,
    pub description: &'static str,
    pub benefits: &'static str,
    pub eligibility: &'static str,
    pub documents: &'static [&'static str],
    pub application_process: &'static str,
}

impl Scheme {
    fn matches_query(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
            || self.description.to_lowercase().contains(query_lower)
            || self.category.as_str().contains(query_lower)
    }
}

const SCHEMES: [Scheme; 3] = [
    Scheme {
        id: "pm-kisan",
        name: "PM-KISAN Samman Nidhi",
        category: SchemeCategory::Agriculture,
        description: "Direct income support to farmers",
        benefits: "₹6,000 per year in three installments",
        eligibility: "Small and marginal farmers with cultivable land",
        documents: &["Aadhaar Card", "Bank Account Details", "Land Records"],
        application_process: "Apply online through PM-KISAN portal or visit nearest CSC",
    },
    Scheme {
        id: "ayushman-bharat",
        name: "Ayushman Bharat - PMJAY",
        category: SchemeCategory::Health,
        description: "Health insurance scheme for poor families",
        benefits: "Health cover up to ₹5 lakh per family per year",
        eligibility: "Families listed in SECC-2011 database",
        documents: &["Aadhaar Card", "Ration Card", "SECC-2011 verification"],
        application_process: "Visit nearest hospital or health center",
    },
    Scheme {
        id: "mudra-yojana",
        name: "Pradhan Mantri MUDRA Yojana",
        category: SchemeCategory::Business,
        description: "Micro-finance scheme for small businesses",
        benefits: "Loans up to ₹10 lakh without collateral",
        eligibility: "Non-corporate, non-farm small/micro enterprises",
        documents: &[
            "Business Plan",
            "Identity Proof",
            "Address Proof",
            "Bank Statements",
        ],
        application_process: "Apply through banks, NBFCs, or MFIs",
    },
];

/// Read-only catalog of government schemes referenced by chat replies.
pub struct SchemeCatalog {
    schemes: &'static [Scheme],
}

impl SchemeCatalog {
    pub fn new() -> Self {
        Self { schemes: &SCHEMES }
    }

    pub fn all(&self) -> &[Scheme] {
        self.schemes
    }

    pub fn by_category(&self, category: SchemeCategory) -> Vec<&Scheme> {
        self.schemes
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<&Scheme> {
        self.schemes
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| GramSathiError::UnknownScheme(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.schemes.iter().any(|s| s.id == id)
    }

    /// Case-insensitive substring search over name, description and category.
    pub fn search(&self, query: &str) -> Vec<&Scheme> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Vec::new();
        }
        self.schemes
            .iter()
            .filter(|s| s.matches_query(&query_lower))
            .collect()
    }
}

impl Default for SchemeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
