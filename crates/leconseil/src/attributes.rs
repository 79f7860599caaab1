// Attribute Inference
//
// *Les Attributs* (The Attributes) - Categorical metadata inferred from an assessment name

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Duration assumed for every assessment; the catalog carries no duration signal
pub const DEFAULT_DURATION_MINUTES: u32 = 40;

/// Assessment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TestType {
    /// Knowledge & Skills (K)
    #[serde(rename = "Knowledge & Skills")]
    KnowledgeSkills,

    /// Personality & Behavior (P)
    #[serde(rename = "Personality & Behavior")]
    PersonalityBehavior,

    /// Ability & Aptitude (A)
    #[serde(rename = "Ability & Aptitude")]
    AbilityAptitude,

    /// Simulations (S); recognized in input, never inferred
    #[serde(rename = "Simulations")]
    Simulations,
}

impl TestType {
    /// All categories
    pub const ALL: [TestType; 4] = [
        TestType::KnowledgeSkills,
        TestType::PersonalityBehavior,
        TestType::AbilityAptitude,
        TestType::Simulations,
    ];

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            TestType::KnowledgeSkills => "Knowledge & Skills",
            TestType::PersonalityBehavior => "Personality & Behavior",
            TestType::AbilityAptitude => "Ability & Aptitude",
            TestType::Simulations => "Simulations",
        }
    }

    /// Single-letter catalog code
    pub fn code(self) -> char {
        match self {
            TestType::KnowledgeSkills => 'K',
            TestType::PersonalityBehavior => 'P',
            TestType::AbilityAptitude => 'A',
            TestType::Simulations => 'S',
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TestType {
    type Err = ParseTestTypeError;

    /// Accepts the label or the single-letter code, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TestType::ALL
            .into_iter()
            .find(|t| {
                t.label().eq_ignore_ascii_case(wanted)
                    || (wanted.len() == 1 && wanted.eq_ignore_ascii_case(&t.code().to_string()))
            })
            .ok_or_else(|| ParseTestTypeError(s.to_string()))
    }
}

/// Unrecognized test type label or code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown test type: {0:?} (expected a label such as \"Knowledge & Skills\" or a code K/P/A/S)")]
pub struct ParseTestTypeError(pub String);

/// Category rules, checked in order; every match appends its category
const CATEGORY_RULES: &[(TestType, &[&str])] = &[
    (
        TestType::KnowledgeSkills,
        &["java", "python", "sql", "javascript", "html", "css", "technical", "programming"],
    ),
    (
        TestType::PersonalityBehavior,
        &["personality", "communication", "behavior", "leadership"],
    ),
    (
        TestType::AbilityAptitude,
        &["cognitive", "numerical", "verbal", "analytical"],
    ),
];

/// Attributes inferred for a single assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredAttributes {
    /// Matched categories in rule order, never empty; the first is primary
    pub test_type: Vec<TestType>,

    /// Whether the assessment adapts to the candidate
    pub adaptive_support: bool,

    /// Expected duration
    pub duration_minutes: u32,

    /// Whether the assessment can be taken remotely
    pub remote_support: bool,
}

impl InferredAttributes {
    /// First inferred category, used as the diversification key
    pub fn primary_test_type(&self) -> TestType {
        self.test_type
            .first()
            .copied()
            .unwrap_or(TestType::KnowledgeSkills)
    }
}

/// Infer attributes from an assessment name
///
/// Case-insensitive substring matching against [`CATEGORY_RULES`]. Names
/// matching no rule default to Knowledge & Skills. Remote support and duration
/// are fixed policy values.
pub fn infer(name: &str) -> InferredAttributes {
    let lower = name.to_lowercase();

    let mut test_type: Vec<TestType> = CATEGORY_RULES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .collect();

    if test_type.is_empty() {
        test_type.push(TestType::KnowledgeSkills);
    }

    InferredAttributes {
        test_type,
        adaptive_support: lower.contains("adaptive"),
        duration_minutes: DEFAULT_DURATION_MINUTES,
        remote_support: true,
    }
}
