//! Personality profiles and the read-only catalog that holds them.
//!
//! The catalog is built once at startup and shared by reference; tests can
//! construct alternate catalogs with [`PersonalityCatalog::new`].

use serde::Serialize;

/// One voice the engine can answer in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalityProfile {
    /// Stable identifier, e.g. `"calm_mentor"`.
    pub key: String,
    /// Display name, e.g. `"Calm Mentor"`.
    pub name: String,
    pub description: String,
    /// Ordered list of behavioural traits.
    pub traits: Vec<String>,
    /// Short tone descriptor, e.g. `"calm, wise, encouraging"`.
    pub tone: String,
}

/// Discovery view of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalitySummary {
    pub key: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("personality catalog must contain at least one profile")]
    Empty,
    #[error("duplicate personality key: {0}")]
    DuplicateKey(String),
    #[error("duplicate personality name: {0}")]
    DuplicateName(String),
}

/// Immutable, ordered set of profiles. The first entry is the default.
#[derive(Debug, Clone)]
pub struct PersonalityCatalog {
    profiles: Vec<PersonalityProfile>,
}

impl PersonalityCatalog {
    /// Build a catalog. Keys and display names must be unique.
    pub fn new(profiles: Vec<PersonalityProfile>) -> Result<Self, CatalogError> {
        if profiles.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, profile) in profiles.iter().enumerate() {
            let earlier = &profiles[..i];
            if earlier.iter().any(|p| p.key == profile.key) {
                return Err(CatalogError::DuplicateKey(profile.key.clone()));
            }
            if earlier.iter().any(|p| p.name == profile.name) {
                return Err(CatalogError::DuplicateName(profile.name.clone()));
            }
        }
        Ok(Self { profiles })
    }

    /// The five built-in voices.
    pub fn builtin() -> Self {
        let profiles = BUILTIN
            .iter()
            .map(|(key, name, description, traits, tone)| PersonalityProfile {
                key: (*key).into(),
                name: (*name).into(),
                description: (*description).into(),
                traits: traits.iter().map(|t| (*t).into()).collect(),
                tone: (*tone).into(),
            })
            .collect();
        Self { profiles }
    }

    pub fn get(&self, key: &str) -> Option<&PersonalityProfile> {
        self.profiles.iter().find(|p| p.key == key)
    }

    /// The profile used when a requested key is unknown.
    pub fn default_profile(&self) -> &PersonalityProfile {
        &self.profiles[0]
    }

    /// Look up `key`, falling back to the default profile.
    pub fn resolve(&self, key: &str) -> &PersonalityProfile {
        self.get(key).unwrap_or_else(|| {
            tracing::debug!(requested = %key, "unknown personality, using default");
            self.default_profile()
        })
    }

    pub fn profiles(&self) -> &[PersonalityProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn summaries(&self) -> Vec<PersonalitySummary> {
        self.profiles
            .iter()
            .map(|p| PersonalitySummary {
                key: p.key.clone(),
                name: p.name.clone(),
                description: p.description.clone(),
            })
            .collect()
    }
}

impl Default for PersonalityCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

type ProfileRow = (&'static str, &'static str, &'static str, [&'static str; 5], &'static str);

const BUILTIN: [ProfileRow; 5] = [
    (
        "calm_mentor",
        "Calm Mentor",
        "Wise, patient, and guidance-focused. Speaks with measured wisdom and encourages reflection.",
        [
            "Uses thoughtful, measured language",
            "Asks reflective questions",
            "Shares wisdom through analogies and examples",
            "Patient and non-judgmental",
            "Focuses on long-term growth and learning",
        ],
        "calm, wise, encouraging, patient",
    ),
    (
        "witty_friend",
        "Witty Friend",
        "Casual, humorous, and relatable. Like chatting with a close friend who makes you laugh.",
        [
            "Uses casual, conversational language",
            "Incorporates humor and wit",
            "Relatable and down-to-earth",
            "Uses modern slang appropriately",
            "Supportive but keeps things light",
        ],
        "casual, funny, relatable, friendly",
    ),
    (
        "therapist",
        "Therapist",
        "Empathetic, reflective, and supportive. Creates a safe space for emotional exploration.",
        [
            "Deeply empathetic and validating",
            "Asks open-ended questions",
            "Reflects feelings back to the user",
            "Non-directive and supportive",
            "Focuses on emotional processing",
        ],
        "empathetic, gentle, validating, supportive",
    ),
    (
        "professional_coach",
        "Professional Coach",
        "Direct, goal-oriented, and motivational. Pushes you toward action and results.",
        [
            "Direct and action-oriented",
            "Focuses on goals and outcomes",
            "Motivational and energizing",
            "Holds you accountable",
            "Provides structured frameworks",
        ],
        "direct, motivating, energetic, results-focused",
    ),
    (
        "curious_explorer",
        "Curious Explorer",
        "Inquisitive, enthusiastic, and discovery-focused. Loves diving deep into ideas.",
        [
            "Asks lots of curious questions",
            "Enthusiastic about learning",
            "Explores ideas from multiple angles",
            "Encourages experimentation",
            "Shares interesting connections and insights",
        ],
        "curious, enthusiastic, exploratory, wonder-filled",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(key: &str, name: &str) -> PersonalityProfile {
        PersonalityProfile {
            key: key.into(),
            name: name.into(),
            description: String::new(),
            traits: vec![],
            tone: String::new(),
        }
    }

    #[test]
    fn builtin_has_five_distinct_voices() {
        let catalog = PersonalityCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        // Builtin data must satisfy the same rules as user-supplied catalogs.
        assert!(PersonalityCatalog::new(catalog.profiles().to_vec()).is_ok());
        for p in catalog.profiles() {
            assert_eq!(p.traits.len(), 5);
            assert!(!p.tone.is_empty());
        }
    }

    #[test]
    fn default_is_first_entry() {
        let catalog = PersonalityCatalog::builtin();
        assert_eq!(catalog.default_profile().key, "calm_mentor");
        assert_eq!(catalog.resolve("no_such_voice").key, "calm_mentor");
        assert_eq!(catalog.resolve("therapist").name, "Therapist");
        assert!(catalog.get("no_such_voice").is_none());
    }

    #[test]
    fn summaries_follow_catalog_order() {
        let keys: Vec<_> = PersonalityCatalog::builtin()
            .summaries()
            .into_iter()
            .map(|s| s.key)
            .collect();
        assert_eq!(
            keys,
            ["calm_mentor", "witty_friend", "therapist", "professional_coach", "curious_explorer"]
        );
    }

    #[test]
    fn invalid_catalogs_are_rejected() {
        assert_eq!(PersonalityCatalog::new(vec![]).unwrap_err(), CatalogError::Empty);
        assert_eq!(
            PersonalityCatalog::new(vec![profile("a", "A"), profile("a", "B")]).unwrap_err(),
            CatalogError::DuplicateKey("a".into())
        );
        assert_eq!(
            PersonalityCatalog::new(vec![profile("a", "A"), profile("b", "A")]).unwrap_err(),
            CatalogError::DuplicateName("A".into())
        );
    }
}
