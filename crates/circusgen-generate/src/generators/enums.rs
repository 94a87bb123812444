use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A fixed vocabulary sampled uniformly by the field generators.
pub trait EnumProvider: Copy + Sized + 'static {
    /// Name the vocabulary is listed under.
    const PROVIDER: &'static str;
    /// Every variant, in listing order. Never empty.
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Card,
}

impl EnumProvider for PaymentType {
    const PROVIDER: &'static str = "payment_type";
    const ALL: &'static [Self] = &[Self::Cash, Self::Card];

    fn label(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShowType {
    #[serde(rename = "Acrobatic Troupe")]
    AcrobaticTroupe,
    #[serde(rename = "Fire Jugglers")]
    FireJugglers,
    #[serde(rename = "Animal Acts")]
    AnimalActs,
    #[serde(rename = "Clown Comedy")]
    ClownComedy,
    #[serde(rename = "Knife Throwing")]
    KnifeThrowing,
    #[serde(rename = "Magician Illusions")]
    MagicianIllusions,
}

impl EnumProvider for ShowType {
    const PROVIDER: &'static str = "show_type";
    const ALL: &'static [Self] = &[
        Self::AcrobaticTroupe,
        Self::FireJugglers,
        Self::AnimalActs,
        Self::ClownComedy,
        Self::KnifeThrowing,
        Self::MagicianIllusions,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::AcrobaticTroupe => "Acrobatic Troupe",
            Self::FireJugglers => "Fire Jugglers",
            Self::AnimalActs => "Animal Acts",
            Self::ClownComedy => "Clown Comedy",
            Self::KnifeThrowing => "Knife Throwing",
            Self::MagicianIllusions => "Magician Illusions",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ShowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vocabulary listing keyed by provider name.
pub struct EnumRegistry;

impl EnumRegistry {
    pub fn providers() -> &'static [&'static str] {
        &[PaymentType::PROVIDER, ShowType::PROVIDER]
    }

    pub fn labels(provider: &str) -> Option<Vec<&'static str>> {
        match provider {
            PaymentType::PROVIDER => Some(labels_of::<PaymentType>()),
            ShowType::PROVIDER => Some(labels_of::<ShowType>()),
            _ => None,
        }
    }
}

fn labels_of<T: EnumProvider>() -> Vec<&'static str> {
    T::ALL.iter().map(|variant| variant.label()).collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn registry_lists_both_vocabularies() {
        assert_eq!(
            EnumRegistry::labels("payment_type"),
            Some(vec!["cash", "card"])
        );
        assert_eq!(EnumRegistry::labels("show_type").map(|l| l.len()), Some(6));
        assert!(EnumRegistry::labels("ticket_type").is_none());
    }

    #[test]
    fn pick_covers_every_variant() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(ShowType::pick(&mut rng));
        }
        assert_eq!(seen.len(), ShowType::ALL.len());
    }
}
