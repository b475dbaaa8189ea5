//! Lexicon store: emotion label → weighted trigger terms
//!
//! Weights: 1 = supporting indicator, 2 = strong indicator.
//! Terms are stored normalized so they compare equal to normalized text.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::normalizer::normalize;
use crate::types::{ConfigError, Emotion};

const BUILTIN_JOY: &[(&str, u32)] = &[
    ("heureux", 2), ("heureuse", 2), ("content", 2), ("contente", 2), ("fete", 1),
    ("soleil", 1), ("plage", 1), ("rire", 2), ("amusement", 1), ("enthousiasme", 2),
    ("sourire", 1), ("joie", 2), ("bonheur", 2), ("satisfait", 1), ("amusant", 1),
    ("excite", 2), ("motivé", 2), ("ravi", 2), ("celebration", 1),
    ("happy", 2), ("joy", 2), ("smile", 1), ("sunshine", 1),
];

const BUILTIN_SADNESS: &[(&str, u32)] = &[
    ("triste", 2), ("tristesse", 2), ("pluie", 1), ("nostalgie", 2), ("perdu", 1),
    ("solitude", 2), ("chagrin", 2), ("melancolie", 2), ("pleurer", 2), ("deprime", 2),
    ("desespoir", 2), ("fatigue", 1), ("ennui", 1), ("larmes", 2), ("coeur brise", 2),
    ("deprimee", 2),
    ("sad", 2), ("tears", 2), ("lonely", 2), ("rain", 1), ("broken heart", 2),
];

const BUILTIN_ANGER: &[(&str, u32)] = &[
    ("colere", 2), ("rage", 2), ("furieux", 2), ("furieuse", 2), ("combat", 1),
    ("haine", 2), ("agressif", 1), ("agressive", 1), ("enervement", 2), ("tension", 1),
    ("crise", 1), ("violence", 2), ("explosion", 1), ("frustration", 2), ("nerveux", 1),
    ("bouleverse", 1),
    ("angry", 2), ("furious", 2), ("hate", 2),
];

const BUILTIN_CALM: &[(&str, u32)] = &[
    ("calme", 2), ("zen", 2), ("paisible", 2), ("nuit", 1), ("douceur", 1),
    ("repos", 1), ("silence", 1), ("apaisant", 2), ("detente", 2), ("relax", 2),
    ("serenite", 2), ("plaisible", 1), ("tranquille", 2), ("reposant", 2), ("harmonie", 2),
    ("calm", 2), ("peaceful", 2), ("quiet", 1),
];

const BUILTIN_MYSTERY: &[(&str, u32)] = &[
    ("mystere", 2), ("enigme", 2), ("suspense", 2), ("ombre", 1), ("lune", 1),
    ("secret", 1), ("etrange", 2), ("brume", 1), ("fantome", 1), ("inconnu", 1),
    ("creepy", 1), ("sombre", 2), ("chuchotement", 1), ("caché", 1), ("bizarre", 1),
    ("mystery", 2), ("strange", 2), ("fog", 1),
];

const BUILTIN_ENERGY: &[(&str, u32)] = &[
    ("energie", 2), ("vitesse", 1), ("rapide", 2), ("festif", 1), ("boom", 1),
    ("danse", 1), ("puissant", 2), ("intense", 2), ("sport", 1), ("dynamique", 2),
    ("adrenaline", 2), ("excitante", 2), ("mouvement", 1), ("accelere", 1), ("explosif", 2),
    ("energy", 2), ("fast", 1), ("powerful", 2),
];

/// Immutable weighted lexicon covering every `Emotion`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    entries: BTreeMap<Emotion, BTreeMap<String, u32>>,
}

impl Lexicon {
    /// Build from raw (possibly accented) terms.
    ///
    /// Terms are normalized; empty results are dropped and collisions keep
    /// the larger weight. Labels absent from `raw` get an empty entry.
    pub fn from_entries<I, T, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = (Emotion, T)>,
        T: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut entries: BTreeMap<Emotion, BTreeMap<String, u32>> =
            Emotion::ALL.iter().map(|e| (*e, BTreeMap::new())).collect();

        for (emotion, terms) in raw {
            let slot = entries.entry(emotion).or_default();
            for (term, weight) in terms {
                let key = normalize(term.as_ref());
                if key.is_empty() {
                    continue;
                }
                let current = slot.entry(key).or_insert(weight);
                *current = (*current).max(weight);
            }
        }

        Self { entries }
    }

    /// Hand-curated default lexicon
    pub fn builtin() -> Self {
        Self::from_entries([
            (Emotion::Joy, BUILTIN_JOY.iter().copied()),
            (Emotion::Sadness, BUILTIN_SADNESS.iter().copied()),
            (Emotion::Anger, BUILTIN_ANGER.iter().copied()),
            (Emotion::Calm, BUILTIN_CALM.iter().copied()),
            (Emotion::Mystery, BUILTIN_MYSTERY.iter().copied()),
            (Emotion::Energy, BUILTIN_ENERGY.iter().copied()),
        ])
    }

    /// Parse `{"label": {"term": weight, ...}, ...}`.
    /// Labels may be canonical names or French aliases.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, BTreeMap<String, u32>> = serde_json::from_str(json)?;
        let mut resolved = Vec::with_capacity(raw.len());
        for (label, terms) in raw {
            let emotion: Emotion = label.parse()?;
            resolved.push((emotion, terms));
        }
        Ok(Self::from_entries(resolved))
    }

    /// Weighted terms for one label
    pub fn terms(&self, emotion: Emotion) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries
            .get(&emotion)
            .into_iter()
            .flat_map(|terms| terms.iter().map(|(t, w)| (t.as_str(), *w)))
    }

    /// Every (label, term, weight) triple
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, &str, u32)> + '_ {
        self.entries
            .iter()
            .flat_map(|(e, terms)| terms.iter().map(move |(t, w)| (*e, t.as_str(), *w)))
    }

    /// Labels covered (always the full closed set)
    pub fn labels(&self) -> impl Iterator<Item = Emotion> + '_ {
        self.entries.keys().copied()
    }

    pub fn weight(&self, emotion: Emotion, term: &str) -> Option<u32> {
        self.entries.get(&emotion)?.get(&normalize(term)).copied()
    }

    /// Total number of terms across labels
    pub fn len(&self) -> usize {
        self.entries.values().map(|t| t.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Load a lexicon file, or the builtin lexicon when no file is given or the
/// path does not exist.
pub fn load_lexicon(path: Option<&Path>) -> Result<Lexicon, ConfigError> {
    match path {
        Some(p) if p.exists() => {
            let json = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                path: p.to_path_buf(),
                source,
            })?;
            let lexicon = Lexicon::from_json_str(&json)?;
            debug!(path = %p.display(), terms = lexicon.len(), "loaded lexicon file");
            Ok(lexicon)
        }
        Some(p) => {
            debug!(path = %p.display(), "lexicon file not found, using builtin");
            Ok(Lexicon::builtin())
        }
        None => Ok(Lexicon::builtin()),
    }
}

/// Like [`load_lexicon`], but a bad file is logged and replaced by the
/// builtin lexicon.
pub fn load_lexicon_or_default(path: Option<&Path>) -> Lexicon {
    load_lexicon(path).unwrap_or_else(|e| {
        warn!(code = e.code(), error = %e, "lexicon unusable, falling back to builtin");
        Lexicon::builtin()
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_covers_every_label() {
        let lex = Lexicon::builtin();
        let labels: Vec<Emotion> = lex.labels().collect();
        assert_eq!(labels, Emotion::ALL.to_vec());
        for e in Emotion::ALL {
            assert!(lex.terms(e).count() > 0, "{} has no terms", e);
        }
    }

    #[test]
    fn test_builtin_weights_are_one_or_two() {
        for (_, term, weight) in Lexicon::builtin().iter() {
            assert!(weight == 1 || weight == 2, "{} has weight {}", term, weight);
        }
    }

    #[test]
    fn test_terms_are_normalized() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.weight(Emotion::Joy, "motive"), Some(2));
        assert_eq!(lex.weight(Emotion::Mystery, "cache"), Some(1));
        for (_, term, _) in lex.iter() {
            assert_eq!(normalize(term), term);
        }
    }

    #[test]
    fn test_collision_keeps_larger_weight() {
        let lex = Lexicon::from_entries([(Emotion::Joy, vec![("Fête", 1u32), ("fete", 2)])]);
        assert_eq!(lex.weight(Emotion::Joy, "fete"), Some(2));
        assert_eq!(lex.terms(Emotion::Joy).count(), 1);
    }

    #[test]
    fn test_missing_labels_are_filled() {
        let lex = Lexicon::from_json_str(r#"{"joie": {"soleil": 1}}"#).unwrap();
        assert_eq!(lex.labels().count(), Emotion::ALL.len());
        assert_eq!(lex.terms(Emotion::Anger).count(), 0);
        assert_eq!(lex.weight(Emotion::Joy, "soleil"), Some(1));
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = Lexicon::from_json_str(r#"{"boredom": {"meh": 1}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLabel(ref l) if l == "boredom"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = Lexicon::from_json_str(r#"{"joy": {"meh": -1}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_path_uses_builtin() {
        let lex = load_lexicon(Some(Path::new("/definitely/not/here.json"))).unwrap();
        assert_eq!(lex, Lexicon::builtin());
        assert_eq!(load_lexicon(None).unwrap(), Lexicon::builtin());
    }

    #[test]
    fn test_load_file_and_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("lex.json");
        std::fs::File::create(&good)
            .unwrap()
            .write_all(r#"{"calm": {"tea": 2}}"#.as_bytes())
            .unwrap();
        let lex = load_lexicon(Some(good.as_path())).unwrap();
        assert_eq!(lex.len(), 1);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(load_lexicon(Some(bad.as_path())).is_err());
        assert_eq!(load_lexicon_or_default(Some(bad.as_path())), Lexicon::builtin());
    }
}
