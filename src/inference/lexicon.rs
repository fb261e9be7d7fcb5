//! Free text → canonical symptom ids.
//!
//! Bounded lexicon matcher, not NLP: each lexicon entry lists plain-language
//! phrases for one canonical symptom key. A phrase hit resolves the key
//! against the corpus universe; when no phrase hits at all, universe ids are
//! matched directly by substring.

use std::sync::LazyLock;

use regex::Regex;

use crate::corpus::Symptom;

/// Canonical key → synonym phrases (lower-case).
static PHRASE_LEXICON: &[(&str, &[&str])] = &[
    ("itching", &["itching", "itchy", "itch"]),
    ("skin_rash", &["skin rash", "rash", "red spots"]),
    ("nodal_skin_eruptions", &["skin eruptions", "bumps on skin", "bumps on my skin"]),
    ("continuous_sneezing", &["sneezing", "sneeze"]),
    ("shivering", &["shivering", "shaking with cold"]),
    ("chills", &["chills", "chilly"]),
    ("joint_pain", &["joint pain", "joints hurt", "aching joints", "painful joints"]),
    ("stomach_pain", &["stomach pain", "stomach ache", "stomachache", "tummy ache"]),
    ("acidity", &["acidity", "heartburn", "acid reflux"]),
    ("vomiting", &["vomiting", "vomit", "throwing up", "threw up"]),
    ("fatigue", &["fatigue", "tired", "exhausted", "no energy"]),
    ("weight_loss", &["weight loss", "losing weight", "lost weight"]),
    ("anxiety", &["anxiety", "anxious", "nervous"]),
    ("fever", &["fever", "feverish", "high temperature", "temperature"]),
    ("cough", &["cough", "coughing"]),
    ("headache", &["headache", "head ache", "head hurts", "head is pounding"]),
    ("nausea", &["nausea", "nauseous", "queasy", "feel sick"]),
    ("diarrhoea", &["diarrhoea", "diarrhea", "loose stools", "loose motions"]),
    (
        "breathlessness",
        &[
            "breathlessness",
            "breathless",
            "short of breath",
            "shortness of breath",
            "difficulty breathing",
            "can't breathe",
        ],
    ),
    ("chest_pain", &["chest pain", "chest hurts", "tight chest", "chest tightness"]),
    ("dizziness", &["dizziness", "dizzy", "lightheaded", "light headed"]),
    ("back_pain", &["back pain", "backache", "back ache", "back hurts"]),
    ("constipation", &["constipation", "constipated"]),
    ("abdominal_pain", &["abdominal pain", "belly pain", "pain in abdomen", "pain in my abdomen"]),
    ("yellowish_skin", &["yellow skin", "yellowish skin", "skin turned yellow"]),
    ("runny_nose", &["runny nose", "running nose", "nose running"]),
    ("congestion", &["congestion", "blocked nose", "stuffy nose", "congested"]),
    ("sweating", &["sweating", "sweaty", "night sweats"]),
    ("dehydration", &["dehydration", "dehydrated"]),
    ("indigestion", &["indigestion", "upset stomach"]),
    ("loss_of_appetite", &["loss of appetite", "no appetite", "not hungry", "poor appetite"]),
    ("muscle_pain", &["muscle pain", "muscle ache", "body ache", "body pain", "muscles hurt"]),
    ("throat_irritation", &["sore throat", "throat irritation", "scratchy throat", "throat pain"]),
    ("blurred_and_distorted_vision", &["blurred vision", "blurry vision", "distorted vision"]),
    ("palpitations", &["palpitations", "racing heart", "heart racing", "pounding heart"]),
    ("fast_heart_rate", &["fast heart rate", "rapid heartbeat", "fast heartbeat"]),
    ("swelling", &["swelling", "swollen"]),
    ("weakness", &["weakness", "feeling weak"]),
    ("cold_hands_and_feets", &["cold hands", "cold feet"]),
    ("mood_swings", &["mood swings", "moody"]),
    ("restlessness", &["restlessness", "restless"]),
    ("lethargy", &["lethargy", "lethargic", "sluggish"]),
    ("blood_in_sputum", &["blood in sputum", "coughing blood", "coughing up blood"]),
    ("painful_walking", &["painful walking", "hurts to walk", "pain when walking"]),
    ("phlegm", &["phlegm", "mucus"]),
    ("sinus_pressure", &["sinus pressure", "sinus pain"]),
    ("neck_pain", &["neck pain", "stiff neck"]),
    ("irritability", &["irritability", "irritable", "cranky"]),
    ("obesity", &["obesity", "obese", "overweight"]),
    ("excessive_hunger", &["excessive hunger", "always hungry", "constantly hungry"]),
    ("polyuria", &["frequent urination", "urinating often", "peeing a lot"]),
    ("burning_micturition", &["burning urination", "burning when urinating", "painful urination"]),
    ("loss_of_smell", &["loss of smell", "can't smell", "cannot smell"]),
    ("depression", &["depression", "depressed", "feeling low"]),
];

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("Invalid separator regex"));

/// Lower-case, turn underscores into spaces, collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    SEPARATORS
        .replace_all(text.trim(), " ")
        .trim()
        .to_lowercase()
}

/// Extract canonical symptoms from free text, in order of first match.
///
/// Never fails: unrecognized or empty input yields an empty list.
pub fn extract(text: &str, universe: &[Symptom]) -> Vec<Symptom> {
    let input = normalize_text(text);
    if input.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<Symptom> = Vec::new();
    for (key, phrases) in PHRASE_LEXICON {
        if !phrases.iter().any(|p| input.contains(p)) {
            continue;
        }
        match resolve_key(key, universe) {
            Some(symptom) => {
                if !found.contains(symptom) {
                    found.push(symptom.clone());
                }
            }
            None => tracing::trace!(key, "Lexicon hit with no corpus symptom"),
        }
    }

    if found.is_empty() {
        found = universe
            .iter()
            .filter(|s| {
                let name = s.display_name();
                input.contains(&name) || name.contains(&input)
            })
            .cloned()
            .collect();
    }

    found
}

/// Resolve a lexicon key to the first universe symptom whose id contains
/// the key or is contained in it.
fn resolve_key<'a>(key: &str, universe: &'a [Symptom]) -> Option<&'a Symptom> {
    let key = key.replace('_', " ");
    universe.iter().find(|s| {
        let name = s.display_name();
        name.contains(&key) || key.contains(&name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::fixtures::sample_corpus;

    fn universe(names: &[&str]) -> Vec<Symptom> {
        names.iter().map(|n| Symptom::new(n)).collect()
    }

    #[test]
    fn fever_and_cough_resolve_to_corpus_ids() {
        let corpus = sample_corpus();
        let found = extract("I have fever and cough", corpus.symptoms());
        assert_eq!(found, vec![Symptom::new("high_fever"), Symptom::new("cough")]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let corpus = sample_corpus();
        let text = "Itchy skin rash, chills and a headache";
        let first = extract(text, corpus.symptoms());
        let second = extract(text, corpus.symptoms());
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                Symptom::new("itching"),
                Symptom::new("skin_rash"),
                Symptom::new("chills"),
                Symptom::new("headache"),
            ]
        );
    }

    #[test]
    fn synonyms_do_not_duplicate() {
        let u = universe(&["cough"]);
        let found = extract("coughing, a bad cough", &u);
        assert_eq!(found, vec![Symptom::new("cough")]);
    }

    #[test]
    fn first_universe_match_wins_over_exact_id() {
        let u = universe(&["mild_fever", "fever"]);
        assert_eq!(extract("fever", &u), vec![Symptom::new("mild_fever")]);
    }

    #[test]
    fn earlier_contained_id_beats_later_containing_id() {
        let u = universe(&["vision", "blurred_and_distorted_vision"]);
        assert_eq!(extract("blurred vision", &u), vec![Symptom::new("vision")]);
    }

    #[test]
    fn key_contained_in_longer_id() {
        let u = universe(&["skin_peeling", "mild_fever", "high_fever"]);
        assert_eq!(extract("running a fever", &u), vec![Symptom::new("mild_fever")]);
    }

    #[test]
    fn short_id_contained_in_key() {
        let u = universe(&["vision"]);
        assert_eq!(extract("my blurry vision", &u), vec![Symptom::new("vision")]);
    }

    #[test]
    fn unresolvable_key_is_skipped() {
        let u = universe(&["cough"]);
        assert_eq!(extract("I feel dizzy", &u), Vec::<Symptom>::new());
    }

    #[test]
    fn falls_back_to_direct_substring() {
        let u = universe(&["yellow_crust_ooze", "pus_filled_pimples", "blackheads"]);
        assert_eq!(
            extract("blackheads and pus filled pimples", &u),
            vec![Symptom::new("pus_filled_pimples"), Symptom::new("blackheads")]
        );
    }

    #[test]
    fn fallback_accepts_partial_id() {
        let u = universe(&["yellow_crust_ooze", "yellow_urine"]);
        assert_eq!(
            extract("yellow", &u),
            vec![Symptom::new("yellow_crust_ooze"), Symptom::new("yellow_urine")]
        );
    }

    #[test]
    fn empty_or_unknown_input_yields_nothing() {
        let corpus = sample_corpus();
        assert!(extract("", corpus.symptoms()).is_empty());
        assert!(extract("   ", corpus.symptoms()).is_empty());
        assert!(extract("malaria", corpus.symptoms()).is_empty());
    }

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize_text("  High_Fever \t and  COUGH "), "high fever and cough");
    }

    #[test]
    fn lexicon_keys_are_canonical() {
        for (key, _) in PHRASE_LEXICON {
            assert_eq!(Symptom::new(key).as_str(), *key);
        }
    }
}
