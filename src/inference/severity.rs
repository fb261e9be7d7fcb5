//! Urgency scoring from symptom weights and reported duration.

use crate::corpus::{ReferenceCorpus, Symptom};

use super::types::{SeverityAssessment, SeverityError, SeverityVerdict};

/// `sum(weight) * days / (n + 1)`; fails on the first symptom without a
/// weight instead of defaulting it.
pub fn severity_score(
    corpus: &ReferenceCorpus,
    present: &[Symptom],
    duration_days: u32,
) -> Result<f64, SeverityError> {
    let mut sum: u64 = 0;
    for symptom in present {
        let weight = corpus
            .severity_weight(symptom)
            .ok_or_else(|| SeverityError::MissingSeverityWeight(symptom.clone()))?;
        sum += u64::from(weight);
    }
    Ok(sum as f64 * f64::from(duration_days) / (present.len() + 1) as f64)
}

/// Score and compare against `threshold` (strictly greater escalates).
pub fn score(
    corpus: &ReferenceCorpus,
    present: &[Symptom],
    duration_days: u32,
    threshold: f64,
) -> Result<SeverityAssessment, SeverityError> {
    let score = severity_score(corpus, present, duration_days)?;
    let verdict = if score > threshold {
        SeverityVerdict::ConsultDoctor
    } else {
        SeverityVerdict::MonitorAndPrecaution
    };
    Ok(SeverityAssessment { score, verdict })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SEVERITY_THRESHOLD;
    use crate::corpus::fixtures::sample_corpus;

    fn symptoms(names: &[&str]) -> Vec<Symptom> {
        names.iter().map(|n| Symptom::new(n)).collect()
    }

    #[test]
    fn formula_matches_weights() {
        let corpus = sample_corpus();
        // (7 + 4) * 3 / 3
        let s = severity_score(&corpus, &symptoms(&["high_fever", "cough"]), 3).unwrap();
        assert!((s - 11.0).abs() < 1e-12);
    }

    #[test]
    fn verdict_flips_above_threshold() {
        let corpus = sample_corpus();
        let present = symptoms(&["high_fever", "cough"]);
        let short = score(&corpus, &present, 3, DEFAULT_SEVERITY_THRESHOLD).unwrap();
        assert_eq!(short.verdict, SeverityVerdict::MonitorAndPrecaution);
        let long = score(&corpus, &present, 5, DEFAULT_SEVERITY_THRESHOLD).unwrap();
        assert_eq!(long.verdict, SeverityVerdict::ConsultDoctor);
    }

    #[test]
    fn score_equal_to_threshold_does_not_escalate() {
        let corpus = sample_corpus();
        // Threshold set to the exact score.
        let present = symptoms(&["nausea"]);
        let s = severity_score(&corpus, &present, 4).unwrap();
        let assessed = score(&corpus, &present, 4, s).unwrap();
        assert_eq!(assessed.verdict, SeverityVerdict::MonitorAndPrecaution);
    }

    #[test]
    fn empty_symptoms_score_zero() {
        let corpus = sample_corpus();
        let assessed = score(&corpus, &[], 30, DEFAULT_SEVERITY_THRESHOLD).unwrap();
        assert_eq!(assessed.score, 0.0);
        assert_eq!(assessed.verdict, SeverityVerdict::MonitorAndPrecaution);
    }

    #[test]
    fn monotonic_in_duration() {
        let corpus = sample_corpus();
        let present = symptoms(&["chills", "sweating", "headache"]);
        let mut previous = 0.0;
        for days in 0..30 {
            let s = severity_score(&corpus, &present, days).unwrap();
            assert!(s >= previous);
            previous = s;
        }
    }

    #[test]
    fn missing_weight_is_an_error_not_zero() {
        let corpus = sample_corpus();
        let err = severity_score(&corpus, &symptoms(&["cough", "toe_wiggling"]), 2).unwrap_err();
        assert_eq!(
            err,
            SeverityError::MissingSeverityWeight(Symptom::new("toe_wiggling"))
        );
    }
}
