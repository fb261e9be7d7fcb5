use std::path::Path;

use crate::config::TriageConfig;
use crate::corpus::{loader, CorpusError, Disease, ReferenceCorpus, ReferenceData, Symptom};
use crate::inference::split::split_cases;
use crate::inference::train::{accuracy, train_tree, TrainParams};
use crate::inference::{
    aggregate, care_hints, followup, followup_questions, lexicon, severity, AggregateError,
    DecisionTree, SecondaryClassifier,
};

use super::types::{
    DiagnoseRequest, DiagnosisReport, DiagnosisSource, FollowupOutcome, FollowupRequest,
    ModelReport, TriageError,
};

const NO_DESCRIPTION: &str = "No description available";
const UNKNOWN_DISEASE: &str = "Unknown";
const EMERGENCY_CONDITION: &str = "Immediate medical attention recommended.";
const ROUTINE_CONDITION: &str =
    "Follow suggested precautions and consult a doctor if symptoms worsen.";

/// Loaded reference data plus both trained trees.
///
/// Immutable after [`TriageEngine::build`]; every operation takes `&self`,
/// so one engine can be shared across threads behind an `Arc`.
pub struct TriageEngine {
    corpus: ReferenceCorpus,
    primary: DecisionTree,
    secondary: SecondaryClassifier,
    config: TriageConfig,
    report: ModelReport,
}

impl TriageEngine {
    /// Load the reference files from `dir` and build the engine.
    pub fn load(dir: &Path, config: TriageConfig) -> Result<Self, TriageError> {
        let data = loader::load_reference_data(dir)?;
        Self::build(data, config)
    }

    /// Validate the reference data, train both trees on their own seeded
    /// splits and measure them on the held-out cases.
    pub fn build(data: ReferenceData, config: TriageConfig) -> Result<Self, TriageError> {
        let corpus = ReferenceCorpus::build(&data.training, &data.severity, &data.guidance)?;
        let testing = data
            .testing
            .as_ref()
            .map(|table| corpus.encode(table))
            .transpose()?;

        let cases = corpus.cases();
        let n_features = corpus.symptoms().len();
        let n_diseases = corpus.diseases().len();
        let params = TrainParams {
            max_depth: config.max_depth,
        };

        let primary_split = split_cases(cases.len(), &config.primary_split);
        let primary = train_tree(cases, &primary_split.train, n_features, n_diseases, params)
            .ok_or(CorpusError::EmptyTrainingTable)?;

        let secondary_split = split_cases(cases.len(), &config.secondary_split);
        let secondary_tree =
            train_tree(cases, &secondary_split.train, n_features, n_diseases, params)
                .ok_or(CorpusError::EmptyTrainingTable)?;

        // Symptoms the trees split on must be scoreable.
        let tree_features: Vec<&Symptom> = primary
            .features()
            .into_iter()
            .chain(secondary_tree.features())
            .filter_map(|idx| corpus.symptom(idx))
            .collect();
        corpus.require_weights(tree_features)?;

        let unweighted = corpus
            .symptoms()
            .iter()
            .filter(|s| corpus.severity_weight(s).is_none())
            .count();
        if unweighted > 0 {
            tracing::warn!(unweighted, "Symptoms without a severity weight");
        }

        let testing_rows: Vec<usize> = testing
            .as_ref()
            .map(|t| (0..t.len()).collect())
            .unwrap_or_default();
        let report = ModelReport {
            cases: cases.len(),
            symptoms: n_features,
            diseases: n_diseases,
            primary_nodes: primary.node_count(),
            primary_depth: primary.depth(),
            secondary_nodes: secondary_tree.node_count(),
            secondary_depth: secondary_tree.depth(),
            primary_holdout_accuracy: accuracy(&primary, cases, &primary_split.holdout),
            secondary_holdout_accuracy: accuracy(
                &secondary_tree,
                cases,
                &secondary_split.holdout,
            ),
            primary_testing_accuracy: testing
                .as_deref()
                .and_then(|t| accuracy(&primary, t, &testing_rows)),
            secondary_testing_accuracy: testing
                .as_deref()
                .and_then(|t| accuracy(&secondary_tree, t, &testing_rows)),
        };

        tracing::info!(
            cases = report.cases,
            primary_nodes = report.primary_nodes,
            secondary_nodes = report.secondary_nodes,
            primary_holdout = ?report.primary_holdout_accuracy,
            secondary_holdout = ?report.secondary_holdout_accuracy,
            primary_testing = ?report.primary_testing_accuracy,
            "Triage engine ready"
        );

        Ok(Self {
            corpus,
            primary,
            secondary: SecondaryClassifier::new(secondary_tree),
            config,
            report,
        })
    }

    pub fn corpus(&self) -> &ReferenceCorpus {
        &self.corpus
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn report(&self) -> &ModelReport {
        &self.report
    }

    /// The full symptom universe, in corpus order.
    pub fn symptoms(&self) -> &[Symptom] {
        self.corpus.symptoms()
    }

    /// Canonical symptoms recognized in `text`. No diagnosis.
    pub fn extract_suggestions(&self, text: &str) -> Vec<Symptom> {
        lexicon::extract(text, self.corpus.symptoms())
    }

    /// Diagnose from free text, or short-circuit on a disease name.
    ///
    /// An explicit `known_disease` that resolves wins. Otherwise symptoms
    /// are extracted from the text; if none are found the text itself is
    /// tried as a disease name before giving up.
    pub fn diagnose(&self, request: &DiagnoseRequest) -> Result<DiagnosisReport, TriageError> {
        if let Some(disease) = request
            .known_disease
            .as_deref()
            .and_then(|name| self.corpus.find_disease(name))
        {
            return self.disease_report(disease.clone(), request);
        }

        let symptoms = self.extract_suggestions(&request.text);
        if symptoms.is_empty() {
            return match self.corpus.find_disease(&request.text) {
                Some(disease) => self.disease_report(disease.clone(), request),
                None => {
                    tracing::info!("No symptom or disease recognized");
                    Err(TriageError::NoSymptomsRecognized)
                }
            };
        }

        let aggregated = aggregate(&symptoms, &self.primary, &self.corpus)?;
        let assessment = severity::score(
            &self.corpus,
            &symptoms,
            request.duration_days,
            self.config.severity_threshold,
        )?;
        let secondary_prediction = self.secondary.predict(&self.corpus, &symptoms);

        let primary = aggregated
            .primary()
            .map(|c| c.disease.clone())
            .ok_or(AggregateError::Undiagnosable)?;
        let result_message = match &secondary_prediction {
            Some(other) if *other != primary => format!("You may have {primary} or {other}"),
            _ => format!("You may have {primary}"),
        };

        tracing::info!(
            disease = %primary,
            confidence = aggregated.confidence,
            symptoms = symptoms.len(),
            verdict = ?assessment.verdict,
            "Diagnosis from symptoms"
        );

        let (description, precautions) = self.guidance(&primary);
        Ok(DiagnosisReport {
            confidence: aggregated.confidence,
            secondary_diseases: aggregated.secondary_diseases(),
            symptoms_matched: symptoms,
            candidates: aggregated.ranked,
            severity_verdict: assessment.verdict,
            severity_score: assessment.score,
            condition: assessment.verdict.message().to_string(),
            secondary_prediction,
            result_message,
            care_hints: care_hints(Some(description.as_str()), &precautions),
            followup_questions: followup_questions(&primary, request.age),
            description,
            precautions,
            primary_disease: primary,
            source: DiagnosisSource::Symptoms,
        })
    }

    /// Interpret follow-up answers for a disease context.
    pub fn process_followup(&self, request: &FollowupRequest) -> FollowupOutcome {
        let assessment = followup::evaluate(&request.answers);

        let name = request
            .disease
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let resolved = name.and_then(|n| self.corpus.find_disease(n)).cloned();
        let disease = match (&resolved, name) {
            (Some(d), _) => d.to_string(),
            (None, Some(n)) => n.to_string(),
            (None, None) => UNKNOWN_DISEASE.to_string(),
        };
        let (description, precautions) = match &resolved {
            Some(d) => self.guidance(d),
            None => (NO_DESCRIPTION.to_string(), Vec::new()),
        };

        if assessment.emergency {
            tracing::warn!(
                disease = %disease,
                triggers = ?assessment.triggers,
                "Follow-up answers escalated to emergency"
            );
        }

        let (condition, advice) = if assessment.emergency {
            (EMERGENCY_CONDITION, "seek emergency care")
        } else {
            (ROUTINE_CONDITION, "monitor symptoms and follow precautions")
        };

        FollowupOutcome {
            result_message: format!("Based on your answers, {advice} for {disease}."),
            disease,
            emergency: assessment.emergency,
            affirmative_answers: assessment.affirmative,
            condition: condition.to_string(),
            description,
            precautions,
        }
    }

    fn disease_report(
        &self,
        disease: Disease,
        request: &DiagnoseRequest,
    ) -> Result<DiagnosisReport, TriageError> {
        let assessment = severity::score(
            &self.corpus,
            &[],
            request.duration_days,
            self.config.severity_threshold,
        )?;
        tracing::info!(disease = %disease, "Diagnosis from disease name");

        let (description, precautions) = self.guidance(&disease);
        Ok(DiagnosisReport {
            confidence: 1.0,
            secondary_diseases: Vec::new(),
            symptoms_matched: Vec::new(),
            candidates: Vec::new(),
            severity_verdict: assessment.verdict,
            severity_score: assessment.score,
            condition: assessment.verdict.message().to_string(),
            secondary_prediction: None,
            result_message: format!("You may have {disease}"),
            care_hints: care_hints(Some(description.as_str()), &precautions),
            followup_questions: followup_questions(&disease, request.age),
            description,
            precautions,
            primary_disease: disease,
            source: DiagnosisSource::DiseaseName,
        })
    }

    fn guidance(&self, disease: &Disease) -> (String, Vec<String>) {
        let description = self
            .corpus
            .description(disease)
            .unwrap_or(NO_DESCRIPTION)
            .to_string();
        (description, self.corpus.precautions(disease).to_vec())
    }
}
