use std::collections::{HashMap, HashSet};

use super::types::{
    disease_key, CorpusError, Disease, DiseaseGuidance, Symptom, TrainingTable,
};

/// A case re-encoded against the corpus: dense feature vector over the
/// symptom universe plus the disease index.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedCase {
    pub features: Vec<bool>,
    pub disease: usize,
}

/// Immutable reference corpus shared by every inference call.
///
/// Built once from the training table and side tables; nothing here changes
/// after [`ReferenceCorpus::build`] returns.
#[derive(Debug, Clone)]
pub struct ReferenceCorpus {
    symptoms: Vec<Symptom>,
    symptom_index: HashMap<Symptom, usize>,
    diseases: Vec<Disease>,
    disease_index: HashMap<String, usize>,
    /// Per disease: every symptom ever observed with it, ascending index.
    rows: Vec<Vec<usize>>,
    cases: Vec<EncodedCase>,
    severity: HashMap<Symptom, u32>,
    descriptions: HashMap<String, String>,
    precautions: HashMap<String, Vec<String>>,
}

impl ReferenceCorpus {
    pub fn build(
        training: &TrainingTable,
        severity: &[(Symptom, u32)],
        guidance: &DiseaseGuidance,
    ) -> Result<Self, CorpusError> {
        if training.cases.is_empty() || training.symptoms.is_empty() {
            return Err(CorpusError::EmptyTrainingTable);
        }

        let symptoms = training.symptoms.clone();
        let symptom_index: HashMap<Symptom, usize> = symptoms
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();

        let mut diseases: Vec<Disease> = Vec::new();
        let mut disease_index: HashMap<String, usize> = HashMap::new();
        let mut row_sets: Vec<HashSet<usize>> = Vec::new();
        let mut cases = Vec::with_capacity(training.cases.len());

        for (row, case) in training.cases.iter().enumerate() {
            if case.present.len() != symptoms.len() {
                return Err(CorpusError::RaggedCase {
                    row,
                    found: case.present.len(),
                    expected: symptoms.len(),
                });
            }
            let idx = *disease_index.entry(case.disease.key()).or_insert_with(|| {
                diseases.push(case.disease.clone());
                row_sets.push(HashSet::new());
                diseases.len() - 1
            });
            row_sets[idx].extend(
                case.present
                    .iter()
                    .enumerate()
                    .filter(|&(_, &p)| p)
                    .map(|(i, _)| i),
            );
            cases.push(EncodedCase {
                features: case.present.clone(),
                disease: idx,
            });
        }

        let rows = row_sets
            .into_iter()
            .map(|set| {
                let mut row: Vec<usize> = set.into_iter().collect();
                row.sort_unstable();
                row
            })
            .collect();

        let mut severity_map = HashMap::with_capacity(severity.len());
        for (symptom, weight) in severity {
            if *weight == 0 {
                return Err(CorpusError::NonPositiveWeight(symptom.clone()));
            }
            severity_map.entry(symptom.clone()).or_insert(*weight);
        }

        let descriptions = guidance
            .descriptions
            .iter()
            .map(|(d, text)| (d.key(), text.trim().to_string()))
            .collect();
        let precautions = guidance
            .precautions
            .iter()
            .map(|(d, list)| {
                let cleaned = list
                    .iter()
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect();
                (d.key(), cleaned)
            })
            .collect();

        tracing::info!(
            symptoms = symptoms.len(),
            diseases = diseases.len(),
            cases = cases.len(),
            weights = severity_map.len(),
            "Reference corpus built"
        );

        Ok(Self {
            symptoms,
            symptom_index,
            diseases,
            disease_index,
            rows,
            cases,
            severity: severity_map,
            descriptions,
            precautions,
        })
    }

    /// The fixed symptom universe in column order.
    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn symptom(&self, idx: usize) -> Option<&Symptom> {
        self.symptoms.get(idx)
    }

    pub fn symptom_index(&self, symptom: &Symptom) -> Option<usize> {
        self.symptom_index.get(symptom).copied()
    }

    /// Diseases in first-seen order; the position is the disease index.
    pub fn diseases(&self) -> &[Disease] {
        &self.diseases
    }

    pub fn disease(&self, idx: usize) -> Option<&Disease> {
        self.diseases.get(idx)
    }

    pub fn disease_index(&self, disease: &Disease) -> Option<usize> {
        self.disease_index.get(&disease.key()).copied()
    }

    /// Expected symptom set for a disease (the union over all its cases).
    pub fn row(&self, disease_idx: usize) -> &[usize] {
        self.rows.get(disease_idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row_symptoms(&self, disease_idx: usize) -> Vec<Symptom> {
        self.row(disease_idx)
            .iter()
            .filter_map(|&i| self.symptoms.get(i).cloned())
            .collect()
    }

    /// Training cases encoded against the universe, in table order.
    pub fn cases(&self) -> &[EncodedCase] {
        &self.cases
    }

    pub fn severity_weight(&self, symptom: &Symptom) -> Option<u32> {
        self.severity.get(symptom).copied()
    }

    /// Fail if any of `symptoms` lacks a severity weight.
    pub fn require_weights<'a>(
        &self,
        symptoms: impl IntoIterator<Item = &'a Symptom>,
    ) -> Result<(), CorpusError> {
        for symptom in symptoms {
            if !self.severity.contains_key(symptom) {
                return Err(CorpusError::MissingSeverityWeight(symptom.clone()));
            }
        }
        Ok(())
    }

    pub fn description(&self, disease: &Disease) -> Option<&str> {
        self.descriptions.get(&disease.key()).map(String::as_str)
    }

    pub fn precautions(&self, disease: &Disease) -> &[String] {
        self.precautions
            .get(&disease.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve free text to a known disease: exact label, then a label that
    /// contains the text, then text that contains a label.
    pub fn find_disease(&self, text: &str) -> Option<&Disease> {
        let needle = disease_key(text);
        if needle.is_empty() {
            return None;
        }
        if let Some(&idx) = self.disease_index.get(&needle) {
            return self.diseases.get(idx);
        }
        self.diseases
            .iter()
            .find(|d| d.key().contains(&needle))
            .or_else(|| self.diseases.iter().find(|d| needle.contains(&d.key())))
    }

    /// Re-encode another table (e.g. the testing table) against this
    /// universe. Cases whose disease is unknown to the corpus are skipped.
    pub fn encode(&self, table: &TrainingTable) -> Result<Vec<EncodedCase>, CorpusError> {
        let mut mapping = Vec::with_capacity(table.symptoms.len());
        for symptom in &table.symptoms {
            let idx = self
                .symptom_index(symptom)
                .ok_or_else(|| CorpusError::UnknownTestingSymptom(symptom.clone()))?;
            mapping.push(idx);
        }

        let mut encoded = Vec::with_capacity(table.cases.len());
        let mut skipped = 0usize;
        for (row, case) in table.cases.iter().enumerate() {
            if case.present.len() != mapping.len() {
                return Err(CorpusError::RaggedCase {
                    row,
                    found: case.present.len(),
                    expected: mapping.len(),
                });
            }
            let Some(disease) = self.disease_index(&case.disease) else {
                skipped += 1;
                continue;
            };
            let mut features = vec![false; self.symptoms.len()];
            for (col, &present) in case.present.iter().enumerate() {
                if present {
                    features[mapping[col]] = true;
                }
            }
            encoded.push(EncodedCase { features, disease });
        }

        if skipped > 0 {
            tracing::warn!(skipped, "Skipped cases with diseases unknown to the corpus");
        }
        Ok(encoded)
    }
}
