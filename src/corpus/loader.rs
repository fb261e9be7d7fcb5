//! CSV loaders for the four reference files.
//!
//! Shapes follow the public symptom/disease dataset: a wide training table
//! (one 0/1 column per symptom plus `prognosis`), `symptom,weight` rows,
//! `disease,description` rows and `disease,precaution...` rows. Header rows
//! on the side tables are tolerated.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::types::{
    CorpusError, Disease, DiseaseGuidance, ReferenceData, Symptom, TrainingCase, TrainingTable,
};
use crate::config;

/// Label column name in the training/testing tables.
const LABEL_COLUMN: &str = "prognosis";

/// Load every reference file from `dir`. The testing table is optional.
pub fn load_reference_data(dir: &Path) -> Result<ReferenceData, CorpusError> {
    let training = read_training_table(
        open(&dir.join(config::TRAINING_FILE))?,
        config::TRAINING_FILE,
    )?;

    let testing_path = dir.join(config::TESTING_FILE);
    let testing = if testing_path.exists() {
        Some(read_training_table(open(&testing_path)?, config::TESTING_FILE)?)
    } else {
        tracing::debug!(path = %testing_path.display(), "No testing table, skipping evaluation");
        None
    };

    let severity = read_severity(open(&dir.join(config::SEVERITY_FILE))?, config::SEVERITY_FILE)?;
    let descriptions = read_descriptions(
        open(&dir.join(config::DESCRIPTION_FILE))?,
        config::DESCRIPTION_FILE,
    )?;
    let precautions = read_precautions(
        open(&dir.join(config::PRECAUTION_FILE))?,
        config::PRECAUTION_FILE,
    )?;

    tracing::info!(
        dir = %dir.display(),
        cases = training.cases.len(),
        weights = severity.len(),
        descriptions = descriptions.len(),
        precautions = precautions.len(),
        "Reference files loaded"
    );

    Ok(ReferenceData {
        training,
        testing,
        severity,
        guidance: DiseaseGuidance {
            descriptions,
            precautions,
        },
    })
}

fn open(path: &Path) -> Result<File, CorpusError> {
    File::open(path).map_err(|e| CorpusError::Load(path.display().to_string(), e.to_string()))
}

fn parse_err(source: &str, e: impl ToString) -> CorpusError {
    CorpusError::Parse(source.to_string(), e.to_string())
}

/// Read a wide case table. Columns with a blank header are ignored and
/// columns that normalize to the same symptom are merged.
pub fn read_training_table<R: Read>(reader: R, source: &str) -> Result<TrainingTable, CorpusError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| parse_err(source, e))?.clone();
    let label_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(LABEL_COLUMN))
        .or_else(|| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, h)| !h.is_empty())
                .map(|(i, _)| i)
                .last()
        })
        .ok_or(CorpusError::MissingLabelColumn)?;

    let mut symptoms: Vec<Symptom> = Vec::new();
    // (csv column, symptom index)
    let mut columns: Vec<(usize, usize)> = Vec::new();
    for (col, header) in headers.iter().enumerate() {
        if col == label_col {
            continue;
        }
        let symptom = Symptom::new(header);
        if symptom.is_empty() {
            continue;
        }
        let idx = match symptoms.iter().position(|s| *s == symptom) {
            Some(idx) => {
                tracing::debug!(symptom = %symptom, column = col, "Merging duplicate symptom column");
                idx
            }
            None => {
                symptoms.push(symptom);
                symptoms.len() - 1
            }
        };
        columns.push((col, idx));
    }

    let mut cases = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| parse_err(source, e))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let label = record.get(label_col).unwrap_or("");
        if label.is_empty() {
            return Err(parse_err(source, format!("row {row}: empty {LABEL_COLUMN}")));
        }

        let mut present = vec![false; symptoms.len()];
        for &(col, idx) in &columns {
            if parse_flag(record.get(col).unwrap_or(""))
                .map_err(|e| parse_err(source, format!("row {row}, column {col}: {e}")))?
            {
                present[idx] = true;
            }
        }
        cases.push(TrainingCase {
            present,
            disease: Disease::new(label),
        });
    }

    if cases.is_empty() {
        return Err(CorpusError::EmptyTrainingTable);
    }
    Ok(TrainingTable { symptoms, cases })
}

fn parse_flag(value: &str) -> Result<bool, String> {
    if value.is_empty() {
        return Ok(false);
    }
    value
        .parse::<f64>()
        .map(|v| v != 0.0)
        .map_err(|_| format!("'{value}' is not a 0/1 flag"))
}

fn side_table<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn is_header(record: &StringRecord, first_col: &str) -> bool {
    record.get(0).is_some_and(|v| v.eq_ignore_ascii_case(first_col))
}

/// Read `symptom,weight` rows. A non-numeric weight is tolerated only on the
/// first row (header).
pub fn read_severity<R: Read>(reader: R, source: &str) -> Result<Vec<(Symptom, u32)>, CorpusError> {
    let mut weights = Vec::new();
    for (row, record) in side_table(reader).records().enumerate() {
        let record = record.map_err(|e| parse_err(source, e))?;
        let symptom = Symptom::new(record.get(0).unwrap_or(""));
        if symptom.is_empty() {
            continue;
        }
        let raw = record.get(1).unwrap_or("");
        match raw.parse::<u32>() {
            Ok(weight) => weights.push((symptom, weight)),
            Err(_) if row == 0 => continue,
            Err(_) => {
                return Err(parse_err(
                    source,
                    format!("row {row}: weight '{raw}' for '{symptom}' is not a positive integer"),
                ))
            }
        }
    }
    Ok(weights)
}

/// Read `disease,description` rows.
pub fn read_descriptions<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<(Disease, String)>, CorpusError> {
    let mut out = Vec::new();
    for record in side_table(reader).records() {
        let record = record.map_err(|e| parse_err(source, e))?;
        if is_header(&record, "disease") {
            continue;
        }
        let (Some(disease), Some(text)) = (record.get(0), record.get(1)) else {
            continue;
        };
        if disease.is_empty() {
            continue;
        }
        out.push((Disease::new(disease), text.to_string()));
    }
    Ok(out)
}

/// Read `disease,precaution_1..n` rows; blank cells are dropped.
pub fn read_precautions<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<(Disease, Vec<String>)>, CorpusError> {
    let mut out = Vec::new();
    for record in side_table(reader).records() {
        let record = record.map_err(|e| parse_err(source, e))?;
        if is_header(&record, "disease") {
            continue;
        }
        let Some(disease) = record.get(0).filter(|d| !d.is_empty()) else {
            continue;
        };
        let precautions = record
            .iter()
            .skip(1)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        out.push((Disease::new(disease), precautions));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const TRAINING_CSV: &str = "\
itching,skin_rash,high_fever,fluid_overload,fluid_overload,prognosis,
1,1,0,0,0,Fungal infection ,
0,0,1,0,1,Malaria,
";

    #[test]
    fn training_table_merges_duplicate_columns_and_ignores_blank_header() {
        let table = read_training_table(TRAINING_CSV.as_bytes(), "Training.csv").unwrap();
        let names: Vec<&str> = table.symptoms.iter().map(Symptom::as_str).collect();
        assert_eq!(names, vec!["itching", "skin_rash", "high_fever", "fluid_overload"]);
        assert_eq!(table.cases.len(), 2);
        assert_eq!(table.cases[0].disease.as_str(), "Fungal infection");
        assert_eq!(table.cases[1].present, vec![false, false, true, true]);
    }

    #[test]
    fn training_table_uses_last_column_without_prognosis_header() {
        let csv = "cough,chills,label\n1,0,Flu\n";
        let table = read_training_table(csv.as_bytes(), "t").unwrap();
        assert_eq!(table.symptoms.len(), 2);
        assert_eq!(table.cases[0].disease.as_str(), "Flu");
    }

    #[test]
    fn training_table_label_skips_trailing_blank_header() {
        let csv = "cough,chills,label,\n1,0,Flu,\n0,1,Cold,\n";
        let table = read_training_table(csv.as_bytes(), "t").unwrap();
        assert_eq!(table.symptoms.len(), 2);
        assert_eq!(table.cases[1].disease.as_str(), "Cold");
    }

    #[test]
    fn training_table_rejects_non_numeric_flag() {
        let csv = "cough,prognosis\nmaybe,Flu\n";
        let err = read_training_table(csv.as_bytes(), "t").unwrap_err();
        assert!(matches!(err, CorpusError::Parse(_, _)));
    }

    #[test]
    fn training_table_without_rows_is_empty_error() {
        let csv = "cough,prognosis\n";
        let err = read_training_table(csv.as_bytes(), "t").unwrap_err();
        assert!(matches!(err, CorpusError::EmptyTrainingTable));
    }

    #[test]
    fn severity_skips_header_and_normalizes_names() {
        let csv = "Symptom,weight\nitching,1\nspotting_ urination,6\n";
        let weights = read_severity(csv.as_bytes(), "s").unwrap();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[1], (Symptom::new("spotting_urination"), 6));
    }

    #[test]
    fn severity_rejects_bad_weight_after_header() {
        let csv = "itching,1\ncough,heavy\n";
        assert!(read_severity(csv.as_bytes(), "s").is_err());
    }

    #[test]
    fn descriptions_handle_quoted_commas() {
        let csv = "Disease,Description\nMalaria,\"Fever, chills, and sweats.\"\n";
        let rows = read_descriptions(csv.as_bytes(), "d").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1, "Fever, chills, and sweats.");
    }

    #[test]
    fn precautions_drop_blank_cells() {
        let csv = "Disease,Precaution_1,Precaution_2,Precaution_3,Precaution_4\n\
                   Acne,bath twice,avoid fatty spicy food,,\n";
        let rows = read_precautions(csv.as_bytes(), "p").unwrap();
        assert_eq!(rows[0].0.as_str(), "Acne");
        assert_eq!(rows[0].1, vec!["bath twice", "avoid fatty spicy food"]);
    }

    #[test]
    fn load_reference_data_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(config::TRAINING_FILE), TRAINING_CSV).unwrap();
        fs::write(dir.path().join(config::SEVERITY_FILE), "itching,1\nskin_rash,3\n").unwrap();
        fs::write(
            dir.path().join(config::DESCRIPTION_FILE),
            "Malaria,Mosquito-borne disease.\n",
        )
        .unwrap();
        fs::write(dir.path().join(config::PRECAUTION_FILE), "Malaria,rest,,\n").unwrap();

        let data = load_reference_data(dir.path()).unwrap();
        assert_eq!(data.training.cases.len(), 2);
        assert!(data.testing.is_none());
        assert_eq!(data.severity.len(), 2);
        assert_eq!(data.guidance.precautions[0].1, vec!["rest"]);
    }

    #[test]
    fn load_reference_data_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_reference_data(dir.path()).unwrap_err();
        assert!(matches!(err, CorpusError::Load(_, _)));
    }
}
