use std::path::Path;

use serde::Deserialize;

use crate::core::error::Result;
use crate::core::labels::LabeledRow;
use crate::core::rules::ScorePair;
use crate::core::schema::FeatureRow;

/// One line of the historical corpus: the 24 feature columns plus the two
/// raw (pre-rule) label columns, with the data file's exact headers.
#[derive(Debug, Deserialize)]
struct CorpusRecord {
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Relationship")]
    relationship: String,
    #[serde(rename = "No of Days Last Contact")]
    days_last_contact: i64,
    #[serde(rename = "Personality Type")]
    personality_type: String,
    #[serde(rename = "Confidence")]
    confidence: f64,
    #[serde(rename = "Empathy Level")]
    empathy_level: String,
    #[serde(rename = "Emotional Stability")]
    emotional_stability: i64,
    #[serde(rename = "Trust Parameter")]
    trust: i64,
    #[serde(rename = "No of Past Partners")]
    past_partners: i64,
    #[serde(rename = "No of Past Conflicts")]
    past_conflicts: i64,
    #[serde(rename = "Duration of Relationship")]
    duration: i64,
    #[serde(rename = "Level of Closeness")]
    closeness: i64,
    #[serde(rename = "Average Message Response Time in hours")]
    response_time_hours: f64,
    #[serde(rename = "Caring")]
    caring: i64,
    #[serde(rename = "Loving")]
    loving: i64,
    #[serde(rename = "Efforts")]
    efforts: i64,
    #[serde(rename = "Age")]
    age: i64,
    #[serde(rename = "Behaviour")]
    behaviour: String,
    #[serde(rename = "Past Relationship Patterns")]
    past_patterns: String,
    #[serde(rename = "History of Infidelity")]
    infidelity_history: i64,
    #[serde(rename = "Religion")]
    religion: i64,
    #[serde(rename = "Time spent together in hours per week")]
    hours_per_week: f64,
    #[serde(rename = "Attachment Style")]
    attachment_style: String,
    #[serde(rename = "Body Count")]
    body_count: i64,
    #[serde(rename = "Chances of Happy Marriage %")]
    happy: f64,
    #[serde(rename = "Chances of Cheating %")]
    cheat: f64,
}

impl From<CorpusRecord> for LabeledRow {
    fn from(record: CorpusRecord) -> Self {
        LabeledRow {
            row: FeatureRow {
                gender: record.gender,
                relationship: record.relationship,
                days_last_contact: record.days_last_contact,
                personality_type: record.personality_type,
                confidence: record.confidence,
                empathy_level: record.empathy_level,
                emotional_stability: record.emotional_stability,
                trust: record.trust,
                past_partners: record.past_partners,
                past_conflicts: record.past_conflicts,
                duration: record.duration,
                closeness: record.closeness,
                response_time_hours: record.response_time_hours,
                caring: record.caring,
                loving: record.loving,
                efforts: record.efforts,
                age: record.age,
                behaviour: record.behaviour,
                past_patterns: record.past_patterns,
                infidelity_history: record.infidelity_history,
                religion: record.religion,
                hours_per_week: record.hours_per_week,
                attachment_style: record.attachment_style,
                body_count: record.body_count,
            },
            target: ScorePair::new(record.happy, record.cheat),
        }
    }
}

/// Read the historical corpus from a CSV file.
pub fn read_corpus(path: &Path) -> Result<Vec<LabeledRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<CorpusRecord>() {
        rows.push(record?.into());
    }
    Ok(rows)
}

#[cfg(test)]
pub(crate) const HEADER: &str = "Gender,Relationship,No of Days Last Contact,Personality Type,Confidence,Empathy Level,Emotional Stability,Trust Parameter,No of Past Partners,No of Past Conflicts,Duration of Relationship,Level of Closeness,Average Message Response Time in hours,Caring,Loving,Efforts,Age,Behaviour,Past Relationship Patterns,History of Infidelity,Religion,Time spent together in hours per week,Attachment Style,Body Count,Chances of Happy Marriage %,Chances of Cheating %";

#[cfg(test)]
pub(crate) fn read_corpus_from_str(data: &str) -> Result<Vec<LabeledRow>> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut rows = Vec::new();
    for record in reader.deserialize::<CorpusRecord>() {
        rows.push(record?.into());
    }
    Ok(rows)
}
