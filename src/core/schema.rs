use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::{Result, ScoreError};

/// One fully-typed relationship description, the unit of input to both
/// training and serving.
///
/// The field set is fixed. Everything downstream (encoder, rule engine)
/// reads fields by name through the typed struct, so field identity, not
/// column order, is the contract between components. Construction happens
/// once at the boundary; the core never sees untyped input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Relationship")]
    pub relationship: String,
    #[serde(rename = "No of Days Last Contact")]
    pub days_last_contact: i64,
    #[serde(rename = "Personality Type")]
    pub personality_type: String,
    #[serde(rename = "Confidence")]
    pub confidence: f64,
    #[serde(rename = "Empathy Level")]
    pub empathy_level: String,
    #[serde(rename = "Emotional Stability")]
    pub emotional_stability: i64,
    #[serde(rename = "Trust Parameter")]
    pub trust: i64,
    #[serde(rename = "No of Past Partners")]
    pub past_partners: i64,
    #[serde(rename = "No of Past Conflicts")]
    pub past_conflicts: i64,
    #[serde(rename = "Duration of Relationship")]
    pub duration: i64,
    #[serde(rename = "Level of Closeness")]
    pub closeness: i64,
    #[serde(rename = "Average Message Response Time in hours")]
    pub response_time_hours: f64,
    #[serde(rename = "Caring")]
    pub caring: i64,
    #[serde(rename = "Loving")]
    pub loving: i64,
    #[serde(rename = "Efforts")]
    pub efforts: i64,
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Behaviour")]
    pub behaviour: String,
    #[serde(rename = "Past Relationship Patterns")]
    pub past_patterns: String,
    #[serde(rename = "History of Infidelity")]
    pub infidelity_history: i64,
    #[serde(rename = "Religion")]
    pub religion: i64,
    #[serde(rename = "Time spent together in hours per week")]
    pub hours_per_week: f64,
    #[serde(rename = "Attachment Style")]
    pub attachment_style: String,
    #[serde(rename = "Body Count")]
    pub body_count: i64,
}

impl FeatureRow {
    /// Build a row from named field values, as submitted at the serving
    /// boundary. Integer and float fields also accept numeric strings,
    /// since web forms submit everything as text.
    pub fn from_named(fields: &Map<String, Value>) -> Result<Self> {
        Ok(FeatureRow {
            gender: get_str(fields, "Gender")?,
            relationship: get_str(fields, "Relationship")?,
            days_last_contact: get_int(fields, "No of Days Last Contact")?,
            personality_type: get_str(fields, "Personality Type")?,
            confidence: get_float(fields, "Confidence")?,
            empathy_level: get_str(fields, "Empathy Level")?,
            emotional_stability: get_int(fields, "Emotional Stability")?,
            trust: get_int(fields, "Trust Parameter")?,
            past_partners: get_int(fields, "No of Past Partners")?,
            past_conflicts: get_int(fields, "No of Past Conflicts")?,
            duration: get_int(fields, "Duration of Relationship")?,
            closeness: get_int(fields, "Level of Closeness")?,
            response_time_hours: get_float(fields, "Average Message Response Time in hours")?,
            caring: get_int(fields, "Caring")?,
            loving: get_int(fields, "Loving")?,
            efforts: get_int(fields, "Efforts")?,
            age: get_int(fields, "Age")?,
            behaviour: get_str(fields, "Behaviour")?,
            past_patterns: get_str(fields, "Past Relationship Patterns")?,
            infidelity_history: get_int(fields, "History of Infidelity")?,
            religion: get_int(fields, "Religion")?,
            hours_per_week: get_float(fields, "Time spent together in hours per week")?,
            attachment_style: get_str(fields, "Attachment Style")?,
            body_count: get_int(fields, "Body Count")?,
        })
    }

    /// Categorical fields as (field name, value) pairs, in fixed order.
    pub fn categorical_values(&self) -> [(&'static str, &str); 7] {
        [
            ("Gender", self.gender.as_str()),
            ("Relationship", self.relationship.as_str()),
            ("Personality Type", self.personality_type.as_str()),
            ("Empathy Level", self.empathy_level.as_str()),
            ("Behaviour", self.behaviour.as_str()),
            ("Past Relationship Patterns", self.past_patterns.as_str()),
            ("Attachment Style", self.attachment_style.as_str()),
        ]
    }

    /// Numeric fields as (field name, value) pairs, in fixed order.
    pub fn numeric_values(&self) -> [(&'static str, f64); 17] {
        [
            ("No of Days Last Contact", self.days_last_contact as f64),
            ("Confidence", self.confidence),
            ("Emotional Stability", self.emotional_stability as f64),
            ("Trust Parameter", self.trust as f64),
            ("No of Past Partners", self.past_partners as f64),
            ("No of Past Conflicts", self.past_conflicts as f64),
            ("Duration of Relationship", self.duration as f64),
            ("Level of Closeness", self.closeness as f64),
            (
                "Average Message Response Time in hours",
                self.response_time_hours,
            ),
            ("Caring", self.caring as f64),
            ("Loving", self.loving as f64),
            ("Efforts", self.efforts as f64),
            ("Age", self.age as f64),
            ("History of Infidelity", self.infidelity_history as f64),
            ("Religion", self.religion as f64),
            (
                "Time spent together in hours per week",
                self.hours_per_week,
            ),
            ("Body Count", self.body_count as f64),
        ]
    }
}

fn get_str(fields: &Map<String, Value>, name: &str) -> Result<String> {
    match fields.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ScoreError::schema(
            name,
            format!("expected a string, got {}", other),
        )),
        None => Err(ScoreError::schema(name, "missing required field")),
    }
}

fn get_int(fields: &Map<String, Value>, name: &str) -> Result<i64> {
    match fields.get(name) {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| ScoreError::schema(name, format!("expected an integer, got {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ScoreError::schema(name, format!("cannot parse '{}' as an integer", s))),
        Some(other) => Err(ScoreError::schema(
            name,
            format!("expected an integer, got {}", other),
        )),
        None => Err(ScoreError::schema(name, "missing required field")),
    }
}

fn get_float(fields: &Map<String, Value>, name: &str) -> Result<f64> {
    match fields.get(name) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| ScoreError::schema(name, format!("expected a number, got {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ScoreError::schema(name, format!("cannot parse '{}' as a number", s))),
        Some(other) => Err(ScoreError::schema(
            name,
            format!("expected a number, got {}", other),
        )),
        None => Err(ScoreError::schema(name, "missing required field")),
    }
}

/// Baseline row for unit tests across the core. Values are chosen so that
/// no rule clause fires unless a test overrides the relevant field.
#[cfg(test)]
pub(crate) fn neutral_row() -> FeatureRow {
    FeatureRow {
        gender: "female".to_string(),
        relationship: "engaged".to_string(),
        days_last_contact: 2,
        personality_type: "INFJ".to_string(),
        confidence: 7.5,
        empathy_level: "high".to_string(),
        emotional_stability: 5,
        trust: 5,
        past_partners: 2,
        past_conflicts: 3,
        duration: 24,
        closeness: 8,
        response_time_hours: 1.5,
        caring: 5,
        loving: 5,
        efforts: 5,
        age: 29,
        behaviour: "reserved".to_string(),
        past_patterns: "serious".to_string(),
        infidelity_history: 0,
        religion: 1,
        hours_per_week: 10.0,
        attachment_style: "medium".to_string(),
        body_count: 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_fields() -> Map<String, Value> {
        let value = json!({
            "Gender": "female",
            "Relationship": "engaged",
            "No of Days Last Contact": 2,
            "Personality Type": "INFJ",
            "Confidence": 7.5,
            "Empathy Level": "high",
            "Emotional Stability": 8,
            "Trust Parameter": 9,
            "No of Past Partners": 2,
            "No of Past Conflicts": 3,
            "Duration of Relationship": 24,
            "Level of Closeness": 8,
            "Average Message Response Time in hours": "1.5",
            "Caring": 8,
            "Loving": 9,
            "Efforts": 7,
            "Age": 29,
            "Behaviour": "kind",
            "Past Relationship Patterns": "serious",
            "History of Infidelity": 0,
            "Religion": "1",
            "Time spent together in hours per week": 30.0,
            "Attachment Style": "high",
            "Body Count": 2,
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_from_named_parses_all_fields() {
        let row = FeatureRow::from_named(&sample_fields()).unwrap();
        assert_eq!(row.gender, "female");
        assert_eq!(row.trust, 9);
        assert_eq!(row.body_count, 2);
        // Numeric strings are accepted at the boundary
        assert_eq!(row.response_time_hours, 1.5);
        assert_eq!(row.religion, 1);
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let mut fields = sample_fields();
        fields.remove("Trust Parameter");
        let err = FeatureRow::from_named(&fields).unwrap_err();
        match err {
            ScoreError::Schema { field, .. } => assert_eq!(field, "Trust Parameter"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_integer_is_rejected() {
        let mut fields = sample_fields();
        fields.insert("Body Count".to_string(), json!("many"));
        let err = FeatureRow::from_named(&fields).unwrap_err();
        match err {
            ScoreError::Schema { field, .. } => assert_eq!(field, "Body Count"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_views_cover_every_field() {
        let row = FeatureRow::from_named(&sample_fields()).unwrap();
        assert_eq!(row.categorical_values().len(), 7);
        assert_eq!(row.numeric_values().len(), 17);
    }
}
