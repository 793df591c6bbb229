use serde::{Deserialize, Serialize};

use crate::core::rules::{apply_clauses, label_rules, ScorePair};
use crate::core::schema::FeatureRow;

/// One historical row together with its (happy, cheat) label pair.
///
/// Before synthesis the pair holds the raw observed percentages from the
/// corpus; after synthesis it holds the rule-corrected training target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledRow {
    pub row: FeatureRow,
    pub target: ScorePair,
}

/// Apply the label-time rule sequence to every row's raw score pair,
/// producing the supervised training targets.
///
/// Row-wise and independent: no cross-row state, so the pass is
/// deterministic and yields identical output on every rerun over the same
/// corpus. The raw pair is fed to the fold unclamped; only the fold's
/// final clamp bounds the result.
pub fn synthesize(rows: Vec<LabeledRow>) -> Vec<LabeledRow> {
    let rules = label_rules();
    rows.into_iter()
        .map(|mut labeled| {
            labeled.target = apply_clauses(&labeled.row, labeled.target, &rules);
            labeled
        })
        .collect()
}
