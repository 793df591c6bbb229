use serde::{Deserialize, Serialize};

use crate::core::schema::FeatureRow;

/// Lower and upper bound for every produced score, at every stage.
pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 99.0;

/// The two correlated output scores, as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    pub happy: f64,
    pub cheat: f64,
}

impl ScorePair {
    pub fn new(happy: f64, cheat: f64) -> Self {
        ScorePair { happy, cheat }
    }

    /// Clamp both scores into [1.0, 99.0]. Idempotent.
    pub fn clamp(self) -> Self {
        ScorePair {
            happy: self.happy.clamp(SCORE_MIN, SCORE_MAX),
            cheat: self.cheat.clamp(SCORE_MIN, SCORE_MAX),
        }
    }
}

/// One effect a fired clause applies to the running score pair.
#[derive(Debug, Clone, Copy)]
pub enum Effect {
    /// happy += k (k may be negative).
    AddHappy(f64),
    /// cheat += k (k may be negative).
    AddCheat(f64),
    /// cheat = max(cheat, k). Never lowers an already-higher value.
    CheatFloor(f64),
    /// happy += coeff * (field(row) - pivot), a continuous nudge.
    HappyScaled {
        coeff: f64,
        pivot: f64,
        field: fn(&FeatureRow) -> f64,
    },
}

/// One (predicate, effects) rule unit.
///
/// Clauses sharing a `group` form an ordered decision table with mutually
/// exclusive guards: within a group only the first clause whose predicate
/// holds fires, the rest are skipped even if their predicates also hold.
#[derive(Debug, Clone)]
pub struct Clause {
    pub name: &'static str,
    pub group: Option<&'static str>,
    pub when: fn(&FeatureRow) -> bool,
    pub effects: Vec<Effect>,
}

impl Clause {
    fn new(name: &'static str, when: fn(&FeatureRow) -> bool, effects: Vec<Effect>) -> Self {
        Clause {
            name,
            group: None,
            when,
            effects,
        }
    }

    fn in_group(mut self, group: &'static str) -> Self {
        self.group = Some(group);
        self
    }
}

/// Fold an ordered clause sequence over one row, starting from `base`.
///
/// Pure and deterministic: same (row, base, clauses) always produces the
/// same output. Later clauses see the cumulative effect of earlier ones.
/// Both scores are clamped into [1.0, 99.0] after the last clause.
pub fn apply_clauses(row: &FeatureRow, base: ScorePair, clauses: &[Clause]) -> ScorePair {
    let mut score = base;
    let mut fired_groups: Vec<&str> = Vec::new();

    for clause in clauses {
        if let Some(group) = clause.group {
            if fired_groups.contains(&group) {
                continue;
            }
        }
        if !(clause.when)(row) {
            continue;
        }
        if let Some(group) = clause.group {
            fired_groups.push(group);
        }

        for effect in &clause.effects {
            match *effect {
                Effect::AddHappy(k) => score.happy += k,
                Effect::AddCheat(k) => score.cheat += k,
                Effect::CheatFloor(k) => score.cheat = score.cheat.max(k),
                Effect::HappyScaled { coeff, pivot, field } => {
                    score.happy += coeff * (field(row) - pivot)
                }
            }
        }
    }

    score.clamp()
}

const BODY_COUNT: &str = "body count";

/// The inference-time clause sequence, applied on top of the regressor's
/// clamped raw prediction for every served request.
pub fn inference_rules() -> Vec<Clause> {
    vec![
        Clause::new(
            "casual past pattern",
            |r| r.past_patterns.eq_ignore_ascii_case("casual"),
            vec![Effect::AddCheat(4.0)],
        ),
        Clause::new(
            "low attachment",
            |r| r.attachment_style.eq_ignore_ascii_case("low"),
            vec![Effect::AddCheat(3.0)],
        ),
        Clause::new(
            "high attachment",
            |r| r.attachment_style.eq_ignore_ascii_case("high"),
            vec![Effect::AddCheat(-20.0), Effect::AddHappy(12.0)],
        ),
        Clause::new(
            "body count over 20",
            |r| r.body_count > 20,
            vec![Effect::CheatFloor(90.0), Effect::AddHappy(-30.0)],
        )
        .in_group(BODY_COUNT),
        Clause::new(
            "body count 11-20",
            |r| r.body_count > 10,
            vec![Effect::CheatFloor(50.0)],
        )
        .in_group(BODY_COUNT),
        Clause::new(
            "body count under 3",
            |r| r.body_count < 3,
            vec![Effect::AddCheat(-10.0)],
        )
        .in_group(BODY_COUNT),
        Clause::new(
            "prior infidelity",
            |r| r.infidelity_history > 0,
            vec![Effect::AddCheat(20.0), Effect::AddHappy(-15.0)],
        ),
        Clause::new(
            "high trust",
            |r| r.trust >= 9,
            vec![Effect::AddHappy(3.0), Effect::AddCheat(-2.0)],
        ),
        Clause::new(
            "kind behaviour",
            |r| r.behaviour.eq_ignore_ascii_case("kind"),
            vec![Effect::AddCheat(-2.0), Effect::AddHappy(2.0)],
        ),
        Clause::new(
            "time together 25h+",
            |r| r.hours_per_week >= 25.0,
            vec![Effect::AddHappy(2.0), Effect::AddCheat(-1.0)],
        ),
    ]
}

/// The label-time clause sequence, applied once per historical row during
/// label synthesis, before any encoding or fitting.
///
/// Deliberately richer than the inference-time set (emotional stability
/// thresholds, continuous Caring/Loving/Efforts nudges, low-trust penalty)
/// and with different high-attachment constants: these clauses shape what
/// the regressor learns, while the inference-time set only nudges its
/// output. The two sequences must stay separate.
pub fn label_rules() -> Vec<Clause> {
    vec![
        Clause::new(
            "low attachment",
            |r| r.attachment_style.eq_ignore_ascii_case("low"),
            vec![Effect::AddCheat(3.0)],
        ),
        Clause::new(
            "high attachment",
            |r| r.attachment_style.eq_ignore_ascii_case("high"),
            vec![Effect::AddCheat(-15.0), Effect::AddHappy(8.0)],
        ),
        Clause::new(
            "casual past pattern",
            |r| r.past_patterns.eq_ignore_ascii_case("casual"),
            vec![Effect::AddCheat(4.0)],
        ),
        Clause::new(
            "body count over 20",
            |r| r.body_count > 20,
            vec![Effect::CheatFloor(90.0), Effect::AddHappy(-30.0)],
        )
        .in_group(BODY_COUNT),
        Clause::new(
            "body count 11-20",
            |r| r.body_count > 10,
            vec![Effect::CheatFloor(50.0)],
        )
        .in_group(BODY_COUNT),
        Clause::new(
            "body count under 3",
            |r| r.body_count < 3,
            vec![Effect::AddCheat(-10.0)],
        )
        .in_group(BODY_COUNT),
        Clause::new(
            "prior infidelity",
            |r| r.infidelity_history > 0,
            vec![Effect::AddCheat(20.0), Effect::AddHappy(-15.0)],
        ),
        Clause::new("high trust", |r| r.trust >= 9, vec![Effect::AddHappy(4.0)]),
        Clause::new("low trust", |r| r.trust <= 3, vec![Effect::AddCheat(6.0)]),
        Clause::new(
            "stable emotions",
            |r| r.emotional_stability >= 8,
            vec![Effect::AddHappy(3.0)],
        ),
        Clause::new(
            "unstable emotions",
            |r| r.emotional_stability <= 3,
            vec![Effect::AddCheat(8.0), Effect::AddHappy(-6.0)],
        ),
        Clause::new(
            "caring nudge",
            |_| true,
            vec![Effect::HappyScaled {
                coeff: 0.1,
                pivot: 5.0,
                field: |r: &FeatureRow| r.caring as f64,
            }],
        ),
        Clause::new(
            "loving nudge",
            |_| true,
            vec![Effect::HappyScaled {
                coeff: 0.1,
                pivot: 5.0,
                field: |r: &FeatureRow| r.loving as f64,
            }],
        ),
        Clause::new(
            "efforts nudge",
            |_| true,
            vec![Effect::HappyScaled {
                coeff: 0.15,
                pivot: 5.0,
                field: |r: &FeatureRow| r.efforts as f64,
            }],
        ),
    ]
}
