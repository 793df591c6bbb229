pub mod artifact;
pub mod corpus;
pub mod encoder;
pub mod error;
pub mod labels;
pub mod regressor;
pub mod rules;
pub mod schema;
pub mod train;

pub use artifact::ModelArtifact;
pub use encoder::FeatureEncoder;
pub use error::{Result, ScoreError};
pub use labels::{synthesize, LabeledRow};
pub use regressor::LinearRegressor;
pub use rules::{apply_clauses, inference_rules, label_rules, ScorePair};
pub use schema::FeatureRow;
pub use train::{train, TrainOptions, TrainReport};
