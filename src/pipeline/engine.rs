//! Assessment engine: runs the full weighting and scoring pipeline.
//!
//! Each level of the hierarchy (subcategories within a category, then the
//! categories themselves) goes through the same steps:
//!
//! 1. normalize user weights, falling back to an even split
//! 2. resolve Q-values (supplied, else synthetic; learned at category level
//!    when enabled)
//! 3. softmax the Q-values into weights
//! 4. blend user and softmax weights
//! 5. aggregate scores with the adjusted weights
//!
//! Category scores feed the category level; the category level yields the
//! overall score, readiness level and gap analysis.

use super::input::{AssessmentInput, CategoryInput};
use super::report::{CategoryReport, ReadinessReport, SubcategoryRecord};
use crate::config::{EngineConfig, Validatable};
use crate::error::{ErrorContext, ReadinessError, Result};
use crate::model::{QValueMap, ScoreMap, WeightMap, clamp_score};
use crate::scoring::{LikertScale, ReadinessLevel, aggregate, analyze_gaps};
use crate::weights::{
    QValueLearner, QValueSource, SoftmaxTransformer, WeightBlender, WeightNormalizer,
    synthetic_q_value,
};

/// Version stamped on every report.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One key entering a weighting level.
struct LevelItem {
    key: String,
    score: f64,
    user_weight: Option<f64>,
    q_value: Option<f64>,
}

/// Weighted and aggregated result of one level.
struct LevelResult {
    records: Vec<SubcategoryRecord>,
    overall: f64,
}

/// Weight reconciliation and scoring engine.
///
/// Holds only configuration; every call to [`assess`](Self::assess) is a
/// pure function of its input.
#[derive(Debug, Clone)]
pub struct ReadinessEngine {
    normalizer: WeightNormalizer,
    softmax: SoftmaxTransformer,
    blender: WeightBlender,
    learner: Option<QValueLearner>,
    scale: LikertScale,
    synthetic_seed: u64,
}

impl Default for ReadinessEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ReadinessEngine {
    /// Build an engine from configuration.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let normalizer = WeightNormalizer::new(config.normalization.residual_target);
        let blender = WeightBlender::new(config.blending.blend_factor)
            .with_strategy(config.blending.strategy)
            .with_max_deviation(config.blending.max_deviation)
            .with_normalizer(normalizer);
        let learner = config.learning.enabled.then(|| {
            QValueLearner::new(
                config.learning.alpha,
                config.learning.gamma,
                config.learning.iterations,
            )
        });

        Self {
            normalizer,
            softmax: SoftmaxTransformer::new().with_eta(config.softmax.eta),
            blender,
            learner,
            scale: LikertScale::new(config.answers.min, config.answers.max),
            synthetic_seed: config.learning.synthetic_seed,
        }
    }

    /// Build an engine after validating the configuration.
    pub fn try_new(config: &EngineConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(ReadinessError::config(details.join("; ")));
        }
        Ok(Self::new(config))
    }

    /// Score a full assessment.
    ///
    /// Fails only when the assessment has no categories.
    pub fn assess(&self, input: &AssessmentInput) -> Result<ReadinessReport> {
        let mut warnings = Vec::new();
        let mut subcategories = Vec::with_capacity(input.categories.len());
        let mut category_items = Vec::with_capacity(input.categories.len());

        for (name, category) in &input.categories {
            let (score, records) = self
                .score_category(name, category, &mut warnings)
                .with_context(|| format!("category '{name}'"))?;
            subcategories.push(records);
            category_items.push(LevelItem {
                key: name.clone(),
                score,
                user_weight: category.weight,
                q_value: category.q_value,
            });
        }

        let categories = self
            .weigh_level(category_items, self.learner.as_ref(), &mut warnings)
            .context("category weights")?;

        let category_scores: ScoreMap = categories
            .records
            .iter()
            .map(|r| (r.key.clone(), r.score))
            .collect();
        let category_weights: WeightMap = categories
            .records
            .iter()
            .map(|r| (r.key.clone(), r.adjusted_weight))
            .collect();
        let gaps = analyze_gaps(&category_scores, &category_weights);

        let overall_score = categories.overall;
        let level = ReadinessLevel::from_score(overall_score);
        tracing::info!(
            "Assessed {} categories: overall {overall_score:.1} ({level})",
            categories.records.len()
        );

        Ok(ReadinessReport {
            engine_version: ENGINE_VERSION.to_string(),
            assessment_type: input.assessment_type.clone(),
            overall_score,
            level,
            categories: categories
                .records
                .into_iter()
                .zip(subcategories)
                .map(|(record, subcategories)| CategoryReport {
                    record,
                    subcategories,
                })
                .collect(),
            gaps,
            warnings,
        })
    }

    /// Score one category, weighing its subcategories when it has any.
    fn score_category(
        &self,
        name: &str,
        category: &CategoryInput,
        warnings: &mut Vec<String>,
    ) -> Result<(f64, Vec<SubcategoryRecord>)> {
        if category.subcategories.is_empty() {
            let score = self.resolve_score(name, category.score, &category.answers, warnings);
            return Ok((score, Vec::new()));
        }

        let items = category
            .subcategories
            .iter()
            .map(|(key, sub)| LevelItem {
                key: key.clone(),
                score: self.resolve_score(
                    &format!("{name}/{key}"),
                    sub.score,
                    &sub.answers,
                    warnings,
                ),
                user_weight: sub.weight,
                q_value: sub.q_value,
            })
            .collect();

        let level = self
            .weigh_level(items, None, warnings)
            .context("subcategory weights")?;
        tracing::debug!("Category '{name}' scored {:.1}", level.overall);
        Ok((level.overall, level.records))
    }

    /// Explicit score if present, else the answer score, else 0.
    fn resolve_score(
        &self,
        key: &str,
        score: Option<f64>,
        answers: &[f64],
        warnings: &mut Vec<String>,
    ) -> f64 {
        if let Some(score) = score {
            let clamped = clamp_score(score);
            if clamped != score {
                warnings.push(format!("'{key}': score {score} clamped to {clamped}"));
            }
            return clamped;
        }
        if let Some(score) = self.scale.score(answers) {
            return score;
        }
        tracing::warn!("'{key}' has no score and no usable answers, scoring 0");
        warnings.push(format!("'{key}': no score or usable answers, scored 0"));
        0.0
    }

    fn weigh_level(
        &self,
        items: Vec<LevelItem>,
        learner: Option<&QValueLearner>,
        warnings: &mut Vec<String>,
    ) -> Result<LevelResult> {
        let keys: Vec<&str> = items.iter().map(|i| i.key.as_str()).collect();
        let scores: ScoreMap = items.iter().map(|i| (i.key.clone(), i.score)).collect();

        let supplied_weights: WeightMap = if items.iter().any(|i| i.user_weight.is_some()) {
            items
                .iter()
                .map(|i| {
                    let weight = i.user_weight.unwrap_or_else(|| {
                        warnings.push(format!("'{}': no user weight, using 0", i.key));
                        0.0
                    });
                    (i.key.clone(), weight)
                })
                .collect()
        } else {
            WeightMap::new()
        };
        let user_weights = self
            .normalizer
            .normalize_with_fallback(&supplied_weights, &keys)?;

        let (mut q_values, mut sources) = self.resolve_q_values(&items);
        if let Some(learner) = learner {
            q_values = learner.learn(&q_values, &user_weights, &scores);
            sources.fill(QValueSource::Learned);
        }

        let softmax_weights = self.softmax.transform(&q_values);
        let adjusted = self.blender.blend(&user_weights, &softmax_weights)?;
        let aggregation = aggregate(&scores, &adjusted);
        warnings.extend(aggregation.warnings.iter().map(ToString::to_string));

        let records = items
            .into_iter()
            .zip(sources)
            .map(|(item, q_value_source)| {
                let lookup = |map: &WeightMap| map.get(&item.key).copied().unwrap_or(0.0);
                SubcategoryRecord {
                    score: item.score,
                    user_weight: lookup(&user_weights),
                    q_value: lookup(&q_values),
                    q_value_source,
                    softmax_weight: lookup(&softmax_weights),
                    adjusted_weight: lookup(&adjusted),
                    score_contribution: lookup(&aggregation.contributions),
                    key: item.key,
                }
            })
            .collect();

        Ok(LevelResult {
            records,
            overall: aggregation.overall,
        })
    }

    /// Supplied Q-values where finite, synthetic ones elsewhere.
    fn resolve_q_values(&self, items: &[LevelItem]) -> (QValueMap, Vec<QValueSource>) {
        items
            .iter()
            .map(|item| match item.q_value.filter(|q| q.is_finite()) {
                Some(q) => ((item.key.clone(), q), QValueSource::Supplied),
                None => (
                    (
                        item.key.clone(),
                        synthetic_q_value(&item.key, self.synthetic_seed),
                    ),
                    QValueSource::Synthetic,
                ),
            })
            .unzip()
    }
}
