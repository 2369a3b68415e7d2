//! Colour-scale thresholds across survey documents
//!
//! Heat maps of several surveys are only comparable when they share a colour
//! scale. This service computes, for each radio metric, the minimum and
//! maximum reading over every point of every given survey document.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::app::models::SurveyPoint;
use crate::app::services::output::write_atomic;
use crate::config::ThresholdConfig;
use crate::constants::THRESHOLD_METRICS;
use crate::{Error, Result};

/// Observed span of one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdRange {
    pub min: f64,
    pub max: f64,
}

impl ThresholdRange {
    fn widen(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }
}

/// Threshold ranges by metric name, in [`THRESHOLD_METRICS`] order
///
/// Serializes as a JSON object keyed by metric name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdTable {
    entries: Vec<(String, ThresholdRange)>,
}

impl ThresholdTable {
    /// Range for `metric`, if any reading was seen
    pub fn get(&self, metric: &str) -> Option<ThresholdRange> {
        self.entries
            .iter()
            .find(|(name, _)| name == metric)
            .map(|(_, range)| *range)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ThresholdRange)> {
        self.entries
            .iter()
            .map(|(name, range)| (name.as_str(), *range))
    }
}

impl Serialize for ThresholdTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, range) in &self.entries {
            map.serialize_entry(name, range)?;
        }
        map.end()
    }
}

/// Result of a threshold run
#[derive(Debug, Clone)]
pub struct ThresholdOutcome {
    /// Computed ranges
    pub table: ThresholdTable,

    /// Number of survey documents read
    pub documents: usize,

    /// Number of survey points across all documents
    pub points: usize,

    /// File the thresholds were written to
    pub output_path: PathBuf,

    /// Size of the output file in bytes
    pub bytes_written: u64,
}

/// Reading of `metric` at `point`
fn metric_value(point: &SurveyPoint, metric: &str) -> Option<f64> {
    match metric {
        "sensor_rssi" => Some(point.result.rssi),
        "sensor_snr" => Some(point.result.snr),
        "gateway_rssi" => Some(point.result.gateway_rssi),
        "gateway_snr" => Some(point.result.gateway_snr),
        _ => None,
    }
}

/// Threshold generator over survey documents
#[derive(Debug, Clone, Default)]
pub struct ThresholdGenerator {
    config: ThresholdConfig,
}

impl ThresholdGenerator {
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// Read the survey points of the document in `path`
    pub async fn load_points(path: &Path) -> Result<Vec<SurveyPoint>> {
        let file = path.display().to_string();
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| Error::from_read(path, e))?;

        let mut document: Value = serde_json::from_slice(&content)
            .map_err(|e| Error::json(file.as_str(), "Expected a survey document", e))?;

        let points = document
            .get_mut("survey_points")
            .map(Value::take)
            .ok_or_else(|| Error::survey_format(file.as_str(), "Missing survey_points"))?;

        serde_json::from_value(points)
            .map_err(|e| Error::json(file.as_str(), "Malformed survey_points", e))
    }

    /// Compute the range of every metric over `points`
    ///
    /// NaN readings are ignored. Metrics without any reading are left out.
    pub fn compute(points: &[SurveyPoint]) -> ThresholdTable {
        let mut entries = Vec::with_capacity(THRESHOLD_METRICS.len());

        for metric in THRESHOLD_METRICS {
            let range = points
                .iter()
                .filter_map(|point| metric_value(point, metric))
                .filter(|value| !value.is_nan())
                .fold(None, |range: Option<ThresholdRange>, value| {
                    Some(match range {
                        Some(range) => range.widen(value),
                        None => ThresholdRange {
                            min: value,
                            max: value,
                        },
                    })
                });

            match range {
                Some(range) => entries.push((metric.to_string(), range)),
                None => warn!("No readings for {}, omitting it from thresholds", metric),
            }
        }

        ThresholdTable { entries }
    }

    /// Compute thresholds over the documents in `paths` and write them out
    pub async fn generate(&self, paths: &[PathBuf]) -> Result<ThresholdOutcome> {
        if paths.is_empty() {
            return Err(Error::configuration("At least one survey document is required"));
        }

        info!("Generating thresholds from {} survey documents", paths.len());

        let mut points = Vec::new();
        for path in paths {
            let document_points = Self::load_points(path).await?;
            debug!(
                "Loaded {} survey points from {}",
                document_points.len(),
                path.display()
            );
            points.extend(document_points);
        }

        let table = Self::compute(&points);
        let content = serde_json::to_vec(&table).map_err(|e| {
            Error::json(
                self.config.output_path.display().to_string(),
                "Failed to encode thresholds",
                e,
            )
        })?;
        let bytes_written = write_atomic(&self.config.output_path, &content)?;

        info!("Wrote: {}", self.config.output_path.display());

        Ok(ThresholdOutcome {
            table,
            documents: paths.len(),
            points: points.len(),
            output_path: self.config.output_path.clone(),
            bytes_written,
        })
    }
}
