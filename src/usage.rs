//! Enabled-receiver counts
//!
//! Counts, per receiver type, how many receivers are referenced by the
//! pipelines of the logging and metrics services. The counts are shipped as
//! one gauge point per (telemetry type, receiver type).

use crate::model::{Module, Pipeline, UnifiedConfig};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Gauge carrying the counts.
pub const ENABLED_RECEIVERS_METRIC: &str = "enabled_receivers";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("receiver id {id} not found in {module} receivers")]
    UnknownReceiver { id: String, module: Module },

    #[error("metrics receiver id {id} is also defined as a combined receiver")]
    DuplicateReceiver { id: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledReceivers {
    pub metrics_receiver_counts_by_type: BTreeMap<String, usize>,
    pub logs_receiver_counts_by_type: BTreeMap<String, usize>,
}

/// One gauge observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverCount {
    /// `metrics` or `logs`
    pub telemetry_type: &'static str,
    pub receiver_type: String,
    pub count: usize,
}

impl ReceiverCount {
    pub fn labels(&self) -> BTreeMap<&'static str, String> {
        let mut labels = BTreeMap::new();
        labels.insert("telemetry_type", self.telemetry_type.to_string());
        labels.insert("receiver_type", self.receiver_type.clone());
        labels
    }
}

impl EnabledReceivers {
    /// Metrics points first, then logs, each in receiver type order.
    pub fn points(&self) -> Vec<ReceiverCount> {
        let metrics = self
            .metrics_receiver_counts_by_type
            .iter()
            .map(|(receiver_type, count)| ("metrics", receiver_type, count));
        let logs = self
            .logs_receiver_counts_by_type
            .iter()
            .map(|(receiver_type, count)| ("logs", receiver_type, count));

        metrics
            .chain(logs)
            .map(|(telemetry_type, receiver_type, count)| ReceiverCount {
                telemetry_type,
                receiver_type: receiver_type.clone(),
                count: *count,
            })
            .collect()
    }
}

/// Counts the receivers referenced by every logging and metrics pipeline.
///
/// Metrics pipelines may reference combined receivers. A referenced id that
/// is not defined is an error, as is an id defined both as a metrics and as
/// a combined receiver.
pub fn count_enabled_receivers(config: &UnifiedConfig) -> Result<EnabledReceivers, UsageError> {
    let mut enabled = EnabledReceivers::default();

    let metrics_types = metrics_receiver_types(config)?;
    let logging_types: BTreeMap<&str, &'static str> = config
        .logging
        .iter()
        .flat_map(|logging| logging.receivers.iter())
        .map(|(id, receiver)| (id.as_str(), receiver.component_type()))
        .collect();

    if let Some(pipelines) = config.logging_pipelines() {
        for pipeline in pipelines.values() {
            count_receivers(
                &mut enabled.logs_receiver_counts_by_type,
                pipeline,
                &logging_types,
                Module::Logging,
            )?;
        }
    }

    if let Some(pipelines) = config.metrics_pipelines() {
        for pipeline in pipelines.values() {
            count_receivers(
                &mut enabled.metrics_receiver_counts_by_type,
                pipeline,
                &metrics_types,
                Module::Metrics,
            )?;
        }
    }

    debug!(
        metrics = enabled.metrics_receiver_counts_by_type.len(),
        logs = enabled.logs_receiver_counts_by_type.len(),
        "Counted enabled receiver types"
    );
    Ok(enabled)
}

/// Metrics receivers merged with combined receivers, id to type.
fn metrics_receiver_types(config: &UnifiedConfig) -> Result<BTreeMap<&str, &'static str>, UsageError> {
    let mut types: BTreeMap<&str, &'static str> = config
        .metrics
        .iter()
        .flat_map(|metrics| metrics.receivers.iter())
        .map(|(id, receiver)| (id.as_str(), receiver.component_type()))
        .collect();

    if let Some(combined) = &config.combined {
        for (id, receiver) in &combined.receivers {
            if types.insert(id.as_str(), receiver.component_type()).is_some() {
                return Err(UsageError::DuplicateReceiver { id: id.clone() });
            }
        }
    }
    Ok(types)
}

fn count_receivers(
    counts: &mut BTreeMap<String, usize>,
    pipeline: &Pipeline,
    types: &BTreeMap<&str, &'static str>,
    module: Module,
) -> Result<(), UsageError> {
    for id in &pipeline.receiver_ids {
        let receiver_type = types
            .get(id.as_str())
            .ok_or_else(|| UsageError::UnknownReceiver {
                id: id.clone(),
                module,
            })?;
        *counts.entry(receiver_type.to_string()).or_insert(0) += 1;
    }
    Ok(())
}
