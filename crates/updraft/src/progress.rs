//! Progress reporting for upload pipelines.
//!
//! A pipeline emits progress on one bounded channel, tagged with the phase
//! that produced it. Delivery is best-effort: a slow consumer drops updates,
//! it never stalls the pipeline.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Phase of the pipeline a progress fraction belongs to.
///
/// Local assets only ever emit `Export`; cloud assets emit `Materialize`
/// while being fetched from the cloud library, then `Export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPhase {
    Materialize,
    Export,
}

impl ProgressPhase {
    fn index(self) -> usize {
        match self {
            ProgressPhase::Materialize => 0,
            ProgressPhase::Export => 1,
        }
    }
}

impl std::fmt::Display for ProgressPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressPhase::Materialize => write!(f, "materialize"),
            ProgressPhase::Export => write!(f, "export"),
        }
    }
}

/// One progress observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Id of the submission this update belongs to.
    pub job_id: Uuid,
    pub phase: ProgressPhase,
    /// Completion fraction in `0.0..=1.0`, non-decreasing per phase.
    pub fraction: f64,
    pub updated_at: DateTime<Utc>,
}

/// Clamping, monotonic reporter shared by the stages of one pipeline.
#[derive(Clone)]
pub struct ProgressReporter {
    job_id: Uuid,
    tx: mpsc::Sender<ProgressUpdate>,
    high_water: Arc<parking_lot::Mutex<[f64; 2]>>,
}

impl ProgressReporter {
    pub fn new(job_id: Uuid, tx: mpsc::Sender<ProgressUpdate>) -> Self {
        Self {
            job_id,
            tx,
            high_water: Arc::new(parking_lot::Mutex::new([0.0, 0.0])),
        }
    }

    /// Reporter whose updates go nowhere.
    pub fn noop(job_id: Uuid) -> Self {
        let (tx, _rx) = mpsc::channel::<ProgressUpdate>(1);
        Self::new(job_id, tx)
    }

    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    /// Record and emit a fraction for a phase.
    ///
    /// Values are clamped to `0.0..=1.0` and never regress: a fraction lower
    /// than the phase's high-water mark is reported as the high-water mark.
    pub fn report(&self, phase: ProgressPhase, fraction: f64) {
        let clamped = fraction.clamp(0.0, 1.0);
        let fraction = {
            let mut high_water = self.high_water.lock();
            let slot = &mut high_water[phase.index()];
            *slot = slot.max(clamped);
            *slot
        };

        let _ = self.tx.try_send(ProgressUpdate {
            job_id: self.job_id,
            phase,
            fraction,
            updated_at: Utc::now(),
        });
    }
}
