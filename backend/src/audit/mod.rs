//! Audit trail sinks
//!
//! The engines hand every request, ranked result and profit calculation to
//! an [`AuditSink`] after computing their answer. Sinks must not block the
//! caller; a failed write is reported back as [`AuditError`] for the engine
//! to log, and never turns a computed result into an error.

pub mod postgres;

use std::sync::Mutex;

use thiserror::Error;

use shared::{
    AuditRecord, ProfitCalcLogRecord, RecommendationRequestRecord, RecommendationResultRecord,
};

pub use postgres::PgAuditSink;

/// Failure to accept an audit record
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("audit writer is no longer running")]
    WriterClosed,

    #[error("audit queue is full")]
    QueueFull,
}

/// Append-only destination for audit records
pub trait AuditSink: Send + Sync {
    fn record_request(&self, record: &RecommendationRequestRecord) -> Result<(), AuditError>;

    fn record_results(&self, records: &[RecommendationResultRecord]) -> Result<(), AuditError>;

    fn record_profit_calc(&self, record: &ProfitCalcLogRecord) -> Result<(), AuditError>;
}

/// Keeps records in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<AuditRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn push(&self, record: AuditRecord) {
        self.lock().push(record);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AuditRecord>> {
        // A poisoned lock still holds a consistent Vec.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AuditSink for MemoryAuditSink {
    fn record_request(&self, record: &RecommendationRequestRecord) -> Result<(), AuditError> {
        self.push(AuditRecord::RecommendationRequest(record.clone()));
        Ok(())
    }

    fn record_results(&self, records: &[RecommendationResultRecord]) -> Result<(), AuditError> {
        for record in records {
            self.push(AuditRecord::RecommendationResult(record.clone()));
        }
        Ok(())
    }

    fn record_profit_calc(&self, record: &ProfitCalcLogRecord) -> Result<(), AuditError> {
        self.push(AuditRecord::ProfitCalc(record.clone()));
        Ok(())
    }
}

/// Writes records to the log only, for deployments with auditing disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record_request(&self, record: &RecommendationRequestRecord) -> Result<(), AuditError> {
        tracing::debug!(
            request_id = %record.id,
            soil = %record.soil_type_code,
            water = %record.water_availability,
            region = ?record.region,
            "Recommendation request"
        );
        Ok(())
    }

    fn record_results(&self, records: &[RecommendationResultRecord]) -> Result<(), AuditError> {
        for record in records {
            tracing::debug!(
                request_id = %record.request_id,
                crop_id = record.crop_id,
                rank = record.rank,
                score = record.match_score,
                "Recommendation result"
            );
        }
        Ok(())
    }

    fn record_profit_calc(&self, record: &ProfitCalcLogRecord) -> Result<(), AuditError> {
        tracing::debug!(
            crop_id = record.crop_id,
            acres = %record.land_area_acres,
            net_profit = %record.net_profit,
            assessment = %record.assessment,
            "Profit calculation"
        );
        Ok(())
    }
}
