//! Postgres-backed audit sink
//!
//! Records are queued on a bounded channel and inserted by a single
//! background writer task, so callers never wait on the database. The
//! channel is FIFO, which keeps a request row ahead of its result rows.
//! When the queue is full new records are refused with
//! [`AuditError::QueueFull`] instead of piling up in memory.

use sqlx::PgPool;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use super::{AuditError, AuditSink};
use shared::{
    AuditRecord, ProfitCalcLogRecord, RecommendationRequestRecord, RecommendationResultRecord,
};

/// Fire-and-forget sink that hands records to the writer task
#[derive(Clone)]
pub struct PgAuditSink {
    tx: mpsc::Sender<AuditRecord>,
}

impl PgAuditSink {
    /// Start the writer task with room for `capacity` pending records. It
    /// exits once every sink clone is dropped and the queue is drained.
    pub fn spawn(db: PgPool, capacity: usize) -> (Self, JoinHandle<()>) {
        let (sink, rx) = Self::channel(capacity);
        let handle = tokio::spawn(run_writer(db, rx));
        (sink, handle)
    }

    fn channel(capacity: usize) -> (Self, mpsc::Receiver<AuditRecord>) {
        // mpsc::channel panics on zero capacity
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    fn send(&self, record: AuditRecord) -> Result<(), AuditError> {
        self.tx.try_send(record).map_err(|e| match e {
            TrySendError::Full(_) => AuditError::QueueFull,
            TrySendError::Closed(_) => AuditError::WriterClosed,
        })
    }
}

impl AuditSink for PgAuditSink {
    fn record_request(&self, record: &RecommendationRequestRecord) -> Result<(), AuditError> {
        self.send(AuditRecord::RecommendationRequest(record.clone()))
    }

    fn record_results(&self, records: &[RecommendationResultRecord]) -> Result<(), AuditError> {
        for record in records {
            self.send(AuditRecord::RecommendationResult(record.clone()))?;
        }
        Ok(())
    }

    fn record_profit_calc(&self, record: &ProfitCalcLogRecord) -> Result<(), AuditError> {
        self.send(AuditRecord::ProfitCalc(record.clone()))
    }
}

async fn run_writer(db: PgPool, mut rx: mpsc::Receiver<AuditRecord>) {
    tracing::info!("Audit writer started");

    while let Some(record) = rx.recv().await {
        if let Err(e) = write_record(&db, &record).await {
            tracing::error!("Failed to store {} audit record: {}", record.kind(), e);
        }
    }

    tracing::info!("Audit writer stopped");
}

async fn write_record(db: &PgPool, record: &AuditRecord) -> Result<(), sqlx::Error> {
    match record {
        AuditRecord::RecommendationRequest(r) => {
            sqlx::query(
                r#"
                INSERT INTO recommendation_requests (id, soil_type_code, water_need, region, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(r.id)
            .bind(&r.soil_type_code)
            .bind(&r.water_availability)
            .bind(&r.region)
            .bind(r.created_at)
            .execute(db)
            .await?;
        }
        AuditRecord::RecommendationResult(r) => {
            sqlx::query(
                r#"
                INSERT INTO recommendation_results (request_id, crop_id, rank, match_score)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(r.request_id)
            .bind(r.crop_id)
            .bind(r.rank)
            .bind(r.match_score)
            .execute(db)
            .await?;
        }
        AuditRecord::ProfitCalc(r) => {
            sqlx::query(
                r#"
                INSERT INTO profit_calc_logs (
                    id, farmer_id, crop_id, land_area_acres,
                    seed_cost, fertilizer_cost, pesticide_cost, labor_cost,
                    irrigation_cost, other_cost, total_cost,
                    expected_yield_quintals, market_price_per_quintal, gross_income,
                    net_profit, roi_pct, profit_margin_pct, assessment, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
                "#,
            )
            .bind(r.id)
            .bind(r.farmer_id)
            .bind(r.crop_id)
            .bind(r.land_area_acres)
            .bind(r.seed_cost)
            .bind(r.fertilizer_cost)
            .bind(r.pesticide_cost)
            .bind(r.labor_cost)
            .bind(r.irrigation_cost)
            .bind(r.other_cost)
            .bind(r.total_cost)
            .bind(r.expected_yield_quintals)
            .bind(r.market_price_per_quintal)
            .bind(r.gross_income)
            .bind(r.net_profit)
            .bind(r.roi_pct)
            .bind(r.profit_margin_pct)
            .bind(r.assessment.as_str())
            .bind(r.created_at)
            .execute(db)
            .await?;
        }
    }

    Ok(())
}
