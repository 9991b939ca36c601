//! Point count form state and the current point set.

use shared::{
    domain::PointSet,
    protocol::{HelloQuery, HelloResponse},
};
use tracing::{debug, info, warn};

use crate::{
    api::LabApi,
    error::ClientError,
    pagination::LogPaginator,
    sequence::{BusyFlag, BusyGuard, Completion, RequestSeq, RequestSequencer},
};

pub const DEFAULT_POINT_COUNT: &str = "1000";

#[derive(Debug)]
pub struct GenerationTicket {
    seq: RequestSeq,
    query: HelloQuery,
    _busy: BusyGuard,
}

impl GenerationTicket {
    pub fn seq(&self) -> RequestSeq {
        self.seq
    }

    pub fn query(&self) -> &HelloQuery {
        &self.query
    }
}

#[derive(Debug)]
pub struct GenerationController {
    count: String,
    points: PointSet,
    sequencer: RequestSequencer,
    busy: BusyFlag,
}

impl Default for GenerationController {
    fn default() -> Self {
        Self::new(DEFAULT_POINT_COUNT)
    }
}

impl GenerationController {
    pub fn new(count: impl Into<String>) -> Self {
        Self {
            count: count.into(),
            points: PointSet::default(),
            sequencer: RequestSequencer::default(),
            busy: BusyFlag::default(),
        }
    }

    /// Stored verbatim; whatever the input produced is what gets sent.
    pub fn set_count(&mut self, count: impl Into<String>) {
        self.count = count.into();
    }

    pub fn count(&self) -> &str {
        &self.count
    }

    pub fn count_mut(&mut self) -> &mut String {
        &mut self.count
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_set()
    }

    /// Overlapping calls are allowed; only the newest one can land.
    pub fn begin(&mut self) -> GenerationTicket {
        let seq = self.sequencer.issue();
        debug!(seq = seq.0, count = %self.count, "point generation requested");
        GenerationTicket {
            seq,
            query: HelloQuery {
                count: self.count.clone(),
            },
            _busy: self.busy.acquire(),
        }
    }

    /// Gives back a ticket whose request was never sent.
    pub fn abandon(&mut self, seq: RequestSeq) {
        if self.sequencer.retract(seq) {
            debug!(seq = seq.0, "point generation abandoned before dispatch");
        }
    }

    pub fn finish(
        &mut self,
        ticket: GenerationTicket,
        result: Result<HelloResponse, ClientError>,
    ) -> Result<Completion, ClientError> {
        if !self.sequencer.is_latest(ticket.seq) {
            debug!(seq = ticket.seq.0, "discarding superseded point set");
            return Ok(Completion::Superseded);
        }

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    seq = ticket.seq.0,
                    count = %ticket.query.count,
                    kind = err.kind().label(),
                    "point generation failed: {err}"
                );
                return Err(err);
            }
        };

        self.points = PointSet::new(response.points);
        info!(
            seq = ticket.seq.0,
            points = self.points.len(),
            log_record_id = response.log_record_id.as_deref().unwrap_or("-"),
            "point set replaced"
        );
        Ok(Completion::Applied)
    }

    /// Requests a new point set and, when it lands, reloads the first log
    /// page. A failed log reload does not fail the generation.
    pub async fn generate(
        &mut self,
        api: &dyn LabApi,
        logs: &mut LogPaginator,
    ) -> Result<Completion, ClientError> {
        let ticket = self.begin();
        let result = api.generate_points(ticket.query()).await;
        let completion = self.finish(ticket, result)?;

        if completion.is_applied() {
            if let Err(err) = logs.load_page(api, 0).await {
                debug!("first log page not reloaded after generation: {err}");
            }
        }
        Ok(completion)
    }
}

#[cfg(test)]
#[path = "tests/generation_tests.rs"]
mod tests;
