//! Offset/limit cursor over the remote log collection.
//!
//! Loads are split into `begin_*` (issue a ticket) and [`LogPaginator::finish`]
//! (apply the response) so the UI thread can own the paginator while a worker
//! performs the request. Only the most recently issued ticket may change
//! state; older completions are reported as [`Completion::Superseded`].

use shared::{
    domain::{LogPage, LogRecord},
    protocol::{LogsQuery, LogsResponse},
};
use tracing::{debug, info, warn};

use crate::{
    api::LabApi,
    error::ClientError,
    sequence::{BusyFlag, BusyGuard, Completion, RequestSeq, RequestSequencer},
};

pub const PAGE_LIMIT: u64 = 10;

#[derive(Debug)]
pub struct PageTicket {
    seq: RequestSeq,
    query: LogsQuery,
    _busy: BusyGuard,
}

impl PageTicket {
    pub fn seq(&self) -> RequestSeq {
        self.seq
    }

    pub fn query(&self) -> LogsQuery {
        self.query
    }

    pub fn start(&self) -> u64 {
        self.query.start
    }
}

#[derive(Debug)]
pub struct LogPaginator {
    page: LogPage,
    limit: u64,
    sequencer: RequestSequencer,
    busy: BusyFlag,
}

impl Default for LogPaginator {
    fn default() -> Self {
        Self::new()
    }
}

impl LogPaginator {
    pub fn new() -> Self {
        Self {
            page: LogPage {
                total: Some(0),
                ..LogPage::default()
            },
            limit: PAGE_LIMIT,
            sequencer: RequestSequencer::default(),
            busy: BusyFlag::default(),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// `None` once a backend answered without reporting a collection size.
    pub fn total(&self) -> Option<u64> {
        self.page.total
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.page.records
    }

    pub fn page(&self) -> &LogPage {
        &self.page
    }

    pub fn is_loading(&self) -> bool {
        self.busy.is_set()
    }

    /// Whether the server reported records past the current window. With no
    /// reported total the boundary is unknown and moving forward stays allowed.
    pub fn can_next(&self) -> bool {
        self.page.total.map_or(true, |total| self.page.end() < total)
    }

    pub fn can_previous(&self) -> bool {
        self.page.offset > 0
    }

    pub fn window_label(&self) -> String {
        format!(
            "Records: {} - {}",
            self.page.offset,
            self.page.offset.saturating_add(self.limit)
        )
    }

    /// No clamping: the caller picks a valid start.
    pub fn begin_load(&mut self, start: u64) -> PageTicket {
        let seq = self.sequencer.issue();
        debug!(seq = seq.0, start, limit = self.limit, "log page requested");
        PageTicket {
            seq,
            query: LogsQuery {
                start,
                limit: self.limit,
            },
            _busy: self.busy.acquire(),
        }
    }

    pub fn begin_refresh(&mut self) -> PageTicket {
        self.begin_load(self.page.offset)
    }

    pub fn begin_next(&mut self) -> PageTicket {
        self.begin_load(self.page.offset.saturating_add(self.limit))
    }

    pub fn begin_previous(&mut self) -> PageTicket {
        self.begin_load(self.page.offset.saturating_sub(self.limit))
    }

    /// Gives back a ticket whose request was never sent, so an earlier
    /// request still in flight is the newest again.
    pub fn abandon(&mut self, seq: RequestSeq) {
        if self.sequencer.retract(seq) {
            debug!(seq = seq.0, "log page request abandoned before dispatch");
        }
    }

    pub fn finish(
        &mut self,
        ticket: PageTicket,
        result: Result<LogsResponse, ClientError>,
    ) -> Result<Completion, ClientError> {
        if !self.sequencer.is_latest(ticket.seq) {
            debug!(
                seq = ticket.seq.0,
                start = ticket.start(),
                "discarding superseded log page"
            );
            return Ok(Completion::Superseded);
        }

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    seq = ticket.seq.0,
                    start = ticket.start(),
                    kind = err.kind().label(),
                    "log page load failed: {err}"
                );
                return Err(err);
            }
        };

        self.page = LogPage {
            records: response.data,
            offset: ticket.start(),
            total: response.pagination.total,
        };
        info!(
            seq = ticket.seq.0,
            offset = self.page.offset,
            received = self.page.records.len(),
            total = ?self.page.total,
            "log page loaded"
        );
        Ok(Completion::Applied)
    }

    pub async fn load_page(
        &mut self,
        api: &dyn LabApi,
        start: u64,
    ) -> Result<Completion, ClientError> {
        let ticket = self.begin_load(start);
        let result = api.fetch_logs(ticket.query()).await;
        self.finish(ticket, result)
    }

    pub async fn refresh(&mut self, api: &dyn LabApi) -> Result<Completion, ClientError> {
        self.load_page(api, self.page.offset).await
    }

    pub async fn next(&mut self, api: &dyn LabApi) -> Result<Completion, ClientError> {
        self.load_page(api, self.page.offset.saturating_add(self.limit))
            .await
    }

    pub async fn previous(&mut self, api: &dyn LabApi) -> Result<Completion, ClientError> {
        self.load_page(api, self.page.offset.saturating_sub(self.limit))
            .await
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
