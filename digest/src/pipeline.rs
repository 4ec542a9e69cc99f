// Digest pipeline: locate -> fetch -> summarize, strictly sequential

use tracing::info;

use crate::error::DigestError;
use crate::models::{LiteratureRecord, ReaderProfile, SearchFilters};
use crate::query::build_query;
use crate::stages::{RecordFetcher, RecordLocator, Summarizer};

pub struct DigestPipeline {
    locator: RecordLocator,
    fetcher: RecordFetcher,
    summarizer: Summarizer,
}

#[derive(Debug)]
pub struct DigestReport {
    pub query: String,
    pub outcome: DigestOutcome,
}

#[derive(Debug)]
pub enum DigestOutcome {
    /// The locator found nothing. Not an error.
    NoMatches,
    Records(Vec<RecordDigest>),
}

#[derive(Debug)]
pub struct RecordDigest {
    pub record: LiteratureRecord,
    pub summary: String,
}

impl DigestPipeline {
    pub fn new(locator: RecordLocator, fetcher: RecordFetcher, summarizer: Summarizer) -> Self {
        Self {
            locator,
            fetcher,
            summarizer,
        }
    }

    /// Runs one full digest. Each remote call is awaited before the
    /// next begins; summaries are generated one record at a time in
    /// document order. The first stage error aborts the rest.
    pub async fn run(
        &self,
        filters: &SearchFilters,
        profile: ReaderProfile,
    ) -> Result<DigestReport, DigestError> {
        let query = build_query(&filters.topic, &filters.study_types, filters.recency);

        let ids = self.locator.find_ids(&query, filters.max_results).await?;
        if ids.is_empty() {
            info!("No records matched the current filters");
            return Ok(DigestReport {
                query,
                outcome: DigestOutcome::NoMatches,
            });
        }

        let records = self.fetcher.fetch(&ids).await?;

        let mut digests = Vec::with_capacity(records.len());
        for record in records {
            let summary = self
                .summarizer
                .summarize(&record.title, &record.abstract_text, profile)
                .await?;
            digests.push(RecordDigest { record, summary });
        }

        Ok(DigestReport {
            query,
            outcome: DigestOutcome::Records(digests),
        })
    }
}
