use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;
use warp::{Rejection, Reply};

use crate::error::ApiError;
use crate::models::{
    ArticleDigest, DigestRequest, DigestResponse, ReaderProfile, RecencyWindow, SearchFilters,
    MAX_RESULTS_LIMIT, STUDY_TYPES, TOPICS,
};
use crate::pipeline::{DigestOutcome, DigestPipeline};

pub const NO_MATCHES_NOTICE: &str = "No se encontraron artículos con esos filtros.";

pub async fn handle_digest(
    request: DigestRequest,
    pipeline: Arc<DigestPipeline>,
) -> Result<impl Reply, Rejection> {
    let request_id = Uuid::new_v4();
    info!(
        "Processing digest request [{}] on topic: {}",
        request_id, request.topic
    );

    let (filters, profile) =
        validate(request).map_err(|msg| warp::reject::custom(ApiError::BadRequest(msg)))?;

    let report = pipeline.run(&filters, profile).await.map_err(|err| {
        error!("Digest request [{}] failed: {}", request_id, err);
        warp::reject::custom(ApiError::from(err))
    })?;

    let response = match report.outcome {
        DigestOutcome::NoMatches => DigestResponse {
            request_id,
            query: report.query,
            articles: vec![],
            notice: Some(NO_MATCHES_NOTICE.to_string()),
        },
        DigestOutcome::Records(digests) => DigestResponse {
            request_id,
            query: report.query,
            articles: digests
                .into_iter()
                .map(|d| ArticleDigest {
                    title: d.record.title,
                    abstract_text: d.record.abstract_text,
                    summary: d.summary,
                })
                .collect(),
            notice: None,
        },
    };

    Ok(warp::reply::json(&response))
}

fn validate(request: DigestRequest) -> Result<(SearchFilters, ReaderProfile), String> {
    if !TOPICS.contains(&request.topic.as_str()) {
        return Err(format!("unknown topic: {}", request.topic));
    }
    if request.study_types.is_empty() {
        return Err("study_types must not be empty".to_string());
    }
    for study_type in &request.study_types {
        if !STUDY_TYPES.contains(&study_type.as_str()) {
            return Err(format!("unknown study type: {study_type}"));
        }
    }
    let recency = RecencyWindow::from_label(&request.recency)
        .ok_or_else(|| format!("unknown recency window: {}", request.recency))?;
    if request.max_results < 1 || request.max_results > MAX_RESULTS_LIMIT {
        return Err(format!(
            "max_results must be between 1 and {MAX_RESULTS_LIMIT}"
        ));
    }

    // Unknown profile labels are not rejected; they fall back to the
    // generic instruction.
    let profile = ReaderProfile::from_label(&request.profile);

    Ok((
        SearchFilters {
            topic: request.topic,
            study_types: request.study_types,
            recency,
            max_results: request.max_results,
        },
        profile,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DigestRequest {
        DigestRequest {
            topic: "ACL".to_string(),
            study_types: vec!["systematic review".to_string()],
            recency: "Últimos 7 días".to_string(),
            profile: "Investigador".to_string(),
            max_results: 3,
        }
    }

    #[test]
    fn valid_request_passes() {
        let (filters, profile) = validate(request()).unwrap();
        assert_eq!(filters.topic, "ACL");
        assert_eq!(filters.recency, RecencyWindow::Last7Days);
        assert_eq!(profile, ReaderProfile::Researcher);
    }

    #[test]
    fn unknown_topic_is_rejected() {
        let mut req = request();
        req.topic = "knee".to_string();
        assert!(validate(req).is_err());
    }

    #[test]
    fn empty_study_types_is_rejected() {
        let mut req = request();
        req.study_types.clear();
        assert!(validate(req).is_err());
    }

    #[test]
    fn unknown_study_type_is_rejected() {
        let mut req = request();
        req.study_types.push("case report".to_string());
        assert!(validate(req).is_err());
    }

    #[test]
    fn unknown_recency_label_is_rejected() {
        let mut req = request();
        req.recency = "last decade".to_string();
        assert!(validate(req).is_err());
    }

    #[test]
    fn max_results_out_of_bounds_is_rejected() {
        let mut req = request();
        req.max_results = 0;
        assert!(validate(req).is_err());
        let mut req = request();
        req.max_results = 11;
        assert!(validate(req).is_err());
    }

    #[test]
    fn unknown_profile_is_accepted_as_general() {
        let mut req = request();
        req.profile = "Paciente".to_string();
        let (_, profile) = validate(req).unwrap();
        assert_eq!(profile, ReaderProfile::General);
    }
}
