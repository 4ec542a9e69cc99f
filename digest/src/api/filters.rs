use warp::{Rejection, Reply};

use crate::models::{
    FiltersResponse, ReaderProfile, RecencyWindow, MAX_RESULTS_LIMIT, STUDY_TYPES, TOPICS,
};

/// The closed vocabularies a front-end needs to render the filter form.
pub async fn handle_filters() -> Result<impl Reply, Rejection> {
    let response = FiltersResponse {
        topics: TOPICS.to_vec(),
        study_types: STUDY_TYPES.to_vec(),
        recency_windows: RecencyWindow::ALL.iter().map(|w| w.label()).collect(),
        profiles: ReaderProfile::SELECTABLE.iter().map(|p| p.label()).collect(),
        max_results_limit: MAX_RESULTS_LIMIT,
    };

    Ok(warp::reply::json(&response))
}
