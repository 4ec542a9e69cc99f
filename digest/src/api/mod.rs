use std::sync::Arc;

use warp::{Filter, Rejection, Reply};

use crate::pipeline::DigestPipeline;

mod digest;
mod filters;

pub fn routes(
    pipeline: Arc<DigestPipeline>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let api = warp::path("api").and(warp::path("v1"));

    let digest_route = api
        .and(warp::path("digest"))
        .and(warp::post())
        .and(warp::body::json())
        .and(with_pipeline(pipeline.clone()))
        .and_then(digest::handle_digest);

    let filters_route = api
        .and(warp::path("filters"))
        .and(warp::get())
        .and_then(filters::handle_filters);

    digest_route.or(filters_route)
}

fn with_pipeline(
    pipeline: Arc<DigestPipeline>,
) -> impl Filter<Extract = (Arc<DigestPipeline>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || pipeline.clone())
}
