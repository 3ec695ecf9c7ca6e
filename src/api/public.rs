use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::analysis::{analysis_or_fallback, Analyst};
use crate::model::{candidate::Candidate, results::ElectionResults, SharedElection};

pub fn routes() -> Vec<Route> {
    routes![get_candidates, get_results, get_analysis]
}

/// List candidates, optionally filtered by a name or party search term.
#[get("/candidates?<search>")]
pub async fn get_candidates(
    search: Option<&str>,
    election: &State<SharedElection>,
) -> Json<Vec<Candidate>> {
    let election = election.lock().await;
    let candidates = election
        .candidates()
        .search(search.unwrap_or_default())
        .into_iter()
        .cloned()
        .collect();
    Json(candidates)
}

#[get("/results")]
pub async fn get_results(election: &State<SharedElection>) -> Json<ElectionResults> {
    Json(election.lock().await.results())
}

/// Commentary on the current standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub analysis: String,
}

#[get("/results/analysis")]
pub async fn get_analysis(
    election: &State<SharedElection>,
    analyst: &State<Box<dyn Analyst>>,
) -> Json<Analysis> {
    // Copy the standings out so the election is not locked during the request.
    let standings = election.lock().await.standings();
    let analysis = analysis_or_fallback(analyst.inner().as_ref(), &standings).await;
    Json(Analysis { analysis })
}
