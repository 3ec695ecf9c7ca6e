use rocket::{serde::json::Json, Route, State};

use crate::error::Result;
use crate::model::{
    auth::{Admin, Authenticated},
    candidate::{Candidate, CandidateSpec},
    id::CandidateId,
    identity::Identity,
    results::SystemStats,
    SharedElection,
};

pub fn routes() -> Vec<Route> {
    routes![create_candidate, delete_candidate, get_voters, get_stats]
}

#[post("/candidates", data = "<spec>", format = "json")]
pub async fn create_candidate(
    admin: Authenticated<Admin>,
    spec: Json<CandidateSpec>,
    election: &State<SharedElection>,
) -> Result<Json<Candidate>> {
    let mut election = election.lock().await;
    admin.confirm(&election)?;
    let candidate = election.add_candidate(spec.0)?;
    info!("{} added candidate {}", admin.id, candidate.id);
    Ok(Json(candidate))
}

#[delete("/candidates/<candidate_id>")]
pub async fn delete_candidate(
    admin: Authenticated<Admin>,
    candidate_id: &str,
    election: &State<SharedElection>,
) -> Result<Json<Candidate>> {
    let mut election = election.lock().await;
    admin.confirm(&election)?;
    let candidate = election.remove_candidate(&CandidateId::from(candidate_id))?;
    info!("{} removed candidate {}", admin.id, candidate.id);
    Ok(Json(candidate))
}

#[get("/voters")]
pub async fn get_voters(
    admin: Authenticated<Admin>,
    election: &State<SharedElection>,
) -> Result<Json<Vec<Identity>>> {
    let election = election.lock().await;
    admin.confirm(&election)?;
    Ok(Json(election.identities().voters().cloned().collect()))
}

#[get("/stats")]
pub async fn get_stats(
    admin: Authenticated<Admin>,
    election: &State<SharedElection>,
) -> Result<Json<SystemStats>> {
    let election = election.lock().await;
    admin.confirm(&election)?;
    Ok(Json(election.stats()))
}
