use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    auth::{Authenticated, Voter},
    id::CandidateId,
    ledger::Ballot,
    SharedElection,
};

pub fn routes() -> Vec<Route> {
    routes![cast_vote]
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub candidate_id: CandidateId,
}

/// Cast the signed-in voter's single ballot.
#[post("/votes", data = "<vote>", format = "json")]
pub async fn cast_vote(
    voter: Authenticated<Voter>,
    vote: Json<VoteRequest>,
    election: &State<SharedElection>,
) -> Result<Json<Ballot>> {
    let mut election = election.lock().await;
    voter.confirm(&election)?;
    let ballot = election.cast_vote(&vote.candidate_id)?;
    Ok(Json(ballot))
}
