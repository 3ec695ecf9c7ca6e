use rocket::{serde::json::Json, Route, State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    identity::{Identity, Registration},
    SharedElection,
};

pub fn routes() -> Vec<Route> {
    routes![login, register, logout, current]
}

/// Sign-in credentials. The password is compared as-is.
#[derive(Clone, Deserialize, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[post("/login", data = "<credentials>", format = "json")]
pub async fn login(
    credentials: Json<Credentials>,
    election: &State<SharedElection>,
) -> Result<Json<Identity>> {
    let identity = election
        .lock()
        .await
        .login(&credentials.email, &credentials.password)?;
    Ok(Json(identity))
}

#[post("/register", data = "<registration>", format = "json")]
pub async fn register(
    registration: Json<Registration>,
    election: &State<SharedElection>,
) -> Result<Json<Identity>> {
    let identity = election.lock().await.register(registration.0)?;
    Ok(Json(identity))
}

#[post("/logout")]
pub async fn logout(election: &State<SharedElection>) -> Result<()> {
    election.lock().await.logout()?;
    Ok(())
}

#[get("/session")]
pub async fn current(election: &State<SharedElection>) -> Result<Json<Identity>> {
    let identity = election.lock().await.current_identity()?.clone();
    Ok(Json(identity))
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;
    use crate::model::seed::{
        DEMO_ADMIN_EMAIL, DEMO_ADMIN_SECRET, DEMO_VOTER_EMAIL, DEMO_VOTER_SECRET,
    };

    impl Credentials {
        pub fn example_admin() -> Self {
            Self {
                email: DEMO_ADMIN_EMAIL.into(),
                password: DEMO_ADMIN_SECRET.into(),
            }
        }

        pub fn example_voter() -> Self {
            Self {
                email: DEMO_VOTER_EMAIL.into(),
                password: DEMO_VOTER_SECRET.into(),
            }
        }
    }
}
