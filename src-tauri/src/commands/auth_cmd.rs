//! Auth Commands
//!
//! Login and signup; successful calls update the stored session.

use tauri::State;

use crate::domain::Session;
use crate::remote::{AuthClient, SignupRequest};
use crate::AppState;

async fn auth_client(state: &AppState) -> Result<AuthClient, String> {
    let (config, client) = state.remote().await;
    AuthClient::new(client, &config.server_url).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn login(
    email: String,
    password: String,
    state: State<'_, AppState>,
) -> Result<Session, String> {
    let outcome = auth_client(&state)
        .await?
        .login(&email, &password)
        .await
        .map_err(|e| {
            log::warn!("login failed: {}", e);
            e.to_string()
        })?;

    let mut session = state.session.load().await.map_err(|e| e.to_string())?;
    session.user = Some(outcome.profile);
    session.token = Some(outcome.token);
    state.session.save(&session).await.map_err(|e| e.to_string())?;
    Ok(session)
}

#[tauri::command]
pub async fn signup(
    request: SignupRequest,
    state: State<'_, AppState>,
) -> Result<Session, String> {
    let profile = auth_client(&state)
        .await?
        .signup(&request)
        .await
        .map_err(|e| {
            log::warn!("signup failed: {}", e);
            e.to_string()
        })?;

    let mut session = state.session.load().await.map_err(|e| e.to_string())?;
    session.user = Some(profile);
    session.token = None;
    state.session.save(&session).await.map_err(|e| e.to_string())?;
    Ok(session)
}
