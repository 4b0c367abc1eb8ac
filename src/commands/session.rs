//! Session and Auth Commands

use wasm_bindgen::prelude::*;
use serde::Serialize;
use crate::models::{Preferences, Session, SignupRequest};
use super::{invoke, rejection};

#[derive(Serialize)]
struct PreferencesArgs<'a> {
    preferences: &'a Preferences,
}

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupArgs<'a> {
    request: &'a SignupRequest,
}

pub async fn load_session() -> Result<Session, String> {
    let result = invoke("load_session", JsValue::NULL).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn save_preferences(preferences: &Preferences) -> Result<Session, String> {
    let js_args = serde_wasm_bindgen::to_value(&PreferencesArgs { preferences }).map_err(|e| e.to_string())?;
    let result = invoke("save_preferences", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn login(email: &str, password: &str) -> Result<Session, String> {
    let js_args = serde_wasm_bindgen::to_value(&LoginArgs { email, password }).map_err(|e| e.to_string())?;
    let result = invoke("login", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn signup(request: &SignupRequest) -> Result<Session, String> {
    let js_args = serde_wasm_bindgen::to_value(&SignupArgs { request }).map_err(|e| e.to_string())?;
    let result = invoke("signup", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn logout() -> Result<Session, String> {
    let result = invoke("logout", JsValue::NULL).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
