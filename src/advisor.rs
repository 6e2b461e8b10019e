// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! AI spending advisor: summarizes recent expenses into a prompt and asks a
//! generative-AI endpoint. The API key is a caller-supplied credential, not
//! ambient state, and is only ever sent to the AI endpoint itself.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Expense;
use crate::utils::http_client;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Most recent records included in the prompt. Kept small to stay clear of
/// provider rate limits.
pub const SUMMARY_LIMIT: usize = 20;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("no AI API key configured; set one with `spendwise settings api-key <key>`")]
    MissingKey,
    #[error("usage limit exceeded; please wait a minute before trying again")]
    RateLimited,
    #[error("advisor request failed: {0}")]
    Api(String),
    #[error("could not reach the advisor service: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One `date: amount (category) - note` line per record, most recent first
/// by creation time, at most [`SUMMARY_LIMIT`] lines.
pub fn spending_summary(expenses: &[Expense]) -> String {
    let mut recent: Vec<&Expense> = expenses.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent
        .iter()
        .take(SUMMARY_LIMIT)
        .map(|e| {
            format!(
                "{}: {} ({}) - {}",
                e.date,
                e.amount,
                e.category,
                e.note.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(message: &str, expenses: &[Expense]) -> String {
    format!(
        "You are \"SpendWise Advisor\", a friendly AI financial assistant. \
         Help the user understand their spending, save money, and make better \
         financial decisions.\n\n\
         Current user data (recent expenses):\n{}\n\n\
         Instructions:\n\
         1. Answer the user's question based on the data above.\n\
         2. If the data is empty, give general financial advice.\n\
         3. Be concise, encouraging, and easy to understand.\n\
         4. If asked about totals or specifics, calculate from the provided data.\n\n\
         User question: {}",
        spending_summary(expenses),
        message
    )
}

#[derive(Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
struct ModelInfo {
    name: String,
    #[serde(rename = "supportedGenerationMethods", default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Pick a generation-capable model, preferring the fast tier. Any failure
/// here falls back to [`DEFAULT_MODEL`] rather than aborting the request.
pub fn discover_model(client: &reqwest::blocking::Client, api_base: &str, key: &str) -> String {
    let url = format!("{api_base}/v1beta/models?key={key}");
    let listed = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.json::<ModelsResponse>());
    let listed = match listed {
        Ok(resp) => resp.models,
        Err(err) => {
            warn!("model discovery failed, using {DEFAULT_MODEL}: {err}");
            return DEFAULT_MODEL.to_string();
        }
    };
    pick_model(&listed).unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

fn pick_model(models: &[ModelInfo]) -> Option<String> {
    let mut usable: Vec<&ModelInfo> = models
        .iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|g| g == "generateContent")
                && ["gemini-1.5", "gemini-pro", "gemini-1.0"]
                    .iter()
                    .any(|family| m.name.contains(family))
        })
        .collect();
    // Flash models first: cheaper quotas than the pro tier.
    usable.sort_by_key(|m| !m.name.to_lowercase().contains("flash"));
    usable
        .first()
        .map(|m| m.name.trim_start_matches("models/").to_string())
}

pub fn chat(key: &str, message: &str, expenses: &[Expense]) -> Result<String, AdvisorError> {
    chat_at(DEFAULT_API_BASE, key, message, expenses)
}

pub fn chat_at(
    api_base: &str,
    key: &str,
    message: &str,
    expenses: &[Expense],
) -> Result<String, AdvisorError> {
    if key.is_empty() {
        return Err(AdvisorError::MissingKey);
    }
    let client = http_client()?;
    let model = discover_model(&client, api_base, key);
    debug!("advisor using model {model}");

    let request = GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: build_prompt(message, expenses),
            }],
        }],
    };
    let url = format!("{api_base}/v1beta/models/{model}:generateContent?key={key}");
    let resp = client.post(url).json(&request).send()?;
    let status = resp.status();
    if status.as_u16() == 429 {
        return Err(AdvisorError::RateLimited);
    }
    if !status.is_success() {
        let message = resp
            .json::<serde_json::Value>()
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| status.to_string());
        return Err(AdvisorError::Api(message));
    }
    let body: GenerateResponse = resp.json()?;
    body.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| AdvisorError::Api("empty response from model".into()))
}
