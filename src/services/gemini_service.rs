use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::error::CollaboratorError;
use crate::models::{partial::PartialItinerary, trip_request::TripRequest};

const SERVICE: &str = "Gemini";
const DEFAULT_PREFERENCES: &str = "sightseeing, food, culture";
const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 8192;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CandidateContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiService {
    pub fn new(config: &GeminiConfig, timeout: Duration) -> Result<Self, CollaboratorError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(CollaboratorError::NotConfigured(SERVICE))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CollaboratorError::request(SERVICE, e))?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Ask the model for an itinerary and parse whatever JSON it returns.
    pub async fn generate_itinerary(
        &self,
        req: &TripRequest,
        currency: &str,
    ) -> Result<PartialItinerary, CollaboratorError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(req, currency),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = format!("{}/v1beta/models/{}:generateContent", self.api_base, self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| CollaboratorError::request(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CollaboratorError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::parse(SERVICE, e.to_string()))?;

        let text = generated
            .first_text()
            .ok_or(CollaboratorError::Empty(SERVICE))?;
        debug!("Gemini returned {} characters", text.len());

        parse_itinerary_text(text)
    }
}

pub fn build_prompt(req: &TripRequest, currency: &str) -> String {
    let preferences = if req.preferences.is_empty() {
        DEFAULT_PREFERENCES
    } else {
        req.preferences.as_str()
    };

    format!(
        r#"You are a travel planning expert.
Create a {days}-day detailed itinerary for {city}.
Total budget: {cur}{budget}.
Travel preferences: {preferences}.

Output ONLY valid JSON with this structure:
{{
  "summary": "Short exciting trip description",
  "totalCost": 0,
  "hotels": [
    {{"name":"", "pricePerNight":0, "description":"", "rating":0, "distanceFromCenter":""}}
  ],
  "itinerary": [
    {{
      "day": 1,
      "dailyCost":0,
      "morning":{{"activity":"", "cost":0}},
      "afternoon":{{"activity":"", "cost":0}},
      "evening":{{"activity":"", "cost":0}},
      "dining":{{"restaurant":"", "cuisine":"", "cost":0}},
      "hotel":{{"name":"", "price":0}}
    }}
  ]
}}
Guidelines:
- Use real hotels, restaurants, attractions if possible
- Hotel prices per night should be realistic and <= total budget/day
- Activities and dining should be relevant to the city or destination
- Daily costs must sum within total budget
- Include 2-3 hotels with different price ranges
- Use {cur} for all costs
"#,
        days = req.days,
        city = req.city,
        cur = currency,
        budget = req.total_budget,
        preferences = preferences,
    )
}

/// Parse model output that should be a JSON object but may be wrapped in
/// markdown fences or surrounded by prose.
pub fn parse_itinerary_text(text: &str) -> Result<PartialItinerary, CollaboratorError> {
    let trimmed = text.trim();
    serde_json::from_str(trimmed).or_else(|first_err| {
        let unfenced = trimmed
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim();
        let candidate = match (unfenced.find('{'), unfenced.rfind('}')) {
            (Some(start), Some(end)) if start < end => &unfenced[start..=end],
            _ => return Err(CollaboratorError::parse(SERVICE, first_err.to_string())),
        };
        serde_json::from_str(candidate)
            .map_err(|e| CollaboratorError::parse(SERVICE, e.to_string()))
    })
}
