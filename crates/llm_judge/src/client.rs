use std::time::Duration;

use paper_core::{Judge, JudgeRequest, JudgeVerdict};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::parse::{extract_json_object, verdict_from_json};
use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::provider::{resolve_provider, Credentials, Provider};

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const XAI_URL: &str = "https://api.x.ai/v1/chat/completions";
const DEEPSEEK_URL: &str = "https://api.deepseek.com/chat/completions";
const GEMINI_MODELS_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Longest slice of an error body kept in logs
const ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("no credentials configured for {0}")]
    MissingCredentials(Provider),
    #[error("no provider for model {0:?}")]
    UnknownProvider(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: Provider,
        status: u16,
        body: String,
    },
    #[error("answer contained no JSON object")]
    NoJson,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: ChoiceMessage,
}

#[derive(Debug, Default, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<MessageContent>,
}

/// Either a plain string or a list of typed parts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

impl ChatCompletionResponse {
    fn text(self) -> String {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        match content {
            Some(MessageContent::Text(text)) => text,
            Some(MessageContent::Parts(parts)) => parts
                .into_iter()
                .filter(|p| p.kind == "text")
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("\n"),
            None => String::new(),
        }
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiResponse {
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }
}

/// Pairwise judge that asks a hosted chat model.
///
/// Requests are sent at temperature 0 with a fixed editor persona. Each call
/// is bounded by the client timeout.
pub struct ChatJudge {
    client: Client,
    credentials: Credentials,
}

impl ChatJudge {
    /// Create a judge with credentials from the process environment.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_credentials(timeout, Credentials::from_env())
    }

    pub fn with_credentials(
        timeout: Duration,
        credentials: Credentials,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, credentials })
    }

    /// Ask `model` about `request` and return the JSON object it answered with.
    pub fn call(
        &self,
        model: &str,
        request: &JudgeRequest,
    ) -> Result<Map<String, Value>, CallError> {
        let (provider, name) = resolve_provider(model);
        let prompt = user_prompt(request);
        let creds = &self.credentials;
        let missing = || CallError::MissingCredentials(provider);

        match provider {
            Provider::OpenAi => {
                let key = creds.openai.as_deref().ok_or_else(missing)?;
                self.chat_completion(provider, OPENAI_URL, key, &name, &prompt, false)
            }
            Provider::Xai => {
                let key = creds.xai.as_deref().ok_or_else(missing)?;
                self.chat_completion(provider, XAI_URL, key, &name, &prompt, false)
            }
            Provider::DeepSeek => {
                let key = creds.deepseek.as_deref().ok_or_else(missing)?;
                self.chat_completion(provider, DEEPSEEK_URL, key, &name, &prompt, false)
            }
            Provider::Github => {
                let key = creds.github.as_deref().ok_or_else(missing)?;
                self.chat_completion(provider, &creds.github_url, key, &name, &prompt, true)
            }
            Provider::Gemini => self.gemini(&name, &prompt),
            Provider::Unknown => Err(CallError::UnknownProvider(model.to_string())),
        }
    }

    /// OpenAI-compatible chat completion call
    fn chat_completion(
        &self,
        provider: Provider,
        url: &str,
        key: &str,
        model: &str,
        prompt: &str,
        api_key_header: bool,
    ) -> Result<Map<String, Value>, CallError> {
        let body = ChatCompletionRequest {
            model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut builder = self.client.post(url).bearer_auth(key).json(&body);
        if api_key_header {
            builder = builder.header("api-key", key);
        }
        let response = check_status(provider, builder.send()?)?;
        let data: ChatCompletionResponse = response.json()?;
        extract_json_object(&data.text()).ok_or(CallError::NoJson)
    }

    /// Try each Gemini key in turn until one yields a JSON answer.
    fn gemini(&self, model: &str, prompt: &str) -> Result<Map<String, Value>, CallError> {
        let mut last_err = CallError::MissingCredentials(Provider::Gemini);
        for key in &self.credentials.gemini {
            match self.gemini_once(model, key, prompt) {
                Ok(object) => return Ok(object),
                Err(e) => {
                    debug!(model, error = %e, "Gemini key attempt failed");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }

    fn gemini_once(
        &self,
        model: &str,
        key: &str,
        prompt: &str,
    ) -> Result<Map<String, Value>, CallError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: format!("{SYSTEM_PROMPT}\n\n{prompt}"),
                }],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };
        let url = format!("{GEMINI_MODELS_URL}/{model}:generateContent");
        let response = self
            .client
            .post(url)
            .query(&[("key", key)])
            .json(&body)
            .send()?;
        let data: GeminiResponse = check_status(Provider::Gemini, response)?.json()?;
        extract_json_object(&data.text()).ok_or(CallError::NoJson)
    }
}

fn check_status(provider: Provider, response: Response) -> Result<Response, CallError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body: String = response
        .text()
        .unwrap_or_default()
        .chars()
        .take(ERROR_BODY_CHARS)
        .collect();
    Err(CallError::Status {
        provider,
        status: status.as_u16(),
        body,
    })
}

impl Judge for ChatJudge {
    fn judge(&self, model: &str, request: &JudgeRequest) -> Option<JudgeVerdict> {
        match self.call(model, request) {
            Ok(object) => {
                let verdict = verdict_from_json(&object);
                debug!(model, winner = %verdict.winner, "Judge answered");
                Some(verdict)
            }
            Err(e @ (CallError::MissingCredentials(_) | CallError::UnknownProvider(_))) => {
                debug!(model, error = %e, "Judge unavailable");
                None
            }
            Err(e) => {
                warn!(model, error = %e, "Judge call failed");
                None
            }
        }
    }
}
