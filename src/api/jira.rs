use super::error::{JiraError, Result};
use super::WorklogSource;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result as AnyResult;
use dialoguer::{theme::ColorfulTheme, Input, Password};
use reqwest::{header::ACCEPT, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SEARCH_URL: &str = "rest/api/3/search/jql";
const WORKLOG_URL: &str = "rest/api/2/issue";
const USER_AGENT: &str = concat!("jira-timelogs/", env!("CARGO_PKG_VERSION"));
const PAGE_SIZE: u32 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JiraIssue {
    pub key: String,
    pub fields: JiraIssueFields,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct JiraIssueFields {
    #[serde(default)]
    pub summary: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    pub display_name: String,
}

/// One worklog entry as returned by `issue/{key}/worklog`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JiraWorklog {
    /// Missing for worklogs whose author account was deleted.
    pub author: Option<JiraUser>,
    /// Start timestamp, e.g. `2024-03-15T10:00:00.000+0000`.
    pub started: String,
    pub time_spent_seconds: u64,
}

/// One page of `search/jql`. Pages are chained by token; there is no total.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JiraSearchResults {
    #[serde(default)]
    issues: Vec<JiraIssue>,
    next_page_token: Option<String>,
    #[serde(default)]
    is_last: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JiraWorklogPage {
    #[serde(default)]
    total: u32,
    worklogs: Vec<JiraWorklog>,
}

/// Jira REST client authenticated with an account e-mail and API token.
#[derive(Debug)]
pub struct Jira {
    client: Client,
    config: JiraConfig,
}

impl WorklogSource for Jira {
    async fn search_issues(&self, jql: &str) -> Result<Vec<JiraIssue>> {
        let url = self.url(SEARCH_URL);
        let mut issues = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("jql", jql.to_string()),
                ("fields", "summary".to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
            ];
            if let Some(token) = page_token.take() {
                query.push(("nextPageToken", token));
            }
            let page: JiraSearchResults = self.get_json(&url, &query).await?;
            let received = page.issues.len();
            tracing::debug!(received, is_last = page.is_last, "jira search page");

            issues.extend(page.issues);
            match page.next_page_token {
                Some(token) if !page.is_last && received > 0 => page_token = Some(token),
                _ => break,
            }
        }

        Ok(issues)
    }

    async fn issue_worklogs(&self, issue_key: &str) -> Result<Vec<JiraWorklog>> {
        let url = self.url(&format!("{}/{}/worklog", WORKLOG_URL, issue_key));
        let mut worklogs = Vec::new();
        let mut start_at = 0;

        loop {
            let query = [("startAt", start_at.to_string()), ("maxResults", PAGE_SIZE.to_string())];
            let page: JiraWorklogPage = self.get_json(&url, &query).await?;
            let received = page.worklogs.len() as u32;
            tracing::debug!(issue_key, start_at, received, total = page.total, "jira worklog page");

            worklogs.extend(page.worklogs);
            start_at += received;
            if received == 0 || start_at >= page.total {
                break;
            }
        }

        Ok(worklogs)
    }
}

impl Jira {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .basic_auth(&self.config.email, Some(&self.config.api_token))
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    async fn parse_json<T>(response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        // Error bodies are informational only
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(JiraError::Authentication(format!("Access denied ({}) - {}", status, body)))
            }
            _ => Err(JiraError::http(status, body)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct JiraConfig {
    /// Base URL of the Jira site, e.g. `https://your-domain.atlassian.net`.
    pub api_url: String,
    /// Account e-mail used for basic authentication.
    pub email: String,
    /// API token paired with `email`.
    pub api_token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            email: String::new(),
            api_token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl JiraConfig {
    /// Names of the required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_url.trim().is_empty() {
            missing.push("api_url");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.api_token.trim().is_empty() {
            missing.push("api_token");
        }
        missing
    }

    /// Interactive prompts for the Jira settings, pre-filled with `config`.
    ///
    /// An empty token answer keeps the previously stored token.
    pub fn init(config: &Option<Self>) -> AnyResult<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleJira);

        let api_url: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptJiraUrl.to_string())
            .default(config.api_url)
            .interact_text()?;
        let email: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptJiraEmail.to_string())
            .default(config.email)
            .interact_text()?;
        let api_token = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptJiraApiToken.to_string())
            .allow_empty_password(!config.api_token.is_empty())
            .interact()?;

        Ok(Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            email: email.trim().to_string(),
            api_token: if api_token.is_empty() { config.api_token } else { api_token },
            timeout_secs: config.timeout_secs,
        })
    }
}
