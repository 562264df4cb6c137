//! Request identities: the User-Agent and optional credentials a walk runs under.
//!
//! Presets cover the desktop/mobile comparison and a table of well-known crawler
//! user agents for bot comparisons.

use serde::Serialize;

use crate::config::DEFAULT_USER_AGENT;

/// Desktop browser User-Agent used for desktop/mobile comparison
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Mobile browser User-Agent used for desktop/mobile comparison
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 14_0 like Mac OS X)";

/// Named crawler user agents, in presentation order.
pub const BOT_USER_AGENTS: &[(&str, &str)] = &[
    (
        "googlebot",
        "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
    ),
    (
        "bingbot",
        "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)",
    ),
    ("facebookbot", "facebookexternalhit/1.1"),
    ("twitterbot", "Twitterbot/1.0"),
    ("linkedinbot", "LinkedInBot/1.0"),
    ("slackbot", "Slackbot-LinkExpanding 1.0"),
    ("whatsapp", "WhatsApp/2.19.81"),
    ("telegrambot", "TelegramBot"),
    ("discordbot", "Mozilla/5.0 (compatible; Discordbot/2.0)"),
    ("pinterestbot", "Mozilla/5.0 (compatible; Pinterestbot/1.0)"),
];

/// HTTP basic-auth credentials attached to every hop of a walk.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

// Never print the password
impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The identity a walk runs under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestIdentity {
    /// Human-readable label (`desktop`, `googlebot`, ...)
    pub label: String,
    pub user_agent: String,
    #[serde(skip)]
    pub basic_auth: Option<BasicAuth>,
}

impl RequestIdentity {
    pub fn new(label: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            user_agent: user_agent.into(),
            basic_auth: None,
        }
    }

    /// Attaches basic-auth credentials.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn desktop() -> Self {
        Self::new("desktop", DESKTOP_USER_AGENT)
    }

    pub fn mobile() -> Self {
        Self::new("mobile", MOBILE_USER_AGENT)
    }

    /// Looks up a crawler preset by name (case-insensitive).
    pub fn bot(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        BOT_USER_AGENTS
            .iter()
            .find(|(bot, _)| *bot == name)
            .map(|(bot, ua)| Self::new(*bot, *ua))
    }
}

impl Default for RequestIdentity {
    fn default() -> Self {
        Self::new("default", DEFAULT_USER_AGENT)
    }
}

/// Names of every crawler preset.
pub fn available_bots() -> Vec<&'static str> {
    BOT_USER_AGENTS.iter().map(|(name, _)| *name).collect()
}

/// Resolves bot names into identities.
///
/// Returns the identities for known names, in input order, and the names that
/// matched no preset.
pub fn bot_identities<S: AsRef<str>>(names: &[S]) -> (Vec<RequestIdentity>, Vec<String>) {
    let mut identities = Vec::new();
    let mut unknown = Vec::new();
    for name in names {
        match RequestIdentity::bot(name.as_ref()) {
            Some(identity) => identities.push(identity),
            None => unknown.push(name.as_ref().to_string()),
        }
    }
    (identities, unknown)
}
