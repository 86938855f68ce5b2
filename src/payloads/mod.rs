//! Typed request payloads.
//!
//! The Kinetic APIs accept a handful of convenience shorthands: an origin or
//! parent given as a bare id, a current page given as a bare name, console
//! policy rules given as expanded objects, and a message given as a plain
//! string. The types here express those shorthands at the type level, so the
//! normalized wire shape is produced by serialization and cannot be skipped.

use std::fmt;

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to another entity by id.
///
/// Serializes as `{"id": "<id>"}`. Accepts a bare id string wherever the API
/// expects the nested form; passing an already-built reference leaves it
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    /// Entity id.
    pub id: String,
}

impl From<&str> for EntityRef {
    fn from(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl From<String> for EntityRef {
    fn from(id: String) -> Self {
        Self { id }
    }
}

/// Reference to a form page by name.
///
/// Serializes as `{"name": "<name>"}`. Accepts a bare page name wherever the
/// API expects the nested form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRef {
    /// Page name.
    pub name: String,
}

impl From<&str> for PageRef {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl From<String> for PageRef {
    fn from(name: String) -> Self {
        Self { name }
    }
}

/// Payload for creating or patching a submission.
///
/// `values` always serializes, so a payload built without any field values
/// still carries an empty `values` mapping. Properties outside the modeled
/// set pass through `extra` unchanged at the top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmissionPayload {
    /// Origin submission reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<EntityRef>,
    /// Parent submission reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityRef>,
    /// Page the submission is currently on.
    #[serde(rename = "currentPage", skip_serializing_if = "Option::is_none")]
    pub current_page: Option<PageRef>,
    /// Field values keyed by field name.
    pub values: Map<String, Value>,
    /// Additional top-level properties passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubmissionPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the origin reference.
    pub fn with_origin(mut self, origin: impl Into<EntityRef>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the parent reference.
    pub fn with_parent(mut self, parent: impl Into<EntityRef>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets the current page.
    pub fn with_current_page(mut self, page: impl Into<PageRef>) -> Self {
        self.current_page = Some(page.into());
        self
    }

    /// Sets a single field value.
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Replaces all field values.
    pub fn with_values(mut self, values: Map<String, Value>) -> Self {
        self.values = values;
        self
    }

    /// Sets an additional top-level property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// The fixed policy rule categories of the task engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyRuleType {
    /// Governs access to the REST API.
    #[serde(rename = "API Access")]
    ApiAccess,
    /// Governs access to handler and tree categories.
    #[serde(rename = "Category Access")]
    CategoryAccess,
    /// Governs access to the management console.
    #[serde(rename = "Console Access")]
    ConsoleAccess,
    /// The engine-wide default rule set.
    #[serde(rename = "System Default")]
    SystemDefault,
}

impl PolicyRuleType {
    /// Every category, in the order the combined find operation queries
    /// them.
    pub const ALL: [PolicyRuleType; 4] = [
        PolicyRuleType::ApiAccess,
        PolicyRuleType::CategoryAccess,
        PolicyRuleType::ConsoleAccess,
        PolicyRuleType::SystemDefault,
    ];

    /// Returns the category name as the API spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyRuleType::ApiAccess => "API Access",
            PolicyRuleType::CategoryAccess => "Category Access",
            PolicyRuleType::ConsoleAccess => "Console Access",
            PolicyRuleType::SystemDefault => "System Default",
        }
    }

    /// Looks a category up by its API name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for PolicyRuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a policy rule's console list.
///
/// The API returns entries either as bare console names or, when expanded,
/// as objects carrying a `name` plus other detail. Mutating operations only
/// accept names, so serialization always emits the bare name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConsoleRule {
    /// A bare console name.
    Name(String),
    /// The expanded object form.
    Expanded {
        /// Console name.
        name: String,
        /// Remaining detail, dropped on serialization.
        #[serde(flatten)]
        rest: Map<String, Value>,
    },
}

impl ConsoleRule {
    /// The console name, whichever form the entry is in.
    pub fn name(&self) -> &str {
        match self {
            ConsoleRule::Name(name) => name,
            ConsoleRule::Expanded { name, .. } => name,
        }
    }
}

impl Serialize for ConsoleRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl From<&str> for ConsoleRule {
    fn from(name: &str) -> Self {
        ConsoleRule::Name(name.to_string())
    }
}

impl From<String> for ConsoleRule {
    fn from(name: String) -> Self {
        ConsoleRule::Name(name)
    }
}

/// A task engine policy rule.
///
/// Used both as a request payload and as the parsed form of an exported rule
/// file. Serialization flattens every console entry to its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Rule category.
    #[serde(rename = "type")]
    pub rule_type: PolicyRuleType,
    /// Rule name, unique within its category.
    pub name: String,
    /// Boolean expression evaluated by the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    /// Message returned when the rule denies access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Consoles the rule applies to.
    #[serde(rename = "consolePolicyRules", skip_serializing_if = "Option::is_none")]
    pub console_policy_rules: Option<Vec<ConsoleRule>>,
    /// Additional properties passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PolicyRule {
    /// Creates a rule with the required category and name.
    pub fn new(rule_type: PolicyRuleType, name: impl Into<String>) -> Self {
        Self {
            rule_type,
            name: name.into(),
            rule: None,
            message: None,
            console_policy_rules: None,
            extra: Map::new(),
        }
    }

    /// Sets the rule expression.
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Sets the denial message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the console list.
    pub fn with_console_policy_rules(mut self, rules: Vec<ConsoleRule>) -> Self {
        self.console_policy_rules = Some(rules);
        self
    }
}

/// Payload for creating or updating a discussion.
///
/// A bare string converts into a payload carrying only a title.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscussionPayload {
    /// Discussion title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Discussion description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the discussion is restricted to invited participants.
    #[serde(rename = "isPrivate", skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    /// Join policy name.
    #[serde(rename = "joinPolicy", skip_serializing_if = "Option::is_none")]
    pub join_policy: Option<String>,
    /// Additional properties passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DiscussionPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets whether the discussion is private.
    pub fn with_is_private(mut self, is_private: bool) -> Self {
        self.is_private = Some(is_private);
        self
    }

    /// Sets the join policy name.
    pub fn with_join_policy(mut self, join_policy: impl Into<String>) -> Self {
        self.join_policy = Some(join_policy.into());
        self
    }
}

impl From<&str> for DiscussionPayload {
    fn from(title: &str) -> Self {
        Self::new().with_title(title)
    }
}

impl From<String> for DiscussionPayload {
    fn from(title: String) -> Self {
        Self::new().with_title(title)
    }
}

/// One part of a message's content list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageContent {
    /// Content part kind, for example `text`.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Content part value.
    pub value: String,
}

impl MessageContent {
    /// Creates a plain-text content part.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            value: value.into(),
        }
    }
}

/// Payload for posting or updating a discussion message.
///
/// A bare string converts into the content-list shape the API expects:
/// `{"content": [{"type": "text", "value": "<string>"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePayload {
    /// Content parts making up the message.
    pub content: Vec<MessageContent>,
}

impl MessagePayload {
    /// Creates a plain-text message.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            content: vec![MessageContent::text(value)],
        }
    }

    /// Creates a message from pre-built content parts.
    pub fn with_content(content: Vec<MessageContent>) -> Self {
        Self { content }
    }
}

impl From<&str> for MessagePayload {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for MessagePayload {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

/// Reference to a platform user by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    /// Username.
    pub username: String,
}

/// Payload for inviting someone to a discussion.
///
/// Invitees are addressed either by email (for people without a platform
/// account) or by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvitationPayload {
    /// Invitee email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Invitee user reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,
    /// Optional message included with the invitation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InvitationPayload {
    /// Creates an invitation addressed by email.
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            user: None,
            message: None,
        }
    }

    /// Creates an invitation addressed by username.
    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            email: None,
            user: Some(UserRef {
                username: username.into(),
            }),
            message: None,
        }
    }

    /// Attaches a message to the invitation.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
