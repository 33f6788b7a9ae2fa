use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable key of an email or thread inside one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn next_after(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An email or a whole thread, as submitted to the AI service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceItem {
    pub id: ItemId,
    pub subject: String,
    #[serde(default)]
    pub sender: String,
    pub content: String,
    /// ISO-8601 text, passed through as received. Empty when unknown.
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Support,
    Sales,
    Billing,
    Urgent,
    #[serde(rename = "FYI")]
    Fyi,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Support,
        Category::Sales,
        Category::Billing,
        Category::Urgent,
        Category::Fyi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Support => "Support",
            Category::Sales => "Sales",
            Category::Billing => "Billing",
            Category::Urgent => "Urgent",
            Category::Fyi => "FYI",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown category `{value}`"))
    }
}

/// Labels come from a language model; anything unrecognized is filed as FYI.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|value| value.parse().ok())
            .unwrap_or(Category::Fyi))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedEmail {
    #[serde(flatten)]
    pub email: SourceItem,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Per-category totals as reported by the classification service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub total_emails: usize,
    #[serde(default)]
    pub support: usize,
    #[serde(default)]
    pub sales: usize,
    #[serde(default)]
    pub billing: usize,
    #[serde(default)]
    pub urgent: usize,
    #[serde(default)]
    pub fyi: usize,
}

impl ClassificationStats {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Support => self.support,
            Category::Sales => self.sales,
            Category::Billing => self.billing,
            Category::Urgent => self.urgent,
            Category::Fyi => self.fyi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationBatch {
    pub classified_emails: Vec<ClassifiedEmail>,
    pub stats: ClassificationStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown priority `{value}`"))
    }
}

/// Unrecognized or missing priorities count as medium.
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|value| value.parse().ok())
            .unwrap_or(Priority::Medium))
    }
}

/// One action item as the service reports it, before flattening.
///
/// Any `id` the service sends is ignored: it is only unique within one email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedAction {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub suggested_assignee: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub reasoning: String,
}

/// Action items extracted from a single email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionGroup {
    pub email_id: ItemId,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub action_items: Vec<ExtractedAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionBatch {
    pub results: Vec<ExtractionGroup>,
}

/// A flattened action item with a batch-wide unique id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub unique_id: String,
    pub source_email_id: ItemId,
    pub email_subject: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub suggested_assignee: Option<String>,
    pub priority: Priority,
    pub confidence: f32,
    pub reasoning: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Short,
    Apologetic,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Friendly, Tone::Short, Tone::Apologetic];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Short => "short",
            Tone::Apologetic => "apologetic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tone::Professional => {
                "Formal, business-appropriate, action-oriented with clear next steps"
            }
            Tone::Friendly => "Warm, personable, yet professional",
            Tone::Short => "Brief and concise, two or three sentences",
            Tone::Apologetic => "Empathetic, acknowledges issues, provides clear resolution",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown tone `{value}`"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub tone: Tone,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftBatch {
    #[serde(default)]
    pub drafts: Vec<Draft>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinedDraft {
    pub body: String,
    #[serde(default)]
    pub preview: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRequest {
    pub original_subject: String,
    pub original_sender: String,
    pub thread_content: String,
    pub context: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineRequest {
    pub current_draft: String,
    pub feedback: String,
    pub tone: Tone,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn unknown_priority_keeps_the_rest_of_the_batch() {
        let batch: ExtractionBatch = serde_json::from_value(json!({
            "results": [
                {"email_id": 1, "subject": "Budget", "action_items": [
                    {"title": "Send report", "priority": "high"}
                ]},
                {"email_id": 2, "subject": "Outage", "action_items": [
                    {"title": "Restart server", "priority": "urgent"},
                    {"title": "Write postmortem", "priority": " Low "},
                    {"title": "Page on-call", "priority": null}
                ]}
            ]
        }))
        .expect("lenient priorities");

        let priorities: Vec<Priority> = batch
            .results
            .iter()
            .flat_map(|group| group.action_items.iter().map(|item| item.priority))
            .collect();
        assert_eq!(
            priorities,
            vec![Priority::High, Priority::Medium, Priority::Low, Priority::Medium]
        );
    }

    #[test]
    fn unknown_category_is_filed_as_fyi() {
        let batch: ClassificationBatch = serde_json::from_value(json!({
            "classified_emails": [
                {"id": 1, "subject": "a", "content": "x", "category": "billing"},
                {"id": 2, "subject": "b", "content": "y", "category": "Newsletter"},
                {"id": 3, "subject": "c", "content": "z", "category": "FYI"}
            ],
            "stats": {"total_emails": 3}
        }))
        .expect("lenient categories");

        let categories: Vec<Category> = batch
            .classified_emails
            .iter()
            .map(|email| email.category)
            .collect();
        assert_eq!(categories, vec![Category::Billing, Category::Fyi, Category::Fyi]);
        assert_eq!(serde_json::to_value(Category::Fyi).expect("serialize"), json!("FYI"));
    }

    #[test]
    fn every_tone_is_described() {
        for tone in Tone::ALL {
            assert!(!tone.description().is_empty(), "{tone}");
        }
        assert_eq!("SHORT".parse::<Tone>(), Ok(Tone::Short));
    }

    #[test]
    fn timestamps_pass_through_and_are_always_sent() {
        let item: SourceItem = serde_json::from_value(json!({
            "id": 4, "subject": "s", "content": "c", "timestamp": "2026-01-14T10:30:00"
        }))
        .expect("zone-less timestamp");
        assert_eq!(item.timestamp, "2026-01-14T10:30:00");

        let bare: SourceItem =
            serde_json::from_value(json!({"id": 7, "subject": "s", "content": "c"})).expect("bare");
        assert_eq!(
            serde_json::to_value(&bare).expect("serialize"),
            json!({"id": 7, "subject": "s", "sender": "", "content": "c", "timestamp": ""})
        );
    }
}
