use crate::{ActionItem, ExtractionGroup, ItemId};

/// Counter that hands out batch-wide unique ids while flattening one response.
///
/// A fresh sequence is created per response, so ids never depend on earlier
/// normalization calls.
#[derive(Debug, Default)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_for(&mut self, parent: ItemId) -> String {
        let id = format!("{parent}-{}", self.next);
        self.next += 1;
        id
    }
}

/// Flattens per-email extraction results into one uniquely keyed list.
///
/// Groups keep the order the service returned them in; a group without items
/// contributes nothing.
pub fn flatten_action_items(groups: Vec<ExtractionGroup>) -> Vec<ActionItem> {
    let mut ids = IdSequence::new();
    let mut flattened = Vec::with_capacity(groups.iter().map(|g| g.action_items.len()).sum());

    for group in groups {
        for action in group.action_items {
            flattened.push(ActionItem {
                unique_id: ids.next_for(group.email_id),
                source_email_id: group.email_id,
                email_subject: group.subject.clone(),
                title: action.title,
                description: action.description,
                due_date: action.due_date,
                suggested_assignee: action.suggested_assignee,
                priority: action.priority,
                confidence: clamp_confidence(action.confidence),
                reasoning: action.reasoning,
            });
        }
    }

    flattened
}

fn clamp_confidence(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExtractedAction, Priority};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn action(title: &str, priority: Priority) -> ExtractedAction {
        ExtractedAction {
            title: title.to_string(),
            description: None,
            due_date: None,
            suggested_assignee: None,
            priority,
            confidence: 0.8,
            reasoning: String::new(),
        }
    }

    fn group(email_id: u64, subject: &str, actions: Vec<ExtractedAction>) -> ExtractionGroup {
        ExtractionGroup {
            email_id: ItemId(email_id),
            subject: subject.to_string(),
            action_items: actions,
        }
    }

    #[test]
    fn counter_runs_across_the_whole_batch() {
        let items = flatten_action_items(vec![
            group(
                7,
                "Budget",
                vec![action("Send report", Priority::High), action("Review", Priority::Low)],
            ),
            group(9, "Server", vec![action("Restart", Priority::High)]),
        ]);

        let ids: Vec<&str> = items.iter().map(|item| item.unique_id.as_str()).collect();
        assert_eq!(ids, vec!["7-0", "7-1", "9-2"]);
        assert_eq!(items[2].source_email_id, ItemId(9));
        assert_eq!(items[2].email_subject, "Server");
    }

    #[test]
    fn ids_stay_unique_when_local_indices_collide() {
        let groups = (1..=4)
            .map(|email| {
                group(
                    email,
                    "s",
                    vec![action("a", Priority::Medium), action("b", Priority::Medium)],
                )
            })
            .collect::<Vec<_>>();

        let items = flatten_action_items(groups);
        let distinct: BTreeSet<&str> = items.iter().map(|item| item.unique_id.as_str()).collect();
        assert_eq!(items.len(), 8);
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn empty_groups_contribute_nothing() {
        let items = flatten_action_items(vec![
            group(1, "empty", Vec::new()),
            group(2, "one", vec![action("Call back", Priority::Low)]),
        ]);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unique_id, "2-0");
    }

    #[test]
    fn each_call_starts_a_fresh_sequence() {
        let first = flatten_action_items(vec![group(3, "a", vec![action("x", Priority::Low)])]);
        let second = flatten_action_items(vec![group(3, "a", vec![action("x", Priority::Low)])]);
        assert_eq!(first[0].unique_id, second[0].unique_id);
    }

    #[test]
    fn confidence_is_clamped() {
        let mut loud = action("x", Priority::High);
        loud.confidence = 1.7;
        let mut negative = action("y", Priority::High);
        negative.confidence = -0.2;

        let items = flatten_action_items(vec![group(1, "s", vec![loud, negative])]);
        assert_eq!(items[0].confidence, 1.0);
        assert_eq!(items[1].confidence, 0.0);
    }
}
