//! Fixed sample data used when no other source items are available.

use mailpilot_core::{ItemId, SourceItem};

fn item(id: u64, subject: &str, sender: &str, content: &str, timestamp: &str) -> SourceItem {
    SourceItem {
        id: ItemId(id),
        subject: subject.to_string(),
        sender: sender.to_string(),
        content: content.to_string(),
        timestamp: timestamp.to_string(),
    }
}

/// Threads shown by the summarizer on first start.
pub fn summary_threads() -> Vec<SourceItem> {
    vec![
        item(
            1,
            "Q1 Budget Review Meeting",
            "sarah@company.com",
            "From: Sarah Johnson <sarah@company.com>\n\
             We need to schedule our Q1 budget review. I propose next Wednesday at 2 PM.\n\
             ---\n\
             From: Mike Chen <mike@company.com>\n\
             Wednesday works for me. Should we invite the finance team?\n\
             ---\n\
             From: Sarah Johnson <sarah@company.com>\n\
             Yes, I'll send them an invite. Can you prepare the expense report?\n\
             ---\n\
             From: Mike Chen <mike@company.com>\n\
             Will do. I'll have it ready by Tuesday.",
            "2026-01-12T09:00:00Z",
        ),
        item(
            2,
            "New Feature Development Timeline",
            "alex@company.com",
            "From: Alex Martinez <alex@company.com>\n\
             We need to finalize the timeline for the new user dashboard feature.\n\
             ---\n\
             From: Emma Wilson <emma@company.com>\n\
             We can deliver the MVP in 3 weeks. Are we using OAuth2 or a custom system?\n\
             ---\n\
             From: Alex Martinez <alex@company.com>\n\
             Let's use OAuth2. Can you start on the UI mockups?\n\
             ---\n\
             From: Emma Wilson <emma@company.com>\n\
             I'll have mockups ready by Friday.",
            "2026-01-10T15:30:00Z",
        ),
        item(
            3,
            "Client Feedback on Proposal",
            "john@client.com",
            "From: John Davis <john@client.com>\n\
             Thanks for the proposal. We have concerns about the pricing structure.\n\
             ---\n\
             From: Lisa Brown <lisa@company.com>\n\
             What specific concerns do you have? We're open to adjustments.\n\
             ---\n\
             From: John Davis <john@client.com>\n\
             The licensing fees seem high. Can we negotiate a volume discount?",
            "2026-01-09T11:15:00Z",
        ),
        item(
            4,
            "Marketing Campaign Plan",
            "karen@marketing.com",
            "From: Karen Lee <karen@marketing.com>\n\
             We need to launch the new social media campaign by Feb 1.\n\
             ---\n\
             From: Daniel Kim <daniel@marketing.com>\n\
             We might need more graphics for Instagram posts.\n\
             ---\n\
             From: Karen Lee <karen@marketing.com>\n\
             Let's aim for internal review by Jan 20.",
            "2026-01-09T08:00:00Z",
        ),
    ]
}

/// Sample inbox for the classifier.
pub fn inbox() -> Vec<SourceItem> {
    vec![
        item(
            1,
            "Password Reset Request - Urgent",
            "support@customer.com",
            "I've forgotten my password and need to reset it immediately.",
            "2026-01-14T10:30:00Z",
        ),
        item(
            2,
            "Q1 2026 Sales Proposal",
            "john@newbusiness.com",
            "We are interested in your enterprise solutions. Could you send pricing details?",
            "2026-01-14T09:15:00Z",
        ),
        item(
            3,
            "Invoice #INV-2026-001 - Payment Due",
            "billing@paymentservice.com",
            "Your invoice for January services is available. Total: $5,000. Due Jan 31.",
            "2026-01-14T08:45:00Z",
        ),
        item(
            4,
            "Weekly Team Standup Summary",
            "team@company.com",
            "All projects are on track. No blockers to report.",
            "2026-01-13T17:00:00Z",
        ),
        item(
            5,
            "API Integration Issue - Help Needed",
            "dev.support@client.com",
            "We're seeing integration errors with your API. Error code: 500.",
            "2026-01-13T14:20:00Z",
        ),
        item(
            6,
            "Company Holiday Announcement",
            "hr@company.com",
            "The office will be closed on January 20th and reopen on January 21st.",
            "2026-01-13T12:00:00Z",
        ),
    ]
}

/// Sample emails for action-item extraction.
pub fn action_emails() -> Vec<SourceItem> {
    vec![
        item(
            1,
            "Q1 Budget Review - Action Needed",
            "sarah@company.com",
            "Can you send the Q1 budget report by Friday? Mike, can you review the numbers?",
            "2026-01-14T10:30:00Z",
        ),
        item(
            2,
            "Urgent: Server Down - Help Needed ASAP",
            "ops@company.com",
            "Production is down. Restart the application server immediately and send a \
             root cause analysis by end of day.",
            "2026-01-14T09:15:00Z",
        ),
        item(
            3,
            "Invoice Needs Review",
            "accounting@vendor.com",
            "Please review and approve invoice #INV-12345 by end of week.",
            "2026-01-14T08:45:00Z",
        ),
        item(
            4,
            "Project Status & Next Steps",
            "alex@company.com",
            "Schedule a design review for next Wednesday and send mockup feedback by Tuesday.",
            "2026-01-13T17:00:00Z",
        ),
        item(
            5,
            "Action Items from Today's Meeting",
            "john@company.com",
            "Sarah sends the proposal by tomorrow. Tom prepares the technical documentation. \
             Submit your timesheets by Friday.",
            "2026-01-13T14:20:00Z",
        ),
    ]
}

/// Threads offered for reply drafting.
pub fn reply_threads() -> Vec<SourceItem> {
    vec![
        item(
            1,
            "Project Timeline Discussion",
            "manager@company.com",
            "The client requested we move the launch date up by 2 weeks. Can you review \
             the current schedule and provide your assessment by end of day?",
            "2026-01-14T09:00:00Z",
        ),
        item(
            2,
            "Urgent: System Performance Issues",
            "ops@company.com",
            "Response times on production went from 200ms to 5+ seconds. We restarted the \
             servers and cleared the cache. How long until a full investigation is done?",
            "2026-01-14T10:00:00Z",
        ),
        item(
            3,
            "Budget Approval for New Tools",
            "finance@company.com",
            "Before approving the tooling budget we need a cost-benefit analysis, a \
             comparison with existing solutions, a timeline for ROI and the team size.",
            "2026-01-14T11:00:00Z",
        ),
    ]
}
