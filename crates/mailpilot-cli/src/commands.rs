use crate::cli::{ConfigCommands, ThreadCommands};
use crate::state::AppState;
use anyhow::{bail, Context};
use mailpilot_config::AppConfig;
use mailpilot_core::{Category, ItemId, Priority, Tone, WorkflowStatus};
use std::path::Path;

/// Turns a failed workflow status into a command error.
fn ensure_ready(status: &WorkflowStatus) -> anyhow::Result<()> {
    match status {
        WorkflowStatus::Failed { message } => bail!("{message}"),
        _ => Ok(()),
    }
}

pub async fn threads(state: &AppState, command: ThreadCommands) -> anyhow::Result<()> {
    let mut summarizer = state.summarizer().await;

    match command {
        ThreadCommands::List => {}
        ThreadCommands::Add { subject, content } => {
            let id = summarizer.add_thread(&subject, &content).await?;
            println!("added thread {id}");
        }
        ThreadCommands::Remove { id } => {
            let removed = summarizer.remove_thread(ItemId(id)).await?;
            println!("removed thread {id}: {}", removed.subject);
        }
        ThreadCommands::Refresh => {
            summarizer.refresh_threads().await?;
            ensure_ready(&summarizer.state().status)?;
        }
    }

    for thread in summarizer.threads() {
        println!("{:>4}  {}", thread.id.0, thread.subject);
    }
    Ok(())
}

pub async fn summarize(state: &AppState, id: u64) -> anyhow::Result<()> {
    let mut summarizer = state.summarizer().await;
    summarizer
        .select(Some(ItemId(id)))
        .with_context(|| format!("select thread {id}"))?;
    summarizer.summarize().await?;
    ensure_ready(&summarizer.state().status)?;

    if let Some(thread) = summarizer.selected_thread() {
        println!("# {}\n", thread.subject);
    }
    println!("{}", summarizer.current_summary().unwrap_or_default());
    Ok(())
}

pub async fn classify(
    state: &AppState,
    category: Option<Category>,
    input: Option<&Path>,
) -> anyhow::Result<()> {
    let mut classifier = state.classifier(input)?;
    classifier.set_filter(category)?;
    classifier.classify().await?;
    ensure_ready(&classifier.state().status)?;

    for result in classifier.visible() {
        let confidence = result
            .confidence
            .map(|value| format!(" ({:.0}%)", value * 100.0))
            .unwrap_or_default();
        println!(
            "{:>4}  {:<8} {}{confidence}",
            result.email.id.0,
            result.category.as_str(),
            result.email.subject
        );
    }

    let counts = classifier.counts();
    let summary: Vec<String> = Category::ALL
        .iter()
        .map(|category| format!("{category}: {}", counts.count(category)))
        .collect();
    println!("\n{} emails; {}", counts.total, summary.join(", "));
    Ok(())
}

pub async fn extract(
    state: &AppState,
    priority: Option<Priority>,
    input: Option<&Path>,
) -> anyhow::Result<()> {
    let mut extractor = state.extractor(input)?;
    extractor.set_priority_filter(priority)?;
    extractor.extract().await?;
    ensure_ready(&extractor.state().status)?;

    for item in extractor.visible() {
        println!("[{}] {:<6} {}", item.priority, item.unique_id, item.title);
        println!("       from: {}", item.email_subject);
        if let Some(due) = &item.due_date {
            println!("       due: {due}");
        }
        if let Some(assignee) = &item.suggested_assignee {
            println!("       assignee: {assignee}");
        }
    }

    let counts = extractor.counts();
    println!(
        "\n{} action items, {} high priority, {} confirmed",
        counts.total, counts.high_priority, counts.confirmed
    );
    Ok(())
}

pub async fn draft(
    state: &AppState,
    thread_id: u64,
    tone: Option<Tone>,
    feedback: Option<String>,
) -> anyhow::Result<()> {
    let mut generator = state.draft_generator();
    generator
        .select_thread(Some(ItemId(thread_id)))
        .with_context(|| format!("select reply thread {thread_id}"))?;
    generator.generate().await?;
    ensure_ready(&generator.state().status)?;

    if let Some(tone) = tone {
        generator.select_draft(tone)?;
    }
    if let Some(feedback) = feedback {
        generator.refine(&feedback).await?;
        ensure_ready(&generator.state().status)?;
    }

    for draft in generator.drafts() {
        println!("{:<12} {}", draft.tone.as_str(), draft.tone.description());
    }
    if let Some(active) = generator.active_draft() {
        println!("\n[{}] {}\n\n{}", active.tone, active.subject, active.body);
    }
    Ok(())
}

fn render_config(config: &AppConfig) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

pub fn config(state: &AppState, command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Path => println!("{}", state.config_manager.config_path().display()),
        ConfigCommands::Show => {
            print!("{}", render_config(&state.config)?);
        }
    }
    Ok(())
}
