// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations. Results go to stdout; errors are returned to
//! `main`, which prints them to stderr.

use std::path::Path;

use colored::Colorize;
use inboxpilot_app::{AppContext, UserServices};
use inboxpilot_classify::{Priority, SuggestionSource};
use inboxpilot_core::{InboxError, ParentType};

pub async fn ingest_mock(s: &UserServices, fixture: &Path, limit: usize) -> Result<(), InboxError> {
    let ids = s.ingestion.ingest_message_fixture(fixture, limit).await?;
    println!("Ingested {} messages from mock fixture.", ids.len());
    Ok(())
}

pub async fn ingest_calendar_mock(
    s: &UserServices,
    fixture: &Path,
    limit: usize,
) -> Result<(), InboxError> {
    let ids = s.ingestion.ingest_meeting_fixture(fixture, limit).await?;
    println!("Ingested {} meetings from mock fixture.", ids.len());
    Ok(())
}

pub async fn add_category(
    s: &UserServices,
    name: &str,
    description: Option<&str>,
) -> Result<(), InboxError> {
    let id = s.categories.create(name, description).await?;
    println!("Created category {id} ({}).", name.trim());
    Ok(())
}

pub async fn list_categories(s: &UserServices) -> Result<(), InboxError> {
    for category in s.categories.list().await? {
        println!(
            "{}: {} - {}",
            category.id,
            category.name.bold(),
            category.description.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

pub fn list_templates(s: &UserServices) {
    for template in s.templates.list() {
        println!(
            "{} {}",
            template.name,
            format!("({} categories)", template.categories.len()).dimmed()
        );
    }
}

pub async fn load_template(s: &UserServices, name: &str) -> Result<(), InboxError> {
    let created = s.templates.load(name).await?;
    println!("Loaded {created} categories from template.");
    Ok(())
}

pub async fn list_messages(s: &UserServices, limit: u32) -> Result<(), InboxError> {
    for message in s.list_messages(limit).await? {
        println!(
            "{}: {} {}",
            message.id,
            message.subject,
            format!("({})", message.sender).dimmed()
        );
    }
    Ok(())
}

pub async fn list_meetings(
    s: &UserServices,
    limit: u32,
    query: Option<&str>,
) -> Result<(), InboxError> {
    let meetings = match query.map(str::trim) {
        Some(q) if !q.is_empty() => s.meetings.search(q, limit).await?,
        _ => s.meetings.list(limit).await?,
    };
    for meeting in meetings {
        println!(
            "{}: {} {}",
            meeting.id,
            meeting.title,
            format!("({})", meeting.start_time).dimmed()
        );
    }
    Ok(())
}

pub async fn assign_category(
    s: &UserServices,
    message_id: i64,
    category_id: i64,
) -> Result<(), InboxError> {
    s.categories.assign(message_id, category_id).await?;
    println!("{}", "Category assigned.".green());
    Ok(())
}

pub async fn suggest_categories(s: &UserServices, message_id: i64) -> Result<(), InboxError> {
    let suggestions = s.categories.suggest(message_id).await?;
    match suggestions.source {
        SuggestionSource::NoCategories => {
            println!("No categories defined. Create some with add-category or load-template.");
        }
        source => {
            if suggestions.categories.is_empty() {
                println!("No matching categories.");
            }
            for category in &suggestions.categories {
                println!("{}: {}", category.id, category.name);
            }
            println!("{}", format!("source: {source}").dimmed());
        }
    }
    Ok(())
}

pub async fn chat(s: &UserServices, query: &str, limit: u32) -> Result<(), InboxError> {
    println!("{}", s.chat.answer(query, limit).await?);
    Ok(())
}

pub async fn draft(s: &UserServices, message_id: i64, instructions: &str) -> Result<(), InboxError> {
    println!("{}", s.chat.draft_reply(message_id, instructions).await?);
    Ok(())
}

pub async fn summarize(s: &UserServices, message_id: i64) -> Result<(), InboxError> {
    let note_id = s.insights.summarize(message_id).await?;
    println!("Saved summary as note {note_id}.");
    Ok(())
}

pub async fn follow_up(s: &UserServices, message_id: i64) -> Result<(), InboxError> {
    let follow_up = s.insights.follow_up(message_id).await?;
    println!("{}", follow_up.suggestion);
    println!("{}", format!("saved as note {}", follow_up.note_id).dimmed());
    Ok(())
}

pub async fn add_note(
    s: &UserServices,
    parent_type: ParentType,
    parent_id: i64,
    content: &str,
) -> Result<(), InboxError> {
    let id = s.notes.add(parent_type, parent_id, content).await?;
    println!("Added note {id}.");
    Ok(())
}

pub async fn add_task(
    s: &UserServices,
    parent_type: ParentType,
    parent_id: i64,
    description: &str,
) -> Result<(), InboxError> {
    let id = s.tasks.add(parent_type, parent_id, description).await?;
    println!("Added task {id}.");
    Ok(())
}

pub async fn list_tasks(
    s: &UserServices,
    parent_type: ParentType,
    parent_id: Option<i64>,
) -> Result<(), InboxError> {
    let tasks = match parent_id {
        Some(id) => s.tasks.list(parent_type, id).await?,
        None => s.tasks.list_open().await?,
    };
    for task in tasks {
        println!(
            "{}: {} [{}]",
            task.id,
            task.description,
            task.status.yellow()
        );
    }
    Ok(())
}

pub async fn update_task(s: &UserServices, task_id: i64, status: &str) -> Result<(), InboxError> {
    s.tasks.update_status(task_id, status).await?;
    println!("Task {task_id} set to {}.", status.trim());
    Ok(())
}

pub async fn extract_tasks(s: &UserServices, message_id: i64) -> Result<(), InboxError> {
    let ids = s.tasks.extract_from_message(message_id).await?;
    println!("Extracted {} tasks.", ids.len());
    Ok(())
}

pub async fn add_transcript(
    s: &UserServices,
    meeting_id: i64,
    file: Option<&Path>,
    content: Option<String>,
) -> Result<(), InboxError> {
    let content = match (file, content) {
        (Some(path), _) => tokio::fs::read_to_string(path).await.map_err(|e| {
            InboxError::InvalidInput(format!("cannot read transcript {}: {e}", path.display()))
        })?,
        (None, Some(content)) => content,
        (None, None) => {
            return Err(InboxError::InvalidInput(
                "provide transcript text or --file".into(),
            ));
        }
    };
    let id = s.meetings.add_transcript(meeting_id, &content).await?;
    println!("Added transcript {id}.");
    Ok(())
}

pub async fn summarize_meeting(s: &UserServices, meeting_id: i64) -> Result<(), InboxError> {
    let note_id = s.meeting_notes.summarize(meeting_id).await?;
    println!("Saved meeting summary as note {note_id}.");
    Ok(())
}

pub async fn extract_meeting_tasks(s: &UserServices, meeting_id: i64) -> Result<(), InboxError> {
    let ids = s.tasks.extract_from_meeting(meeting_id).await?;
    println!("Extracted {} tasks.", ids.len());
    Ok(())
}

pub async fn triage(s: &UserServices, limit: u32) -> Result<(), InboxError> {
    for item in s.triage.rank(limit).await? {
        let priority = match item.priority {
            Priority::High => "high".red().bold(),
            Priority::Medium => "medium".yellow(),
            Priority::Low => "low".dimmed(),
        };
        println!(
            "{}: [{priority}] {} {}",
            item.id,
            item.subject,
            format!("({})", item.sender).dimmed()
        );
    }
    Ok(())
}

pub async fn stats(s: &UserServices) -> Result<(), InboxError> {
    let stats = s.stats.snapshot().await?;
    println!("messages:   {}", stats.messages);
    println!("meetings:   {}", stats.meetings);
    println!("categories: {}", stats.categories);
    println!("tasks:      {}", stats.tasks);
    println!("notes:      {}", stats.notes);
    Ok(())
}

pub async fn create_api_key(
    app: &AppContext,
    user_id: i64,
    label: Option<&str>,
) -> Result<(), InboxError> {
    let created = app.api_keys().create(user_id, label).await?;
    println!("{}", created.token.bold());
    eprintln!(
        "{}",
        format!("API key {} created. It will not be shown again.", created.id).dimmed()
    );
    Ok(())
}
