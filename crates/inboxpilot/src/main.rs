// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! InboxPilot - a local-first AI assistant for email and meetings.
//!
//! This is the binary entry point: the command-line interface and `serve`.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use inboxpilot_app::AppContext;
use inboxpilot_core::ParentType;
use inboxpilot_gateway::handlers::{DEFAULT_MEETING_FIXTURE, DEFAULT_MESSAGE_FIXTURE};

/// InboxPilot - a local-first AI assistant for email and meetings.
#[derive(Parser, Debug)]
#[command(name = "inboxpilot", version, about, long_about = None)]
struct Cli {
    /// Load this config file instead of the default search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Act as this user instead of the configured default user.
    #[arg(long, global = true)]
    user_email: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest messages from a JSON fixture.
    IngestMock {
        #[arg(long, default_value_t = 5)]
        limit: usize,
        #[arg(long, default_value = DEFAULT_MESSAGE_FIXTURE)]
        fixture: PathBuf,
    },
    /// Ingest meetings from a JSON fixture.
    IngestCalendarMock {
        #[arg(long, default_value_t = 5)]
        limit: usize,
        #[arg(long, default_value = DEFAULT_MEETING_FIXTURE)]
        fixture: PathBuf,
    },
    /// Create a category.
    AddCategory {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List categories.
    ListCategories,
    /// List category template packs.
    ListTemplates,
    /// Create every category of a template pack.
    LoadTemplate { template_name: String },
    /// List recent messages.
    ListMessages {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// List recent meetings, optionally filtered by a search term.
    ListMeetings {
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long)]
        query: Option<String>,
    },
    /// Assign a category to a message.
    AssignCategory { message_id: i64, category_id: i64 },
    /// Suggest categories for a message.
    SuggestCategories { message_id: i64 },
    /// Ask a question about your inbox.
    Chat {
        query: String,
        #[arg(long, default_value_t = 3)]
        limit: u32,
    },
    /// Draft a reply to a message. Nothing is sent.
    Draft {
        message_id: i64,
        instructions: String,
    },
    /// Summarize a message into a note.
    Summarize { message_id: i64 },
    /// Suggest a follow-up action for a message.
    FollowUp { message_id: i64 },
    /// Add a note to a message or meeting.
    AddNote {
        parent_id: i64,
        content: String,
        #[arg(long, default_value = "message")]
        parent_type: ParentType,
    },
    /// Add a task to a message or meeting.
    AddTask {
        parent_id: i64,
        description: String,
        #[arg(long, default_value = "message")]
        parent_type: ParentType,
    },
    /// List tasks for a message or meeting, or every open task.
    ListTasks {
        parent_id: Option<i64>,
        #[arg(long, default_value = "message")]
        parent_type: ParentType,
    },
    /// Set a task's status.
    UpdateTask { task_id: i64, status: String },
    /// Extract tasks from a message with AI.
    ExtractTasks { message_id: i64 },
    /// Attach a transcript to a meeting.
    AddTranscript {
        meeting_id: i64,
        /// Read the transcript from this file.
        #[arg(long, conflicts_with = "content")]
        file: Option<PathBuf>,
        content: Option<String>,
    },
    /// Summarize a meeting's latest transcript into a note.
    SummarizeMeeting { meeting_id: i64 },
    /// Extract tasks from a meeting's latest transcript.
    ExtractMeetingTasks { meeting_id: i64 },
    /// Rank recent messages by keyword priority.
    Triage {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Show record counts.
    Stats,
    /// Create an API key for the current user.
    CreateApiKey {
        #[arg(long)]
        label: Option<String>,
    },
    /// Start the HTTP API.
    Serve {
        /// Override `gateway.host`.
        #[arg(long)]
        host: Option<String>,
        /// Override `gateway.port`.
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => inboxpilot_config::load_and_validate_path(path),
        None => inboxpilot_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            inboxpilot_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    serve::init_tracing(&config.general.log_level);

    let app = match AppContext::build(config).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            std::process::exit(1);
        }
    };

    let result = match cli.user_email.as_deref() {
        Some(email) => match app.user_id_for_email(email).await {
            Ok(user_id) => dispatch(cli.command, &app, user_id).await,
            Err(e) => Err(e),
        },
        None => dispatch(cli.command, &app, app.default_user_id()).await,
    };

    if let Err(e) = app.shutdown().await {
        tracing::warn!(error = %e, "storage did not close cleanly");
    }

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

async fn dispatch(
    command: Commands,
    app: &AppContext,
    user_id: i64,
) -> Result<(), inboxpilot_core::InboxError> {
    use commands as c;

    let services = app.services_for_user(user_id);
    match command {
        Commands::IngestMock { limit, fixture } => c::ingest_mock(&services, &fixture, limit).await,
        Commands::IngestCalendarMock { limit, fixture } => {
            c::ingest_calendar_mock(&services, &fixture, limit).await
        }
        Commands::AddCategory { name, description } => {
            c::add_category(&services, &name, description.as_deref()).await
        }
        Commands::ListCategories => c::list_categories(&services).await,
        Commands::ListTemplates => {
            c::list_templates(&services);
            Ok(())
        }
        Commands::LoadTemplate { template_name } => {
            c::load_template(&services, &template_name).await
        }
        Commands::ListMessages { limit } => c::list_messages(&services, limit).await,
        Commands::ListMeetings { limit, query } => {
            c::list_meetings(&services, limit, query.as_deref()).await
        }
        Commands::AssignCategory {
            message_id,
            category_id,
        } => c::assign_category(&services, message_id, category_id).await,
        Commands::SuggestCategories { message_id } => {
            c::suggest_categories(&services, message_id).await
        }
        Commands::Chat { query, limit } => c::chat(&services, &query, limit).await,
        Commands::Draft {
            message_id,
            instructions,
        } => c::draft(&services, message_id, &instructions).await,
        Commands::Summarize { message_id } => c::summarize(&services, message_id).await,
        Commands::FollowUp { message_id } => c::follow_up(&services, message_id).await,
        Commands::AddNote {
            parent_id,
            content,
            parent_type,
        } => c::add_note(&services, parent_type, parent_id, &content).await,
        Commands::AddTask {
            parent_id,
            description,
            parent_type,
        } => c::add_task(&services, parent_type, parent_id, &description).await,
        Commands::ListTasks {
            parent_id,
            parent_type,
        } => c::list_tasks(&services, parent_type, parent_id).await,
        Commands::UpdateTask { task_id, status } => {
            c::update_task(&services, task_id, &status).await
        }
        Commands::ExtractTasks { message_id } => c::extract_tasks(&services, message_id).await,
        Commands::AddTranscript {
            meeting_id,
            file,
            content,
        } => c::add_transcript(&services, meeting_id, file.as_deref(), content).await,
        Commands::SummarizeMeeting { meeting_id } => {
            c::summarize_meeting(&services, meeting_id).await
        }
        Commands::ExtractMeetingTasks { meeting_id } => {
            c::extract_meeting_tasks(&services, meeting_id).await
        }
        Commands::Triage { limit } => c::triage(&services, limit).await,
        Commands::Stats => c::stats(&services).await,
        Commands::CreateApiKey { label } => {
            c::create_api_key(app, user_id, label.as_deref()).await
        }
        Commands::Serve { host, port } => serve::run_serve(app.clone(), host, port).await,
    }
}
