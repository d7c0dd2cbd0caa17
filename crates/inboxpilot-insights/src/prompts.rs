// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates and purpose tags for insight generation.
//!
//! Prompts are stored verbatim in the audit log, so changing a template
//! changes what past and future audit rows look like side by side.

use inboxpilot_core::types::{Meeting, Message, Transcript};

pub const PURPOSE_EXTRACT_TASKS: &str = "extract_tasks";
pub const PURPOSE_MESSAGE_SUMMARY: &str = "message_summary";
pub const PURPOSE_FOLLOW_UP: &str = "follow_up";
pub const PURPOSE_MEETING_SUMMARY: &str = "meeting_summary";
pub const PURPOSE_ANSWER: &str = "answer";
pub const PURPOSE_DRAFT: &str = "draft";

fn email_block(message: &Message) -> String {
    format!(
        "Subject: {}\nFrom: {}\nBody: {}\n",
        message.subject, message.sender, message.body
    )
}

fn transcript_block(meeting: &Meeting, transcript: &Transcript) -> String {
    format!(
        "Meeting: {}\nTranscript:\n{}\n",
        meeting.title, transcript.content
    )
}

pub fn extract_message_tasks(message: &Message) -> String {
    format!(
        "Extract action items from the email. Respond with one task per line.\n\n{}",
        email_block(message)
    )
}

pub fn extract_meeting_tasks(meeting: &Meeting, transcript: &Transcript) -> String {
    format!(
        "Extract action items from the meeting transcript. Respond with one task per line.\n\n{}",
        transcript_block(meeting, transcript)
    )
}

pub fn summarize_message(message: &Message) -> String {
    format!(
        "Summarize the email in a few sentences.\n\n{}",
        email_block(message)
    )
}

pub fn follow_up(message: &Message) -> String {
    format!(
        "Suggest a follow-up action for the email. Respond with one short suggestion.\n\n{}",
        email_block(message)
    )
}

pub fn summarize_meeting(meeting: &Meeting, transcript: &Transcript) -> String {
    format!(
        "Summarize the meeting transcript into concise notes.\n\n{}",
        transcript_block(meeting, transcript)
    )
}

/// One search hit as shown to the model.
pub fn context_block(message: &Message) -> String {
    format!(
        "ID: {}\nFrom: {}\nSubject: {}\nSnippet: {}\n",
        message.id, message.sender, message.subject, message.snippet
    )
}

pub fn answer(query: &str, messages: &[Message]) -> String {
    let context: Vec<String> = messages.iter().map(context_block).collect();
    format!(
        "Answer the user question using the message context.\n\n\
         Question: {query}\n\n\
         Messages:\n{}\n",
        context.join("\n\n")
    )
}

pub fn draft_reply(message: &Message, instructions: &str) -> String {
    format!(
        "Draft a helpful reply. Do not send the email.\n\n\
         Email from: {}\nSubject: {}\nBody: {}\n\n\
         User instructions: {instructions}\n",
        message.sender, message.subject, message.body
    )
}
