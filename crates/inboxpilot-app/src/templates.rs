// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Starter category packs.

use std::sync::Arc;

use inboxpilot_core::types::NewCategory;
use inboxpilot_core::{InboxError, InboxStore, UserContext};
use serde::Serialize;
use tracing::info;

/// A named set of categories that can be loaded in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTemplate {
    pub name: &'static str,
    /// `(name, description)` pairs.
    pub categories: &'static [(&'static str, &'static str)],
}

pub const TEMPLATES: &[CategoryTemplate] = &[
    CategoryTemplate {
        name: "real_estate",
        categories: &[
            ("Leads", "Buyer and seller inquiries"),
            ("Listings", "Active listings and showings"),
            ("Contracts", "Offers and contract updates"),
            ("Closings", "Closing timelines and documents"),
        ],
    },
    CategoryTemplate {
        name: "recruiting",
        categories: &[
            ("Candidates", "Applicant communications"),
            ("Interviews", "Scheduling and feedback"),
            ("Offers", "Offer logistics and negotiations"),
        ],
    },
    CategoryTemplate {
        name: "sales",
        categories: &[
            ("Prospects", "Early-stage outreach"),
            ("Pipeline", "Active deals and follow-ups"),
            ("Renewals", "Existing customer renewals"),
            ("Contracts", "Pricing and legal review"),
        ],
    },
    CategoryTemplate {
        name: "freelancing",
        categories: &[
            ("Leads", "Potential clients"),
            ("Active Projects", "Ongoing client work"),
            ("Invoices", "Billing and payments"),
        ],
    },
    CategoryTemplate {
        name: "personal_life",
        categories: &[
            ("Family", "Family communications"),
            ("Finance", "Bills and banking"),
            ("Health", "Appointments and health topics"),
            ("Travel", "Trips and plans"),
        ],
    },
];

pub fn list_templates() -> &'static [CategoryTemplate] {
    TEMPLATES
}

pub fn find_template(name: &str) -> Option<&'static CategoryTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

pub struct TemplateService {
    user_id: i64,
    store: Arc<dyn InboxStore>,
}

impl TemplateService {
    pub fn new(ctx: &UserContext) -> Self {
        Self {
            user_id: ctx.user_id,
            store: ctx.store.clone(),
        }
    }

    pub fn list(&self) -> &'static [CategoryTemplate] {
        list_templates()
    }

    /// Create every category of the named pack for the user.
    ///
    /// Returns the number of categories in the pack. Categories that already
    /// exist by name are kept as they are and still counted.
    pub async fn load(&self, name: &str) -> Result<usize, InboxError> {
        let template = find_template(name)
            .ok_or_else(|| InboxError::InvalidInput(format!("unknown template: {name}")))?;

        for (category, description) in template.categories {
            self.store
                .create_category(&NewCategory::new(*category, Some(*description)), self.user_id)
                .await?;
        }
        info!(
            template = template.name,
            count = template.categories.len(),
            "category template loaded"
        );
        Ok(template.categories.len())
    }
}
