use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{info, instrument};

use crate::apis::{fetch_all, LaunchSource, SourceData};
use crate::config::Config;
use crate::constants::{GROUP_KEY_PREVIEW_LEN, NORMALIZED_PREVIEW_LEN, SUMMARY_PREVIEW_LEN};
use crate::error::Result;
use crate::pipeline::aggregate::{frequency, group_by, GroupKey, Tally};
use crate::pipeline::enrich::enrich;
use crate::pipeline::views;
use crate::types::{EnrichedLaunch, LaunchField, LaunchSummary};

/// A launch that matched the category filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryHit {
    pub name: String,
    pub category: String,
}

/// Every view computed from one run, as plain data for a printer or serializer
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub category: String,
    pub top_n: usize,
    pub launches_fetched: usize,
    pub rockets_fetched: usize,
    pub normalized_preview: Vec<EnrichedLaunch>,
    pub any_failed: bool,
    pub every_has_name: bool,
    pub first_names_alphabetical: Vec<String>,
    pub in_category: Vec<CategoryHit>,
    pub launches_per_rocket: Tally,
    pub rocket_group_keys: Vec<String>,
    pub year_group_keys: Vec<String>,
    pub summaries_preview: Vec<LaunchSummary>,
    pub failure_frequency: Tally,
    pub top_cores: Vec<String>,
}

impl Report {
    /// Join the fetched collections and compute every view
    pub fn from_source(data: &SourceData, category: &str, top_n: usize) -> Self {
        let enriched = enrich(&data.launches, &data.rockets);
        Self::build(&enriched, data.launches.len(), data.rockets.len(), category, top_n)
    }

    pub fn build(
        enriched: &[EnrichedLaunch],
        launches_fetched: usize,
        rockets_fetched: usize,
        category: &str,
        top_n: usize,
    ) -> Self {
        let by_rocket = group_by(enriched, &GroupKey::Field(LaunchField::RocketName));
        let by_year = group_by(enriched, &GroupKey::with(|l: &EnrichedLaunch| l.year.clone()));

        let in_category = views::filter_by_category(enriched, category)
            .into_iter()
            .map(|l| CategoryHit {
                name: l.name.clone(),
                category: l.rocket_name.clone(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            category: category.to_string(),
            top_n,
            launches_fetched,
            rockets_fetched,
            normalized_preview: enriched.iter().take(NORMALIZED_PREVIEW_LEN).cloned().collect(),
            any_failed: views::any_failed(enriched),
            every_has_name: views::every_has_name(enriched),
            first_names_alphabetical: views::alphabetical_names(enriched, top_n),
            in_category,
            launches_per_rocket: views::count_per_category(enriched),
            rocket_group_keys: by_rocket.keys().take(GROUP_KEY_PREVIEW_LEN).map(String::from).collect(),
            year_group_keys: by_year.keys().take(GROUP_KEY_PREVIEW_LEN).map(String::from).collect(),
            summaries_preview: enriched.iter().take(SUMMARY_PREVIEW_LEN).map(LaunchSummary::from).collect(),
            failure_frequency: frequency(views::all_failure_reasons(enriched)),
            top_cores: frequency(views::all_cores(enriched)).top_n_labels(top_n),
        }
    }
}

/// Fetch both collections and build the report. Any fetch failure aborts the run.
#[instrument(skip_all, fields(category = %config.category))]
pub async fn generate(source: &dyn LaunchSource, config: &Config) -> Result<Report> {
    let data = fetch_all(source).await?;
    let report = Report::from_source(&data, &config.category, config.top_n);
    info!(
        "Report built: {} launches, {} in category",
        report.launches_fetched,
        report.in_category.len()
    );
    Ok(report)
}

fn section(f: &mut fmt::Formatter<'_>, label: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "🔹 {}", label)
}

fn json_block<T: Serialize>(f: &mut fmt::Formatter<'_>, value: &T) -> fmt::Result {
    let text = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
    writeln!(f, "{}", text)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🚀 SpaceX launch report ({})", self.generated_at.format("%Y-%m-%d %H:%M UTC"))?;

        section(f, "Launches fetched")?;
        writeln!(f, "{}", self.launches_fetched)?;
        section(f, "Rockets fetched")?;
        writeln!(f, "{}", self.rockets_fetched)?;

        section(f, &format!("Normalized launches ({})", self.normalized_preview.len()))?;
        json_block(f, &self.normalized_preview)?;

        section(f, "Any failed launches? (some)")?;
        writeln!(f, "{}", self.any_failed)?;
        section(f, "Every launch has a name? (every)")?;
        writeln!(f, "{}", self.every_has_name)?;

        section(f, &format!("First {} launch names (alphabetical)", self.top_n))?;
        json_block(f, &self.first_names_alphabetical)?;

        section(f, &format!("Launches in category \"{}\" (name — category)", self.category))?;
        if self.in_category.is_empty() {
            writeln!(f, "(none)")?;
        }
        for hit in &self.in_category {
            writeln!(f, "• {} — {}", hit.name, hit.category)?;
        }

        section(f, "Launches per rocket")?;
        json_block(f, &self.launches_per_rocket)?;

        section(f, "Grouped by rocket name (first keys)")?;
        json_block(f, &self.rocket_group_keys)?;
        section(f, "Grouped by year (first keys)")?;
        json_block(f, &self.year_group_keys)?;

        section(f, &format!("Launch summaries ({})", self.summaries_preview.len()))?;
        json_block(f, &self.summaries_preview)?;

        section(f, "Failure reason frequency")?;
        json_block(f, &self.failure_frequency)?;

        section(f, &format!("Top {} most used cores", self.top_n))?;
        json_block(f, &self.top_cores)
    }
}
