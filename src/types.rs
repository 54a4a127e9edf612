use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Rocket as returned by `/v4/rockets`. Only the fields the join needs are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rocket {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchFailure {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchCore {
    #[serde(default)]
    pub core: Option<String>,
}

/// Launch as returned by `/v4/launches`.
///
/// Missing or null sequences come out as empty vectors, so nothing downstream
/// has to care whether the API omitted a field or sent `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLaunch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_utc: String,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upcoming: bool,
    #[serde(default)]
    pub rocket: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub failures: Vec<LaunchFailure>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payloads: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cores: Vec<LaunchCore>,
}

/// A launch joined with its rocket, with every optional field defaulted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedLaunch {
    pub id: String,
    pub name: String,
    pub date_utc: String,
    /// First four characters of `date_utc`, or "Unknown"
    pub year: String,
    pub success: Option<bool>,
    pub upcoming: bool,
    pub rocket_id: Option<String>,
    /// Name of the referenced rocket, or "Unknown" when it cannot be resolved
    pub rocket_name: String,
    pub failures: Vec<String>,
    pub payloads: Vec<String>,
    pub cores: Vec<String>,
}

/// Named scalar fields of [`EnrichedLaunch`] that can be used as a grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchField {
    Id,
    Name,
    DateUtc,
    Year,
    Success,
    Upcoming,
    RocketId,
    RocketName,
}

impl EnrichedLaunch {
    /// Stringified value of a named field.
    ///
    /// Absent optionals render as `"null"` so that they still form their own group.
    pub fn field(&self, field: LaunchField) -> String {
        match field {
            LaunchField::Id => self.id.clone(),
            LaunchField::Name => self.name.clone(),
            LaunchField::DateUtc => self.date_utc.clone(),
            LaunchField::Year => self.year.clone(),
            LaunchField::Success => match self.success {
                Some(flag) => flag.to_string(),
                None => "null".to_string(),
            },
            LaunchField::Upcoming => self.upcoming.to_string(),
            LaunchField::RocketId => self.rocket_id.clone().unwrap_or_else(|| "null".to_string()),
            LaunchField::RocketName => self.rocket_name.clone(),
        }
    }
}

/// Compact reshaped view of a launch for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    pub payloads: Vec<String>,
    pub meta: SummaryMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryMeta {
    pub date: String,
    pub year: String,
    pub success: Option<bool>,
    pub upcoming: bool,
}

impl From<&EnrichedLaunch> for LaunchSummary {
    fn from(launch: &EnrichedLaunch) -> Self {
        Self {
            id: launch.id.clone(),
            name: launch.name.clone(),
            category: launch.rocket_name.clone(),
            payloads: launch.payloads.clone(),
            meta: SummaryMeta {
                date: launch.date_utc.clone(),
                year: launch.year.clone(),
                success: launch.success,
                upcoming: launch.upcoming,
            },
        }
    }
}
