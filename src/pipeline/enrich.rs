use std::collections::HashMap;

use metrics::counter;
use tracing::{debug, instrument, warn};

use crate::constants::UNKNOWN;
use crate::types::{EnrichedLaunch, RawLaunch, Rocket};

/// Rockets indexed by id for constant-time lookup during the join
#[derive(Debug, Default)]
pub struct RocketIndex<'a> {
    by_id: HashMap<&'a str, &'a Rocket>,
}

impl<'a> RocketIndex<'a> {
    /// Build the index. Duplicate ids are not rejected; the last one wins.
    pub fn new(rockets: &'a [Rocket]) -> Self {
        let by_id = rockets.iter().map(|r| (r.id.as_str(), r)).collect();
        Self { by_id }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Name of the rocket with this id, if it is known and named
    pub fn name_of(&self, rocket_id: Option<&str>) -> Option<&'a str> {
        rocket_id
            .and_then(|id| self.by_id.get(id).copied())
            .map(|r| r.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Join one launch with its rocket and default every optional field
    pub fn enrich_launch(&self, launch: &RawLaunch) -> EnrichedLaunch {
        let rocket_name = match self.name_of(launch.rocket.as_deref()) {
            Some(name) => name.to_string(),
            None => {
                debug!(launch = %launch.name, rocket = ?launch.rocket, "rocket not resolved");
                counter!("spacex_unresolved_rockets_total").increment(1);
                UNKNOWN.to_string()
            }
        };

        EnrichedLaunch {
            id: launch.id.clone(),
            name: launch.name.clone(),
            date_utc: launch.date_utc.clone(),
            year: year_of(&launch.date_utc),
            success: launch.success,
            upcoming: launch.upcoming,
            rocket_id: launch.rocket.clone(),
            rocket_name,
            failures: launch
                .failures
                .iter()
                .map(|f| match f.reason.as_deref() {
                    Some(reason) if !reason.is_empty() => reason.to_string(),
                    _ => UNKNOWN.to_string(),
                })
                .collect(),
            payloads: launch.payloads.clone(),
            cores: launch
                .cores
                .iter()
                .filter_map(|c| c.core.clone())
                .filter(|core| !core.is_empty())
                .collect(),
        }
    }
}

/// Year prefix of an ISO timestamp, or "Unknown" for an empty date
pub fn year_of(date_utc: &str) -> String {
    if date_utc.is_empty() {
        return UNKNOWN.to_string();
    }
    date_utc.chars().take(4).collect()
}

/// Join launches with rockets. Output order matches input order, one record per launch.
#[instrument(skip_all, fields(launches = launches.len(), rockets = rockets.len()))]
pub fn enrich(launches: &[RawLaunch], rockets: &[Rocket]) -> Vec<EnrichedLaunch> {
    let index = RocketIndex::new(rockets);
    let enriched: Vec<EnrichedLaunch> = launches.iter().map(|l| index.enrich_launch(l)).collect();

    let unresolved = enriched.iter().filter(|l| l.rocket_name == UNKNOWN).count();
    if unresolved > 0 {
        warn!("{} of {} launches reference an unknown rocket", unresolved, enriched.len());
    }
    counter!("spacex_launches_enriched_total").increment(enriched.len() as u64);
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LaunchCore, LaunchFailure};

    fn rocket(id: &str, name: &str) -> Rocket {
        Rocket { id: id.into(), name: name.into() }
    }

    fn launch(name: &str, date: &str, rocket: Option<&str>) -> RawLaunch {
        RawLaunch {
            id: format!("id-{name}"),
            name: name.into(),
            date_utc: date.into(),
            success: Some(true),
            upcoming: false,
            rocket: rocket.map(String::from),
            failures: vec![],
            payloads: vec![],
            cores: vec![],
        }
    }

    #[test]
    fn resolves_rocket_names_and_falls_back_to_unknown() {
        let rockets = vec![rocket("f1", "Falcon 1"), rocket("f9", "Falcon 9")];
        let launches = vec![
            launch("FalconSat", "2006-03-24T22:30:00.000Z", Some("f1")),
            launch("CRS-1", "2012-10-08T00:35:00.000Z", Some("f9")),
            launch("Mystery", "2020-01-01T00:00:00.000Z", Some("nope")),
            launch("Orphan", "2021-01-01T00:00:00.000Z", None),
        ];

        let enriched = enrich(&launches, &rockets);

        let names: Vec<&str> = enriched.iter().map(|l| l.rocket_name.as_str()).collect();
        assert_eq!(names, vec!["Falcon 1", "Falcon 9", "Unknown", "Unknown"]);
    }

    #[test]
    fn last_duplicate_rocket_wins() {
        let rockets = vec![rocket("f9", "Old Name"), rocket("f9", "Falcon 9")];
        let enriched = enrich(&[launch("CRS-2", "2013-03-01", Some("f9"))], &rockets);
        assert_eq!(enriched[0].rocket_name, "Falcon 9");
    }

    #[test]
    fn unnamed_rocket_counts_as_unresolved() {
        let rockets = vec![rocket("f9", "")];
        let enriched = enrich(&[launch("CRS-3", "2014-04-18", Some("f9"))], &rockets);
        assert_eq!(enriched[0].rocket_name, UNKNOWN);
    }

    #[test]
    fn year_is_prefix_or_unknown() {
        assert_eq!(year_of("2006-03-24T22:30:00.000Z"), "2006");
        assert_eq!(year_of(""), "Unknown");
        assert_eq!(year_of("20"), "20");
    }

    #[test]
    fn flattens_nested_failures_and_cores() {
        let mut raw = launch("Trailblazer", "2008-08-03T03:34:00.000Z", Some("f1"));
        raw.failures = vec![
            LaunchFailure { reason: Some("residual stage-1 thrust led to collision".into()) },
            LaunchFailure { reason: None },
        ];
        raw.cores = vec![
            LaunchCore { core: Some("core-a".into()) },
            LaunchCore { core: None },
            LaunchCore { core: Some("core-b".into()) },
        ];
        raw.payloads = vec!["p1".into(), "p2".into()];

        let enriched = enrich(&[raw], &[rocket("f1", "Falcon 1")]);

        assert_eq!(
            enriched[0].failures,
            vec!["residual stage-1 thrust led to collision".to_string(), "Unknown".to_string()]
        );
        assert_eq!(enriched[0].cores, vec!["core-a".to_string(), "core-b".to_string()]);
        assert_eq!(enriched[0].payloads, vec!["p1".to_string(), "p2".to_string()]);
    }

    #[test]
    fn blank_reasons_and_cores_are_treated_as_missing() {
        let mut raw = launch("Amos-6", "2016-09-01T13:07:00.000Z", Some("f9"));
        raw.failures = vec![LaunchFailure { reason: Some(String::new()) }];
        raw.cores = vec![
            LaunchCore { core: Some(String::new()) },
            LaunchCore { core: Some("B1028".into()) },
        ];

        let enriched = enrich(&[raw], &[rocket("f9", "Falcon 9")]);

        assert_eq!(enriched[0].failures, vec![UNKNOWN.to_string()]);
        assert_eq!(enriched[0].cores, vec!["B1028".to_string()]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(enrich(&[], &[rocket("f9", "Falcon 9")]).is_empty());
    }

    #[test]
    fn index_reports_size() {
        let rockets = vec![rocket("a", "A"), rocket("b", "B"), rocket("a", "A2")];
        let index = RocketIndex::new(&rockets);
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
        assert_eq!(index.name_of(Some("a")), Some("A2"));
        assert_eq!(index.name_of(None), None);
    }
}
