use std::cmp::Ordering;

use feruca::Collator;

use crate::pipeline::aggregate::{frequency, Tally};
use crate::types::EnrichedLaunch;

/// Launches whose rocket name equals `category`, ignoring case
pub fn filter_by_category<'a>(launches: &'a [EnrichedLaunch], category: &str) -> Vec<&'a EnrichedLaunch> {
    let wanted = category.to_lowercase();
    launches
        .iter()
        .filter(|l| l.rocket_name.to_lowercase() == wanted)
        .collect()
}

/// Collation order for launch names (Unicode Collation Algorithm, CLDR root).
///
/// Accented letters sort next to their base letter and lowercase precedes
/// uppercase on otherwise equal text. The order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

/// First `n` launch names in alphabetical order
pub fn alphabetical_names(launches: &[EnrichedLaunch], n: usize) -> Vec<String> {
    let mut collator = Collator::default();
    let mut names: Vec<&str> = launches.iter().map(|l| l.name.as_str()).collect();
    names.sort_by(|a, b| collator.collate(*a, *b));
    names.into_iter().take(n).map(String::from).collect()
}

/// Number of launches per rocket name
pub fn count_per_category(launches: &[EnrichedLaunch]) -> Tally {
    frequency(launches.iter().map(|l| l.rocket_name.as_str()))
}

/// Every failure reason across all launches, in launch order
pub fn all_failure_reasons(launches: &[EnrichedLaunch]) -> Vec<&str> {
    launches
        .iter()
        .flat_map(|l| l.failures.iter().map(String::as_str))
        .collect()
}

/// Every core id across all launches, in launch order
pub fn all_cores(launches: &[EnrichedLaunch]) -> Vec<&str> {
    launches
        .iter()
        .flat_map(|l| l.cores.iter().map(String::as_str))
        .collect()
}

pub fn any_launch<P>(launches: &[EnrichedLaunch], predicate: P) -> bool
where
    P: FnMut(&EnrichedLaunch) -> bool,
{
    launches.iter().any(predicate)
}

pub fn every_launch<P>(launches: &[EnrichedLaunch], predicate: P) -> bool
where
    P: FnMut(&EnrichedLaunch) -> bool,
{
    launches.iter().all(predicate)
}

pub fn any_failed(launches: &[EnrichedLaunch]) -> bool {
    any_launch(launches, |l| l.success == Some(false))
}

pub fn every_has_name(launches: &[EnrichedLaunch]) -> bool {
    every_launch(launches, |l| !l.name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch(name: &str, rocket: &str) -> EnrichedLaunch {
        EnrichedLaunch {
            id: format!("id-{name}"),
            name: name.into(),
            date_utc: "2020-01-01T00:00:00.000Z".into(),
            year: "2020".into(),
            success: Some(true),
            upcoming: false,
            rocket_id: Some(format!("r-{rocket}")),
            rocket_name: rocket.into(),
            failures: vec![],
            payloads: vec![],
            cores: vec![],
        }
    }

    #[test]
    fn alphabetical_top_five() {
        let launches: Vec<_> = ["Zeta", "Alpha", "Mu", "Beta", "Eta", "Iota"]
            .iter()
            .map(|n| launch(n, "Falcon 9"))
            .collect();

        assert_eq!(
            alphabetical_names(&launches, 5),
            vec!["Alpha", "Beta", "Eta", "Iota", "Mu"]
        );
    }

    #[test]
    fn alphabetical_ignores_case_before_exact_text() {
        let launches: Vec<_> = ["crs-2", "CRS-1", "Crs-1", "ANASIS-II"]
            .iter()
            .map(|n| launch(n, "Falcon 9"))
            .collect();

        assert_eq!(
            alphabetical_names(&launches, 10),
            vec!["ANASIS-II", "Crs-1", "CRS-1", "crs-2"]
        );
    }

    #[test]
    fn accented_names_sort_beside_their_base_letter() {
        assert_eq!(compare_names("Éclair", "Falcon"), Ordering::Less);
        assert_eq!(compare_names("Türksat 5A", "Tz"), Ordering::Less);
        assert_eq!(compare_names("Türksat 5A", "Turksat 5A"), Ordering::Greater);

        let launches: Vec<_> = ["Zeta", "Türksat 5A", "Éclair", "Tz", "Alpha", "Falcon"]
            .iter()
            .map(|n| launch(n, "Falcon 9"))
            .collect();

        assert_eq!(
            alphabetical_names(&launches, 5),
            vec!["Alpha", "Éclair", "Falcon", "Türksat 5A", "Tz"]
        );
    }

    #[test]
    fn alphabetical_on_fewer_than_n() {
        let launches = vec![launch("Only", "Falcon 1")];
        assert_eq!(alphabetical_names(&launches, 5), vec!["Only"]);
        assert!(alphabetical_names(&[], 5).is_empty());
    }

    #[test]
    fn category_filter_is_case_insensitive() {
        let launches = vec![
            launch("CRS-1", "Falcon 9"),
            launch("FalconSat", "Falcon 1"),
            launch("Demo-2", "Falcon 9"),
        ];

        let hits: Vec<&str> = filter_by_category(&launches, "falcon 9")
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(hits, vec!["CRS-1", "Demo-2"]);
        assert!(filter_by_category(&launches, "Starship").is_empty());
    }

    #[test]
    fn count_per_category_covers_every_launch() {
        let launches = vec![
            launch("a", "Falcon 9"),
            launch("b", "Falcon 1"),
            launch("c", "Falcon 9"),
            launch("d", "Unknown"),
        ];

        let counts = count_per_category(&launches);
        assert_eq!(counts.get("Falcon 9"), 2);
        assert_eq!(counts.get("Unknown"), 1);
        assert_eq!(counts.total(), launches.len());
    }

    #[test]
    fn flattened_inputs_feed_frequency() {
        let mut a = launch("a", "Falcon 9");
        a.cores = vec!["B1049".into(), "B1051".into()];
        a.failures = vec!["engine failure".into()];
        let mut b = launch("b", "Falcon 9");
        b.cores = vec!["B1049".into()];
        b.failures = vec!["engine failure".into(), "Unknown".into()];

        let launches = vec![a, b];
        assert_eq!(all_cores(&launches), vec!["B1049", "B1051", "B1049"]);
        assert_eq!(frequency(all_cores(&launches)).top_n_labels(1), vec!["B1049: 2"]);
        assert_eq!(frequency(all_failure_reasons(&launches)).get("engine failure"), 2);
    }

    #[test]
    fn some_and_every() {
        let mut failed = launch("Trailblazer", "Falcon 1");
        failed.success = Some(false);
        let launches = vec![launch("CRS-1", "Falcon 9"), failed];

        assert!(any_failed(&launches));
        assert!(every_has_name(&launches));
        assert!(!any_failed(&launches[..1]));
        assert!(!every_has_name(&[launch("", "Falcon 9")]));
        assert!(!any_launch(&[], |_| true));
        assert!(every_launch(&[], |_| false));
    }
}
