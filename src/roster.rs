//! Roster-level helpers on top of the generic list

use chrono::NaiveDate;

use crate::list::List;
use crate::prisoner::Prisoner;

/// The list of prisoners managed by the shell
pub type Roster = List<Prisoner>;

/// Append every record of `incoming` not already present in `roster`.
///
/// Presence is decided by name and birth date. Duplicates inside `incoming`
/// are also collapsed to their first occurrence. Returns the number of
/// records appended.
pub fn merge_unique(roster: &mut Roster, incoming: Roster) -> usize {
    let mut added = 0;
    for prisoner in incoming {
        if roster.contains(&prisoner) {
            log::debug!("Skipping duplicate '{}'", prisoner.full_name());
            continue;
        }
        roster.add(prisoner);
        added += 1;
    }
    added
}

/// The two records the shell starts with
pub fn sample_roster() -> Roster {
    let mut roster = Roster::new();
    if let (Some(birth), Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(1990, 5, 10),
        NaiveDate::from_ymd_opt(2020, 1, 10),
        NaiveDate::from_ymd_opt(2025, 1, 10),
    ) {
        roster.add(Prisoner::new("Ivan Petrenko", birth, 180, "green", ["scar on left cheek"], start, Some(end)));
    }
    if let (Some(birth), Some(start)) = (
        NaiveDate::from_ymd_opt(1992, 8, 20),
        NaiveDate::from_ymd_opt(2021, 3, 15),
    ) {
        roster.add(Prisoner::new("Olena Koval", birth, 165, "gray", ["tattoo on arm"], start, None));
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sample_roster() {
        let roster = sample_roster();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(0).unwrap().full_name(), "Ivan Petrenko");
        assert!(!roster.get(0).unwrap().is_in_custody());
        assert!(roster.get(1).unwrap().is_in_custody());
    }

    #[test]
    fn test_merge_skips_existing_people() {
        let mut roster = sample_roster();
        let mut incoming = Roster::new();
        // Same person as the sample, different description
        incoming.add(Prisoner::new("Olena Koval", date(1992, 8, 20), 170, "blue", Vec::<String>::new(), date(2000, 1, 1), None));
        incoming.add(Prisoner::new("New Person", date(1980, 2, 2), 190, "brown", Vec::<String>::new(), date(2022, 2, 2), None));

        let added = merge_unique(&mut roster, incoming);

        assert_eq!(added, 1);
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.get(1).unwrap().eye_color(), "gray");
        assert_eq!(roster.get(2).unwrap().full_name(), "New Person");
    }

    #[test]
    fn test_merge_collapses_duplicates_within_incoming() {
        let mut roster = Roster::new();
        let p = Prisoner::new("A", date(1980, 1, 1), 170, "blue", Vec::<String>::new(), date(2000, 1, 1), None);
        let incoming: Roster = [p.clone(), p].into_iter().collect();

        assert_eq!(merge_unique(&mut roster, incoming), 1);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_merge_same_name_different_birth_is_new() {
        let mut roster = sample_roster();
        let incoming: Roster = [Prisoner::new("Ivan Petrenko", date(1991, 5, 10), 180, "green", Vec::<String>::new(), date(2020, 1, 10), None)]
            .into_iter()
            .collect();
        assert_eq!(merge_unique(&mut roster, incoming), 1);
    }
}
