use std::collections::BTreeSet;

use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::error::Result;
use crate::house::{Bucket, HouseRosters};
use crate::record::{DataRow, Record};

use super::ALL_COHORTS;

pub fn distinct_houses<I>(records: I) -> Result<BTreeSet<String>>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut houses = BTreeSet::new();
    for record in records {
        let record = record?;
        if !record.house.is_empty() {
            houses.insert(record.house);
        }
    }
    debug!(houses = houses.len(), "collected distinct houses");
    Ok(houses)
}

pub fn students_by_cohort<I>(records: I, cohort: &str) -> Result<Vec<String>>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut students = Vec::new();
    for record in records {
        let record = record?;
        match record.cohort() {
            Some(label) if cohort == ALL_COHORTS || label == cohort => {
                students.push(record.full_name());
            }
            Some(_) => {}
            None => trace!(name = %record.full_name(), "skipping non-student"),
        }
    }
    students.sort();
    debug!(cohort, students = students.len(), "collected students");
    Ok(students)
}

pub fn all_names_by_house<I>(records: I) -> Result<HouseRosters>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut rosters = HouseRosters::default();
    for record in records {
        let record = record?;
        match Bucket::classify(&record) {
            Some(bucket) => rosters.push(bucket, record.full_name()),
            None => trace!(name = %record.full_name(), house = %record.house, "record fits no roster"),
        }
    }
    let rosters = rosters.finish();
    debug!(placed = rosters.total(), "built house rosters");
    Ok(rosters)
}

pub fn all_data<I>(records: I) -> Result<Vec<DataRow>>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let rows = records
        .into_iter()
        .map(|record| record.map(|r| r.to_row()))
        .collect::<Result<Vec<_>>>()?;
    debug!(rows = rows.len(), "collected all data");
    Ok(rows)
}

/// First record whose full name equals `name`. Stops reading at the match.
pub fn find<I>(records: I, name: &str) -> Result<Option<Record>>
where
    I: IntoIterator<Item = Result<Record>>,
{
    for record in records {
        let record = record?;
        if record.is_named(name) {
            return Ok(Some(record));
        }
    }
    Ok(None)
}

pub fn cohort_for<I>(records: I, name: &str) -> Result<Option<String>>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let cohort = find(records, name)?.map(|record| record.cohort_field().to_string());
    debug!(name, found = cohort.is_some(), "cohort lookup");
    Ok(cohort)
}

pub fn duplicated_last_names<I>(records: I) -> Result<BTreeSet<String>>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    for record in records {
        let record = record?;
        if seen.contains(&record.last_name) {
            duplicates.insert(record.last_name);
        } else {
            seen.insert(record.last_name);
        }
    }
    debug!(
        distinct = seen.len(),
        duplicated = duplicates.len(),
        "scanned last names"
    );
    Ok(duplicates)
}

/// Two passes: one to locate `name`, one to collect everyone sharing its
/// house and cohort field. `open` is called once per pass.
///
/// An unknown `name` yields an empty set without a second pass.
pub fn housemates_of<F, I>(mut open: F, name: &str) -> Result<BTreeSet<String>>
where
    F: FnMut() -> Result<I>,
    I: IntoIterator<Item = Result<Record>>,
{
    let Some(target) = find(open()?, name)? else {
        debug!(name, "no such person, no housemates");
        return Ok(BTreeSet::new());
    };

    let mut housemates = BTreeSet::new();
    for record in open()? {
        let record = record?;
        if record.house != target.house || record.cohort_field() != target.cohort_field() {
            continue;
        }
        let full_name = record.full_name();
        if full_name != name {
            housemates.insert(full_name);
        }
    }
    debug!(
        name,
        house = %target.house,
        cohort = target.cohort_field(),
        housemates = housemates.len(),
        "collected housemates"
    );
    Ok(housemates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::record::Records;
    use std::io::Cursor;

    const DATA: &str = "\
Harry|Potter|Gryffindor|McGonagall|Fall 2015
Ron|Weasley|Gryffindor|McGonagall|Fall 2015
Ginny|Weasley|Gryffindor|McGonagall|Spring 2016
Cho|Chang|Ravenclaw|Flitwick|Fall 2015
Minerva|McGonagall||I|I
Fat|Friar||G|G
Viktor|Krum|Durmstrang|Karkaroff|Fall 2015
";

    fn records(data: &str) -> Records<Cursor<&str>> {
        Records::new(Cursor::new(data))
    }

    #[test]
    fn test_distinct_houses_skip_empty() {
        let houses = distinct_houses(records(DATA)).unwrap();
        let expected: BTreeSet<String> = ["Durmstrang", "Gryffindor", "Ravenclaw"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(houses, expected);
        assert!(distinct_houses(records("")).unwrap().is_empty());
    }

    #[test]
    fn test_students_by_cohort_filters_flags() {
        let all = students_by_cohort(records(DATA), ALL_COHORTS).unwrap();
        assert_eq!(
            all,
            [
                "Cho Chang",
                "Ginny Weasley",
                "Harry Potter",
                "Ron Weasley",
                "Viktor Krum"
            ]
        );
        let fall = students_by_cohort(records(DATA), "Fall 2015").unwrap();
        assert_eq!(
            fall,
            ["Cho Chang", "Harry Potter", "Ron Weasley", "Viktor Krum"]
        );
        assert!(students_by_cohort(records(DATA), "I").unwrap().is_empty());
        assert!(students_by_cohort(records(DATA), "fall 2015")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_all_names_by_house_drops_unplaced() {
        let rosters = all_names_by_house(records(DATA)).unwrap();
        assert_eq!(
            rosters.get(Bucket::Gryffindor),
            ["Ginny Weasley", "Harry Potter", "Ron Weasley"]
        );
        assert_eq!(rosters.get(Bucket::Ravenclaw), ["Cho Chang"]);
        assert_eq!(rosters.get(Bucket::Ghosts), ["Fat Friar"]);
        assert_eq!(rosters.get(Bucket::Instructors), ["Minerva McGonagall"]);
        assert!(rosters.get(Bucket::Slytherin).is_empty());
        // Viktor Krum fits nowhere
        assert_eq!(rosters.total(), 6);
    }

    #[test]
    fn test_all_data_keeps_file_order() {
        let rows = all_data(records(DATA)).unwrap();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].full_name, "Harry Potter");
        assert_eq!(rows[4].full_name, "Minerva McGonagall");
        assert_eq!(rows[4].house, "");
        assert_eq!(rows[4].advisor, "I");
        assert_eq!(rows[4].cohort, "I");
        assert_eq!(rows[6].full_name, "Viktor Krum");
    }

    #[test]
    fn test_cohort_for_stops_at_first_match() {
        // the malformed line after the match is never read
        let data = "Harry|Potter|Gryffindor|McGonagall|Fall 2015\nnot a record\n";
        assert_eq!(
            cohort_for(records(data), "Harry Potter").unwrap(),
            Some("Fall 2015".to_string())
        );
        assert!(matches!(
            cohort_for(records(data), "Ron Weasley"),
            Err(Error::Malformed { line: 2, .. })
        ));
        assert_eq!(cohort_for(records(DATA), "Fat Friar").unwrap(), Some("G".to_string()));
        assert_eq!(cohort_for(records(DATA), "Someone else").unwrap(), None);
    }

    #[test]
    fn test_duplicated_last_names() {
        let data = "\
A|Smith|Gryffindor|McGonagall|Fall 2015
B|Smith|Gryffindor|McGonagall|Fall 2015
C|Jones|Gryffindor|McGonagall|Fall 2015
D|Smith|Gryffindor|McGonagall|Fall 2015
";
        let dupes = duplicated_last_names(records(data)).unwrap();
        assert_eq!(dupes.into_iter().collect::<Vec<_>>(), ["Smith"]);
        assert_eq!(
            duplicated_last_names(records(DATA))
                .unwrap()
                .into_iter()
                .collect::<Vec<_>>(),
            ["Weasley"]
        );
    }

    #[test]
    fn test_housemates_share_house_and_cohort() {
        let open = || Ok(records(DATA));
        let mates = housemates_of(open, "Harry Potter").unwrap();
        // Ginny is in another cohort, Cho in another house
        assert_eq!(mates.into_iter().collect::<Vec<_>>(), ["Ron Weasley"]);
    }

    #[test]
    fn test_housemates_unknown_name_is_empty() {
        // both records share an empty house and cohort, which must not match
        // for someone who does not exist
        let data = "A|B|||\nC|D|||\n";
        let mut opened = 0;
        let mates = housemates_of(
            || {
                opened += 1;
                Ok(records(data))
            },
            "Nobody Here",
        )
        .unwrap();
        assert!(mates.is_empty());
        assert_eq!(opened, 1);
    }

    #[test]
    fn test_malformed_line_aborts_scan() {
        let data = "Harry|Potter|Gryffindor|McGonagall|Fall 2015\nRon|Weasley|Gryffindor\n";
        assert!(distinct_houses(records(data)).is_err());
        assert!(students_by_cohort(records(data), ALL_COHORTS).is_err());
        assert!(all_names_by_house(records(data)).is_err());
        assert!(all_data(records(data)).is_err());
        assert!(duplicated_last_names(records(data)).is_err());
        assert!(housemates_of(|| Ok(records(data)), "Harry Potter").is_err());
    }
}
