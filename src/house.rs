use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::record::{Membership, Record};

/// One of the seven rosters, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    DumbledoresArmy,
    Gryffindor,
    Hufflepuff,
    Ravenclaw,
    Slytherin,
    Ghosts,
    Instructors,
}
impl Bucket {
    pub const ORDER: [Bucket; 7] = [
        Bucket::DumbledoresArmy,
        Bucket::Gryffindor,
        Bucket::Hufflepuff,
        Bucket::Ravenclaw,
        Bucket::Slytherin,
        Bucket::Ghosts,
        Bucket::Instructors,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::DumbledoresArmy => "Dumbledore's Army",
            Bucket::Gryffindor => "Gryffindor",
            Bucket::Hufflepuff => "Hufflepuff",
            Bucket::Ravenclaw => "Ravenclaw",
            Bucket::Slytherin => "Slytherin",
            Bucket::Ghosts => "Ghosts",
            Bucket::Instructors => "Instructors",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Houses take precedence; otherwise the ghost/instructor flag decides.
    /// Records matching neither are not placed anywhere.
    pub fn classify(record: &Record) -> Option<Bucket> {
        let by_house = match record.house.as_str() {
            "Dumbledore's Army" => Some(Bucket::DumbledoresArmy),
            "Gryffindor" => Some(Bucket::Gryffindor),
            "Hufflepuff" => Some(Bucket::Hufflepuff),
            "Ravenclaw" => Some(Bucket::Ravenclaw),
            "Slytherin" => Some(Bucket::Slytherin),
            _ => None,
        };
        by_house.or(match record.membership {
            Membership::Ghost => Some(Bucket::Ghosts),
            Membership::Instructor => Some(Bucket::Instructors),
            Membership::Student { .. } => None,
        })
    }
}
impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Full names grouped into the seven buckets, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseRosters {
    lists: [Vec<String>; 7],
}
impl HouseRosters {
    pub fn push(&mut self, bucket: Bucket, name: String) {
        self.lists[bucket.index()].push(name);
    }

    /// Sorts every bucket. Called once all names are pushed.
    pub fn finish(mut self) -> Self {
        self.lists.iter_mut().for_each(|list| list.sort());
        self
    }

    pub fn get(&self, bucket: Bucket) -> &[String] {
        &self.lists[bucket.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[String])> {
        Bucket::ORDER
            .iter()
            .map(move |&bucket| (bucket, self.get(bucket)))
    }

    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn into_lists(self) -> [Vec<String>; 7] {
        self.lists
    }
}
impl Serialize for HouseRosters {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Keyed by label, in bucket order
        let mut map = serializer.serialize_map(Some(Bucket::ORDER.len()))?;
        for (bucket, names) in self.iter() {
            map.serialize_entry(bucket.label(), names)?;
        }
        map.end()
    }
}
