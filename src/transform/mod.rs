use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::person::Person;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    FirstName,
    LastName,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "first" | "first-name" | "first_name" | "firstname" | "f" => Some(Self::FirstName),
            "last" | "last-name" | "last_name" | "lastname" | "l" => Some(Self::LastName),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
        }
    }

    fn field(self, person: &Person) -> &str {
        match self {
            Self::FirstName => &person.first_name,
            Self::LastName => &person.last_name,
        }
    }
}

/// Keeps people whose first or last name contains `query`, ignoring case.
/// An empty query keeps everyone.
pub fn filter_by_name(query: &str, list: &[Person]) -> Vec<Person> {
    let needle = query.to_lowercase();
    list.iter()
        .filter(|p| name_matches(&needle, p))
        .cloned()
        .collect()
}

fn name_matches(needle_lower: &str, person: &Person) -> bool {
    person.first_name.to_lowercase().contains(needle_lower)
        || person.last_name.to_lowercase().contains(needle_lower)
}

/// Ascending sort on the chosen name field. Equal keys keep their input order.
pub fn sort_by_key(key: SortKey, list: &[Person]) -> Vec<Person> {
    let mut result = list.to_vec();
    result.sort_by(|a, b| compare_by(key, a, b));
    result
}

fn compare_by(key: SortKey, a: &Person, b: &Person) -> Ordering {
    key.field(a).cmp(key.field(b))
}

pub fn sort_by_first_name(list: &[Person]) -> Vec<Person> {
    sort_by_key(SortKey::FirstName, list)
}

pub fn sort_by_last_name(list: &[Person]) -> Vec<Person> {
    sort_by_key(SortKey::LastName, list)
}

pub fn shuffle_list(list: &[Person]) -> Vec<Person> {
    shuffle_list_with(list, &mut rand::rng())
}

/// Fisher-Yates over a copy of `list`.
pub fn shuffle_list_with<R: Rng + ?Sized>(list: &[Person], rng: &mut R) -> Vec<Person> {
    let mut result = list.to_vec();
    result.shuffle(rng);
    result
}
