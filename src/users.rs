use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::api::types::RawUser;

/// Synthetic department attached to every loaded user. The API has no
/// such field; it is sampled once at load time and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Hr,
    It,
    Finance,
    Marketing,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Hr,
        Department::It,
        Department::Finance,
        Department::Marketing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Hr => "HR",
            Department::It => "IT",
            Department::Finance => "Finance",
            Department::Marketing => "Marketing",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded user plus its sampled department. Immutable after load;
/// the whole set is replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: String,
    pub department: Department,
}

impl UserRecord {
    /// True iff any field's string form, lowercased, contains
    /// `needle_lower` as a substring. Deliberately matches every field,
    /// including the numeric id, the avatar URL and the department.
    pub fn matches(&self, needle_lower: &str) -> bool {
        if needle_lower.is_empty() {
            return true;
        }
        self.id.to_string().contains(needle_lower)
            || self.first_name.to_lowercase().contains(needle_lower)
            || self.last_name.to_lowercase().contains(needle_lower)
            || self.email.to_lowercase().contains(needle_lower)
            || self.avatar.to_lowercase().contains(needle_lower)
            || self.department.as_str().to_lowercase().contains(needle_lower)
    }
}

/// Attach a department to each user, sampled uniformly and
/// independently per record. Input order is preserved. The rng is a
/// parameter so callers can pin the assignment with a seeded source.
pub fn assign_departments<R: Rng>(raw: Vec<RawUser>, rng: &mut R) -> Vec<UserRecord> {
    raw.into_iter()
        .map(|u| {
            let department = Department::ALL
                .choose(rng)
                .copied()
                .unwrap_or(Department::Hr);
            UserRecord {
                id: u.id,
                first_name: u.first_name,
                last_name: u.last_name,
                email: u.email,
                avatar: u.avatar,
                department,
            }
        })
        .collect()
}

/// Keep the records matching `term` (case-insensitive, any field),
/// preserving relative order.
pub fn filter_users(users: &[UserRecord], term: &str) -> Vec<UserRecord> {
    let needle = term.to_lowercase();
    users.iter().filter(|u| u.matches(&needle)).cloned().collect()
}

/// Partition by department. The outer list is sorted by department
/// name (lexicographic ascending); members are sorted by first name,
/// stable for ties. Only departments with at least one member appear.
pub fn group_by_department(users: &[UserRecord]) -> Vec<(Department, Vec<&UserRecord>)> {
    let mut groups: BTreeMap<&'static str, (Department, Vec<&UserRecord>)> = BTreeMap::new();
    for u in users {
        groups
            .entry(u.department.as_str())
            .or_insert_with(|| (u.department, Vec::new()))
            .1
            .push(u);
    }
    let mut out: Vec<_> = groups.into_values().collect();
    for (_, members) in &mut out {
        members.sort_by(|a, b| a.first_name.cmp(&b.first_name));
    }
    out
}

/// Uppercase the first letter of each word, leaving the rest alone
/// ("HR" stays "HR", "finance" becomes "Finance").
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn raw(id: u64, first: &str, last: &str) -> RawUser {
        RawUser {
            id,
            email: format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
            first_name: first.to_string(),
            last_name: last.to_string(),
            avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
        }
    }

    fn record(id: u64, first: &str, last: &str, department: Department) -> UserRecord {
        let u = raw(id, first, last);
        UserRecord {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            email: u.email,
            avatar: u.avatar,
            department,
        }
    }

    #[test]
    fn assignment_is_deterministic_under_a_seed() {
        let page: Vec<RawUser> = (1..=12).map(|i| raw(i, "User", "Nr")).collect();
        let a = assign_departments(page.clone(), &mut StdRng::seed_from_u64(7));
        let b = assign_departments(page.clone(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        // every record got one of the four fixed departments
        for u in &a {
            assert!(Department::ALL.contains(&u.department));
        }
        // input order preserved
        let ids: Vec<u64> = a.iter().map(|u| u.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<u64>>());
    }

    #[test]
    fn matches_covers_every_field() {
        let u = record(42, "George", "Bluth", Department::Finance);
        assert!(u.matches("george"));
        assert!(u.matches("bluth"));
        assert!(u.matches("george.bluth@"));
        assert!(u.matches("42"));
        assert!(u.matches("img/faces"));
        assert!(u.matches("finance"));
        assert!(!u.matches("marketing"));
        assert!(!u.matches("zzz"));
    }

    #[test]
    fn filter_is_sound_and_order_preserving() {
        let users = vec![
            record(1, "Janet", "Weaver", Department::Hr),
            record(2, "Emma", "Wong", Department::It),
            record(3, "Eve", "Holt", Department::Hr),
        ];
        let hit = filter_users(&users, "We");
        // "We" matches Weaver (2x: name + email) and the "we" in nothing else
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].id, 1);
        for u in &hit {
            assert!(u.matches("we"));
        }
        // excluded records match nowhere
        for u in users.iter().filter(|u| !hit.contains(u)) {
            assert!(!u.matches("we"));
        }
        // empty term keeps everything
        assert_eq!(filter_users(&users, "").len(), 3);
        // order preservation
        let e = filter_users(&users, "e");
        let ids: Vec<u64> = e.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn grouping_is_a_sorted_partition() {
        let users = vec![
            record(1, "Tobias", "Funke", Department::Marketing),
            record(2, "Byron", "Fields", Department::Finance),
            record(3, "Rachel", "Howell", Department::Finance),
            record(4, "Anna", "Fields", Department::Finance),
        ];
        let groups = group_by_department(&users);

        // department names strictly ascending, no duplicates
        let names: Vec<&str> = groups.iter().map(|(d, _)| d.as_str()).collect();
        assert_eq!(names, vec!["Finance", "Marketing"]);

        // partition: union of groups equals the input set, each record once
        let total: usize = groups.iter().map(|(_, m)| m.len()).sum();
        assert_eq!(total, users.len());
        for (dept, members) in &groups {
            for m in members {
                assert_eq!(m.department, *dept);
            }
        }

        // members non-decreasing by first name
        let finance: Vec<&str> = groups[0].1.iter().map(|u| u.first_name.as_str()).collect();
        assert_eq!(finance, vec!["Anna", "Byron", "Rachel"]);
    }

    #[test]
    fn grouping_empty_set_has_no_groups() {
        assert!(group_by_department(&[]).is_empty());
    }

    #[test]
    fn title_case_keeps_acronyms() {
        assert_eq!(title_case("HR"), "HR");
        assert_eq!(title_case("IT"), "IT");
        assert_eq!(title_case("finance"), "Finance");
        assert_eq!(title_case("Marketing"), "Marketing");
    }
}
