use std::collections::HashSet;

use rand::seq::SliceRandom;

/// Trims entries and drops the blank ones, keeping order.
pub fn sanitize_names<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    raw.into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn first_duplicate(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .find(|name| !seen.insert(name.as_str()))
        .map(String::as_str)
}

/// Pairs every giver with a receiver so that nobody draws themselves.
///
/// Rejection-samples uniform shuffles of the receiver list until no position
/// is a fixed point; expected tries stay near e for any list size. Callers
/// must pass at least 2 distinct names: two entries with the same name can
/// never both avoid each other.
pub fn generate_assignment(names: &[String]) -> Vec<(String, String)> {
    debug_assert!(names.len() >= 2);

    let mut receivers = names.to_vec();
    let mut rng = rand::rng();
    loop {
        receivers.shuffle(&mut rng);
        if names
            .iter()
            .zip(&receivers)
            .all(|(giver, receiver)| giver != receiver)
        {
            return names.iter().cloned().zip(receivers).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn assignment_is_a_derangement() {
        for n in 2..=50 {
            let people: Vec<String> = (0..n).map(|i| format!("person{i}")).collect();
            let assignment = generate_assignment(&people);
            assert_eq!(assignment.len(), n);

            let givers: Vec<&String> = assignment.iter().map(|(giver, _)| giver).collect();
            assert_eq!(givers, people.iter().collect::<Vec<_>>());

            let mut received: Vec<String> =
                assignment.iter().map(|(_, receiver)| receiver.clone()).collect();
            received.sort();
            let mut expected = people.clone();
            expected.sort();
            assert_eq!(received, expected);

            for (giver, receiver) in &assignment {
                assert_ne!(giver, receiver);
            }
        }
    }

    #[test]
    fn shuffle_is_not_lopsided() {
        // 3 names admit exactly two derangements; an unbiased shuffle lands
        // on each roughly half the time.
        let people = names(&["Alice", "Bob", "Carol"]);
        let mut counts: HashMap<Vec<String>, u32> = HashMap::new();
        for _ in 0..600 {
            let receivers: Vec<String> = generate_assignment(&people)
                .into_iter()
                .map(|(_, receiver)| receiver)
                .collect();
            *counts.entry(receivers).or_default() += 1;
        }

        assert_eq!(counts.len(), 2);
        for count in counts.into_values() {
            assert!((200..=400).contains(&count), "lopsided shuffle: {count}/600");
        }
    }

    #[test]
    fn sanitize_drops_blanks() {
        assert_eq!(
            sanitize_names(["Alice", "", "  ", " Bob "]),
            names(&["Alice", "Bob"])
        );
    }

    #[test]
    fn blank_heavy_list_shrinks_below_minimum() {
        // "Alice", "", " " leaves one usable name; the create flow rejects it.
        assert_eq!(sanitize_names(["Alice", "", " "]), names(&["Alice"]));
    }

    #[test]
    fn duplicate_detection() {
        assert_eq!(
            first_duplicate(&names(&["Alice", "Bob", "Alice"])),
            Some("Alice")
        );
        assert_eq!(first_duplicate(&names(&["Alice", "Bob"])), None);
    }
}
