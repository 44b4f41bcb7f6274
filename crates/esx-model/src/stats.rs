use std::collections::HashMap;

use crate::TaskRecord;

/// Number of tasks per action observed in one snapshot.
///
/// Built fresh for every snapshot; actions absent from the snapshot have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedTaskStats {
    count_by_action: HashMap<String, u64>,
}

impl AggregatedTaskStats {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count_by_action.is_empty()
    }

    /// `(action, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.count_by_action
            .iter()
            .map(|(action, count)| (action.as_str(), *count))
    }
}

impl<'a> FromIterator<&'a TaskRecord> for AggregatedTaskStats {
    fn from_iter<I: IntoIterator<Item = &'a TaskRecord>>(iter: I) -> Self {
        let mut count_by_action = HashMap::new();
        for task in iter {
            *count_by_action.entry(task.action.clone()).or_insert(0) += 1;
        }
        Self { count_by_action }
    }
}

/// Reduce a task snapshot into per-action counts.
pub fn aggregate_tasks(tasks: &[TaskRecord]) -> AggregatedTaskStats {
    tasks.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn records(actions: &[&str]) -> Vec<TaskRecord> {
        actions.iter().map(|a| TaskRecord::new(*a)).collect()
    }

    fn counts(stats: &AggregatedTaskStats) -> HashMap<&str, u64> {
        stats.iter().collect()
    }

    #[test]
    fn counts_by_action() {
        let stats = aggregate_tasks(&records(&[
            "indices:data/write/bulk",
            "indices:data/write/bulk",
            "cluster:monitor/nodes/stats",
        ]));

        let expected: HashMap<&str, u64> = [
            ("indices:data/write/bulk", 2),
            ("cluster:monitor/nodes/stats", 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(counts(&stats), expected);
    }

    #[test]
    fn empty_snapshot_is_empty() {
        let stats = aggregate_tasks(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.iter().count(), 0);
    }

    #[test]
    fn unknown_fields_still_counted() {
        let body = r#"{"tasks": [
            {"action": "indices:data/read/search", "node": "n1", "cancellable": true},
            {"action": "indices:data/read/search", "status": {"total": 3}}
        ]}"#;
        let resp: crate::TasksResponse = serde_json::from_str(body).unwrap();
        let stats = aggregate_tasks(&resp.tasks);
        let counts = counts(&stats);
        assert_eq!(counts.get("indices:data/read/search"), Some(&2));
        assert_eq!(counts.len(), 1);
    }

    fn action() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "indices:data/write/bulk",
            "indices:data/write/bulk[s]",
            "indices:data/read/search",
            "cluster:monitor/nodes/stats",
            "",
        ])
        .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn count_matches_occurrences(actions in prop::collection::vec(action(), 0..64)) {
            let tasks: Vec<TaskRecord> = actions.iter().map(TaskRecord::new).collect();
            let stats = aggregate_tasks(&tasks);
            let counts = counts(&stats);

            prop_assert_eq!(counts.values().sum::<u64>(), tasks.len() as u64);
            for (action, count) in &counts {
                let expected = tasks.iter().filter(|t| t.action == *action).count() as u64;
                prop_assert_eq!(*count, expected);
            }
            for task in &tasks {
                prop_assert!(counts.contains_key(task.action.as_str()));
            }
        }

        #[test]
        fn order_independent(
            (actions, shuffled) in prop::collection::vec(action(), 0..64)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let a: Vec<TaskRecord> = actions.iter().map(TaskRecord::new).collect();
            let b: Vec<TaskRecord> = shuffled.iter().map(TaskRecord::new).collect();
            prop_assert_eq!(aggregate_tasks(&a), aggregate_tasks(&b));
        }
    }
}
