//! Store invariants checked against long mixed operation sequences.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use daytask::model::{SortType, TaskId};
use daytask::ops::TaskStore;
use daytask::ops::script::run_script;
use pretty_assertions::assert_eq;

fn day(n: i64) -> Option<NaiveDateTime> {
    (NaiveDate::from_ymd_opt(2025, 5, 1).unwrap() + Duration::days(n)).and_hms_opt(9, 0, 0)
}

/// Small deterministic generator so failures reproduce
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

fn check_views(store: &TaskStore) {
    let pending: HashSet<TaskId> = store.pending_tasks().iter().map(|t| t.id).collect();
    let completed: HashSet<TaskId> = store.completed_tasks().iter().map(|t| t.id).collect();
    let all: HashSet<TaskId> = store.tasks().iter().map(|t| t.id).collect();

    assert!(pending.is_disjoint(&completed));
    assert_eq!(pending.union(&completed).copied().collect::<HashSet<_>>(), all);
    assert!(store.pending_tasks().iter().all(|t| !t.is_completed));
    assert!(store.completed_tasks().iter().all(|t| t.is_completed));
    assert_eq!(store.completed_count(), completed.len());
    assert_eq!(store.total_count(), all.len());

    for view in [store.pending_tasks(), store.completed_tasks()] {
        match store.sort_type() {
            SortType::None => {
                let keys: Vec<String> = view.iter().map(|t| t.id.canonical()).collect();
                let mut sorted = keys.clone();
                sorted.sort();
                assert_eq!(keys, sorted);
            }
            SortType::Deadline => {
                // absent deadlines trail when ascending and lead when descending
                let undated = view.iter().filter(|t| t.deadline.is_none()).count();
                let (dated_part, undated_part) = if store.sort_ascending() {
                    view.split_at(view.len() - undated)
                } else {
                    let (head, tail) = view.split_at(undated);
                    (tail, head)
                };
                assert!(undated_part.iter().all(|t| t.deadline.is_none()));
                let dated: Vec<NaiveDateTime> =
                    dated_part.iter().filter_map(|t| t.deadline).collect();
                assert_eq!(dated.len(), dated_part.len());
                let ordered = if store.sort_ascending() {
                    dated.windows(2).all(|w| w[0] <= w[1])
                } else {
                    dated.windows(2).all(|w| w[0] >= w[1])
                };
                assert!(ordered, "deadline view out of order: {:?}", dated);
            }
        }
    }
}

#[test]
fn views_stay_consistent_under_random_operations() {
    let mut rng = Lcg(7);
    let mut store = TaskStore::new();
    let mut added = 0;

    for step in 0..2000 {
        let before = store.revision();
        match rng.next(8) {
            0 | 1 => {
                let deadline = match rng.next(3) {
                    0 => None,
                    _ => day(rng.next(60) as i64 - 30),
                };
                if store.add_task(&format!("task {}", step), deadline).is_some() {
                    added += 1;
                }
            }
            2 => {
                assert!(store.add_task(["", "   ", "\t"][rng.next(3)], day(1)).is_none());
            }
            3 | 4 => {
                if store.total_count() > 0 {
                    let id = store.tasks()[rng.next(store.total_count())].id;
                    assert!(store.toggle_task_status(id));
                }
            }
            5 => {
                if store.total_count() > 0 && rng.next(2) == 0 {
                    let id = store.tasks()[rng.next(store.total_count())].id;
                    assert!(store.remove_task(id));
                    added -= 1;
                } else {
                    assert!(!store.remove_task(TaskId::new_v4()));
                    assert_eq!(store.revision(), before);
                }
            }
            6 => store.toggle_deadline_sort(),
            _ => store.clear_sort(),
        }
        assert_eq!(store.total_count(), added);
        check_views(&store);
    }
}

#[test]
fn double_toggle_restores_task() {
    let mut store = TaskStore::new();
    for n in 0..10 {
        store.add_task(&format!("t{}", n), day(n));
    }
    store.toggle_deadline_sort();
    let originals = store.tasks().to_vec();
    for task in &originals {
        store.toggle_task_status(task.id);
        store.toggle_task_status(task.id);
    }
    assert_eq!(store.tasks(), originals.as_slice());
}

#[test]
fn sort_cycle_through_script() {
    let mut store = TaskStore::new();
    let mut orders: Vec<Vec<String>> = Vec::new();
    run_script(
        &mut store,
        "add C\nadd B @ 2025-05-03\nadd A @ 2025-05-01\nsort\nprint\nsort\nprint\nsort\n",
        |store| {
            orders.push(
                store
                    .pending_tasks()
                    .iter()
                    .map(|t| t.title.clone())
                    .collect(),
            );
        },
    )
    .unwrap();
    insta::assert_debug_snapshot!(orders, @r#"
    [
        [
            "A",
            "B",
            "C",
        ],
        [
            "C",
            "B",
            "A",
        ],
        [
            "A",
            "B",
            "C",
        ],
    ]
    "#);
}
