//! Partitions a day's occurrences into maximal overlap clusters.
//!
//! Two occurrences overlap when they share a period letter; clusters are the
//! connected components of that relation, found with a disjoint-set forest.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::grouper::CourseOccurrence;
use crate::period::Period;

/// Same-day occurrences whose period sets intersect, directly or transitively.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapCluster {
    pub day: u8,
    /// Members in the order the grouper produced them
    pub members: Vec<CourseOccurrence>,
}

impl OverlapCluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True when the cluster holds one occurrence, i.e. no overlap.
    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }

    /// Union of member periods in canonical order, without lunch or letters
    /// outside the grid.
    pub fn all_periods(&self) -> Vec<Period> {
        self.members
            .iter()
            .flat_map(CourseOccurrence::grid_periods)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Disjoint-set forest over occurrence indices. The root of every set is its
/// smallest index, so roots double as "first member" positions.
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        // Path halving
        while let Some(&parent) = self.parent.get(node) {
            if parent == node {
                break;
            }
            let grandparent = self.parent.get(parent).copied().unwrap_or(parent);
            if let Some(slot) = self.parent.get_mut(node) {
                *slot = grandparent;
            }
            node = grandparent;
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        let (keep, absorb) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        if let Some(slot) = self.parent.get_mut(absorb) {
            *slot = keep;
        }
    }
}

/// Split one day's occurrences into overlap clusters.
///
/// Only grid periods count: the lunch letter and letters outside the period
/// table never link two occurrences. Clusters come out in order of their first
/// member; members keep input order, so identical input always yields
/// identical clusters.
pub fn partition_by_day(day: u8, occurrences: &[CourseOccurrence]) -> Vec<OverlapCluster> {
    let mut sets = DisjointSet::new(occurrences.len());
    let mut first_holder: HashMap<Period, usize> = HashMap::new();

    for (idx, occurrence) in occurrences.iter().enumerate() {
        for period in occurrence.grid_periods() {
            match first_holder.get(&period) {
                Some(&holder) => sets.union(holder, idx),
                None => {
                    first_holder.insert(period, idx);
                }
            }
        }
    }

    let mut clusters: Vec<OverlapCluster> = Vec::new();
    let mut cluster_of_root: HashMap<usize, usize> = HashMap::new();
    for (idx, occurrence) in occurrences.iter().enumerate() {
        let root = sets.find(idx);
        let slot = *cluster_of_root.entry(root).or_insert_with(|| {
            clusters.push(OverlapCluster {
                day,
                members: Vec::new(),
            });
            clusters.len() - 1
        });
        if let Some(cluster) = clusters.get_mut(slot) {
            cluster.members.push(occurrence.clone());
        }
    }

    log::debug!(
        "day {day}: {} occurrence(s) in {} cluster(s)",
        occurrences.len(),
        clusters.len()
    );
    clusters
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::CourseRecord;

    fn occ(key: &str, periods: &str) -> CourseOccurrence {
        CourseOccurrence {
            course_key: key.to_string(),
            day: 0,
            periods: periods.chars().collect(),
            record: CourseRecord::new().with("課程名稱", key),
        }
    }

    fn keys(cluster: &OverlapCluster) -> Vec<&str> {
        cluster
            .members
            .iter()
            .map(|m| m.course_key.as_str())
            .collect()
    }

    #[test]
    fn test_disjoint_occurrences_stay_single() {
        let clusters = partition_by_day(0, &[occ("X", "AB"), occ("Y", "CD"), occ("W", "EF")]);
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(OverlapCluster::is_single));
    }

    #[test]
    fn test_transitive_overlap() {
        // A∩B and B∩C non-empty, A∩C empty
        let clusters = partition_by_day(0, &[occ("A", "EF"), occ("B", "FG"), occ("C", "GH")]);
        assert_eq!(clusters.len(), 1);
        assert_eq!(keys(&clusters[0]), vec!["A", "B", "C"]);
        assert_eq!(
            clusters[0].all_periods(),
            vec![Period::E, Period::F, Period::G, Period::H]
        );
    }

    #[test]
    fn test_bridge_found_late_still_merges() {
        // The bridge "BD" comes last; a single greedy pass from "AB" would miss "DE".
        let clusters = partition_by_day(0, &[occ("P", "AB"), occ("Q", "DE"), occ("R", "BD")]);
        assert_eq!(clusters.len(), 1);
        assert_eq!(keys(&clusters[0]), vec!["P", "Q", "R"]);
    }

    #[test]
    fn test_cluster_order_follows_first_member() {
        let clusters = partition_by_day(
            0,
            &[occ("1", "A"), occ("2", "E"), occ("3", "AB"), occ("4", "H"), occ("5", "EF")],
        );
        let grouped: Vec<Vec<&str>> = clusters.iter().map(keys).collect();
        assert_eq!(grouped, vec![vec!["1", "3"], vec!["2", "5"], vec!["4"]]);
    }

    #[test]
    fn test_all_periods_sorted_canonically() {
        let cluster = OverlapCluster {
            day: 2,
            members: vec![occ("A", "FE"), occ("B", "EDK")],
        };
        assert_eq!(cluster.all_periods(), vec![Period::D, Period::E, Period::F]);
    }

    #[test]
    fn test_lunch_and_unknown_letters_do_not_link() {
        let clusters = partition_by_day(0, &[occ("X", "DZ"), occ("Y", "EZ")]);
        assert_eq!(clusters.len(), 2);

        let clusters = partition_by_day(0, &[occ("X", "AK"), occ("Y", "CK"), occ("W", "B")]);
        assert_eq!(clusters.len(), 3);
        assert!(clusters.iter().all(OverlapCluster::is_single));
    }

    #[test]
    fn test_lowercase_letters_still_link() {
        let clusters = partition_by_day(0, &[occ("X", "AB"), occ("Y", "b")]);
        assert_eq!(clusters.len(), 1);
    }

    #[test]
    fn test_empty_day() {
        assert!(partition_by_day(4, &[]).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let input = [occ("A", "AB"), occ("B", "B"), occ("C", "J")];
        assert_eq!(partition_by_day(1, &input), partition_by_day(1, &input));
    }
}
