use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::{GroupOrdering, Resource, ResourceGroup, ResourceSubGroup};

// ---------------------------------------------------------------------------
// Name comparison
// ---------------------------------------------------------------------------

// Display names compare case-insensitively (Unicode lowercasing), falling
// back to the raw name so the order stays total. Resources additionally
// tie-break on ID: two items named "SM58" must land in the same order no
// matter how the input was shuffled.

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_resources(a: &Resource, b: &Resource) -> Ordering {
    compare_names(&a.name, &b.name).then_with(|| a.id.cmp(&b.id))
}

/// Listed-first rule: names found in the priority list sort by list position;
/// everything unlisted sorts alphabetically after all listed entries.
fn compare_with_priority(priority: &[String], a: &str, b: &str) -> Ordering {
    let rank_a = priority.iter().position(|n| n == a);
    let rank_b = priority.iter().position(|n| n == b);
    match (rank_a, rank_b) {
        (Some(ra), Some(rb)) => ra.cmp(&rb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_names(a, b),
    }
}

// ---------------------------------------------------------------------------
// Tree construction
// ---------------------------------------------------------------------------

/// Organize a flat catalog into the ordered folder -> subfolder -> resource
/// tree the calendar sidebar renders.
///
/// Resources without a subgroup land in their group's direct list; the rest
/// bucket into named subfolders. Ordering is fully deterministic: the same
/// catalog produces the same tree regardless of input order, so every viewer
/// of a shared calendar sees identical rows.
pub fn build_resource_tree(resources: &[Resource], ordering: &GroupOrdering) -> Vec<ResourceGroup> {
    let mut buckets: BTreeMap<String, (Vec<Resource>, BTreeMap<String, Vec<Resource>>)> =
        BTreeMap::new();

    for resource in resources {
        let (direct, subs) = buckets
            .entry(resource.group.main_group.clone())
            .or_default();
        match &resource.group.sub_group {
            Some(sub) => subs.entry(sub.clone()).or_default().push(resource.clone()),
            None => direct.push(resource.clone()),
        }
    }

    let mut groups: Vec<ResourceGroup> = buckets
        .into_iter()
        .map(|(name, (mut direct, subs))| {
            direct.sort_by(compare_resources);

            let sub_priority = ordering.subgroups.get(&name);
            let mut subgroups: Vec<ResourceSubGroup> = subs
                .into_iter()
                .map(|(sub_name, mut members)| {
                    members.sort_by(compare_resources);
                    ResourceSubGroup {
                        name: sub_name,
                        resources: members,
                    }
                })
                .collect();
            subgroups.sort_by(|a, b| {
                compare_with_priority(
                    sub_priority.map(Vec::as_slice).unwrap_or_default(),
                    &a.name,
                    &b.name,
                )
            });

            ResourceGroup {
                name,
                resources: direct,
                subgroups,
            }
        })
        .collect();

    groups.sort_by(|a, b| compare_with_priority(&ordering.groups, &a.name, &b.name));
    groups
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupPath;
    use std::collections::BTreeMap;

    fn item(id: &str, name: &str, main: &str, sub: Option<&str>) -> Resource {
        let group = match sub {
            Some(s) => GroupPath::with_sub(main, s),
            None => GroupPath::new(main),
        };
        Resource::equipment(id, name, 1, group)
    }

    fn ordering(groups: &[&str]) -> GroupOrdering {
        GroupOrdering {
            groups: groups.iter().map(|s| s.to_string()).collect(),
            subgroups: BTreeMap::new(),
        }
    }

    #[test]
    fn listed_groups_come_first_in_list_order() {
        let catalog = vec![
            item("a", "Adapter", "Cables", None),
            item("b", "Desk", "Mixers", None),
            item("c", "Par can", "Lighting", None),
            item("d", "Wedge", "Monitors", None),
        ];
        let tree = build_resource_tree(&catalog, &ordering(&["Mixers", "Monitors"]));
        let names: Vec<&str> = tree.iter().map(|g| g.name.as_str()).collect();
        // Listed in configured order, then the rest alphabetically.
        assert_eq!(names, vec!["Mixers", "Monitors", "Cables", "Lighting"]);
    }

    #[test]
    fn subgroups_follow_per_group_priority() {
        let mut config = ordering(&[]);
        config.subgroups.insert(
            "Mixers".to_string(),
            vec!["Digital Mixers".to_string()],
        );
        let catalog = vec![
            item("a", "X32", "Mixers", Some("Digital Mixers")),
            item("b", "MG10", "Mixers", Some("Analog Mixers")),
            item("c", "Sub snake", "Mixers", None),
        ];
        let tree = build_resource_tree(&catalog, &config);
        assert_eq!(tree.len(), 1);
        let group = &tree[0];
        assert_eq!(group.resources[0].name, "Sub snake");
        let subs: Vec<&str> = group.subgroups.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(subs, vec!["Digital Mixers", "Analog Mixers"]);
    }

    #[test]
    fn resource_names_sort_case_insensitively() {
        let catalog = vec![
            item("1", "zoom H6", "Recorders", None),
            item("2", "Anker batt", "Recorders", None),
            item("3", "Zoom F8", "Recorders", None),
        ];
        let tree = build_resource_tree(&catalog, &ordering(&[]));
        let names: Vec<&str> = tree[0].resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Anker batt", "Zoom F8", "zoom H6"]);
    }

    #[test]
    fn tree_is_identical_for_shuffled_input() {
        let mut config = ordering(&["Video", "Sound"]);
        config
            .subgroups
            .insert("Sound".to_string(), vec!["Wireless".to_string()]);
        let catalog = vec![
            item("cam2", "Camera B", "Video", None),
            item("cam1", "Camera A", "Video", None),
            item("rx1", "RX belt", "Sound", Some("Wireless")),
            item("mic1", "SM58", "Sound", Some("Wired")),
            item("di1", "DI box", "Sound", None),
            item("led1", "LED bar", "Lighting", None),
        ];
        let mut reversed = catalog.clone();
        reversed.reverse();

        let a = build_resource_tree(&catalog, &config);
        let b = build_resource_tree(&reversed, &config);
        assert_eq!(a, b);

        let names: Vec<&str> = a.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Video", "Sound", "Lighting"]);
    }

    #[test]
    fn duplicate_names_order_by_id() {
        let catalog = vec![
            item("sm58-b", "SM58", "Mics", None),
            item("sm58-a", "SM58", "Mics", None),
        ];
        let tree = build_resource_tree(&catalog, &ordering(&[]));
        let ids: Vec<&str> = tree[0].resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["sm58-a", "sm58-b"]);
    }
}
