//! Category grouping
//!
//! Partitions a list of records by category. Groups come out in ascending
//! order of category name; inside a group the input order is kept.

use std::collections::BTreeMap;
use xgnav_catalog::LinkRecord;

/// Records sharing one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    /// Category name
    pub name: &'a str,
    /// Records in input order
    pub links: Vec<&'a LinkRecord>,
}

/// Group records by category, sorted by category name
#[must_use]
pub fn group_by_category<'a, I>(links: I) -> Vec<CategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a LinkRecord>,
{
    let mut grouped: BTreeMap<&'a str, Vec<&'a LinkRecord>> = BTreeMap::new();
    for link in links {
        grouped.entry(link.category()).or_default().push(link);
    }

    grouped
        .into_iter()
        .map(|(name, links)| CategoryGroup { name, links })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn link(title: &str, category: &str) -> LinkRecord {
        LinkRecord::new(title, "", format!("{title}.io"), Some(category)).unwrap()
    }

    #[test]
    fn categories_sorted_members_in_order() {
        let links = vec![
            link("b1", "b"),
            link("a1", "a"),
            link("c1", "c"),
            link("b2", "b"),
            link("a2", "a"),
        ];

        let groups = group_by_category(&links);
        let names: Vec<_> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, ["a", "b", "c"]);

        let b_titles: Vec<_> = groups[1].links.iter().map(|l| l.title()).collect();
        assert_eq!(b_titles, ["b1", "b2"]);
    }

    #[test]
    fn empty_input_no_groups() {
        assert!(group_by_category(&[] as &[LinkRecord]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_grouping_partitions_input(
            entries in proptest::collection::vec(("[a-z]{1,6}", "[a-d]"), 0..40)
        ) {
            let links: Vec<LinkRecord> = entries
                .iter()
                .map(|(title, category)| link(title, category))
                .collect();
            let groups = group_by_category(&links);

            let total: usize = groups.iter().map(|g| g.links.len()).sum();
            prop_assert_eq!(total, links.len());

            let keys: BTreeSet<&str> = groups.iter().map(|g| g.name).collect();
            let categories: BTreeSet<&str> = links.iter().map(LinkRecord::category).collect();
            prop_assert_eq!(keys, categories);

            for group in &groups {
                prop_assert!(!group.links.is_empty());
                prop_assert!(group.links.iter().all(|l| l.category() == group.name));
                // relative order inside a group follows input order
                let positions: Vec<usize> = group
                    .links
                    .iter()
                    .map(|l| links.iter().position(|x| std::ptr::eq(x, *l)).unwrap())
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
