//! Search, sort and pagination shared by the list pages. All pure; the
//! pages keep query/sort/page in signals and recompute the visible rows.

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Case-insensitive substring match over any of the row's search fields.
/// A blank query matches everything.
pub fn matches_query(fields: &[&str], query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&query))
}

pub fn filter<T>(items: &[T], query: &str, fields: impl Fn(&T) -> Vec<String>) -> Vec<T>
where
    T: Clone,
{
    items
        .iter()
        .filter(|item| {
            let fields = fields(item);
            let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
            matches_query(&refs, query)
        })
        .cloned()
        .collect()
}

pub fn sort_by_key<T, K: Ord>(items: &mut [T], direction: SortDirection, key: impl Fn(&T) -> K) {
    items.sort_by_key(key);
    if direction == SortDirection::Descending {
        items.reverse();
    }
}

/// Number of pages needed for `len` rows; an empty list still renders one
/// (empty) page.
pub fn page_count(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page).max(1)
}

/// The rows of `page` (0-based). A page past the end is clamped back to
/// the last one, which keeps the current page valid after a filter
/// shrinks the list.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Vec<T> {
    let page = page.min(page_count(items.len(), per_page) - 1);
    items
        .iter()
        .skip(page * per_page)
        .take(per_page)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_matches_everything() {
        assert!(matches_query(&["Anna", "anna@example.com"], ""));
        assert!(matches_query(&["Anna"], "   "));
    }

    #[test]
    fn query_is_case_insensitive_and_matches_any_field() {
        assert!(matches_query(&["Anna Berg", "anna@example.com"], "BERG"));
        assert!(matches_query(&["Anna Berg", "anna@example.com"], "example"));
        assert!(!matches_query(&["Anna Berg"], "karl"));
    }

    #[test]
    fn filter_keeps_order() {
        let names = ["Deadlift", "Bench Press", "Dumbbell Row", "Squat"];
        let hits = filter(&names, "d", |n| vec![n.to_string()]);
        assert_eq!(hits, ["Deadlift", "Dumbbell Row"]);
    }

    #[test]
    fn sort_direction_toggles_and_reverses() {
        let mut items = vec![3, 1, 2];
        sort_by_key(&mut items, SortDirection::Ascending, |n| *n);
        assert_eq!(items, [1, 2, 3]);
        sort_by_key(&mut items, SortDirection::Ascending.toggled(), |n| *n);
        assert_eq!(items, [3, 2, 1]);
    }

    #[test]
    fn pagination_slices_and_clamps() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(page_count(items.len(), 10), 3);
        assert_eq!(paginate(&items, 0, 10), (1..=10).collect::<Vec<_>>());
        assert_eq!(paginate(&items, 2, 10), (21..=25).collect::<Vec<_>>());
        // Past-the-end page falls back to the last page.
        assert_eq!(paginate(&items, 9, 10), (21..=25).collect::<Vec<_>>());
        assert_eq!(page_count(0, 10), 1);
        assert!(paginate(&Vec::<u32>::new(), 0, 10).is_empty());
    }
}
