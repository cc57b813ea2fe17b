use crate::entity_mediation::domain::cursor::cursor_to_offset;
use crate::entity_mediation::domain::{EntityListing, EntityPage, FilterString};
use crate::shared::error::HyperionError;
use crate::shared::Result;

/// Relay connection arguments as received from GraphQL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArguments {
    pub first: Option<i32>,
    pub after: Option<String>,
    pub last: Option<i32>,
    pub before: Option<String>,
}

/// Largest cursor offset accepted; gvmd reads `first=` as a 32-bit integer.
const MAX_CURSOR_OFFSET: usize = i32::MAX as usize - 2;

/// Row window derived from Relay arguments.
///
/// Offsets are 0-based; gvmd's `first=` keyword is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageWindow {
    /// Explicit slice `[start, start + rows)`, bounded by `end` when a
    /// `before` cursor was given
    Slice {
        start: usize,
        rows: usize,
        end: Option<usize>,
    },
    /// Starts at `start` and keeps the page size of the user's filter
    From { start: usize },
    /// The final `rows` entries, fetched by reversing the sort order
    Tail { rows: usize },
    /// No pagination arguments: the user's filter decides
    Unbounded,
}

impl PageWindow {
    pub fn from_arguments(arguments: &PageArguments) -> Result<Self> {
        if arguments.first.is_some() && arguments.last.is_some() {
            return Err(HyperionError::invalid_input("Only one of first and last is allowed").into());
        }

        let first = non_negative(arguments.first, "first")?;
        let last = non_negative(arguments.last, "last")?;
        let after = arguments
            .after
            .as_deref()
            .map(bounded_offset)
            .transpose()?;
        let before = arguments
            .before
            .as_deref()
            .map(bounded_offset)
            .transpose()?;

        let start = match after {
            Some(offset) => offset.checked_add(1).ok_or_else(|| {
                HyperionError::invalid_input(format!("Invalid cursor offset {}", offset))
            })?,
            None => 0,
        };

        let window = match (first, last, before) {
            (Some(first), _, before) => {
                let rows = match before {
                    Some(end) => first.min(end.saturating_sub(start)),
                    None => first,
                };
                PageWindow::Slice {
                    start,
                    rows,
                    end: before,
                }
            }
            (None, Some(last), Some(end)) => {
                let slice_start = end.saturating_sub(last).max(start);
                PageWindow::Slice {
                    start: slice_start,
                    rows: end.saturating_sub(slice_start),
                    end: Some(end),
                }
            }
            (None, Some(last), None) => {
                if after.is_some() {
                    return Err(HyperionError::invalid_input(
                        "last without before cannot be combined with after",
                    )
                    .into());
                }
                PageWindow::Tail { rows: last }
            }
            (None, None, Some(end)) => PageWindow::Slice {
                start,
                rows: end.saturating_sub(start),
                end: Some(end),
            },
            (None, None, None) if after.is_some() => PageWindow::From { start },
            (None, None, None) => PageWindow::Unbounded,
        };

        Ok(window)
    }

    /// Rewrites the filter's `first`/`rows` (and for tails the sort) terms.
    ///
    /// gvmd has no notion of an empty page, so zero-row windows still ask
    /// for one row and [`PageWindow::place`] drops it.
    pub fn apply(&self, filter: &mut FilterString) {
        match *self {
            PageWindow::Slice { start, rows, .. } => {
                filter.set_keyword("first", start + 1);
                filter.set_keyword("rows", rows.max(1));
            }
            PageWindow::From { start } => {
                filter.set_keyword("first", start + 1);
            }
            PageWindow::Tail { rows } => {
                filter.reverse_sort_orders();
                filter.set_keyword("first", 1);
                filter.set_keyword("rows", rows.max(1));
            }
            PageWindow::Unbounded => {}
        }
    }

    /// Places the backend listing inside the window and derives page info.
    ///
    /// A `before` cursor ends the connection, so rows at or past it do not
    /// count towards `has_next_page`.
    pub fn place(&self, listing: EntityListing) -> EntityPage {
        let EntityListing {
            mut entities,
            start,
            rows,
            total,
            filtered,
        } = listing;

        let mut last_row = filtered;
        let (offset, limit) = match *self {
            PageWindow::Slice { start, rows, end } => {
                entities.truncate(rows);
                if let Some(end) = end {
                    last_row = last_row.min(end);
                }
                (start, rows)
            }
            PageWindow::Tail { rows: wanted } => {
                entities.truncate(wanted);
                entities.reverse();
                (filtered.saturating_sub(entities.len()), wanted)
            }
            PageWindow::From { start: offset } => (offset, rows.unwrap_or(entities.len())),
            PageWindow::Unbounded => (start.saturating_sub(1), rows.unwrap_or(entities.len())),
        };

        let returned = entities.len();
        let items: Vec<_> = entities
            .into_iter()
            .enumerate()
            .map(|(index, entity)| (offset.saturating_add(index), entity))
            .collect();

        EntityPage {
            items,
            has_next_page: offset.saturating_add(returned) < last_row,
            has_previous_page: offset > 0,
            total,
            filtered,
            offset,
            limit,
            last_page_after: last_page_after(filtered, limit),
        }
    }
}

fn non_negative(value: Option<i32>, name: &str) -> Result<Option<usize>> {
    match value {
        Some(value) if value < 0 => Err(HyperionError::invalid_input(format!(
            "Argument {} must be a non-negative integer",
            name
        ))
        .into()),
        Some(value) => Ok(Some(value as usize)),
        None => Ok(None),
    }
}

fn bounded_offset(cursor: &str) -> Result<usize> {
    let offset = cursor_to_offset(cursor)?;
    if offset > MAX_CURSOR_OFFSET {
        return Err(HyperionError::invalid_input(format!("Invalid cursor '{}'", cursor)).into());
    }
    Ok(offset)
}

/// Offset to use as `after` for the last page of `limit`-sized pages.
fn last_page_after(filtered: usize, limit: usize) -> Option<usize> {
    if filtered == 0 || limit == 0 {
        return None;
    }
    let last_page_start = ((filtered - 1) / limit) * limit;
    last_page_start.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_mediation::domain::cursor::offset_to_cursor;
    use crate::entity_mediation::domain::{Entity, EntityKind};

    fn listing(ids: &[&str], start: usize, filtered: usize) -> EntityListing {
        EntityListing {
            entities: ids
                .iter()
                .map(|id| Entity::new(EntityKind::Task, *id))
                .collect(),
            start,
            rows: Some(ids.len()),
            total: filtered,
            filtered,
        }
    }

    fn ids(page: &EntityPage) -> Vec<(usize, String)> {
        page.items
            .iter()
            .map(|(offset, entity)| (*offset, entity.id.clone()))
            .collect()
    }

    #[test]
    fn test_first_after_window() {
        let window = PageWindow::from_arguments(&PageArguments {
            first: Some(2),
            after: Some(offset_to_cursor(0)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            window,
            PageWindow::Slice {
                start: 1,
                rows: 2,
                end: None
            }
        );

        let mut filter = FilterString::parse("name~scan rows=50");
        window.apply(&mut filter);
        assert_eq!(filter.to_string(), "name~scan first=2 rows=2");

        let page = window.place(listing(&["t2", "t3"], 2, 5));
        assert_eq!(ids(&page), vec![(1, "t2".to_string()), (2, "t3".to_string())]);
        assert!(page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[test]
    fn test_last_before_window() {
        let window = PageWindow::from_arguments(&PageArguments {
            last: Some(2),
            before: Some(offset_to_cursor(3)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            window,
            PageWindow::Slice {
                start: 1,
                rows: 2,
                end: Some(3)
            }
        );

        let page = window.place(listing(&["t2", "t3"], 2, 5));
        assert_eq!(ids(&page), vec![(1, "t2".to_string()), (2, "t3".to_string())]);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_first_and_last_together_is_rejected() {
        let error = PageWindow::from_arguments(&PageArguments {
            first: Some(1),
            last: Some(1),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(error.to_string(), "Only one of first and last is allowed");
    }

    #[test]
    fn test_negative_sizes_are_rejected() {
        let error = PageWindow::from_arguments(&PageArguments {
            first: Some(-3),
            ..Default::default()
        })
        .unwrap_err();
        assert!(error.to_string().contains("first"));
    }

    #[test]
    fn test_first_clamped_by_before() {
        let window = PageWindow::from_arguments(&PageArguments {
            first: Some(10),
            before: Some(offset_to_cursor(4)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            window,
            PageWindow::Slice {
                start: 0,
                rows: 4,
                end: Some(4)
            }
        );

        // Rows 4 and later exist, but lie past the before cursor.
        let page = window.place(listing(&["t1", "t2", "t3", "t4"], 1, 9));
        assert_eq!(page.items.len(), 4);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_first_before_with_rows_left_in_range() {
        let window = PageWindow::from_arguments(&PageArguments {
            first: Some(2),
            before: Some(offset_to_cursor(6)),
            ..Default::default()
        })
        .unwrap();

        let page = window.place(listing(&["t1", "t2"], 1, 9));
        assert!(page.has_next_page);
    }

    #[test]
    fn test_cursor_at_max_offset_is_rejected() {
        for arguments in [
            PageArguments {
                first: Some(1),
                after: Some(offset_to_cursor(usize::MAX)),
                ..Default::default()
            },
            PageArguments {
                after: Some(offset_to_cursor(usize::MAX - 1)),
                ..Default::default()
            },
            PageArguments {
                last: Some(1),
                before: Some(offset_to_cursor(usize::MAX)),
                ..Default::default()
            },
        ] {
            let error = PageWindow::from_arguments(&arguments).unwrap_err();
            assert!(matches!(
                error.downcast_ref::<HyperionError>(),
                Some(HyperionError::InvalidInput { .. })
            ));
            assert!(error.to_string().contains("Invalid cursor"));
        }
    }

    #[test]
    fn test_largest_accepted_cursor_fits_gvmd_first() {
        let window = PageWindow::from_arguments(&PageArguments {
            first: Some(1),
            after: Some(offset_to_cursor(MAX_CURSOR_OFFSET)),
            ..Default::default()
        })
        .unwrap();
        let mut filter = FilterString::default();
        window.apply(&mut filter);
        assert_eq!(filter.to_string(), format!("first={} rows=1", i32::MAX));
    }

    #[test]
    fn test_tail_reverses_sort_and_results() {
        let window = PageWindow::from_arguments(&PageArguments {
            last: Some(2),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(window, PageWindow::Tail { rows: 2 });

        let mut filter = FilterString::parse("sort=severity");
        window.apply(&mut filter);
        assert_eq!(filter.to_string(), "sort-reverse=severity first=1 rows=2");

        let page = window.place(listing(&["t5", "t4"], 1, 5));
        assert_eq!(ids(&page), vec![(3, "t4".to_string()), (4, "t5".to_string())]);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_unbounded_uses_backend_start() {
        let window = PageWindow::from_arguments(&PageArguments::default()).unwrap();
        let mut filter = FilterString::parse("first=11 rows=10");
        window.apply(&mut filter);
        assert_eq!(filter.to_string(), "first=11 rows=10");

        let page = window.place(listing(&["a", "b"], 11, 12));
        assert_eq!(page.offset, 10);
        assert_eq!(page.limit, 2);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_after_alone_keeps_user_rows() {
        let window = PageWindow::from_arguments(&PageArguments {
            after: Some(offset_to_cursor(9)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(window, PageWindow::From { start: 10 });

        let mut filter = FilterString::parse("rows=5");
        window.apply(&mut filter);
        assert_eq!(filter.to_string(), "rows=5 first=11");

        let page = window.place(listing(&["k", "l"], 11, 12));
        assert_eq!(page.offset, 10);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_zero_rows_asks_for_one_and_returns_none() {
        let window = PageWindow::from_arguments(&PageArguments {
            first: Some(0),
            ..Default::default()
        })
        .unwrap();
        let mut filter = FilterString::default();
        window.apply(&mut filter);
        assert_eq!(filter.to_string(), "first=1 rows=1");

        let page = window.place(listing(&["a"], 1, 3));
        assert!(page.items.is_empty());
        assert!(page.has_next_page);
    }

    #[test]
    fn test_empty_listing_gives_empty_page() {
        let window = PageWindow::from_arguments(&PageArguments {
            first: Some(10),
            ..Default::default()
        })
        .unwrap();
        let page = window.place(listing(&[], 1, 0));
        assert!(page.items.is_empty());
        assert!(!page.has_next_page);
        assert!(!page.has_previous_page);
        assert_eq!(page.last_page_after, None);
    }

    #[test]
    fn test_last_page_after() {
        assert_eq!(last_page_after(25, 10), Some(19));
        assert_eq!(last_page_after(10, 10), None);
        assert_eq!(last_page_after(0, 10), None);
    }
}
