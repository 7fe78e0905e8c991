//! Pure result rendering.
//!
//! `render_results` turns `(results, selected_index)` into row descriptors.
//! Surfaces draw the rows; nothing here touches a surface.

use quickmark_core::SearchResult;

/// Separator between breadcrumb and domain in a row's meta line.
pub const META_SEPARATOR: &str = " • ";

/// Message shown when there is nothing to list.
pub const NO_RESULTS: &str = "No results";

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Stand-in row for an empty result set.
    Placeholder { message: &'static str },
    /// A search result.
    Result(ResultRow),
}

/// A result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Position in the result list.
    pub index: usize,
    pub title: String,
    /// Breadcrumb and domain, `None` when both are empty.
    pub meta: Option<String>,
    pub url: String,
    pub selected: bool,
}

impl Row {
    pub fn is_selected(&self) -> bool {
        matches!(self, Row::Result(row) if row.selected)
    }
}

/// Meta line for a result: breadcrumb and domain, skipping whichever is empty.
pub fn meta_line(result: &SearchResult) -> Option<String> {
    let parts: Vec<String> = [result.breadcrumb(), Some(result.domain.clone())]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(META_SEPARATOR))
    }
}

/// Render the result list.
pub fn render_results(results: &[SearchResult], selected: usize) -> Vec<Row> {
    if results.is_empty() {
        return vec![Row::Placeholder {
            message: NO_RESULTS,
        }];
    }

    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            Row::Result(ResultRow {
                index,
                title: result.title.clone(),
                meta: meta_line(result),
                url: result.url.clone(),
                selected: index == selected,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, url: &str) -> SearchResult {
        SearchResult::new(title, title, url)
    }

    #[test]
    fn test_empty_is_placeholder() {
        assert_eq!(
            render_results(&[], 0),
            vec![Row::Placeholder {
                message: "No results"
            }]
        );
    }

    #[test]
    fn test_rows_follow_result_order() {
        let results = vec![
            result("A", "https://a.test/"),
            result("B", "https://b.test/"),
            result("C", "https://c.test/"),
        ];
        let rows = render_results(&results, 1);

        assert_eq!(rows.len(), 3);
        let titles: Vec<_> = rows
            .iter()
            .map(|row| match row {
                Row::Result(r) => r.title.as_str(),
                Row::Placeholder { message } => message,
            })
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);

        let selected: Vec<_> = rows.iter().map(Row::is_selected).collect();
        assert_eq!(selected, vec![false, true, false]);
    }

    #[test]
    fn test_meta_line() {
        let both = result("Board", "https://tracker.test/")
            .with_path(["Work", "Projects"])
            .with_domain("tracker.test");
        assert_eq!(
            meta_line(&both).as_deref(),
            Some("Work › Projects • tracker.test")
        );

        let domain_only = result("Docs", "https://docs.test/").with_domain("docs.test");
        assert_eq!(meta_line(&domain_only).as_deref(), Some("docs.test"));

        let path_only = result("Local", "file:///tmp/x").with_path(["Scratch"]);
        assert_eq!(meta_line(&path_only).as_deref(), Some("Scratch"));

        assert_eq!(meta_line(&result("Bare", "about:blank")), None);
    }

    #[test]
    fn test_row_keeps_raw_url() {
        let rows = render_results(&[result("Q", "https://q.test/a?b=1")], 0);
        let Row::Result(row) = &rows[0] else {
            panic!("expected a result row");
        };
        assert_eq!(row.url, "https://q.test/a?b=1");
        assert!(row.selected);
    }
}
