//! Filter, sort and paginate the loaded applications.
//!
//! Everything here is pure: the same records and query always produce the
//! same page, and nothing touches the store.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Application, Status};

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [6, 12, 24, 48];
pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// Whether the store fetch has to include archived rows for this filter.
    pub fn needs_archived(self) -> bool {
        matches!(self, StatusFilter::Only(Status::Archived))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    DateApplied,
    Company,
    Position,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateApplied,
        SortKey::Company,
        SortKey::Position,
        SortKey::Status,
    ];

    pub fn column(self) -> &'static str {
        match self {
            SortKey::DateApplied => "date_applied",
            SortKey::Company => "company",
            SortKey::Position => "position",
            SortKey::Status => "status",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortKey::DateApplied => SortKey::Company,
            SortKey::Company => SortKey::Position,
            SortKey::Position => SortKey::Status,
            SortKey::Status => SortKey::DateApplied,
        }
    }

    fn compare(self, a: &Application, b: &Application) -> Ordering {
        match self {
            SortKey::DateApplied => a.date_applied.cmp(&b.date_applied),
            SortKey::Company => locale_cmp(&a.company, &b.company),
            SortKey::Position => locale_cmp(&a.position, &b.position),
            SortKey::Status => locale_cmp(a.status.label(), b.status.label()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::DateApplied => "date",
            SortKey::Company => "company",
            SortKey::Position => "position",
            SortKey::Status => "status",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" | "date_applied" | "date-applied" => Ok(SortKey::DateApplied),
            "company" => Ok(SortKey::Company),
            "position" | "title" => Ok(SortKey::Position),
            "status" => Ok(SortKey::Status),
            other => Err(format!(
                "unknown sort key '{}' (expected date, company, position, status)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == SortDirection::Ascending
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: String,
    pub status: StatusFilter,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub page_size: usize,
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort: SortKey::DateApplied,
            direction: SortDirection::Descending,
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<'a> {
    pub items: Vec<&'a Application>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

impl ListPage<'_> {
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages
    }
}

pub fn derive<'a>(records: &'a [Application], query: &ListQuery) -> ListPage<'a> {
    let mut filtered = filter_and_sort(records, query);
    let total = filtered.len();
    let page_size = query.page_size.max(1);
    let total_pages = total.div_ceil(page_size);

    let start = query.page.saturating_sub(1).saturating_mul(page_size);
    let items = if start >= total {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(total);
        filtered.drain(start..end).collect()
    };

    ListPage {
        items,
        total,
        total_pages,
        page: query.page,
        page_size,
    }
}

/// The full filtered and sorted sequence, before pagination.
pub fn filter_and_sort<'a>(records: &'a [Application], query: &ListQuery) -> Vec<&'a Application> {
    let needle = query.search.to_lowercase();

    let mut out: Vec<&Application> = records
        .iter()
        .filter(|app| matches_search(app, &needle))
        .filter(|app| query.status.matches(app.status))
        .collect();

    // sort_by is stable, so ties keep their store order in both directions
    out.sort_by(|a, b| {
        let ord = query.sort.compare(a, b);
        match query.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    out
}

fn matches_search(app: &Application, needle: &str) -> bool {
    needle.is_empty()
        || app.company.to_lowercase().contains(needle)
        || app.position.to_lowercase().contains(needle)
        || app.location.to_lowercase().contains(needle)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Name ordering in the manner of an English collation: accents and case
/// are ignored first, then unaccented sorts before accented, then lower case
/// before upper case.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| {
            a.chars()
                .map(|c| c.is_uppercase())
                .cmp(b.chars().map(|c| c.is_uppercase()))
        })
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn app(id: &str, company: &str, position: &str, location: &str, day: u32, status: Status) -> Application {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Application {
            id: id.to_string(),
            owner_id: "owner".to_string(),
            company: company.to_string(),
            position: position.to_string(),
            location: location.to_string(),
            date_applied: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            status,
            salary: None,
            notes: None,
            job_url: None,
            posting_online: true,
            hiring_manager: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn sample() -> Vec<Application> {
        vec![
            app("1", "Google", "Backend Engineer", "Mountain View, CA", 3, Status::Applied),
            app("2", "stripe", "Frontend Developer", "Remote", 9, Status::Applied),
            app("3", "Airbnb", "Data Scientist", "San Francisco, CA", 1, Status::Interview),
            app("4", "Netflix", "SRE", "Los Gatos, CA", 20, Status::Offer),
            app("5", "Figma", "Product Designer", "New York, NY", 14, Status::Rejected),
        ]
    }

    fn ids(items: &[&Application]) -> Vec<String> {
        items.iter().map(|a| a.id.clone()).collect()
    }

    fn unpaged(query: &ListQuery) -> ListQuery {
        ListQuery {
            page_size: usize::MAX,
            page: 1,
            ..query.clone()
        }
    }

    #[test]
    fn test_empty_query_is_a_permutation() {
        let records = sample();
        let query = unpaged(&ListQuery::default());
        let mut got = ids(&derive(&records, &query).items);
        got.sort();
        assert_eq!(got, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_search_matches_company_position_or_location_case_insensitively() {
        let records = sample();
        for needle in ["CA", "engineer", "STRIPE", "new york", "zzz"] {
            let query = unpaged(&ListQuery {
                search: needle.to_string(),
                ..Default::default()
            });
            let page = derive(&records, &query);
            let lower = needle.to_lowercase();
            let hit = |a: &Application| {
                a.company.to_lowercase().contains(&lower)
                    || a.position.to_lowercase().contains(&lower)
                    || a.location.to_lowercase().contains(&lower)
            };
            for a in &page.items {
                assert!(hit(a), "{} should match {}", a.id, needle);
            }
            for a in records.iter().filter(|a| !page.items.iter().any(|p| p.id == a.id)) {
                assert!(!hit(a), "{} should not match {}", a.id, needle);
            }
        }
    }

    #[test]
    fn test_status_filter_is_exact_and_idempotent() {
        let records = sample();
        let query = unpaged(&ListQuery {
            status: StatusFilter::Only(Status::Applied),
            ..Default::default()
        });
        let once: Vec<Application> = derive(&records, &query).items.into_iter().cloned().collect();
        assert!(once.iter().all(|a| a.status == Status::Applied));
        let twice = derive(&once, &query);
        assert_eq!(ids(&twice.items), once.iter().map(|a| a.id.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn test_interview_filter_scenario() {
        let records = sample();
        let query = ListQuery {
            status: StatusFilter::Only(Status::Interview),
            ..Default::default()
        };
        let page = derive(&records, &query);
        assert_eq!(ids(&page.items), vec!["3"]);
        assert_eq!(page.total, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_reversing_date_sort_reverses_sequence() {
        let records = sample();
        let asc = unpaged(&ListQuery {
            direction: SortDirection::Ascending,
            ..Default::default()
        });
        let desc = unpaged(&ListQuery::default());
        let mut forward = ids(&derive(&records, &asc).items);
        let backward = ids(&derive(&records, &desc).items);
        assert_eq!(forward, vec!["3", "1", "2", "5", "4"]);
        forward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_ties_keep_store_order_in_both_directions() {
        let records = vec![
            app("a", "Acme", "X", "Y", 5, Status::Applied),
            app("b", "Acme", "X", "Y", 5, Status::Applied),
            app("c", "Acme", "X", "Y", 5, Status::Applied),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let query = ListQuery {
                sort: SortKey::Company,
                direction,
                ..Default::default()
            };
            assert_eq!(ids(&derive(&records, &query).items), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_company_sort_ignores_case() {
        let records = sample();
        let query = unpaged(&ListQuery {
            sort: SortKey::Company,
            direction: SortDirection::Ascending,
            ..Default::default()
        });
        assert_eq!(ids(&derive(&records, &query).items), vec!["3", "5", "1", "4", "2"]);
    }

    #[test]
    fn test_pages_concatenate_to_full_sequence() {
        let records = sample();
        for page_size in [1, 2, 3, 6] {
            let base = ListQuery {
                page_size,
                ..Default::default()
            };
            let full = ids(&filter_and_sort(&records, &base));
            let first = derive(&records, &base);
            let mut joined = Vec::new();
            for page in 1..=first.total_pages {
                let q = ListQuery { page, ..base.clone() };
                joined.extend(ids(&derive(&records, &q).items));
            }
            assert_eq!(joined, full);
            let past = ListQuery {
                page: first.total_pages + 1,
                ..base.clone()
            };
            assert!(derive(&records, &past).items.is_empty());
        }
    }

    #[test]
    fn test_page_size_two_date_descending_scenario() {
        let records = sample();
        let page = |n| {
            let q = ListQuery {
                page_size: 2,
                page: n,
                ..Default::default()
            };
            let p = derive(&records, &q);
            (ids(&p.items), p.total_pages)
        };
        assert_eq!(page(1), (vec!["4".to_string(), "5".to_string()], 3));
        assert_eq!(page(3), (vec!["3".to_string()], 3));
        assert_eq!(page(4), (Vec::<String>::new(), 3));
    }

    #[test]
    fn test_empty_input_has_zero_pages() {
        let page = derive(&[], &ListQuery::default());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(9, 5), 5);
        assert_eq!(clamp_page(3, 0), 1);
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Zoom", "zoom"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_cmp_places_accented_names_with_their_base_letter() {
        assert_eq!(locale_cmp("Éclair Labs", "Zeta"), Ordering::Less);
        assert_eq!(locale_cmp("Éclair Labs", "Figma"), Ordering::Less);
        assert_eq!(locale_cmp("Éclair Labs", "Dropbox"), Ordering::Greater);
        assert_eq!(locale_cmp("eclair", "éclair"), Ordering::Less);
        assert_eq!(locale_cmp("éclair", "Éclair"), Ordering::Less);

        let records = vec![
            app("1", "Zeta", "Engineer", "Remote", 1, Status::Applied),
            app("2", "Éclair Labs", "Engineer", "Remote", 2, Status::Applied),
            app("3", "Figma", "Engineer", "Remote", 3, Status::Applied),
            app("4", "Dropbox", "Engineer", "Remote", 4, Status::Applied),
        ];
        let query = ListQuery {
            sort: SortKey::Company,
            direction: SortDirection::Ascending,
            ..Default::default()
        };
        let names: Vec<&str> = filter_and_sort(&records, &query)
            .iter()
            .map(|a| a.company.as_str())
            .collect();
        assert_eq!(names, vec!["Dropbox", "Éclair Labs", "Figma", "Zeta"]);
    }

    #[test]
    fn test_parse_filters_and_keys() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "offer".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(Status::Offer))
        );
        assert_eq!("date".parse::<SortKey>(), Ok(SortKey::DateApplied));
        assert_eq!("title".parse::<SortKey>(), Ok(SortKey::Position));
        assert!("salary".parse::<SortKey>().is_err());
    }
}
