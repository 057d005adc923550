use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::{Application, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub interviews: usize,
    pub offers: usize,
    pub favorited: usize,
    /// Chart data: non-archived records per status, zero counts omitted.
    pub by_status: Vec<StatusCount>,
}

pub fn summarize(records: &[Application], favorites: &BTreeSet<String>) -> Summary {
    let mut counts = [0usize; Status::ALL.len()];
    for app in records.iter().filter(|a| a.status.is_active()) {
        counts[status_index(app.status)] += 1;
    }

    let by_status = Status::ALL
        .into_iter()
        .filter(|s| s.is_active())
        .map(|status| StatusCount {
            status,
            count: counts[status_index(status)],
        })
        .filter(|c| c.count > 0)
        .collect();

    Summary {
        total: counts.iter().sum(),
        interviews: counts[status_index(Status::Interview)],
        offers: counts[status_index(Status::Offer)],
        favorited: favorites.len(),
        by_status,
    }
}

fn status_index(status: Status) -> usize {
    match status {
        Status::Applied => 0,
        Status::Interview => 1,
        Status::Offer => 2,
        Status::Rejected => 3,
        Status::FollowUp => 4,
        Status::Archived => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn app(id: &str, status: Status) -> Application {
        Application {
            id: id.to_string(),
            owner_id: "owner".to_string(),
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            location: "Remote".to_string(),
            date_applied: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status,
            salary: None,
            notes: None,
            job_url: None,
            posting_online: true,
            hiring_manager: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, status) in Status::ALL.into_iter().enumerate() {
            assert_eq!(status_index(status), i);
        }
    }

    #[test]
    fn test_summary_excludes_archived() {
        let records = vec![
            app("1", Status::Applied),
            app("2", Status::Applied),
            app("3", Status::Interview),
            app("4", Status::Offer),
            app("5", Status::Archived),
        ];
        let favorites: BTreeSet<String> = ["1".to_string(), "gone".to_string()].into();
        let summary = summarize(&records, &favorites);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.interviews, 1);
        assert_eq!(summary.offers, 1);
        assert_eq!(summary.favorited, 2);
        assert_eq!(
            summary.by_status,
            vec![
                StatusCount { status: Status::Applied, count: 2 },
                StatusCount { status: Status::Interview, count: 1 },
                StatusCount { status: Status::Offer, count: 1 },
            ]
        );
    }

    #[test]
    fn test_summary_of_nothing() {
        assert_eq!(summarize(&[], &BTreeSet::new()), Summary::default());
    }
}
