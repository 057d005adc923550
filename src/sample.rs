use chrono::{Duration, Local, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{NewApplication, Status};

const COMPANIES: &[&str] = &[
    "Google", "Microsoft", "Apple", "Amazon", "Meta", "Netflix", "Tesla", "Spotify", "Uber",
    "Airbnb", "Stripe", "Figma", "Notion", "Slack", "Discord", "Zoom", "Dropbox", "Adobe",
    "Salesforce", "Oracle", "NVIDIA", "Cisco", "Snowflake", "Databricks", "Coinbase", "Shopify",
    "Twilio", "MongoDB", "Atlassian", "Cloudflare", "Vercel", "GitHub", "GitLab", "Datadog",
];

const TITLES: &[&str] = &[
    "Software Engineer",
    "Senior Software Engineer",
    "Staff Engineer",
    "Frontend Developer",
    "Backend Engineer",
    "Full Stack Developer",
    "DevOps Engineer",
    "Site Reliability Engineer",
    "Data Engineer",
    "Data Scientist",
    "Machine Learning Engineer",
    "Product Manager",
    "Engineering Manager",
    "Platform Engineer",
    "Security Engineer",
];

const LOCATIONS: &[&str] = &[
    "San Francisco, CA",
    "Seattle, WA",
    "New York, NY",
    "Austin, TX",
    "Boston, MA",
    "Denver, CO",
    "Chicago, IL",
    "Los Angeles, CA",
    "Portland, OR",
    "Remote",
];

const SALARIES: &[&str] = &[
    "$90k - $120k",
    "$120k - $150k",
    "$150k - $180k",
    "$180k - $220k",
    "$220k - $280k",
];

const STATUSES: [Status; 5] = [
    Status::Applied,
    Status::Interview,
    Status::Offer,
    Status::Rejected,
    Status::FollowUp,
];

/// Random applications dated within the six months before `today`.
pub fn generate<R: Rng>(count: usize, today: NaiveDate, rng: &mut R) -> Vec<NewApplication> {
    (1..=count).map(|n| generate_one(n, today, rng)).collect()
}

pub fn generate_now(count: usize) -> Vec<NewApplication> {
    generate(count, Local::now().date_naive(), &mut rand::thread_rng())
}

fn generate_one<R: Rng>(n: usize, today: NaiveDate, rng: &mut R) -> NewApplication {
    let company = pick(COMPANIES, rng);
    let title = pick(TITLES, rng);

    let days_back = rng.gen_range(0..=182);
    let date_applied = today - Duration::days(days_back);

    let salary = rng.gen_bool(0.7).then(|| pick(SALARIES, rng).to_string());
    let job_url = rng.gen_bool(0.8).then(|| {
        format!(
            "https://{}.com/careers/{}-{}",
            company.to_lowercase().replace(' ', ""),
            title.to_lowercase().replace(' ', "-"),
            n
        )
    });
    let posting_online = job_url.is_some() && rng.gen_bool(0.7);

    NewApplication {
        company: company.to_string(),
        position: title.to_string(),
        location: pick(LOCATIONS, rng).to_string(),
        status: *STATUSES.choose(rng).unwrap_or(&Status::Applied),
        date_applied: Some(date_applied),
        salary,
        notes: None,
        job_url,
        posting_online,
        hiring_manager: None,
    }
}

fn pick<'a, R: Rng>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_records_are_valid_and_recent() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let apps = generate(200, today, &mut rng);

        assert_eq!(apps.len(), 200);
        for app in &apps {
            assert!(app.validate().is_ok());
            assert!(app.status.is_active());
            let date = app.date_applied.unwrap();
            assert!(date <= today && date >= today - Duration::days(182));
            if app.posting_online {
                assert!(app.job_url.is_some());
            }
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let a = generate(10, today, &mut StdRng::seed_from_u64(42));
        let b = generate(10, today, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
