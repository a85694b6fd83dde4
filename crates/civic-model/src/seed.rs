//! Demo collection every session starts from
//!
//! Nine reports around central Berlin, one per category, newest first.
//! Reports `"1"` and `"9"` already carry the default session user's support,
//! so the toggle model is consistent from the first render.

use crate::category::{Category, Status};
use crate::ids::{CommentId, ReportId};
use crate::report::{Comment, Location, Report, Votes};
use chrono::{DateTime, NaiveDate, Utc};
use im::Vector;

/// Map centre used when geolocation is unavailable (Berlin)
pub const DEFAULT_CENTER: Location = Location::new(52.5200, 13.4050);

fn stamp(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn comment(id: &str, user_id: &str, user_name: &str, content: &str, at: DateTime<Utc>) -> Comment {
    Comment {
        id: CommentId::from(id),
        user_id: user_id.to_string(),
        user_name: user_name.to_string(),
        content: content.to_string(),
        created_at: at,
    }
}

/// The two shared demo comments
#[must_use]
pub fn demo_comments() -> [Comment; 2] {
    [
        comment(
            "1",
            "user2",
            "Sarah Johnson",
            "I noticed this too. It's been getting worse lately.",
            stamp(1, 15, 10, 30),
        ),
        comment(
            "2",
            "user3",
            "Mike Chen",
            "Already reported to the city. They said they'll look into it.",
            stamp(1, 16, 14, 20),
        ),
    ]
}

struct SeedRow {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: Category,
    location: Location,
    status: Status,
    votes: Votes,
    comments: &'static [usize],
    created_at: (u32, u32, u32, u32),
    user: (&'static str, &'static str),
}

const ROWS: [SeedRow; 9] = [
    SeedRow {
        id: "1",
        title: "Unsafe crossing near elementary school",
        description: "Children have to cross a busy road without proper traffic lights or crossing guards.",
        category: Category::SchoolRoute,
        location: Location::new(52.5170, 13.4000),
        status: Status::Published,
        votes: Votes::new(12, true),
        comments: &[0, 1],
        created_at: (1, 14, 9, 15),
        user: ("user1", "John Doe"),
    },
    SeedRow {
        id: "2",
        title: "Broken streetlight on Main Street",
        description: "The streetlight has been out for weeks, making the area dangerous at night.",
        category: Category::Lighting,
        location: Location::new(52.5190, 13.4050),
        status: Status::Published,
        votes: Votes::new(8, false),
        comments: &[],
        created_at: (1, 13, 18, 45),
        user: ("user2", "Sarah Johnson"),
    },
    SeedRow {
        id: "3",
        title: "Heavy traffic congestion during rush hour",
        description: "Intersection becomes completely gridlocked, affecting emergency vehicles.",
        category: Category::Traffic,
        location: Location::new(52.5220, 13.4100),
        status: Status::Pending,
        votes: Votes::new(15, false),
        comments: &[0],
        created_at: (1, 12, 16, 30),
        user: ("user3", "Mike Chen"),
    },
    SeedRow {
        id: "4",
        title: "Abandoned warehouse attracting vandals",
        description: "Old warehouse has been empty for years and is now covered in graffiti.",
        category: Category::AbandonedBuilding,
        location: Location::new(52.5150, 13.3950),
        status: Status::Published,
        votes: Votes::new(6, false),
        comments: &[],
        created_at: (1, 11, 12, 0),
        user: ("user1", "John Doe"),
    },
    SeedRow {
        id: "5",
        title: "Loud construction work at night",
        description: "Construction crew working past midnight disturbing residents.",
        category: Category::Noise,
        location: Location::new(52.5180, 13.3980),
        status: Status::Resolved,
        votes: Votes::new(20, false),
        comments: &[1],
        created_at: (1, 10, 23, 15),
        user: ("user4", "Anna Schmidt"),
    },
    SeedRow {
        id: "6",
        title: "Graffiti on public building",
        description: "Fresh graffiti appeared on the library wall this week.",
        category: Category::Vandalism,
        location: Location::new(52.5210, 13.4020),
        status: Status::Published,
        votes: Votes::new(4, false),
        comments: &[],
        created_at: (1, 9, 14, 30),
        user: ("user2", "Sarah Johnson"),
    },
    SeedRow {
        id: "7",
        title: "Groups blocking store entrance",
        description: "People hanging around the entrance making customers uncomfortable.",
        category: Category::Loitering,
        location: Location::new(52.5160, 13.4080),
        status: Status::Pending,
        votes: Votes::new(7, false),
        comments: &[0, 1],
        created_at: (1, 8, 11, 20),
        user: ("user5", "Tom Wilson"),
    },
    SeedRow {
        id: "8",
        title: "Illegal dumping in park area",
        description: "Someone dumped old furniture and trash bags in the park.",
        category: Category::WildDumping,
        location: Location::new(52.5140, 13.4060),
        status: Status::Published,
        votes: Votes::new(18, false),
        comments: &[0],
        created_at: (1, 7, 8, 45),
        user: ("user3", "Mike Chen"),
    },
    SeedRow {
        id: "9",
        title: "Unsafe playground equipment",
        description: "Swing set has loose chains and needs immediate attention.",
        category: Category::Other,
        location: Location::new(52.5200, 13.3970),
        status: Status::Published,
        votes: Votes::new(25, true),
        comments: &[1],
        created_at: (1, 6, 15, 10),
        user: ("user1", "John Doe"),
    },
];

/// Build the demo collection, newest first
#[must_use]
pub fn demo_reports() -> Vector<Report> {
    let shared = demo_comments();

    ROWS.iter()
        .map(|row| {
            let (month, day, hour, minute) = row.created_at;
            Report {
                id: ReportId::from(row.id),
                title: row.title.to_string(),
                description: Some(row.description.to_string()),
                category: row.category,
                location: row.location,
                status: row.status,
                votes: row.votes,
                comments: row.comments.iter().map(|&i| shared[i].clone()).collect(),
                created_at: stamp(month, day, hour, minute),
                user_id: row.user.0.to_string(),
                user_name: row.user.1.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn one_report_per_category() {
        let reports = demo_reports();
        assert_eq!(reports.len(), 9);

        let categories: HashSet<_> = reports.iter().map(|r| r.category).collect();
        assert_eq!(categories.len(), Category::ALL.len());
    }

    #[test]
    fn newest_first_with_unique_ids() {
        let reports = demo_reports();
        let ids: HashSet<_> = reports.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), reports.len());

        for pair in reports.iter().collect::<Vec<_>>().windows(2) {
            assert!(pair[0].created_at > pair[1].created_at);
        }
    }

    #[test]
    fn supported_reports_count_the_session_user() {
        for report in demo_reports() {
            if report.votes.user_support {
                assert!(report.votes.supports >= 1);
            }
        }
    }

    #[test]
    fn stamps_are_real_dates() {
        let reports = demo_reports();
        assert_eq!(reports[0].created_at.to_rfc3339(), "2024-01-14T09:15:00+00:00");
    }
}
