use anyhow::Result;
use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{Database, timestamp};

/// Id of the demo resident whose dashboard the seed data fills.
pub const DEMO_USER_ID: Uuid = Uuid::from_u128(0x1);

struct SeedUser {
    id: Uuid,
    email: &'static str,
    name: &'static str,
    phone: Option<&'static str>,
    address: Option<&'static str>,
    joined_days_ago: i64,
}

struct SeedReport {
    owner: Uuid,
    title: &'static str,
    description: &'static str,
    category: &'static str,
    status: &'static str,
    priority: &'static str,
    lat: f64,
    lng: f64,
    address: &'static str,
    images: &'static [&'static str],
    days_ago: i64,
    upvotes: i64,
    comments: i64,
}

const MARIA: Uuid = Uuid::from_u128(0x2);
const SAM: Uuid = Uuid::from_u128(0x3);
const PRIYA: Uuid = Uuid::from_u128(0x4);

const USERS: &[SeedUser] = &[
    SeedUser {
        id: DEMO_USER_ID,
        email: "alex.johnson@example.com",
        name: "Alex Johnson",
        phone: Some("+1 (555) 010-2030"),
        address: Some("123 Main Street, Springfield"),
        joined_days_ago: 240,
    },
    SeedUser {
        id: MARIA,
        email: "maria.garcia@example.com",
        name: "Maria Garcia",
        phone: None,
        address: None,
        joined_days_ago: 180,
    },
    SeedUser {
        id: SAM,
        email: "sam.patel@example.com",
        name: "Sam Patel",
        phone: None,
        address: Some("48 Elm Street, Springfield"),
        joined_days_ago: 95,
    },
    SeedUser {
        id: PRIYA,
        email: "priya.nair@example.com",
        name: "Priya Nair",
        phone: None,
        address: None,
        joined_days_ago: 30,
    },
];

const REPORTS: &[SeedReport] = &[
    SeedReport {
        owner: DEMO_USER_ID,
        title: "Large pothole on Main Street",
        description: "Deep pothole near the crosswalk causing cars to swerve into the bike lane.",
        category: "Roads & Potholes",
        status: "in-progress",
        priority: "high",
        lat: 39.7817,
        lng: -89.6501,
        address: "Main St & 5th Ave",
        images: &["uploads/pothole-main-1.jpg", "uploads/pothole-main-2.jpg"],
        days_ago: 5,
        upvotes: 24,
        comments: 8,
    },
    SeedReport {
        owner: DEMO_USER_ID,
        title: "Streetlight out on Oak Avenue",
        description: "The streetlight in front of 210 Oak Avenue has been dark for two weeks.",
        category: "Street Lighting",
        status: "pending",
        priority: "medium",
        lat: 39.7901,
        lng: -89.6440,
        address: "210 Oak Avenue",
        images: &[],
        days_ago: 2,
        upvotes: 6,
        comments: 2,
    },
    SeedReport {
        owner: DEMO_USER_ID,
        title: "Overflowing bins at Lincoln Park",
        description: "Trash bins by the playground overflow every weekend.",
        category: "Waste Management",
        status: "resolved",
        priority: "low",
        lat: 39.7990,
        lng: -89.6602,
        address: "Lincoln Park, north entrance",
        images: &["uploads/lincoln-bins.jpg"],
        days_ago: 21,
        upvotes: 15,
        comments: 5,
    },
    SeedReport {
        owner: MARIA,
        title: "Blocked storm drain on Pine Street",
        description: "Leaves are blocking the drain and the street floods when it rains.",
        category: "Water & Drainage",
        status: "pending",
        priority: "high",
        lat: 39.7755,
        lng: -89.6390,
        address: "Pine St near the library",
        images: &[],
        days_ago: 1,
        upvotes: 11,
        comments: 3,
    },
    SeedReport {
        owner: SAM,
        title: "Graffiti on the underpass",
        description: "Fresh graffiti along the pedestrian underpass walls.",
        category: "Graffiti & Vandalism",
        status: "rejected",
        priority: "low",
        lat: 39.7702,
        lng: -89.6555,
        address: "Route 4 underpass",
        images: &[],
        days_ago: 12,
        upvotes: 2,
        comments: 1,
    },
    SeedReport {
        owner: PRIYA,
        title: "Traffic signal timing at 9th and Elm",
        description: "The left-turn arrow is too short and backs traffic up at rush hour.",
        category: "Traffic & Signals",
        status: "in-progress",
        priority: "medium",
        lat: 39.7850,
        lng: -89.6475,
        address: "9th St & Elm St",
        images: &[],
        days_ago: 9,
        upvotes: 31,
        comments: 14,
    },
];

/// Fills an empty database with demo residents and reports.
/// Returns false (and writes nothing) if any user already exists.
pub fn seed_demo(db: &Database) -> Result<bool> {
    if db.count_users()? > 0 {
        return Ok(false);
    }

    let now = Utc::now();
    db.with_conn_mut(|conn| {
        let tx = conn.transaction()?;

        for user in USERS {
            tx.execute(
                "INSERT INTO users (id, email, name, phone, address, avatar, joined_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6)",
                rusqlite::params![
                    user.id.to_string(),
                    user.email,
                    user.name,
                    user.phone,
                    user.address,
                    timestamp(now - Duration::days(user.joined_days_ago))
                ],
            )?;
        }

        for seed in REPORTS {
            let id = Uuid::new_v4().to_string();
            let created_at = timestamp(now - Duration::days(seed.days_ago));
            tx.execute(
                "INSERT INTO reports (id, user_id, title, description, category, status, priority,
                                      lat, lng, address, upvotes, comments_count, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
                rusqlite::params![
                    id,
                    seed.owner.to_string(),
                    seed.title,
                    seed.description,
                    seed.category,
                    seed.status,
                    seed.priority,
                    seed.lat,
                    seed.lng,
                    seed.address,
                    seed.upvotes,
                    seed.comments,
                    created_at
                ],
            )?;
            for (position, reference) in seed.images.iter().enumerate() {
                tx.execute(
                    "INSERT INTO report_images (report_id, position, reference) VALUES (?1, ?2, ?3)",
                    rusqlite::params![id, position as i64, reference],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    })?;

    info!("Seeded {} demo users and {} reports", USERS.len(), REPORTS.len());
    Ok(true)
}
