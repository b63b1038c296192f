//! Seed the remote data store with a starter catalog.
//!
//! A fresh deployment has empty `services` and `projects` tables, so the
//! storefront renders nothing to sell and nothing to show. This module
//! inserts a sample catalog through the regular store client. Seeding is
//! idempotent by name: rows whose name already exists are skipped, never
//! duplicated, so re-running the seeder against a populated store is safe.

use std::collections::HashSet;

use tracing::{info, instrument, warn};

use crate::store::{NewProject, NewService, StoreClient, StoreError};

/// Result of a seeding run.
#[derive(Debug)]
pub struct SeedResult {
    /// Number of rows inserted.
    pub inserted: u64,
    /// Number of rows skipped (name already present).
    pub skipped: u64,
    /// Errors encountered (row name, error message).
    pub errors: Vec<(String, String)>,
}

/// The sample service catalog.
#[must_use]
pub fn sample_services() -> Vec<NewService> {
    let rows = [
        (
            "Web Development",
            "$500-$2000",
            "Custom website development using modern technologies like React, TypeScript, and Tailwind CSS. Perfect for businesses looking to establish a strong online presence.",
        ),
        (
            "Mobile App Development",
            "$1000-$5000",
            "Cross-platform mobile applications using React Native or Flutter. Build once, deploy everywhere with native performance.",
        ),
        (
            "E-commerce Solutions",
            "$800-$3000",
            "Complete e-commerce platforms with payment integration and inventory management. Turn your business ideas into profitable online stores.",
        ),
        (
            "UI/UX Design",
            "$300-$1000",
            "User interface and experience design for web and mobile applications. Create intuitive and engaging digital experiences.",
        ),
        (
            "Database Design",
            "$400-$1500",
            "Database architecture and optimization for scalable applications. Ensure your data is structured for performance and growth.",
        ),
        (
            "API Development",
            "$600-$2500",
            "RESTful API development and integration services. Connect your applications with robust and secure backend services.",
        ),
    ];

    rows.into_iter()
        .map(|(name, price, description)| NewService {
            name: name.to_string(),
            price: price.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// The sample project portfolio.
#[must_use]
pub fn sample_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            name: "Portfolio Website".to_string(),
            description: "Modern, responsive portfolio website with animations and dark mode support. Built with React, TypeScript, and Framer Motion.".to_string(),
            is_live: true,
            link: Some("https://mowlid.dev".to_string()),
            image: Some("https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=500&h=300&fit=crop".to_string()),
            technology: "React, TypeScript, Tailwind CSS, Framer Motion".to_string(),
            official_link: Some("https://github.com/mawlid1431/portfolio".to_string()),
        },
        NewProject {
            name: "E-commerce Platform".to_string(),
            description: "Full-stack e-commerce solution with payment processing, inventory management, and admin dashboard.".to_string(),
            is_live: true,
            link: Some("https://shop.example.com".to_string()),
            image: Some("https://images.unsplash.com/photo-1556742049-0cfed4f6a45d?w=500&h=300&fit=crop".to_string()),
            technology: "Next.js, Supabase, Stripe, PostgreSQL".to_string(),
            official_link: Some("https://github.com/mawlid1431/ecommerce".to_string()),
        },
        NewProject {
            name: "Task Management App".to_string(),
            description: "Collaborative task management application with real-time updates, team collaboration, and project tracking.".to_string(),
            is_live: false,
            link: None,
            image: Some("https://images.unsplash.com/photo-1611224923853-80b023f02d71?w=500&h=300&fit=crop".to_string()),
            technology: "React, Node.js, Socket.io, MongoDB".to_string(),
            official_link: Some("https://github.com/mawlid1431/task-manager".to_string()),
        },
        NewProject {
            name: "Social Media Dashboard".to_string(),
            description: "Analytics dashboard for social media management and scheduling with comprehensive reporting and insights.".to_string(),
            is_live: true,
            link: Some("https://social-dashboard.example.com".to_string()),
            image: Some("https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=500&h=300&fit=crop".to_string()),
            technology: "Vue.js, Express.js, Chart.js, MySQL".to_string(),
            official_link: Some("https://github.com/mawlid1431/social-dashboard".to_string()),
        },
        NewProject {
            name: "Digital Learning Platform".to_string(),
            description: "Online learning platform with course management, video streaming, and progress tracking for educators.".to_string(),
            is_live: true,
            link: Some("https://learn.example.com".to_string()),
            image: Some("https://images.unsplash.com/photo-1501504905252-473c47e087f8?w=500&h=300&fit=crop".to_string()),
            technology: "Angular, Firebase, Video.js".to_string(),
            official_link: Some("https://github.com/mawlid1431/learning-platform".to_string()),
        },
        NewProject {
            name: "Restaurant Management System".to_string(),
            description: "Complete restaurant management solution with POS, inventory, staff management, and customer analytics.".to_string(),
            is_live: false,
            link: None,
            image: Some("https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=500&h=300&fit=crop".to_string()),
            technology: "React Native, Django, PostgreSQL".to_string(),
            official_link: Some("https://github.com/mawlid1431/restaurant-system".to_string()),
        },
    ]
}

/// Insert the sample catalog, skipping rows whose name already exists.
///
/// Per-row insert failures are collected and reported, not fatal: a partial
/// seed is still a usable catalog.
///
/// # Errors
///
/// Returns an error only if the existing catalog cannot be listed.
#[instrument(skip(store))]
pub async fn seed_catalog(store: &StoreClient) -> Result<SeedResult, StoreError> {
    let existing_services: HashSet<String> = store
        .list_services()
        .await?
        .iter()
        .map(|row| row.name.clone())
        .collect();
    let existing_projects: HashSet<String> = store
        .list_projects()
        .await?
        .iter()
        .map(|row| row.name.clone())
        .collect();

    let mut result = SeedResult {
        inserted: 0,
        skipped: 0,
        errors: Vec::new(),
    };

    for service in sample_services() {
        if existing_services.contains(&service.name) {
            result.skipped += 1;
            continue;
        }
        match store.create_service(&service).await {
            Ok(row) => {
                info!(name = %row.name, "seeded service");
                result.inserted += 1;
            }
            Err(e) => {
                warn!(name = %service.name, error = %e, "failed to seed service");
                result.errors.push((service.name, e.to_string()));
            }
        }
    }

    for project in sample_projects() {
        if existing_projects.contains(&project.name) {
            result.skipped += 1;
            continue;
        }
        match store.create_project(&project).await {
            Ok(row) => {
                info!(name = %row.name, "seeded project");
                result.inserted += 1;
            }
            Err(e) => {
                warn!(name = %project.name, error = %e, "failed to seed project");
                result.errors.push((project.name, e.to_string()));
            }
        }
    }

    info!(
        inserted = result.inserted,
        skipped = result.skipped,
        errors = result.errors.len(),
        "seeding complete"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use mowlid_core::PriceRange;
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_sample_service_names_are_unique() {
        let services = sample_services();
        let names: HashSet<&str> = services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), services.len());
    }

    #[test]
    fn test_sample_service_prices_parse() {
        for service in sample_services() {
            let price = PriceRange::parse(&service.price);
            assert!(
                price.representative() > dec!(0),
                "unsellable seed price for {}",
                service.name
            );
            assert!(price.max.is_some(), "all seed prices are ranges");
        }
    }

    #[test]
    fn test_sample_projects_offline_rows_have_no_link() {
        let projects = sample_projects();
        assert_eq!(projects.len(), 6);
        for project in &projects {
            if !project.is_live {
                assert!(project.link.is_none(), "{} is not live", project.name);
            }
            assert!(!project.technology.is_empty());
        }
    }
}
