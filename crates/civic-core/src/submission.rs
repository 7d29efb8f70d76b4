use chrono::{DateTime, Utc};
use uuid::Uuid;

use civic_types::api::{CreateReportRequest, ValidationErrors};
use civic_types::models::{Location, Priority, Report, Status};

/// The fixed set a report's category is drawn from.
pub const CATEGORIES: &[&str] = &[
    "Roads & Potholes",
    "Street Lighting",
    "Waste Management",
    "Water & Drainage",
    "Parks & Recreation",
    "Traffic & Signals",
    "Public Safety",
    "Noise",
    "Graffiti & Vandalism",
    "Other",
];

pub const MAX_IMAGES: usize = 5;
pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub location: Location,
    pub images: Vec<String>,
}

impl NewReport {
    /// Materializes the stored record: pending, no votes yet.
    pub fn into_report(self, id: Uuid, user_id: Uuid, now: DateTime<Utc>) -> Report {
        Report {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            status: Status::Pending,
            priority: self.priority,
            location: self.location,
            images: self.images,
            user_id,
            created_at: now,
            updated_at: now,
            upvotes: 0,
            is_upvoted: Some(false),
        }
    }
}

/// Checks every field and reports all failures at once.
pub fn validate(req: &CreateReportRequest) -> Result<NewReport, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = req.title.trim();
    if title.is_empty() {
        errors.add("title", "Title is required");
    } else if title.chars().count() > MAX_TITLE_CHARS {
        errors.add(
            "title",
            format!("Title must be at most {MAX_TITLE_CHARS} characters"),
        );
    }

    let description = req.description.trim();
    if description.is_empty() {
        errors.add("description", "Description is required");
    } else if description.chars().count() > MAX_DESCRIPTION_CHARS {
        errors.add(
            "description",
            format!("Description must be at most {MAX_DESCRIPTION_CHARS} characters"),
        );
    }

    let category = req.category.trim();
    if category.is_empty() {
        errors.add("category", "Category is required");
    } else if !is_known_category(category) {
        errors.add("category", format!("Unknown category '{category}'"));
    }

    if req.priority.is_none() {
        errors.add("priority", "Priority is required");
    }

    let address = req.location.trim();
    if address.is_empty() {
        errors.add("location", "Location is required");
    }

    if req.latitude.is_some_and(|lat| !(-90.0..=90.0).contains(&lat)) {
        errors.add("latitude", "Latitude must be between -90 and 90");
    }
    if req.longitude.is_some_and(|lng| !(-180.0..=180.0).contains(&lng)) {
        errors.add("longitude", "Longitude must be between -180 and 180");
    }
    // A coordinate pair is all or nothing.
    match (req.latitude, req.longitude) {
        (Some(_), None) => errors.add("longitude", "Longitude is required with latitude"),
        (None, Some(_)) => errors.add("latitude", "Latitude is required with longitude"),
        _ => {}
    }

    if req.images.len() > MAX_IMAGES {
        errors.add("images", format!("At most {MAX_IMAGES} images are allowed"));
    } else if req.images.iter().any(|i| i.trim().is_empty()) {
        errors.add("images", "Image references must not be empty");
    }

    match req.priority {
        Some(priority) if errors.is_empty() => Ok(NewReport {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            priority,
            // Unresolved coordinates stay at the origin until geocoded.
            location: Location {
                lat: req.latitude.unwrap_or(0.0),
                lng: req.longitude.unwrap_or(0.0),
                address: address.to_string(),
            },
            images: req.images.clone(),
        }),
        _ => Err(errors),
    }
}

/// Form state for a report being composed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Option<Priority>,
    pub location: String,
    pub coordinates: Option<(f64, f64)>,
    images: Vec<String>,
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Appends `new` after the existing images; anything past the fifth is
    /// dropped without complaint.
    pub fn attach_images<I>(&mut self, new: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.images.extend(new);
        self.images.truncate(MAX_IMAGES);
    }

    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn to_request(&self) -> CreateReportRequest {
        CreateReportRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            priority: self.priority,
            location: self.location.clone(),
            latitude: self.coordinates.map(|(lat, _)| lat),
            longitude: self.coordinates.map(|(_, lng)| lng),
            images: self.images.clone(),
        }
    }

    pub fn validate(&self) -> Result<NewReport, ValidationErrors> {
        validate(&self.to_request())
    }
}
