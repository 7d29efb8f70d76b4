use civic_types::api::{UpdateProfileRequest, ValidationErrors};

/// Cleaned profile fields ready to store. Blank optional fields become `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
}

pub fn validate_profile(req: &UpdateProfileRequest) -> Result<ProfileChanges, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = req.name.trim();
    if name.is_empty() {
        errors.add("name", "Name is required");
    }

    let email = req.email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !looks_like_email(email) {
        errors.add("email", "Email address is not valid");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProfileChanges {
        name: name.to_string(),
        email: email.to_lowercase(),
        phone: non_blank(req.phone.as_deref()),
        address: non_blank(req.address.as_deref()),
        avatar: non_blank(req.avatar.as_deref()),
    })
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !email.contains(' ')
        }
        None => false,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
