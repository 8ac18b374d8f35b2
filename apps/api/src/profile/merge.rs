use crate::models::profile::{ProfileFields, EMAIL_MAX_CHARS, NAME_MAX_CHARS, PHONE_MAX_CHARS};

/// Overlays a parsed resume on the stored profile. Every parsed field that is blank keeps
/// the existing value. Short identity fields are cut to their column limits.
pub fn merge_parsed_resume(existing: &ProfileFields, parsed: &ProfileFields) -> ProfileFields {
    ProfileFields {
        name: truncate_chars(&pick(&existing.name, &parsed.name), NAME_MAX_CHARS),
        email: truncate_chars(&pick(&existing.email, &parsed.email), EMAIL_MAX_CHARS),
        phone: truncate_chars(&pick(&existing.phone, &parsed.phone), PHONE_MAX_CHARS),
        summary: pick(&existing.summary, &parsed.summary),
        experience: pick(&existing.experience, &parsed.experience),
        education: pick(&existing.education, &parsed.education),
        skills: pick(&existing.skills, &parsed.skills),
        projects: pick(&existing.projects, &parsed.projects),
        certifications: pick(&existing.certifications, &parsed.certifications),
    }
}

fn pick(existing: &str, parsed: &str) -> String {
    if parsed.trim().is_empty() {
        existing.to_string()
    } else {
        parsed.trim().to_string()
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
