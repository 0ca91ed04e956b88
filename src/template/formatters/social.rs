use crate::common::CodeResult;

use super::Fields;

pub const SOCIAL_PLATFORMS: &[&str] =
    &["Instagram", "Facebook", "X (Twitter)", "LinkedIn", "TikTok", "YouTube", "GitHub"];

pub const APP_STORES: &[&str] = &["App Store", "Google Play"];

fn profile_base(platform: &str) -> Option<&'static str> {
    let base = match platform.to_ascii_lowercase().as_str() {
        "instagram" => "https://instagram.com/",
        "facebook" => "https://facebook.com/",
        "x (twitter)" | "twitter" | "x" => "https://x.com/",
        "linkedin" => "https://linkedin.com/in/",
        "tiktok" => "https://tiktok.com/@",
        "youtube" => "https://youtube.com/@",
        "github" => "https://github.com/",
        _ => return None,
    };
    Some(base)
}

pub fn social(fields: &Fields) -> CodeResult<String> {
    let platform = fields.require("platform")?;
    let username = fields.require("username")?.trim_start_matches('@');
    Ok(match profile_base(platform) {
        Some(base) => format!("{base}{username}"),
        None => format!("https://{}.com/{username}", platform.to_ascii_lowercase()),
    })
}

pub fn app_link(fields: &Fields) -> CodeResult<String> {
    let store = fields.require("store")?;
    let app_id = fields.require("app_id")?;
    Ok(match store {
        "App Store" => format!("https://apps.apple.com/app/id{}", app_id.trim_start_matches("id")),
        _ => format!("https://play.google.com/store/apps/details?id={app_id}"),
    })
}
