//! Meeting-link reformatter
//!
//! Scans group messages for Zoom-style meeting links and re-posts them as
//! a templated card, deleting the original. Detection and rendering are
//! pure; the handler layer applies the result.

use regex::Regex;

const MEETING_LINK_PATTERN: &str =
    r"(https?://(?:[a-zA-Z0-9-]+\.)?zoom\.us/(?:j|my)/(\d+)(?:\?pwd=([a-zA-Z0-9]+))?)";

/// Card style for re-posted meeting links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReformatStyle {
    Professional,
    Mascot,
    Minimal,
    Custom,
    Off,
}

impl ReformatStyle {
    pub fn from_key(key: &str) -> Self {
        match key {
            "mascot" => ReformatStyle::Mascot,
            "minimal" => ReformatStyle::Minimal,
            "custom" => ReformatStyle::Custom,
            "off" => ReformatStyle::Off,
            _ => ReformatStyle::Professional,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            ReformatStyle::Professional => "professional",
            ReformatStyle::Mascot => "mascot",
            ReformatStyle::Minimal => "minimal",
            ReformatStyle::Custom => "custom",
            ReformatStyle::Off => "off",
        }
    }
}

/// A detected meeting link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingLink {
    pub url: String,
    pub meeting_id: String,
    pub passcode: Option<String>,
}

/// Find the first meeting link in a message, if any
pub fn detect_meeting_link(text: &str) -> Option<MeetingLink> {
    let pattern = Regex::new(MEETING_LINK_PATTERN).ok()?;
    let captures = pattern.captures(text)?;

    Some(MeetingLink {
        url: captures.get(1)?.as_str().to_string(),
        meeting_id: captures.get(2)?.as_str().to_string(),
        passcode: captures.get(3).map(|m| m.as_str().to_string()),
    })
}

/// Render the card for a detected link; None when reformatting is off
pub fn render_card(
    style: ReformatStyle,
    link: &MeetingLink,
    host: &str,
    custom_template: &str,
) -> Option<String> {
    let passcode = link.passcode.as_deref().unwrap_or("");
    match style {
        ReformatStyle::Off => None,
        ReformatStyle::Professional => {
            let mut card = format!(
                "🎥 **Meeting Started**\nHosted by {}\n\n🆔 ID: `{}`\n",
                host, link.meeting_id
            );
            if !passcode.is_empty() {
                card.push_str(&format!("🔐 Passcode: `{}`\n", passcode));
            }
            card.push_str(&format!("\n[Join Meeting]({})", link.url));
            Some(card)
        }
        ReformatStyle::Mascot => {
            let mut card = format!(
                "🦊 **ChatWarden Zoom-In!**\n{} opened a portal!\n\n🌟 **ID:** `{}`\n",
                host, link.meeting_id
            );
            if !passcode.is_empty() {
                card.push_str(&format!("🔑 **Code:** `{}`\n", passcode));
            }
            card.push_str(&format!("\n🚀 [Jump In]({})", link.url));
            Some(card)
        }
        ReformatStyle::Minimal => Some(format!(
            "**Zoom:** [Join Now]({}) (ID: `{}`)",
            link.url, link.meeting_id
        )),
        ReformatStyle::Custom => Some(
            custom_template
                .replace("{url}", &link.url)
                .replace("{id}", &link.meeting_id)
                .replace("{passcode}", passcode)
                .replace("{host}", host),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_plain_link() {
        let link = detect_meeting_link("join us https://zoom.us/j/123456789 tonight").unwrap();
        assert_eq!(link.meeting_id, "123456789");
        assert_eq!(link.passcode, None);
    }

    #[test]
    fn test_detect_link_with_passcode_and_subdomain() {
        let link =
            detect_meeting_link("https://us02web.zoom.us/j/987654321?pwd=abcDEF123").unwrap();
        assert_eq!(link.meeting_id, "987654321");
        assert_eq!(link.passcode.as_deref(), Some("abcDEF123"));
    }

    #[test]
    fn test_no_link_detected() {
        assert!(detect_meeting_link("no links here").is_none());
        assert!(detect_meeting_link("https://example.com/j/123").is_none());
    }

    #[test]
    fn test_style_round_trip() {
        for key in ["professional", "mascot", "minimal", "custom", "off"] {
            assert_eq!(ReformatStyle::from_key(key).as_key(), key);
        }
        // Unknown keys fall back to the default style
        assert_eq!(ReformatStyle::from_key("sparkly"), ReformatStyle::Professional);
    }

    #[test]
    fn test_render_styles() {
        let link = MeetingLink {
            url: "https://zoom.us/j/123".to_string(),
            meeting_id: "123".to_string(),
            passcode: Some("pw".to_string()),
        };

        let professional = render_card(ReformatStyle::Professional, &link, "Alice", "").unwrap();
        assert!(professional.contains("Hosted by Alice"));
        assert!(professional.contains("`pw`"));

        let minimal = render_card(ReformatStyle::Minimal, &link, "Alice", "").unwrap();
        assert!(minimal.contains("Join Now"));

        assert!(render_card(ReformatStyle::Off, &link, "Alice", "").is_none());
    }

    #[test]
    fn test_render_custom_template() {
        let link = MeetingLink {
            url: "https://zoom.us/j/123".to_string(),
            meeting_id: "123".to_string(),
            passcode: None,
        };
        let card = render_card(
            ReformatStyle::Custom,
            &link,
            "Bob",
            "{host} shares {url} (id {id}, pw '{passcode}')",
        )
        .unwrap();
        assert_eq!(card, "Bob shares https://zoom.us/j/123 (id 123, pw '')");
    }
}
