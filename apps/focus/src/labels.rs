use focus_session::domain::DisplayName;
use focus_session::Avatar;

pub fn name_button(name: Option<&DisplayName>) -> String {
    match name {
        Some(name) => format!("@{}", name),
        None => "Set display name".to_string(),
    }
}

pub fn track_button(generating: bool) -> &'static str {
    if generating {
        "…Generating"
    } else {
        "New Track"
    }
}

pub fn playback_button(is_playing: bool, has_track: bool) -> &'static str {
    match (is_playing, has_track) {
        (true, _) => "⏸ Lofi",
        (false, true) => "▶ Lofi",
        (false, false) => "▶ Play",
    }
}

pub fn camera_button(enabled: bool, pending: bool) -> &'static str {
    match (enabled, pending) {
        (_, true) => "Starting camera…",
        (true, false) => "Camera off",
        (false, false) => "Camera on",
    }
}

pub fn occupancy(count: usize) -> String {
    if count == 1 {
        "1 person here".to_string()
    } else {
        format!("{} people here", count)
    }
}

/// Stand-in glyph for each avatar preset
pub fn avatar_glyph(avatar: Avatar) -> &'static str {
    match avatar {
        Avatar::Scholar => "🎓",
        Avatar::CoolGirl => "😎",
        Avatar::CoolGuy => "🕶",
        Avatar::AnimeGirl => "🌸",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_button() {
        assert_eq!(name_button(None), "Set display name");
        let name = DisplayName::new("Ada").unwrap();
        assert_eq!(name_button(Some(&name)), "@Ada");
    }

    #[test]
    fn test_playback_button_follows_track_and_state() {
        assert_eq!(playback_button(false, false), "▶ Play");
        assert_eq!(playback_button(false, true), "▶ Lofi");
        assert_eq!(playback_button(true, true), "⏸ Lofi");
    }

    #[test]
    fn test_track_and_camera_buttons() {
        assert_eq!(track_button(true), "…Generating");
        assert_eq!(track_button(false), "New Track");
        assert_eq!(camera_button(false, true), "Starting camera…");
        assert_eq!(camera_button(true, false), "Camera off");
    }

    #[test]
    fn test_occupancy() {
        assert_eq!(occupancy(7), "7 people here");
        assert_eq!(occupancy(1), "1 person here");
    }
}
