/// Decorative icon drawn for a falling item. Independent of the message it reveals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Icon {
    Letter,
    Gift,
    Flower,
    SparklingHeart,
    BirthdayCake,
    Confetti,
}

impl Icon {
    pub const ALL: [Icon; 6] = [
        Icon::Letter,
        Icon::Gift,
        Icon::Flower,
        Icon::SparklingHeart,
        Icon::BirthdayCake,
        Icon::Confetti,
    ];

    /// Twemoji code point name of the icon artwork.
    pub fn codepoint(self) -> &'static str {
        match self {
            Icon::Letter => "1f48c",
            Icon::Gift => "1f381",
            Icon::Flower => "1f338",
            Icon::SparklingHeart => "1f496",
            Icon::BirthdayCake => "1f382",
            Icon::Confetti => "1f38a",
        }
    }

    pub fn url(self) -> String {
        format!(
            "https://cdn.jsdelivr.net/gh/twitter/twemoji@14.0.2/assets/svg/{}.svg",
            self.codepoint()
        )
    }
}

/// Glyphs used for the click burst particles.
pub const HEART_GLYPHS: [char; 6] = ['💗', '💖', '💕', '💓', '💞', '💝'];

#[cfg(test)]
#[path = "../../tests/unit/present/decor.rs"]
mod tests;
