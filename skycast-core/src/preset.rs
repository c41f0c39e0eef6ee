//! Maps a weather condition string to the background theme used when rendering.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionPreset {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    #[default]
    Default,
}

/// Two-stop background gradient, hex colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleDirection {
    None,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleSettings {
    pub count: u32,
    pub size: f32,
    pub color: &'static str,
    pub speed: f32,
    pub direction: ParticleDirection,
    pub opacity: f32,
}

const TABLE: &[(&str, ConditionPreset)] = &[
    ("clear", ConditionPreset::Clear),
    ("clear sky", ConditionPreset::Clear),
    ("clouds", ConditionPreset::Clouds),
    ("few clouds", ConditionPreset::Clouds),
    ("scattered clouds", ConditionPreset::Clouds),
    ("broken clouds", ConditionPreset::Clouds),
    ("overcast clouds", ConditionPreset::Clouds),
    ("rain", ConditionPreset::Rain),
    ("shower rain", ConditionPreset::Rain),
    ("light rain", ConditionPreset::Rain),
    ("drizzle", ConditionPreset::Rain),
    ("snow", ConditionPreset::Snow),
    ("light snow", ConditionPreset::Snow),
    ("thunderstorm", ConditionPreset::Thunderstorm),
];

impl ConditionPreset {
    /// Exact match after lowercasing; anything unknown gets [`ConditionPreset::Default`].
    pub fn resolve(condition: &str) -> Self {
        let key = condition.trim().to_lowercase();
        TABLE
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, preset)| *preset)
            .unwrap_or_default()
    }

    /// Resolve `main` first, falling back to the longer description.
    pub fn resolve_reading(main: &str, description: &str) -> Self {
        match Self::resolve(main) {
            ConditionPreset::Default => Self::resolve(description),
            preset => preset,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ConditionPreset::Clear => "clear",
            ConditionPreset::Clouds => "clouds",
            ConditionPreset::Rain => "rain",
            ConditionPreset::Snow => "snow",
            ConditionPreset::Thunderstorm => "thunderstorm",
            ConditionPreset::Default => "default",
        }
    }

    pub fn gradient(self) -> Gradient {
        let (from, to) = match self {
            ConditionPreset::Clear => ("#fde68a", "#38bdf8"),
            ConditionPreset::Clouds => ("#94a3b8", "#475569"),
            ConditionPreset::Rain => ("#1e3a8a", "#0f172a"),
            ConditionPreset::Snow => ("#e0f2fe", "#94a3b8"),
            ConditionPreset::Thunderstorm => ("#312e81", "#111827"),
            ConditionPreset::Default => ("#60a5fa", "#1d4ed8"),
        };
        Gradient { from, to }
    }

    pub fn particles(self) -> ParticleSettings {
        use ParticleDirection as Dir;

        let (count, size, color, speed, direction, opacity) = match self {
            ConditionPreset::Clear => (50, 4.0, "#facc15", 0.8, Dir::None, 0.7),
            ConditionPreset::Clouds => (60, 5.0, "#cbd5e1", 0.6, Dir::None, 0.5),
            ConditionPreset::Rain => (100, 2.0, "#60a5fa", 3.0, Dir::Bottom, 0.5),
            ConditionPreset::Snow => (150, 3.0, "#f3f4f6", 1.0, Dir::Bottom, 0.8),
            ConditionPreset::Thunderstorm => (80, 3.0, "#fbbf24", 5.0, Dir::None, 0.9),
            ConditionPreset::Default => (70, 3.0, "#93c5fd", 1.5, Dir::None, 0.6),
        };

        ParticleSettings {
            count,
            size,
            color,
            speed,
            direction,
            opacity,
        }
    }
}
