use serde::{Deserialize, Serialize};

/// One line of dialogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub text: String,

    /// Name of the speaking character, if shown
    #[serde(default)]
    pub speaker: Option<String>,

    /// Typewriter speed in characters per second (0 = show at once).
    /// None falls back to the runner's configured default.
    #[serde(default)]
    pub chars_per_second: Option<f32>,
}

impl DialogueLine {
    pub fn new(text: impl Into<String>) -> Self {
        DialogueLine {
            text: text.into(),
            speaker: None,
            chars_per_second: None,
        }
    }

    pub fn spoken_by(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    pub fn with_speed(mut self, chars_per_second: f32) -> Self {
        self.chars_per_second = Some(chars_per_second);
        self
    }
}

/// An ordered sequence of lines
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dialogue {
    pub lines: Vec<DialogueLine>,
}

impl Dialogue {
    pub fn new(lines: Vec<DialogueLine>) -> Self {
        Dialogue { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_optional_fields() {
        let dialogue: Dialogue = serde_json::from_str(
            r#"{ "lines": [
                { "text": "Hello" },
                { "text": "Welcome", "speaker": "Guard", "chars_per_second": 0 }
            ] }"#,
        )
        .unwrap();

        assert_eq!(dialogue.lines.len(), 2);
        assert_eq!(dialogue.lines[0], DialogueLine::new("Hello"));
        assert_eq!(
            dialogue.lines[1],
            DialogueLine::new("Welcome").spoken_by("Guard").with_speed(0.0)
        );
    }
}
