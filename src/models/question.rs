use crate::utils::flexible::deserialize_string_flexible;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value as JsonValue};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(deserialize_with = "deserialize_string_flexible")]
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_prompt_flexible")]
    pub prompt: Prompt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<JsonValue>>,
    #[serde(default, rename = "mediaRefs", skip_serializing_if = "Option::is_none")]
    pub media_refs: Option<Vec<JsonValue>>,
    /// Only the server grades; kept so the template round-trips.
    #[serde(default)]
    pub correct: JsonValue,
}

impl Question {
    pub fn choice_count(&self) -> usize {
        self.choices.as_ref().map(Vec::len).unwrap_or(0)
    }

    /// The list an ordering question starts from, before the user moves anything.
    pub fn native_items(&self) -> Vec<String> {
        let source = match self.question_type {
            QuestionType::TimelineOrder => &self.prompt.items,
            QuestionType::TracklistOrder => &self.prompt.tracks,
            _ => return Vec::new(),
        };

        if !source.is_empty() {
            return source.iter().filter_map(PromptItem::key).collect();
        }

        self.choices
            .iter()
            .flatten()
            .filter_map(|choice| PromptItem::from_json(choice).key())
            .collect()
    }
}

/// Question archetypes. Archetypes this build does not know about are kept
/// as `Unknown` so one new type on the CDN cannot break a whole template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    AlbumYearGuess,
    FillBlank,
    GuessByLyric,
    OddOneOut,
    SongAlbumMatch,
    TimelineOrder,
    OutfitEra,
    AiVisual,
    SoundAlikeSnippet,
    MoodMatch,
    ReverseAudio,
    TracklistOrder,
    LifeTrivia,
    PopularityMatch,
    LongestSong,
    InspirationMap,
    LyricMashup,
    OneSecond,
    SpeedTap,
    Unknown(String),
}

/// Groups of archetypes sharing one answer shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerFamily {
    SingleChoice,
    PairwiseMatch,
    Ordering,
    Ranking,
    SpeedTap,
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::AlbumYearGuess => "album-year-guess",
            QuestionType::FillBlank => "fill-blank",
            QuestionType::GuessByLyric => "guess-by-lyric",
            QuestionType::OddOneOut => "odd-one-out",
            QuestionType::SongAlbumMatch => "song-album-match",
            QuestionType::TimelineOrder => "timeline-order",
            QuestionType::OutfitEra => "outfit-era",
            QuestionType::AiVisual => "ai-visual",
            QuestionType::SoundAlikeSnippet => "sound-alike-snippet",
            QuestionType::MoodMatch => "mood-match",
            QuestionType::ReverseAudio => "reverse-audio",
            QuestionType::TracklistOrder => "tracklist-order",
            QuestionType::LifeTrivia => "life-trivia",
            QuestionType::PopularityMatch => "popularity-match",
            QuestionType::LongestSong => "longest-song",
            QuestionType::InspirationMap => "inspiration-map",
            QuestionType::LyricMashup => "lyric-mashup",
            QuestionType::OneSecond => "one-second",
            QuestionType::SpeedTap => "speed-tap",
            QuestionType::Unknown(raw) => raw,
        }
    }

    pub fn family(&self) -> Option<AnswerFamily> {
        match self {
            QuestionType::AlbumYearGuess
            | QuestionType::FillBlank
            | QuestionType::GuessByLyric
            | QuestionType::OddOneOut
            | QuestionType::AiVisual
            | QuestionType::SoundAlikeSnippet
            | QuestionType::MoodMatch
            | QuestionType::InspirationMap
            | QuestionType::LifeTrivia
            | QuestionType::LongestSong
            | QuestionType::OutfitEra
            | QuestionType::ReverseAudio
            | QuestionType::OneSecond => Some(AnswerFamily::SingleChoice),
            QuestionType::SongAlbumMatch | QuestionType::LyricMashup => {
                Some(AnswerFamily::PairwiseMatch)
            }
            QuestionType::TimelineOrder | QuestionType::TracklistOrder => {
                Some(AnswerFamily::Ordering)
            }
            QuestionType::PopularityMatch => Some(AnswerFamily::Ranking),
            QuestionType::SpeedTap => Some(AnswerFamily::SpeedTap),
            QuestionType::Unknown(_) => None,
        }
    }

    pub fn all_known() -> [QuestionType; 19] {
        [
            QuestionType::AlbumYearGuess,
            QuestionType::FillBlank,
            QuestionType::GuessByLyric,
            QuestionType::OddOneOut,
            QuestionType::SongAlbumMatch,
            QuestionType::TimelineOrder,
            QuestionType::OutfitEra,
            QuestionType::AiVisual,
            QuestionType::SoundAlikeSnippet,
            QuestionType::MoodMatch,
            QuestionType::ReverseAudio,
            QuestionType::TracklistOrder,
            QuestionType::LifeTrivia,
            QuestionType::PopularityMatch,
            QuestionType::LongestSong,
            QuestionType::InspirationMap,
            QuestionType::LyricMashup,
            QuestionType::OneSecond,
            QuestionType::SpeedTap,
        ]
    }
}

impl From<String> for QuestionType {
    fn from(raw: String) -> Self {
        QuestionType::all_known()
            .into_iter()
            .find(|known| known.as_str() == raw)
            .unwrap_or(QuestionType::Unknown(raw))
    }
}

impl From<QuestionType> for String {
    fn from(question_type: QuestionType) -> Self {
        question_type.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<PromptItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<PromptItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_seconds: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

fn deserialize_prompt_flexible<'de, D>(deserializer: D) -> Result<Prompt, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PromptOrText {
        Text(String),
        Prompt(Prompt),
    }

    match Option::<PromptOrText>::deserialize(deserializer)? {
        Some(PromptOrText::Prompt(prompt)) => Ok(prompt),
        Some(PromptOrText::Text(text)) => Ok(Prompt {
            text: Some(text),
            ..Prompt::default()
        }),
        None => Ok(Prompt::default()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptItem {
    Label(String),
    /// Years and chart positions often arrive unquoted.
    Number(Number),
    Entry(Map<String, JsonValue>),
}

impl PromptItem {
    fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => PromptItem::Entry(map.clone()),
            JsonValue::String(s) => PromptItem::Label(s.clone()),
            JsonValue::Number(n) => PromptItem::Number(n.clone()),
            other => PromptItem::Label(other.to_string()),
        }
    }

    /// Identity used in ordering answers: the label itself, or the entry's
    /// `id`, `title` or `label`, in that order.
    pub fn key(&self) -> Option<String> {
        match self {
            PromptItem::Label(label) => Some(label.clone()),
            PromptItem::Number(n) => Some(n.to_string()),
            PromptItem::Entry(map) => ["id", "title", "label"]
                .iter()
                .find_map(|field| map.get(*field))
                .and_then(|value| match value {
                    JsonValue::String(s) => Some(s.clone()),
                    JsonValue::Number(n) => Some(n.to_string()),
                    _ => None,
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_archetype_survives_deserialization() {
        let q: Question = serde_json::from_value(json!({
            "id": 7,
            "type": "karaoke-duel",
            "prompt": "Sing along"
        }))
        .unwrap();
        assert_eq!(q.id, "7");
        assert_eq!(q.question_type, QuestionType::Unknown("karaoke-duel".into()));
        assert_eq!(q.question_type.family(), None);
        assert_eq!(q.prompt.text.as_deref(), Some("Sing along"));
        assert_eq!(q.difficulty, Difficulty::Medium);
    }

    #[test]
    fn every_known_archetype_round_trips_its_name() {
        for known in QuestionType::all_known() {
            let name: String = known.clone().into();
            assert_eq!(QuestionType::from(name), known);
            assert!(known.family().is_some());
        }
    }

    #[test]
    fn native_items_read_prompt_lists_and_fall_back_to_choices() {
        let timeline: Question = serde_json::from_value(json!({
            "id": "t1",
            "type": "timeline-order",
            "difficulty": "hard",
            "prompt": {"items": ["Debut", {"id": "fearless"}, {"title": "Red"}]}
        }))
        .unwrap();
        assert_eq!(timeline.native_items(), vec!["Debut", "fearless", "Red"]);

        let tracklist: Question = serde_json::from_value(json!({
            "id": "t2",
            "type": "tracklist-order",
            "prompt": {},
            "choices": ["Track A", "Track B"]
        }))
        .unwrap();
        assert_eq!(tracklist.native_items(), vec!["Track A", "Track B"]);

        let years: Question = serde_json::from_value(json!({
            "id": "t3",
            "type": "timeline-order",
            "prompt": {"items": [2006, 2008, 2010]}
        }))
        .unwrap();
        assert_eq!(years.native_items(), vec!["2006", "2008", "2010"]);

        let year_choices: Question = serde_json::from_value(json!({
            "id": "t4",
            "type": "timeline-order",
            "choices": [2012, 2014]
        }))
        .unwrap();
        assert_eq!(year_choices.native_items(), vec!["2012", "2014"]);

        let single: Question = serde_json::from_value(json!({
            "id": "s1",
            "type": "fill-blank",
            "prompt": {"items": ["x"]}
        }))
        .unwrap();
        assert!(single.native_items().is_empty());
    }
}
