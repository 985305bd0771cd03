//! Model type and capability flags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a model is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    Chat,
    Completion,
    Embedding,
    ImageGeneration,
    TextToSpeech,
    SpeechToText,
    Moderation,
    Other,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Chat => "chat",
            ModelType::Completion => "completion",
            ModelType::Embedding => "embedding",
            ModelType::ImageGeneration => "image_generation",
            ModelType::TextToSpeech => "text_to_speech",
            ModelType::SpeechToText => "speech_to_text",
            ModelType::Moderation => "moderation",
            ModelType::Other => "other",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability flag. Adapters only ever produce values from this fixed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFeature {
    StructuredOutput,
    JsonOutput,
    ToolCalling,
    Vision,
    AudioInput,
    AudioOutput,
    ToolChoice,
    PromptCaching,
    Reasoning,
    WebSearch,
}

impl ModelFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFeature::StructuredOutput => "structured_output",
            ModelFeature::JsonOutput => "json_output",
            ModelFeature::ToolCalling => "tool_calling",
            ModelFeature::Vision => "vision",
            ModelFeature::AudioInput => "audio_input",
            ModelFeature::AudioOutput => "audio_output",
            ModelFeature::ToolChoice => "tool_choice",
            ModelFeature::PromptCaching => "prompt_caching",
            ModelFeature::Reasoning => "reasoning",
            ModelFeature::WebSearch => "web_search",
        }
    }
}

impl fmt::Display for ModelFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
