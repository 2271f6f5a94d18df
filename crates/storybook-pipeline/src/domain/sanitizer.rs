//! Derives an image prompt from generated story text.
//!
//! Apply exactly once per story: the output is not a fixed point, because a
//! second pass would cut into the style suffix.

/// Number of story characters kept before the style suffix.
pub const MAX_STORY_PROMPT_CHARS: usize = 50;

/// Style instruction appended to every image prompt.
pub const IMAGE_STYLE_SUFFIX: &str = " draw in cartoon style suitable for children";

/// Strips newlines, keeps the first [`MAX_STORY_PROMPT_CHARS`] characters and
/// appends [`IMAGE_STYLE_SUFFIX`]. The cut is not word-aware.
#[must_use]
pub fn to_image_prompt(story: &str) -> String {
    let mut prompt: String = story
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r'))
        .take(MAX_STORY_PROMPT_CHARS)
        .collect();
    prompt.push_str(IMAGE_STYLE_SUFFIX);
    prompt
}
