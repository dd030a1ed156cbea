//! Autocompletion query derived from the composer text and caret.

use unicode_segmentation::UnicodeSegmentation;

use chatview_types::{InputQuery, TextInputState};

const MIN_EMOJI_QUERY_CHARS: usize = 2;

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Derive the query for `input`.
///
/// `@bot query` at the very start is an inline bot request when
/// `include_context` is set. Otherwise the token ending at the caret decides:
/// `/cmd` (only at the start), `@name`, `#tag` or `:emoji`. A message made of a
/// single emoji asks for matching stickers.
#[must_use]
pub fn input_context_query(input: &TextInputState, include_context: bool) -> InputQuery {
    let text = input.text();
    if text.is_empty() {
        return InputQuery::None;
    }
    if include_context && let Some(query) = context_request(text) {
        return query;
    }
    if let Some(caret) = input.caret()
        && let Some(query) = token_query(text, caret)
    {
        return query;
    }
    sticker_query(text)
}

fn context_request(text: &str) -> Option<InputQuery> {
    let rest = text.strip_prefix('@')?;
    let (address_name, query) = rest.split_once(' ')?;
    if address_name.is_empty() || !address_name.chars().all(is_username_char) {
        return None;
    }
    Some(InputQuery::ContextRequest {
        address_name: address_name.to_string(),
        query: query.to_string(),
    })
}

fn token_query(text: &str, caret: usize) -> Option<InputQuery> {
    let chars: Vec<char> = text.chars().collect();
    let caret = caret.min(chars.len());
    let start = chars[..caret]
        .iter()
        .rposition(|c| c.is_whitespace())
        .map_or(0, |index| index + 1);
    let (&trigger, rest) = chars[start..caret].split_first()?;
    let word: String = rest.iter().collect();

    match trigger {
        '/' if start == 0 && rest.iter().all(|&c| is_username_char(c)) => {
            Some(InputQuery::Command(word))
        }
        '@' if rest.iter().all(|&c| is_username_char(c)) => Some(InputQuery::Mention {
            query: word,
            include_recent: start == 0,
        }),
        '#' if rest.iter().all(|&c| is_tag_char(c)) => Some(InputQuery::Hashtag(word)),
        ':' if rest.len() >= MIN_EMOJI_QUERY_CHARS && rest.iter().all(|&c| is_tag_char(c)) => {
            Some(InputQuery::Emoji(word))
        }
        _ => None,
    }
}

fn sticker_query(text: &str) -> InputQuery {
    let trimmed = text.trim();
    let mut graphemes = trimmed.graphemes(true);
    match (graphemes.next(), graphemes.next()) {
        (Some(only), None) if looks_like_emoji(only) => InputQuery::Stickers(only.to_string()),
        _ => InputQuery::None,
    }
}

fn looks_like_emoji(grapheme: &str) -> bool {
    grapheme
        .chars()
        .next()
        .is_some_and(|c| !c.is_ascii() && !c.is_alphanumeric() && !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(text: &str) -> InputQuery {
        input_context_query(&TextInputState::with_caret_at_end(text), true)
    }

    #[test]
    fn empty_input_has_no_query() {
        assert_eq!(query(""), InputQuery::None);
        assert_eq!(query("hello there"), InputQuery::None);
    }

    #[test]
    fn command_only_at_start() {
        assert_eq!(query("/sta"), InputQuery::Command("sta".to_string()));
        assert_eq!(query("see /sta"), InputQuery::None);
    }

    #[test]
    fn mention_at_caret() {
        assert_eq!(
            query("@ali"),
            InputQuery::Mention {
                query: "ali".to_string(),
                include_recent: true
            }
        );
        assert_eq!(
            query("ping @bo"),
            InputQuery::Mention {
                query: "bo".to_string(),
                include_recent: false
            }
        );
    }

    #[test]
    fn inline_bot_request() {
        assert_eq!(
            query("@gif cats"),
            InputQuery::ContextRequest {
                address_name: "gif".to_string(),
                query: "cats".to_string()
            }
        );
        let input = TextInputState::with_caret_at_end("@gif cats");
        assert_eq!(input_context_query(&input, false), InputQuery::None);
    }

    #[test]
    fn hashtag_and_emoji() {
        assert_eq!(query("go #rust"), InputQuery::Hashtag("rust".to_string()));
        assert_eq!(query("so :sm"), InputQuery::Emoji("sm".to_string()));
        assert_eq!(query("so :s"), InputQuery::None);
    }

    #[test]
    fn caret_in_the_middle_uses_token_before_it() {
        let input = TextInputState::new("#abc def", 4..4, Vec::new());
        assert_eq!(
            input_context_query(&input, true),
            InputQuery::Hashtag("abc".to_string())
        );
    }

    #[test]
    fn single_emoji_asks_for_stickers() {
        assert_eq!(query("👍"), InputQuery::Stickers("👍".to_string()));
        assert_eq!(query(" 👍🏽 "), InputQuery::Stickers("👍🏽".to_string()));
        assert_eq!(query("👍👍"), InputQuery::None);
        assert_eq!(query("é"), InputQuery::None);
    }
}
