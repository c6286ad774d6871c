use pl_api::search;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};

/// Split `text` around the first match of `query` and style the match.
/// Without a match the whole text gets `base`.
pub fn highlighted<'a>(text: &'a str, query: &str, base: Style) -> Line<'a> {
    let Some(range) = search::highlight(text, query) else {
        return Line::from(Span::styled(text, base));
    };

    let mark = base
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(&text[..range.start], base),
        Span::styled(&text[range.clone()], mark),
        Span::styled(&text[range.end..], base),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn splits_around_match() {
        let line = highlighted("Declan Rice", "rice", Style::default());
        assert_eq!(contents(&line), vec!["Declan ", "Rice", ""]);
        assert_eq!(line.spans[1].style.bg, Some(Color::Yellow));
    }

    #[test]
    fn no_match_is_single_span() {
        let line = highlighted("Declan Rice", "saka", Style::default());
        assert_eq!(contents(&line), vec!["Declan Rice"]);
    }

    #[test]
    fn empty_query_is_single_span() {
        let line = highlighted("Declan Rice", "  ", Style::default());
        assert_eq!(line.spans.len(), 1);
    }
}
