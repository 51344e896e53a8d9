use snip_core::{AppViewModel, HistoryRowView, Notice, SubmissionStatus, FAILURE_MESSAGE};

pub const EMPTY_HISTORY: &str = "No links shortened yet.";

/// History table, newest first.
pub fn render_history(rows: &[HistoryRowView]) -> Vec<String> {
    if rows.is_empty() {
        return vec![EMPTY_HISTORY.to_string()];
    }
    let id_width = rows
        .iter()
        .map(|row| row.id.to_string().len())
        .max()
        .unwrap_or(0);
    rows.iter()
        .map(|row| {
            format!(
                "{:>width$}  {}  <- {}",
                row.id,
                row.short_url,
                row.original_url,
                width = id_width
            )
        })
        .collect()
}

pub fn render_status(view: &AppViewModel) -> Option<String> {
    match view.status {
        SubmissionStatus::Idle => None,
        SubmissionStatus::Submitting => Some("Processing...".to_string()),
        SubmissionStatus::Succeeded => view
            .last_result
            .as_ref()
            .map(|url| format!("Success! Here is your link: {url}")),
        SubmissionStatus::Failed => Some(
            view.error_message
                .clone()
                .unwrap_or_else(|| FAILURE_MESSAGE.to_string()),
        ),
    }
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Shortened(url) => format!("Success! Here is your link: {url}"),
        Notice::SubmissionFailed => FAILURE_MESSAGE.to_string(),
        Notice::Copied(text) => format!("Copied {text} to the clipboard."),
        Notice::Deleted(id) => format!("Deleted entry {id}."),
    }
}

#[cfg(test)]
mod tests {
    use snip_core::EntryId;

    use super::*;

    fn row(id: u64, short: &str, original: &str) -> HistoryRowView {
        HistoryRowView {
            id: EntryId(id),
            original_url: original.to_string(),
            short_url: short.to_string(),
        }
    }

    #[test]
    fn empty_history_has_placeholder() {
        assert_eq!(render_history(&[]), vec![EMPTY_HISTORY.to_string()]);
    }

    #[test]
    fn history_rows_align_ids() {
        let lines = render_history(&[
            row(1000, "http://s/b", "https://b.example.com"),
            row(7, "http://s/a", "https://a.example.com"),
        ]);
        assert_eq!(
            lines,
            vec![
                "1000  http://s/b  <- https://b.example.com".to_string(),
                "   7  http://s/a  <- https://a.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn status_lines_follow_submission_state() {
        let mut view = AppViewModel::default();
        assert_eq!(render_status(&view), None);

        view.status = SubmissionStatus::Submitting;
        assert_eq!(render_status(&view).as_deref(), Some("Processing..."));

        view.status = SubmissionStatus::Succeeded;
        view.last_result = Some("http://s/x1".to_string());
        assert_eq!(
            render_status(&view).as_deref(),
            Some("Success! Here is your link: http://s/x1")
        );

        view.status = SubmissionStatus::Failed;
        view.last_result = None;
        assert_eq!(render_status(&view).as_deref(), Some(FAILURE_MESSAGE));
    }

    #[test]
    fn notices_render_as_one_line() {
        assert_eq!(
            render_notice(&Notice::Deleted(EntryId(5))),
            "Deleted entry 5."
        );
        assert_eq!(
            render_notice(&Notice::Copied("http://s/x1".to_string())),
            "Copied http://s/x1 to the clipboard."
        );
    }
}
