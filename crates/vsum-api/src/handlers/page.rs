//! The lookup page.

use axum::extract::{Query, State};
use maud::{html, Markup, DOCTYPE};
use serde::Deserialize;
use vsum_models::ReportRecord;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Selected video file name
    pub file: Option<String>,
}

/// Select box of processed videos; the selected video's report link below it.
pub async fn index_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Markup> {
    let mut rows = state.reports.list_reports().await?;
    rows.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    let selected = query
        .file
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty());
    Ok(render_page(&rows, selected))
}

fn render_page(rows: &[ReportRecord], selected: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Video Summary Reports" }
            }
            body {
                h1 { "Video Summary Reports" }
                form method="get" action="/" {
                    label for="file" { "Processed video" }
                    select id="file" name="file" {
                        @for row in rows {
                            option value=(row.file_name) selected[selected == Some(row.file_name.as_str())] {
                                (row.file_name)
                            }
                        }
                    }
                    button type="submit" { "Show report" }
                }
                @if let Some(file) = selected {
                    (selected_report(rows, file))
                }
            }
        }
    }
}

fn selected_report(rows: &[ReportRecord], file: &str) -> Markup {
    match rows.iter().find(|r| r.file_name == file) {
        Some(row) => html! {
            h2 { (row.file_name) }
            p {
                a href=(row.presigned_url) { (row.pdf_file_name()) }
            }
        },
        None => html! {
            p { "No report found for " (file) "." }
        },
    }
}
