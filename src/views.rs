//! Server-rendered HTML for the quote summary page.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::core::models::Goal;

pub const PAGE_TITLE: &str = "Quote Summary Generator";

pub const RESULT_LABEL: &str = "Copy this summary into your email to the client:";

/// Everything needed to draw the page after an interaction.
#[derive(Debug, Clone, Default)]
pub struct PageModel {
    pub max_files: usize,
    pub client_name: String,
    pub goal: Goal,
    pub preview: Option<String>,
    pub summary: Option<String>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl PageModel {
    #[must_use]
    pub fn new(max_files: usize) -> Self {
        Self {
            max_files,
            ..Self::default()
        }
    }
}

#[must_use]
pub fn render_page(model: &PageModel) -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>📄 {PAGE_TITLE}</h1>\n"));
    body.push_str(
        "<p>Upload your quote PDFs below. We'll generate a clean, client-ready summary that you can copy and paste into an email.</p>\n",
    );

    if let Some(error) = &model.error {
        body.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            encode_text(error)
        ));
    }
    if let Some(notice) = &model.notice {
        body.push_str(&format!(
            "<div class=\"notice\" role=\"status\">{}</div>\n",
            encode_text(notice)
        ));
    }

    body.push_str(&render_upload_form(model));

    if let Some(preview) = &model.preview {
        body.push_str(&render_preview(model.goal, preview));
    }

    if let Some(summary) = &model.summary {
        body.push_str(&render_summary(summary));
    }

    body.push_str(&render_feedback_form());

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{PAGE_TITLE}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n{body}</main>\n</body>\n</html>\n"
    )
}

fn render_upload_form(model: &PageModel) -> String {
    let goals: String = Goal::ALL
        .iter()
        .map(|goal| {
            let checked = if *goal == model.goal { " checked" } else { "" };
            format!(
                "<label><input type=\"radio\" name=\"goal\" value=\"{}\"{checked}> {}</label>\n",
                goal.value(),
                goal.label()
            )
        })
        .collect();

    let client_name = encode_double_quoted_attribute(&model.client_name);

    format!(
        r#"<form method="post" action="/summary" enctype="multipart/form-data">
<label for="files">Upload Quote PDFs (up to {max})</label>
<input id="files" type="file" name="files" accept="application/pdf,.pdf" multiple required>
<label for="client_name">Client name (optional)</label>
<input id="client_name" type="text" name="client_name" value="{client_name}">
<fieldset>
<legend>What matters most to this client?</legend>
{goals}</fieldset>
<button type="submit">Generate Summary</button>
<button type="submit" formaction="/preview" formenctype="application/x-www-form-urlencoded" formnovalidate>Preview example</button>
</form>
"#,
        max = model.max_files,
    )
}

fn render_preview(goal: Goal, preview: &str) -> String {
    format!(
        "<section class=\"preview\">\n<h2>Example: {}</h2>\n<pre>{}</pre>\n</section>\n",
        goal.label(),
        encode_text(preview)
    )
}

fn render_summary(summary: &str) -> String {
    format!(
        "<section class=\"summary\">\n<h2>📧 Email Summary</h2>\n<label for=\"summary\">{RESULT_LABEL}</label>\n<textarea id=\"summary\" rows=\"15\" readonly>{}</textarea>\n</section>\n",
        encode_text(summary)
    )
}

fn render_feedback_form() -> String {
    r#"<section class="feedback">
<h2>Suggestions</h2>
<form method="post" action="/feedback">
<label for="suggestion">What would make this more useful?</label>
<textarea id="suggestion" name="suggestion" rows="4" required></textarea>
<label for="email">Email (optional)</label>
<input id="email" type="email" name="email">
<button type="submit">Send feedback</button>
</form>
</section>
"#
    .to_string()
}

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.75rem}\
textarea{width:100%}\
.error{background:#fde8e8;border:1px solid #e0a0a0;padding:.75rem}\
.notice{background:#e8f5e9;border:1px solid #a5d6a7;padding:.75rem}\
pre{white-space:pre-wrap;background:#f6f6f6;padding:.75rem}";
