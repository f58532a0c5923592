//! Plain-text rendering of quiz views.

use comfy_table::{Cell, Table};

use typequiz_core::model::{Portrait, QuestionSet};
use typequiz_core::view::{ResultView, View, COMPUTING_HEADLINE};

const BAR_WIDTH: usize = 20;

/// Render the active screen as terminal text.
pub fn render_view(view: &View) -> String {
    match view {
        View::Start { ready, notice } => {
            let mut out = String::from("=== Personality Type Quiz ===\n");
            if let Some(notice) = notice {
                out.push_str(notice.text());
                out.push('\n');
            }
            if *ready {
                out.push_str("Questions are ready.\n");
            }
            out
        }
        View::Question {
            number,
            total,
            prompt,
            options,
            progress_percent,
        } => format!(
            "\nQuestion {number}/{total}  {}\n\n  {prompt}\n\n  A) {}\n  B) {}\n",
            progress_bar(*progress_percent),
            options[0],
            options[1],
        ),
        View::Computing => format!("\n{COMPUTING_HEADLINE}\n"),
        View::Result(result) => render_result(result),
        View::Error {
            label,
            headline,
            detail,
        } => format!("\n{label}\n{headline}\n{detail}\n"),
    }
}

fn render_result(result: &ResultView) -> String {
    let portrait = match &result.portrait {
        Portrait::Image {
            url,
            fallback_emoji,
        } => format!("{fallback_emoji}  {url}"),
        Portrait::Emoji(emoji) => emoji.clone(),
    };

    let mut out = format!(
        "\n{}\n{portrait}  {}\n\n{}\n",
        result.type_label, result.character_name, result.description
    );

    if !result.traits.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Traits"]);
        for trait_text in &result.traits {
            table.add_row(vec![Cell::new(trait_text)]);
        }
        out.push_str(&format!("\n{table}\n"));
    }
    out
}

/// A fixed-width bar followed by the percentage, e.g. `[#####---------------] 25%`.
pub fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {percent}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

/// Tabulate a question set with both options and their traits.
pub fn question_table(questions: &QuestionSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Answer A", "Answer B"]);
    for (i, q) in questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&q.prompt),
            Cell::new(format!("{} ({})", q.answers[0].text, q.answers[0].trait_symbol)),
            Cell::new(format!("{} ({})", q.answers[1].text, q.answers[1].trait_symbol)),
        ]);
    }
    table
}
