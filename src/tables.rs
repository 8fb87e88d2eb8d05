use crate::splice::report::{SpliceReport, StepSummary};
use cli_table::{Cell, Color, Style, Table};

pub enum TableOptions<'a> {
    Summary(&'a SpliceReport),
    Steps(&'a SpliceReport),
    Dropped(&'a SpliceReport),
}

pub fn get_table(options: TableOptions<'_>) -> cli_table::TableStruct {
    match options {
        TableOptions::Summary(report) => get_summary_table(report),
        TableOptions::Steps(report) => get_steps_table(report),
        TableOptions::Dropped(report) => get_dropped_table(report),
    }
}

fn get_summary_table(report: &SpliceReport) -> cli_table::TableStruct {
    let dropped = report.dropped_lines();
    let inserted = report.inserted_lines();
    let duplicated = report.duplicated.len();

    vec![vec![
        report.source_lines.cell().bold(true),
        report.result_lines.cell().bold(true),
        dropped.cell().foreground_color(if dropped > 0 {
            Some(Color::Red)
        } else {
            None
        }),
        inserted.cell().foreground_color(if inserted > 0 {
            Some(Color::Green)
        } else {
            None
        }),
        duplicated.cell().foreground_color(if duplicated > 0 {
            Some(Color::Yellow)
        } else {
            None
        }),
    ]]
    .table()
    .title(vec![
        "Source Lines"
            .cell()
            .bold(true)
            .foreground_color(Some(Color::Cyan)),
        "Result Lines"
            .cell()
            .bold(true)
            .foreground_color(Some(Color::Cyan)),
        "Dropped".cell().bold(true).foreground_color(Some(Color::Red)),
        "Inserted"
            .cell()
            .bold(true)
            .foreground_color(Some(Color::Green)),
        "Duplicated Spans"
            .cell()
            .bold(true)
            .foreground_color(Some(Color::Yellow)),
    ])
}

fn get_steps_table(report: &SpliceReport) -> cli_table::TableStruct {
    report
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let (kind, source, lines, color) = match step {
                StepSummary::Keep { span, lines } => (
                    "keep",
                    span.map(|s| s.to_string())
                        .unwrap_or_else(|| "(empty)".to_string()),
                    *lines,
                    Color::Blue,
                ),
                StepSummary::Insert { lines } => {
                    ("insert", "new content".to_string(), *lines, Color::Green)
                }
            };
            vec![
                (index + 1).cell(),
                kind.cell().bold(true).foreground_color(Some(color)),
                source.cell(),
                lines.cell(),
            ]
        })
        .collect::<Vec<_>>()
        .table()
        .title(vec![
            "#".cell().bold(true),
            "Operation"
                .cell()
                .bold(true)
                .foreground_color(Some(Color::Cyan)),
            "Source Lines".cell().bold(true),
            "Line Count".cell().bold(true),
        ])
}

fn get_dropped_table(report: &SpliceReport) -> cli_table::TableStruct {
    report
        .dropped
        .iter()
        .map(|span| {
            vec![
                span.to_string().cell().foreground_color(Some(Color::Red)),
                span.line_count().cell(),
            ]
        })
        .collect::<Vec<_>>()
        .table()
        .title(vec![
            "Dropped Lines"
                .cell()
                .bold(true)
                .foreground_color(Some(Color::Red)),
            "Line Count".cell().bold(true),
        ])
}
