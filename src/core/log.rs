use crate::db::queries::LogRow;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

const OP_WIDTH_LIMIT: usize = 60;

/// ANSI colour for an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "start" | "resume" => Colour::Green,
        "del" | "clear" | "stop" => Colour::Red,
        "edit" | "pause" => Colour::Yellow,
        "settings" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// "op (target)", cut to the width limit, with only the operation coloured.
fn render_op_target(operation: &str, target: &str) -> String {
    let color = color_for_operation(operation);
    let plain = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    let visible = if plain.chars().count() > OP_WIDTH_LIMIT {
        let mut s: String = plain.chars().take(OP_WIDTH_LIMIT - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Renders the audit trail, one aligned line per row.
    pub fn render(rows: &[LogRow]) -> Vec<String> {
        let lines: Vec<(i64, String, String, &str)> = rows
            .iter()
            .map(|r| {
                let date = chrono::DateTime::parse_from_rfc3339(&r.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| r.date.clone());
                (r.id, date, render_op_target(&r.operation, &r.target), r.message.as_str())
            })
            .collect();

        let id_w = lines.iter().map(|l| l.0.to_string().len()).max().unwrap_or(1);
        let date_w = lines.iter().map(|l| l.1.len()).max().unwrap_or(10);
        let op_w = lines
            .iter()
            .map(|l| strip_ansi(&l.2).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_LIMIT);

        lines
            .into_iter()
            .map(|(id, date, op, message)| {
                let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op).chars().count()));
                format!("{id:>id_w$}: {date:<date_w$} | {op}{padding} => {message}")
            })
            .collect()
    }

    pub fn print_log(rows: &[LogRow]) {
        println!("📜 Internal log:\n");
        for line in Self::render(rows) {
            println!("{line}");
        }
    }
}
