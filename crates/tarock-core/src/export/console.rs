//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::ranking::RankRow;

/// Format the standings as an aligned table.
///
/// The top three places are highlighted and negative totals are shown in red.
pub fn format_ranking_console(rows: &[RankRow]) -> String {
    let mut output = String::new();

    let name_width = rows
        .iter()
        .map(|r| r.display_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());
    let number_width = rows
        .iter()
        .map(|r| r.raw_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let border = "━".repeat(name_width + number_width + 20);
    let border_dim = border.dimmed();

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(
        output,
        "  {:>4}  {:<nw$}  {:<pw$}  {:>6}",
        "Rank",
        "Name",
        "Player",
        "Total",
        nw = name_width,
        pw = number_width
    );
    let _ = writeln!(output, "{}", border_dim);

    for row in rows {
        let name = format!("{:<width$}", row.display_name, width = name_width);
        let name = match row.rank {
            1 => name.truecolor(255, 215, 0).bold().to_string(),
            2 => name.truecolor(192, 192, 192).bold().to_string(),
            3 => name.truecolor(205, 127, 50).bold().to_string(),
            _ => name,
        };
        let total = format!("{:>6}", row.total);
        let total = if row.total < 0 {
            total.red().to_string()
        } else {
            total
        };

        let _ = writeln!(
            output,
            "  {:>4}  {}  {:<pw$}  {}",
            row.rank,
            name,
            row.raw_name,
            total,
            pw = number_width
        );
    }
    let _ = write!(output, "{}", border_dim);

    output
}
