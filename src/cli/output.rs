//! Output formatting for CLI reports

use crate::pipeline::{EpochSummary, OutcomeTally};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// `count (xx.x%)`
pub fn format_share(count: usize, rate: f64) -> String {
    format!("{} ({:.1}%)", format_number(count), rate * 100.0)
}

/// Print wins, draws and losses from the agent's point of view
pub fn print_tally(tally: &OutcomeTally) {
    print_kv("Games", &format_number(tally.games()));
    print_kv("Agent wins", &format_share(tally.agent_wins, tally.win_rate()));
    print_kv("Draws", &format_share(tally.draws, tally.draw_rate()));
    print_kv(
        "Opponent wins",
        &format_share(tally.opponent_wins, tally.loss_rate()),
    );
}

/// Print one row per evaluation batch
pub fn print_epoch_table(epochs: &[EpochSummary]) {
    println!("  {:>5}  {:>10}  {:>7}  {:>7}", "epoch", "episodes", "wins", "epsilon");
    for summary in epochs {
        println!(
            "  {:>5}  {:>10}  {:>3}/{:<3}  {:>7.3}",
            summary.epoch,
            format_number(summary.episodes_trained),
            summary.evaluation.agent_wins,
            summary.evaluation.games(),
            summary.epsilon
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(100_000), "100,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(9, 0.9), "9 (90.0%)");
    }
}
