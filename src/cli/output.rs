//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{game::GameOutcome, training::TrainingSummary};

/// Create a progress bar for training
pub fn create_training_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}

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

/// Count with its share of the total, e.g. `1,204 (60.2%)`
pub fn format_share(count: usize, total: usize) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        100.0 * count as f64 / total as f64
    };
    format!("{} ({percent:.1}%)", format_number(count))
}

/// Short progress message for a running tally
pub fn tally_message(summary: &TrainingSummary) -> String {
    format!(
        "O {} / X {} / draw {}",
        summary.o_wins, summary.x_wins, summary.draws
    )
}

pub fn describe_outcome(outcome: GameOutcome) -> String {
    match outcome {
        GameOutcome::Win(player) => format!("{player} wins."),
        GameOutcome::Draw => "Game drawn.".to_string(),
    }
}

/// Print the result table of a training run
pub fn print_summary(summary: &TrainingSummary) {
    print_kv("Games", &format_number(summary.games));
    print_kv("O wins", &format_share(summary.o_wins, summary.games));
    print_kv("X wins", &format_share(summary.x_wins, summary.games));
    print_kv("Draws", &format_share(summary.draws, summary.games));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn shares_handle_empty_totals() {
        assert_eq!(format_share(0, 0), "0 (0.0%)");
        assert_eq!(format_share(1, 4), "1 (25.0%)");
    }

    #[test]
    fn outcomes_read_naturally() {
        assert_eq!(describe_outcome(GameOutcome::Win(Player::X)), "X wins.");
        assert_eq!(describe_outcome(GameOutcome::Draw), "Game drawn.");
    }
}
