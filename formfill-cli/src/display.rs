use colored::*;
use formfill::{RunResult, RunStatus};

fn format_rows(rows: &[usize]) -> String {
    if rows.is_empty() {
        return "none".to_string();
    }
    rows.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Display the result in a user-friendly format
pub fn print_result(result: &RunResult) {
    println!();
    println!("{}", "═".repeat(60));

    match result.status {
        RunStatus::Success => println!("{} {}", "✅ SUCCESS:".green().bold(), result.message),
        RunStatus::Partial => println!("{} {}", "⚠️  PARTIAL:".yellow().bold(), result.message),
        RunStatus::Error => println!("{} {}", "❌ ERROR:".red().bold(), result.message),
    }

    if result.status != RunStatus::Error {
        println!("{}", "─".repeat(60));
        println!("   • Total rows: {}", result.total_rows);
        println!(
            "   • Saved ({}): {}",
            result.processed_rows.len(),
            format_rows(&result.processed_rows)
        );
        println!(
            "   • Failed ({}): {}",
            result.failed_rows.len(),
            format_rows(&result.failed_rows)
        );
    }

    println!("{}", "═".repeat(60));
    println!();
}
