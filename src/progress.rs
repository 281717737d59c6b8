use std::io::Write;

pub const DEFAULT_LENGTH: usize = 30;

const FILL: char = '█';
const EMPTY: char = '-';

/// Renders a progress line meant to be redrawn in place. The line only ends
/// with a newline once `current` reaches `total`.
pub fn render(current: usize, total: usize, prefix: &str, suffix: &str, length: usize) -> String {
    let (filled, percent) = if total == 0 {
        (length, 100.0)
    } else {
        let current = current.min(total);
        (
            length * current / total,
            100.0 * current as f64 / total as f64,
        )
    };
    let bar: String = std::iter::repeat(FILL)
        .take(filled)
        .chain(std::iter::repeat(EMPTY).take(length - filled))
        .collect();
    let mut line = format!("\r{} |{}| {:.1}% {}", prefix, bar, percent, suffix);
    if current >= total {
        line.push('\n');
    }
    line
}

pub fn print(current: usize, total: usize, prefix: &str, suffix: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(render(current, total, prefix, suffix, DEFAULT_LENGTH).as_bytes());
    let _ = stdout.flush();
}
