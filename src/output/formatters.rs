//! Formatting utilities for terminal output

use crate::core::Feedback;

/// Marker for a peg in the right position
pub const EXACT_MARK: char = '●';
/// Marker for a right peg in the wrong position
pub const COLOR_MARK: char = '○';
/// Marker for a position that earned nothing
pub const MISS_MARK: char = '·';

/// Format feedback as one marker per position, exact hits first
///
/// ```
/// use mastermind::core::Feedback;
/// use mastermind::output::formatters::feedback_markers;
///
/// let feedback = Feedback::new(2, 1, 4).unwrap();
/// assert_eq!(feedback_markers(feedback, 4), "●●○·");
/// ```
#[must_use]
pub fn feedback_markers(feedback: Feedback, code_length: usize) -> String {
    let misses = code_length.saturating_sub(feedback.exact() + feedback.color_only());
    let mut out = String::with_capacity(code_length * 3);
    out.extend(std::iter::repeat_n(EXACT_MARK, feedback.exact()));
    out.extend(std::iter::repeat_n(COLOR_MARK, feedback.color_only()));
    out.extend(std::iter::repeat_n(MISS_MARK, misses));
    out
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_nothing_right() {
        assert_eq!(feedback_markers(Feedback::ZERO, 4), "····");
    }

    #[test]
    fn markers_all_exact() {
        let feedback = Feedback::new(5, 0, 5).unwrap();
        assert_eq!(feedback_markers(feedback, 5), "●●●●●");
    }

    #[test]
    fn markers_all_misplaced() {
        let feedback = Feedback::new(0, 4, 4).unwrap();
        assert_eq!(feedback_markers(feedback, 4), "○○○○");
    }

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0.0, 100.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(100.0, 100.0, 10), "██████████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(50.0, 100.0, 10), "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(5.0, 0.0, 4), "░░░░");
    }
}
