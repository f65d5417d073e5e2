/// Frames of the loading spinner, advanced once per tick.
///
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return the frame for a spinner index, wrapping out-of-range values.
///
pub fn frame(index: usize) -> &'static str {
    FRAMES[index % FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_wraps() {
        assert_eq!(frame(0), FRAMES[0]);
        assert_eq!(frame(FRAMES.len() + 1), FRAMES[1]);
    }
}
