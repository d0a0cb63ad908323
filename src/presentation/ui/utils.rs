use ratatui::layout::Rect;

/// Centers a fixed-size rect inside `r`, shrinking it to fit.
#[must_use]
pub fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed_clamps() {
        assert_eq!(
            centered_fixed(20, 6, Rect::new(0, 0, 80, 24)),
            Rect::new(30, 9, 20, 6)
        );
        assert_eq!(
            centered_fixed(200, 60, Rect::new(2, 1, 80, 24)),
            Rect::new(2, 1, 80, 24)
        );
    }
}
