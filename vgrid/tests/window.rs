use vgrid::window::{RowWindow, rows_per_page_for};

// ============================================================================
// Clamping
// ============================================================================

#[test]
fn test_max_start_is_len_minus_page_floored_at_zero() {
    for (len, page, expected) in [(0, 10, 0), (5, 10, 0), (10, 10, 0), (11, 10, 1), (10000, 50, 9950)] {
        assert_eq!(RowWindow::new(page, len).max_start_row_index(), expected, "len={len} page={page}");
    }
}

#[test]
fn test_out_of_range_request_clamps() {
    let mut window = RowWindow::new(50, 10000);
    assert_eq!(window.set_start_row_index(20000), 9950);
    assert_eq!(window.start_row_index(), 9950);
    assert_eq!(window.set_start_row_index(3), 3);
}

#[test]
fn test_zero_page_size_is_floored() {
    let window = RowWindow::new(0, 10);
    assert_eq!(window.rows_per_page(), 1);
    assert_eq!(window.range(), 0..1);
}

#[test]
fn test_empty_data_has_empty_range() {
    let mut window = RowWindow::new(20, 0);
    assert_eq!(window.set_start_row_index(7), 0);
    assert!(window.is_empty());
    assert_eq!(window.range(), 0..0);
}

// ============================================================================
// Range
// ============================================================================

#[test]
fn test_range_is_one_page() {
    let mut window = RowWindow::new(50, 10000);
    window.set_start_row_index(4975);
    assert_eq!(window.range(), 4975..5025);
    assert_eq!(window.len(), 50);
    assert!(window.contains(5000));
    assert!(!window.contains(5025));
}

#[test]
fn test_range_is_short_when_data_fits() {
    let window = RowWindow::new(50, 12);
    assert_eq!(window.range(), 0..12);
}

#[test]
fn test_shrinking_data_reclamps_start() {
    let mut window = RowWindow::new(10, 100);
    window.set_start_row_index(90);
    window.set_data_length(40);
    assert_eq!(window.start_row_index(), 30);
    window.set_data_length(5);
    assert_eq!(window.start_row_index(), 0);
}

#[test]
fn test_growing_page_reclamps_start() {
    let mut window = RowWindow::new(10, 100);
    window.to_bottom();
    window.set_rows_per_page(30);
    assert_eq!(window.start_row_index(), 70);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_scroll_by_reports_change() {
    let mut window = RowWindow::new(10, 100);
    assert!(window.scroll_by(5));
    assert_eq!(window.start_row_index(), 5);
    assert!(window.scroll_by(-100));
    assert_eq!(window.start_row_index(), 0);
    assert!(!window.scroll_by(-1));
}

#[test]
fn test_paging() {
    let mut window = RowWindow::new(10, 25);
    assert!(window.page_down());
    assert_eq!(window.start_row_index(), 10);
    assert!(window.page_down());
    assert_eq!(window.start_row_index(), 15);
    assert!(!window.page_down());
    assert!(window.page_up());
    assert_eq!(window.start_row_index(), 5);
    assert!(window.to_top());
    assert!(!window.to_top());
}

// ============================================================================
// Scrollbar mapping
// ============================================================================

#[test]
fn test_thumb_ratio() {
    let mut window = RowWindow::new(50, 10000);
    assert_eq!(window.thumb_ratio(), 0.0);
    window.to_bottom();
    assert_eq!(window.thumb_ratio(), 1.0);
    // Everything fits: the divisor is floored at 1.
    assert_eq!(RowWindow::new(50, 10).thumb_ratio(), 0.0);
}

#[test]
fn test_index_for_ratio_half() {
    let window = RowWindow::new(50, 10000);
    assert_eq!(window.index_for_ratio(0.5), 4975);
    assert_eq!(window.index_for_ratio(-1.0), 0);
    assert_eq!(window.index_for_ratio(2.0), 9950);
}

#[test]
fn test_index_for_ratio_is_monotonic() {
    let window = RowWindow::new(7, 1234);
    let mut previous = 0;
    for step in 0..=200 {
        let index = window.index_for_ratio(step as f64 / 200.0);
        assert!(index >= previous);
        previous = index;
    }
    assert_eq!(previous, window.max_start_row_index());
}

#[test]
fn test_rows_per_page_for_viewport() {
    assert_eq!(rows_per_page_for(20, 1), 20);
    assert_eq!(rows_per_page_for(21, 2), 10);
    assert_eq!(rows_per_page_for(0, 1), 1);
    assert_eq!(rows_per_page_for(5, 0), 5);
}
