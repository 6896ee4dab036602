//! Group colors.

/// Colors cycled by cluster label.
pub const PALETTE: [&str; 10] = [
    "#4285F4", // blue
    "#EA4335", // red
    "#FBBC05", // yellow
    "#34A853", // green
    "#FF6D01", // orange
    "#46BDC6", // cyan
    "#A142F4", // purple
    "#F439A0", // pink
    "#7CB342", // lime
    "#795548", // brown
];

/// Color of the Ungrouped bucket.
pub const UNGROUPED_COLOR: &str = "#9E9E9E";

/// Name of the bucket holding noise and unembedded items.
pub const UNGROUPED_NAME: &str = "Ungrouped";

/// Color for a cluster label.
pub fn color_for(label: usize) -> &'static str {
    PALETTE[label % PALETTE.len()]
}
