use crate::voxel_pipeline::grid::types::VoxelGrid;

/// Provenance written as comments above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapHeader {
    pub source_name: String,
    pub width: u32,
    pub height: u32,
}

impl MapHeader {
    pub fn for_grid(source_name: impl Into<String>, grid: &VoxelGrid) -> Self {
        Self {
            source_name: source_name.into(),
            width: grid.width(),
            height: grid.height(),
        }
    }
}

/// Serializes a grid as a `return { {..}, .. }` table literal.
///
/// The layout is consumed verbatim by a game-engine module loader: one tab
/// before each row, digits comma-joined with no spaces, a trailing comma
/// after every row, and a final newline after the closing brace.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridEncoder;

impl GridEncoder {
    pub fn encode(&self, grid: &VoxelGrid, header: &MapHeader) -> String {
        // Each cell is a digit plus a separator.
        let body = grid.height() as usize * (grid.width() as usize * 2 + 4);
        let mut out = String::with_capacity(body + header.source_name.len() + 96);

        out.push_str("-- Auto-generated voxel map data\n");
        out.push_str("-- Source: ");
        out.extend(header.source_name.chars().map(comment_safe));
        out.push('\n');
        out.push_str(&format!("-- Dimensions: {}x{}\n", header.width, header.height));
        out.push('\n');
        out.push_str("return {\n");

        for row in grid.rows() {
            out.push_str("\t{");
            for (x, voxel) in row.iter().enumerate() {
                if x > 0 {
                    out.push(',');
                }
                out.push(voxel.as_char());
            }
            out.push_str("},\n");
        }

        out.push_str("}\n");
        out
    }
}

/// Control characters (newlines especially) would end the comment early.
fn comment_safe(c: char) -> char {
    if c.is_control() { '?' } else { c }
}
