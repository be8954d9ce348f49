//! Block menu
//!
//! One line per block, `name: desc`, children indented beneath their parent.

use crate::config::Block;
use std::io::{self, Write};

/// Width the block name is padded to
pub const NAME_WIDTH: usize = 24;

/// Spaces added per level of nesting
pub const INDENT_WIDTH: usize = 4;

/// Write the menu for `blocks` and everything beneath them
pub fn display_menu<W: Write + ?Sized>(w: &mut W, blocks: &[Block], depth: usize) -> io::Result<()> {
    for block in blocks {
        writeln!(
            w,
            "{}{:<width$}: {}",
            " ".repeat(depth * INDENT_WIDTH),
            block.name,
            block.desc,
            width = NAME_WIDTH
        )?;

        display_menu(w, &block.children, depth + 1)?;
    }

    Ok(())
}

/// The menu as a string
pub fn render_menu(blocks: &[Block]) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail
    let _ = display_menu(&mut buf, blocks, 0);
    String::from_utf8_lossy(&buf).into_owned()
}
