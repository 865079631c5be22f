//! C9: the cut-plan writer. Emits one `Stock_<k>.txt` per produced sheet,
//! each rectangle as four `X<TAB>Y<TAB>TAG` corner lines.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{Result, SolverError};
use crate::incumbent::CuttingPlan;
use crate::instance::Instance;

pub fn write_cutting_plan(plan: &CuttingPlan, instance: &Instance, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| SolverError::OracleInternal(format!("cannot create output dir: {e}")))?;

    for (k, sheet) in plan.sheets.iter().enumerate() {
        let mut buf = String::new();
        write_rect(&mut buf, 0, 0, instance.sheet.length, instance.sheet.width, "x");

        let mut y_offset = 0u32;
        for strip in &sheet.strips {
            let width = instance.strips[strip.strip_type].width;
            write_rect(
                &mut buf,
                0,
                y_offset,
                instance.sheet.length,
                y_offset + width,
                &format!("S{}", strip.strip_type),
            );

            let mut x_offset = 0u32;
            for &(item_idx, length) in &strip.items {
                let item_width = instance.items[item_idx].width;
                write_rect(
                    &mut buf,
                    x_offset,
                    y_offset,
                    x_offset + length,
                    y_offset + item_width,
                    &format!("I{item_idx}"),
                );
                x_offset += length;
            }
            y_offset += width;
        }

        let path = output_dir.join(format!("Stock_{k}.txt"));
        std::fs::write(&path, buf)
            .map_err(|e| SolverError::OracleInternal(format!("cannot write {}: {e}", path.display())))?;
    }

    Ok(())
}

/// Writes one rectangle as four `X<TAB>Y<TAB>TAG` lines, corner order
/// bottom-left, top-left, top-right, bottom-right.
fn write_rect(buf: &mut String, x1: u32, y1: u32, x2: u32, y2: u32, tag: &str) {
    let _ = writeln!(buf, "{x1}\t{y1}\t{tag}");
    let _ = writeln!(buf, "{x1}\t{y2}\t{tag}");
    let _ = writeln!(buf, "{x2}\t{y2}\t{tag}");
    let _ = writeln!(buf, "{x2}\t{y1}\t{tag}");
}
