//! C1 (instance model) and C8 (instance loader).
//!
//! The instance is immutable once built: strip types are derived once from the
//! distinct item widths and never recomputed.

use std::io::BufRead;
use std::path::Path;

use crate::error::{Result, SolverError};

/// One demanded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemType {
    pub length: u32,
    pub width: u32,
    pub demand: u32,
    /// Row order in the input file; the canonical index used everywhere in the
    /// core. `type_id` from the file is not retained — it is an external label.
    pub index: usize,
}

/// A strip width derived from the distinct item widths, descending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripType {
    pub width: u32,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sheet {
    pub length: u32,
    pub width: u32,
}

#[derive(Debug, Clone)]
pub struct Instance {
    pub sheet: Sheet,
    /// Item types with `demand > 0`; zero-demand rows are parsed but elided.
    pub items: Vec<ItemType>,
    /// Strip widths, strictly descending (invariant enforced at construction).
    pub strips: Vec<StripType>,
}

impl Instance {
    /// Builds and validates an instance from sheet dimensions and raw
    /// `(length, width, demand)` triples in file order. Rows with `demand == 0`
    /// are dropped before indices are assigned, so `items[k].index == k`.
    pub fn new(sheet: Sheet, raw_items: Vec<(u32, u32, u32)>) -> Result<Self> {
        if sheet.length == 0 || sheet.width == 0 {
            return Err(SolverError::InvalidInstance(
                "sheet dimensions must be positive".into(),
            ));
        }

        let items: Vec<ItemType> = raw_items
            .into_iter()
            .filter(|&(_, _, d)| d > 0)
            .enumerate()
            .map(|(index, (length, width, demand))| ItemType {
                length,
                width,
                demand,
                index,
            })
            .collect();

        if items.is_empty() {
            return Err(SolverError::InvalidInstance(
                "instance has no item with positive demand".into(),
            ));
        }

        for item in &items {
            if item.length == 0 || item.width == 0 {
                return Err(SolverError::InvalidInstance(format!(
                    "item {} has a nonpositive dimension",
                    item.index
                )));
            }
            if item.length > sheet.length {
                return Err(SolverError::InvalidInstance(format!(
                    "item {} length {} exceeds sheet length {}",
                    item.index, item.length, sheet.length
                )));
            }
            if item.width > sheet.width {
                return Err(SolverError::InvalidInstance(format!(
                    "item {} width {} exceeds sheet width {}",
                    item.index, item.width, sheet.width
                )));
            }
        }

        let mut widths: Vec<u32> = items.iter().map(|i| i.width).collect();
        widths.sort_unstable_by(|a, b| b.cmp(a));
        widths.dedup();
        let strips: Vec<StripType> = widths
            .into_iter()
            .enumerate()
            .map(|(index, width)| StripType { width, index })
            .collect();

        Ok(Self { sheet, items, strips })
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    pub fn n_strips(&self) -> usize {
        self.strips.len()
    }

    /// Strip types with width `>= item.width`, i.e. types that item fits in.
    pub fn strips_fitting(&self, item: &ItemType) -> impl Iterator<Item = &StripType> {
        self.strips.iter().filter(move |s| s.width >= item.width)
    }

    /// Item types that fit in a strip of the given width (`w_i <= w_bar_t`).
    pub fn items_fitting(&self, strip_width: u32) -> impl Iterator<Item = &ItemType> {
        self.items.iter().filter(move |i| i.width <= strip_width)
    }
}

/// Reads the tab-separated instance format: a stock-count line (ignored),
/// an item-count line, an `L\tW` line, then that many `l\tw\td\ttype_id` lines.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Instance> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| {
        SolverError::InvalidInstance(format!("cannot open {}: {e}", path.as_ref().display()))
    })?;
    let mut lines = std::io::BufReader::new(file).lines();

    let _stocks_count = next_line(&mut lines)?;

    let n: usize = next_line(&mut lines)?
        .trim()
        .parse()
        .map_err(|_| SolverError::InvalidInstance("item count is not an integer".into()))?;

    let (l, w) = split_two(&next_line(&mut lines)?, "L\tW")?;
    let sheet = Sheet {
        length: parse_u32(&l)?,
        width: parse_u32(&w)?,
    };

    let mut raw_items = Vec::with_capacity(n);
    for row in 0..n {
        let line = next_line(&mut lines)
            .map_err(|_| SolverError::InvalidInstance(format!("missing item row {row}")))?;
        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() != 4 {
            return Err(SolverError::InvalidInstance(format!(
                "item row {row} does not have 4 tab-separated fields"
            )));
        }
        let length = parse_u32(fields[0])?;
        let width = parse_u32(fields[1])?;
        let demand = parse_u32(fields[2])?;
        // fields[3] is the external type_id; the core does not use it.
        raw_items.push((length, width, demand));
    }

    Instance::new(sheet, raw_items)
}

fn next_line(lines: &mut std::io::Lines<std::io::BufReader<std::fs::File>>) -> Result<String> {
    match lines.next() {
        Some(Ok(line)) => Ok(line),
        Some(Err(e)) => Err(SolverError::InvalidInstance(format!("read error: {e}"))),
        None => Err(SolverError::InvalidInstance("unexpected end of file".into())),
    }
}

fn split_two(line: &str, what: &str) -> Result<(String, String)> {
    let mut parts = line.trim().splitn(2, '\t');
    let a = parts.next().ok_or_else(|| {
        SolverError::InvalidInstance(format!("expected `{what}` line, got `{line}`"))
    })?;
    let b = parts.next().ok_or_else(|| {
        SolverError::InvalidInstance(format!("expected `{what}` line, got `{line}`"))
    })?;
    Ok((a.to_string(), b.to_string()))
}

fn parse_u32(s: &str) -> Result<u32> {
    s.trim()
        .parse()
        .map_err(|_| SolverError::InvalidInstance(format!("`{s}` is not a nonnegative integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_types_are_strictly_descending() {
        let instance = Instance::new(
            Sheet { length: 100, width: 60 },
            vec![(40, 20, 5), (60, 20, 5), (10, 40, 1)],
        )
        .unwrap();
        let widths: Vec<u32> = instance.strips.iter().map(|s| s.width).collect();
        assert_eq!(widths, vec![40, 20]);
        for pair in widths.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn zero_demand_rows_are_elided() {
        let instance = Instance::new(
            Sheet { length: 100, width: 60 },
            vec![(50, 30, 0), (50, 30, 4)],
        )
        .unwrap();
        assert_eq!(instance.n_items(), 1);
        assert_eq!(instance.items[0].index, 0);
    }

    #[test]
    fn oversized_item_is_invalid() {
        let result = Instance::new(Sheet { length: 100, width: 60 }, vec![(101, 20, 1)]);
        assert!(matches!(result, Err(SolverError::InvalidInstance(_))));
    }

    #[test]
    fn all_zero_demand_is_invalid() {
        let result = Instance::new(Sheet { length: 100, width: 60 }, vec![(10, 10, 0)]);
        assert!(matches!(result, Err(SolverError::InvalidInstance(_))));
    }
}
