//! C3: the initial heuristic. Seeds the RMP with one Y-column per strip type
//! and one X-column per *item* type — feasible but deliberately minimal.
//! Richer seeding such as first-fit-decreasing would improve convergence
//! speed but is not implemented here.

use crate::column::PatternColumn;
use crate::instance::Instance;

/// Builds the seed column set. Panics only if an item type has no strip of
/// matching width, which cannot happen: every item's width is itself one of
/// the distinct widths the strip types are derived from, so a strip of
/// exactly that width always exists.
pub fn seed_columns(instance: &Instance) -> Vec<PatternColumn> {
    let mut columns = Vec::with_capacity(instance.n_strips() + instance.n_items());

    for strip in &instance.strips {
        let mut y_pattern = vec![0u32; instance.n_strips()];
        y_pattern[strip.index] = 1;
        columns.push(PatternColumn::new_y(y_pattern));
    }

    for item in &instance.items {
        let own_strip = instance
            .strips
            .iter()
            .find(|s| s.width == item.width)
            .expect("item width is one of the strip widths by construction");
        let mut x_pattern = vec![0u32; instance.n_items()];
        x_pattern[item.index] = 1;
        columns.push(PatternColumn::new_x(own_strip.index, x_pattern));
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Sheet;

    #[test]
    fn seed_covers_every_item_type_at_least_once() {
        let instance = Instance::new(
            Sheet { length: 100, width: 60 },
            vec![(40, 20, 5), (60, 20, 5), (10, 40, 1)],
        )
        .unwrap();
        let columns = seed_columns(&instance);
        assert_eq!(columns.len(), instance.n_strips() + instance.n_items());

        for item in &instance.items {
            let covered = columns.iter().any(|c| match &c.kind {
                crate::column::PatternKind::X { strip, pattern } => {
                    instance.strips[*strip].width >= item.width && pattern[item.index] > 0
                }
                _ => false,
            });
            assert!(covered, "item {} not covered by the seed", item.index);
        }
    }

    #[test]
    fn duplicate_widths_are_each_covered_by_their_own_column() {
        let instance = Instance::new(
            Sheet { length: 100, width: 60 },
            vec![(40, 20, 5), (60, 20, 5)],
        )
        .unwrap();
        let columns = seed_columns(&instance);

        for item in &instance.items {
            let covered = columns.iter().any(|c| match &c.kind {
                crate::column::PatternKind::X { strip, pattern } => {
                    instance.strips[*strip].width >= item.width && pattern[item.index] > 0
                }
                _ => false,
            });
            assert!(covered, "item {} not covered by the seed", item.index);
        }
    }

    #[test]
    fn every_seed_column_is_feasible() {
        let instance = Instance::new(Sheet { length: 100, width: 60 }, vec![(50, 30, 4)]).unwrap();
        for column in seed_columns(&instance) {
            assert!(column.check_feasible(&instance));
        }
    }
}
