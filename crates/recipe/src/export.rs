//! Shopping list rendering: ingredient amounts summed across every recipe
//! in a cart.

use std::collections::BTreeMap;

pub const FILE_NAME: &str = "shopping_cart.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Sums amounts per ingredient name, sorted by name. Two ingredients that
/// share a name are merged and the unit seen last wins. Totals saturate at
/// `i64::MAX`.
pub fn aggregate(lines: impl IntoIterator<Item = CartLine>) -> Vec<CartLine> {
    let mut totals: BTreeMap<String, (i64, String)> = BTreeMap::new();

    for line in lines {
        let entry = totals.entry(line.name).or_insert((0, String::new()));
        entry.0 = entry.0.saturating_add(line.amount);
        entry.1 = line.measurement_unit;
    }

    totals
        .into_iter()
        .map(|(name, (amount, measurement_unit))| CartLine {
            name,
            measurement_unit,
            amount,
        })
        .collect()
}

pub fn render(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{}: {} {}", l.name, l.amount, l.measurement_unit))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, amount: i64, unit: &str) -> CartLine {
        CartLine {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
            amount,
        }
    }

    #[test]
    fn flour_from_two_recipes_is_summed() {
        let lines = aggregate([line("flour", 200, "g"), line("flour", 300, "g")]);

        assert_eq!(render(&lines), "flour: 500 g");
    }

    #[test]
    fn lines_are_sorted_by_name() {
        let lines = aggregate([
            line("sugar", 1, "tbsp"),
            line("eggs", 2, "pcs"),
            line("sugar", 2, "tbsp"),
        ]);

        assert_eq!(render(&lines), "eggs: 2 pcs\nsugar: 3 tbsp");
    }

    #[test]
    fn same_name_keeps_last_unit() {
        let lines = aggregate([line("milk", 1, "l"), line("milk", 200, "ml")]);

        assert_eq!(lines, vec![line("milk", 201, "ml")]);
    }

    #[test]
    fn huge_amounts_saturate() {
        let lines = aggregate([line("flour", i64::MAX, "g"), line("flour", i64::MAX, "g")]);

        assert_eq!(lines, vec![line("flour", i64::MAX, "g")]);
    }

    #[test]
    fn empty_cart_renders_nothing() {
        assert_eq!(render(&aggregate([])), "");
    }
}
