//! Property tests: incremental results match a from-scratch computation

use proptest::prelude::*;
use ripple_sheets::prelude::*;

/// Column A cells where row 1 is a literal and every later row adds a
/// constant to one or two earlier rows
#[derive(Debug, Clone)]
struct Recipe {
    parents: Vec<usize>,
    constant: i32,
}

impl Recipe {
    fn text(&self) -> String {
        if self.parents.is_empty() {
            return self.constant.to_string();
        }
        let refs: Vec<String> = self.parents.iter().map(|p| format!("A{}", p + 1)).collect();
        // Formulas have no unary minus
        if self.constant < 0 {
            format!("={}-{}", refs.join("+"), -self.constant)
        } else {
            format!("={}+{}", refs.join("+"), self.constant)
        }
    }
}

fn dag() -> impl Strategy<Value = Vec<Recipe>> {
    let cell = (any::<usize>(), any::<usize>(), any::<bool>(), -50i32..50);
    prop::collection::vec(cell, 1..16).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(index, (first, second, two, constant))| {
                let parents = match index {
                    0 => Vec::new(),
                    _ if two => vec![first % index, second % index],
                    _ => vec![first % index],
                };
                Recipe { parents, constant }
            })
            .collect()
    })
}

fn expected_values(recipes: &[Recipe]) -> Vec<f64> {
    let mut values: Vec<f64> = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        let sum: f64 = recipe.parents.iter().map(|&p| values[p]).sum();
        values.push(sum + f64::from(recipe.constant));
    }
    values
}

proptest! {
    #[test]
    fn prop_chain_tracks_head(
        heads in prop::collection::vec(-1000i32..1000, 1..10),
        length in 1u32..30,
    ) {
        let mut sheet = Sheet::new();
        for row in 2..=length + 1 {
            sheet.set_cell(&format!("A{}", row), &format!("=A{}+1", row - 1)).unwrap();
        }

        let tail = format!("A{}", length + 1);
        for head in heads {
            let stats = sheet.set_cell("A1", &head.to_string()).unwrap();
            prop_assert_eq!(stats.cells_calculated, length as usize);
            prop_assert_eq!(sheet.cell_value(&tail).unwrap(), f64::from(head) + f64::from(length));
        }
    }

    #[test]
    fn prop_write_order_does_not_matter(
        (recipes, order) in dag().prop_flat_map(|recipes| {
            let indices: Vec<usize> = (0..recipes.len()).collect();
            (Just(recipes), Just(indices).prop_shuffle())
        })
    ) {
        let mut sheet = Sheet::new();
        for &index in &order {
            let stats = sheet.set_cell(&format!("A{}", index + 1), &recipes[index].text()).unwrap();
            prop_assert_eq!(stats.circular_references, 0);
        }

        for (index, expected) in expected_values(&recipes).into_iter().enumerate() {
            let address = format!("A{}", index + 1);
            prop_assert!(!sheet.has_error(&address).unwrap());
            prop_assert_eq!(sheet.cell_value(&address).unwrap(), expected);
        }
    }

    #[test]
    fn prop_full_calculation_matches_incremental(recipes in dag()) {
        let mut sheet = Sheet::new();
        for (index, recipe) in recipes.iter().enumerate() {
            sheet.set_cell(&format!("A{}", index + 1), &recipe.text()).unwrap();
        }
        let before: Vec<f64> = (1..=recipes.len())
            .map(|row| sheet.cell_value(&format!("A{}", row)).unwrap())
            .collect();

        let stats = sheet.calculate();
        prop_assert_eq!(stats.cells_calculated, recipes.len() - 1);

        let after: Vec<f64> = (1..=recipes.len())
            .map(|row| sheet.cell_value(&format!("A{}", row)).unwrap())
            .collect();
        prop_assert_eq!(before, after);
    }
}
