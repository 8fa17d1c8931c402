//! Built-in starting document.
//!
//! Every session starts from this reference hierarchy on vitamins. Loading a
//! different document goes through the codec instead.

use std::sync::Arc;

use super::node::Node;

/// Id of the seed document's root.
pub const SEED_ROOT_ID: &str = "root";

/// A fresh copy of the seed document.
pub fn seed_document() -> Arc<Node> {
    Arc::new(
        Node::leaf(
            SEED_ROOT_ID,
            "Vitamins in Human Body",
            "Essential organic compounds required for normal physiological functions, growth, and maintenance of health.",
        )
        .with_description(
            "Vitamins are micronutrients that the body needs in small amounts to function properly. They play crucial roles in metabolism, immunity, and overall health.",
        )
        .with_notes("There are 13 essential vitamins that humans need.")
        .with_children([classification(), functions(), sources(), deficiency()]),
    )
}

fn classification() -> Node {
    let fat_soluble = Node::leaf(
        "fat-soluble",
        "Fat-Soluble Vitamins",
        "Vitamins A, D, E, and K - stored in body fat tissues.",
    )
    .with_description(
        "These vitamins are absorbed along with fats in the diet and can be stored in the body's fatty tissue and liver.",
    )
    .with_children([
        Node::leaf(
            "vitamin-a",
            "Vitamin A (Retinol)",
            "Essential for vision, immune function, and skin health.",
        )
        .with_notes("Found in liver, fish oils, eggs, and orange vegetables."),
        Node::leaf(
            "vitamin-d",
            "Vitamin D (Calciferol)",
            "Regulates calcium absorption and bone health.",
        )
        .with_notes("Synthesized through sunlight exposure."),
        Node::leaf(
            "vitamin-e",
            "Vitamin E (Tocopherol)",
            "Powerful antioxidant protecting cells from damage.",
        )
        .with_notes("Found in nuts, seeds, and vegetable oils."),
        Node::leaf(
            "vitamin-k",
            "Vitamin K",
            "Essential for blood clotting and bone metabolism.",
        )
        .with_notes("Found in leafy greens and fermented foods."),
    ]);

    let b_complex = Node::leaf(
        "b-complex",
        "B-Complex Vitamins",
        "Eight vitamins essential for energy metabolism.",
    )
    .with_children([
        Node::leaf("b1", "B1 (Thiamine)", "Converts nutrients into energy."),
        Node::leaf("b2", "B2 (Riboflavin)", "Helps break down fats and drugs."),
        Node::leaf(
            "b12",
            "B12 (Cobalamin)",
            "Critical for nerve function and DNA synthesis.",
        ),
    ]);

    let water_soluble = Node::leaf(
        "water-soluble",
        "Water-Soluble Vitamins",
        "B-complex vitamins and Vitamin C - not stored in body.",
    )
    .with_description(
        "These vitamins dissolve in water and are not stored in significant amounts, requiring regular dietary intake.",
    )
    .with_children([
        Node::leaf(
            "vitamin-c",
            "Vitamin C (Ascorbic Acid)",
            "Antioxidant essential for collagen synthesis and immunity.",
        )
        .with_notes("Abundant in citrus fruits, berries, and peppers."),
        b_complex,
    ]);

    Node::leaf(
        "classification",
        "Vitamin Classification",
        "Vitamins are classified based on their solubility properties.",
    )
    .with_description(
        "The two main categories are fat-soluble and water-soluble vitamins, each with distinct absorption and storage characteristics.",
    )
    .with_children([fat_soluble, water_soluble])
}

fn functions() -> Node {
    Node::leaf(
        "functions",
        "Vitamin Functions",
        "Key roles vitamins play in maintaining body health.",
    )
    .with_description(
        "Vitamins serve as coenzymes, antioxidants, and regulators of various metabolic processes.",
    )
    .with_children([
        Node::leaf(
            "metabolism",
            "Metabolic Support",
            "B vitamins act as coenzymes in energy production pathways.",
        )
        .with_notes("Essential for converting food into cellular energy."),
        Node::leaf(
            "immunity",
            "Immune Function",
            "Vitamins A, C, D, and E support immune system health.",
        )
        .with_notes("Help protect against infections and diseases."),
        Node::leaf(
            "antioxidant",
            "Antioxidant Protection",
            "Vitamins C and E neutralize harmful free radicals.",
        )
        .with_notes("Protect cells from oxidative stress and damage."),
    ])
}

fn sources() -> Node {
    Node::leaf(
        "sources",
        "Dietary Sources",
        "Natural food sources rich in essential vitamins.",
    )
    .with_children([
        Node::leaf(
            "fruits-veg",
            "Fruits & Vegetables",
            "Rich in vitamins A, C, K, and folate.",
        )
        .with_notes("Colorful produce offers diverse vitamin profiles."),
        Node::leaf(
            "animal-products",
            "Animal Products",
            "Primary source of B12, D, and preformed vitamin A.",
        )
        .with_notes("Includes meat, fish, eggs, and dairy."),
        Node::leaf(
            "fortified-foods",
            "Fortified Foods",
            "Foods enhanced with added vitamins.",
        )
        .with_notes("Common examples: cereals, milk, plant-based alternatives."),
    ])
}

fn deficiency() -> Node {
    Node::leaf(
        "deficiency",
        "Deficiency Disorders",
        "Health conditions caused by inadequate vitamin intake.",
    )
    .with_children([
        Node::leaf(
            "scurvy",
            "Scurvy",
            "Vitamin C deficiency causing bleeding gums and weakness.",
        ),
        Node::leaf(
            "rickets",
            "Rickets",
            "Vitamin D deficiency leading to bone deformities.",
        ),
        Node::leaf(
            "night-blindness",
            "Night Blindness",
            "Vitamin A deficiency affecting vision in low light.",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::tree::ops::{collect_all_ids, find_by_id};

    #[test]
    fn test_seed_ids_are_unique() {
        let tree = seed_document();
        let ids = collect_all_ids(&tree);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len(), "duplicate id in seed document");
        assert_eq!(ids.len(), 25);
        assert_eq!(ids[0], SEED_ROOT_ID);
    }

    #[test]
    fn test_seed_shape() {
        let tree = seed_document();
        assert_eq!(
            tree.child_ids(),
            vec!["classification", "functions", "sources", "deficiency"]
        );
        let b_complex = find_by_id(&tree, "b-complex").map(|n| n.child_ids());
        assert_eq!(b_complex, Some(vec!["b1".into(), "b2".into(), "b12".into()]));
    }
}
