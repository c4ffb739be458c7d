//! Item Images
//!
//! Static lookup from an item to its image path. Lookup order is item id, then
//! the item name lowercased with whitespace runs replaced by `-`, then the
//! category fallback, then a placeholder.

/// Image used when nothing else matches.
pub const PLACEHOLDER_IMAGE: &str = "/assets/images/menu-item-placeholder.jpg";

const ITEM_IMAGES: &[(&str, &str)] = &[
    ("pepsi", "/Menu/assets/images/pepsi-can.jpg"),
    ("pepsi-diet", "/Menu/assets/images/pepsi-diet-can.jpg"),
    ("miranda", "/Menu/assets/images/miranda-orange.jpg"),
    ("7up", "/Menu/assets/images/7up-can.jpg"),
    ("7up-diet", "/Menu/assets/images/7up-diet-can.jpg"),
    ("water", "/Menu/assets/images/water-bottle.jpg"),
    ("coffee", "/Menu/assets/images/hot-coffee-cup.jpg"),
    ("nescafe", "/Menu/assets/images/nescafe-instant.jpg"),
    ("tea", "/Menu/assets/images/black-tea-cup.jpg"),
    ("ice-tea", "/Menu/assets/images/icedteas.png"),
    ("ice-coffee", "/Menu/assets/images/iced-coffee.png"),
    ("xxl", "/Menu/assets/images/xxl.png"),
    ("almaza", "/Menu/assets/images/almaza-regular.png"),
    ("almaza-light", "/Menu/assets/images/almazalight.png"),
    ("maccaw", "/Menu/assets/images/maccaw-juice.png"),
    ("extra-ras", "/Menu/assets/images/ras.jpg"),
    ("rakwe-ahwe", "/Menu/assets/images/coffeerakwa.png"),
    ("termos", "/Menu/assets/images/termos.png"),
    ("jazar", "/Menu/assets/images/carrot.png"),
    ("shisha", "/Menu/assets/images/premium-shisha-setup.jpg"),
    ("nuts", "/Menu/assets/images/nuts.jpg"),
];

const CATEGORY_IMAGES: &[(&str, &str)] = &[
    ("soft-drinks", "/assets/images/soft-drink-generic.jpg"),
    ("hot-beverages", "/assets/images/hot-beverage-generic.jpg"),
    ("cold-beverages", "/assets/images/cold-beverage-generic.jpg"),
    ("premium-drinks", "/assets/images/premium-drink-generic.jpg"),
    ("shisha", "/assets/images/shisha-generic.jpg"),
    ("snacks", "/assets/images/snacks-generic.jpg"),
];

/// Resolve the image path for an item.
pub fn image_for(item_id: &str, item_name: &str, category: &str) -> &'static str {
    let normalized_name = item_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    lookup(ITEM_IMAGES, item_id)
        .or_else(|| lookup(ITEM_IMAGES, &normalized_name))
        .or_else(|| lookup(CATEGORY_IMAGES, category))
        .unwrap_or(PLACEHOLDER_IMAGE)
}

/// Images whose key partially matches the name, or the category fallback when
/// none do. A blank name only gets the category fallback.
pub fn suggest_images(item_name: &str, category: &str) -> Vec<&'static str> {
    let name = item_name.trim().to_lowercase();

    if name.is_empty() {
        return lookup(CATEGORY_IMAGES, category).into_iter().collect();
    }

    let suggestions: Vec<&'static str> = ITEM_IMAGES
        .iter()
        .filter(|(key, _)| name.contains(key) || key.contains(name.as_str()))
        .map(|(_, path)| *path)
        .collect();

    if suggestions.is_empty() {
        lookup(CATEGORY_IMAGES, category).into_iter().collect()
    } else {
        suggestions
    }
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, path)| *path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_id_wins() {
        assert_eq!(
            image_for("pepsi-diet", "Something Else", "snacks"),
            "/Menu/assets/images/pepsi-diet-can.jpg"
        );
    }

    #[test]
    fn falls_back_to_normalized_name() {
        assert_eq!(
            image_for("iced-tea-large", "Ice  Tea", "cold-beverages"),
            "/Menu/assets/images/icedteas.png"
        );
    }

    #[test]
    fn falls_back_to_category_then_placeholder() {
        assert_eq!(
            image_for("lemonade", "Lemonade", "soft-drinks"),
            "/assets/images/soft-drink-generic.jpg"
        );
        assert_eq!(
            image_for("lemonade", "Lemonade", "juices"),
            PLACEHOLDER_IMAGE
        );
    }

    #[test]
    fn suggestions_match_partial_names() {
        let suggestions = suggest_images("Almaza Light", "premium-drinks");

        assert!(suggestions.contains(&"/Menu/assets/images/almaza-regular.png"));
        assert_eq!(
            suggest_images("Kaak", "snacks"),
            vec!["/assets/images/snacks-generic.jpg"]
        );
    }

    #[test]
    fn blank_name_only_suggests_category_image() {
        assert_eq!(
            suggest_images("   ", "hot-beverages"),
            vec!["/assets/images/hot-beverage-generic.jpg"]
        );
        assert!(suggest_images("", "juices").is_empty());
    }
}
