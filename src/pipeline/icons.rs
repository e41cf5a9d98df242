use std::collections::HashMap;

pub(crate) const DEFAULT_ICON: &str = "🌱";

/// Species commonly suggested for coastal erosion control.
const SPECIES_ICONS: &[(&str, &str)] = &[
    ("acacia", "🌳"),
    ("agoho", "🌲"),
    ("aloe", "🌵"),
    ("bamboo", "🎋"),
    ("banana", "🍌"),
    ("beach morning glory", "🌸"),
    ("bermuda grass", "🌾"),
    ("bougainvillea", "🌺"),
    ("cactus", "🌵"),
    ("casuarina", "🌲"),
    ("coconut", "🌴"),
    ("cogon", "🌾"),
    ("fern", "🌿"),
    ("ipil-ipil", "🌳"),
    ("kakawate", "🌳"),
    ("lemongrass", "🌾"),
    ("mahogany", "🌳"),
    ("malunggay", "🌿"),
    ("mango", "🥭"),
    ("mangrove", "🌳"),
    ("morning glory", "🌸"),
    ("moringa", "🌿"),
    ("napier grass", "🌾"),
    ("narra", "🌳"),
    ("nipa", "🌴"),
    ("pandan", "🌿"),
    ("sea grape", "🍇"),
    ("seagrape", "🍇"),
    ("spinifex", "🌾"),
    ("sunflower", "🌻"),
    ("talisay", "🌳"),
    ("vetiver", "🌾"),
    ("vetiver grass", "🌾"),
];

/// Fallback categories, checked in this order.
const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("palm", "🌴"),
    ("bamboo", "🎋"),
    ("grass", "🌾"),
    ("reed", "🌾"),
    ("sedge", "🌾"),
    ("pine", "🌲"),
    ("fir", "🌲"),
    ("cedar", "🌲"),
    ("tree", "🌳"),
    ("wood", "🌳"),
    ("flower", "🌸"),
    ("lily", "🌸"),
    ("vine", "🍃"),
    ("creeper", "🍃"),
    ("shrub", "🌿"),
    ("bush", "🌿"),
    ("herb", "🌿"),
];

#[derive(Debug)]
pub(crate) struct IconResolver {
    exact: HashMap<&'static str, &'static str>,
    by_length: Vec<(&'static str, &'static str)>,
}

impl IconResolver {
    pub(crate) fn new() -> Self {
        let exact = SPECIES_ICONS.iter().copied().collect::<HashMap<_, _>>();
        let mut by_length = SPECIES_ICONS.to_vec();
        by_length.sort_by(|left, right| {
            right
                .0
                .chars()
                .count()
                .cmp(&left.0.chars().count())
                .then(left.0.cmp(right.0))
        });

        Self { exact, by_length }
    }

    pub(crate) fn resolve(&self, name: &str) -> &'static str {
        let key = name.trim().to_lowercase();

        self.exact
            .get(key.as_str())
            .copied()
            .or_else(|| {
                self.by_length
                    .iter()
                    .find(|(species, _)| key.contains(species))
                    .map(|(_, icon)| *icon)
            })
            .or_else(|| {
                CATEGORY_ICONS
                    .iter()
                    .find(|(category, _)| key.contains(category))
                    .map(|(_, icon)| *icon)
            })
            .unwrap_or(DEFAULT_ICON)
    }
}
