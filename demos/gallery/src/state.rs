use tui_controls::{Item, ScrollMetrics};

/// Which control receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Country,
    Toppings,
    Newsletter,
}

impl Focus {
    const ORDER: [Focus; 3] = [Focus::Country, Focus::Toppings, Focus::Newsletter];

    pub fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug)]
pub struct AppState {
    /// Every known country, including ones added at runtime
    pub countries: Vec<Item<u32>>,
    /// `countries` filtered by `country_query`
    pub visible_countries: Vec<Item<u32>>,
    pub country_query: String,
    pub country: Option<u32>,
    pub country_scroll: ScrollMetrics,

    pub toppings: Vec<Item<String>>,
    pub visible_toppings: Vec<Item<String>>,
    pub selected_toppings: Vec<String>,

    pub regions: Vec<Item<u32>>,
    pub newsletter: bool,

    pub focus: Focus,
    pub dialog_open: bool,
    pub status: String,
    next_custom_id: u32,
}

impl AppState {
    pub fn new(countries: Vec<Item<u32>>) -> Self {
        let toppings: Vec<Item<String>> = ["Cheese", "Olives", "Mushrooms", "Peppers", "Onions"]
            .into_iter()
            .map(|name| Item::new(name, name.to_lowercase()))
            .collect();
        let next_custom_id = countries
            .iter()
            .map(|item| item.value)
            .max()
            .map_or(10_000, |max| max.max(9_999) + 1);

        Self {
            visible_countries: countries.clone(),
            countries,
            country_query: String::new(),
            country: None,
            country_scroll: ScrollMetrics::default(),
            visible_toppings: toppings.clone(),
            toppings,
            selected_toppings: vec!["cheese".to_string()],
            regions: vec![Item::new("North", 1), Item::new("South", 2)],
            newsletter: false,
            focus: Focus::default(),
            dialog_open: false,
            status: String::new(),
            next_custom_id,
        }
    }

    pub fn country_name(&self) -> Option<&str> {
        let value = self.country?;
        self.countries
            .iter()
            .find(|item| item.value == value && item.is_selectable())
            .map(Item::text)
    }

    /// Append a user-entered country and return its value
    pub fn add_country(&mut self, name: String) -> u32 {
        let value = self.next_custom_id;
        self.next_custom_id += 1;
        self.countries.push(Item::new(name, value));
        value
    }

    /// One-line summary shown in the confirmation dialog
    pub fn summary(&self) -> String {
        let toppings = if self.selected_toppings.is_empty() {
            "no toppings".to_string()
        } else {
            self.selected_toppings.join(", ")
        };
        format!(
            "Country: {}. Toppings: {}. Newsletter: {}.",
            self.country_name().unwrap_or("none"),
            toppings,
            if self.newsletter { "yes" } else { "no" }
        )
    }
}

/// Items whose text contains `query`, ignoring case
///
/// Group labels are kept only when at least one of their items matches.
pub fn filter_items<V: Clone>(items: &[Item<V>], query: &str) -> Vec<Item<V>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.to_vec();
    }

    let mut matched = Vec::new();
    let mut pending_group = None;
    for item in items {
        if item.is_group_label {
            pending_group = Some(item);
            continue;
        }
        if item.text().to_lowercase().contains(&query) {
            if let Some(group) = pending_group.take() {
                matched.push(group.clone());
            }
            matched.push(item.clone());
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::Country.next(), Focus::Toppings);
        assert_eq!(Focus::Newsletter.next(), Focus::Country);
        assert_eq!(Focus::Country.prev(), Focus::Newsletter);
    }

    #[test]
    fn test_filter_keeps_matching_groups() {
        let items = vec![
            Item::group("Europe", 0),
            Item::new("France", 33),
            Item::group("Asia", 1),
            Item::new("Japan", 81),
        ];

        let filtered = filter_items(&items, "JAP");
        let texts: Vec<&str> = filtered.iter().map(Item::text).collect();
        assert_eq!(texts, vec!["Asia", "Japan"]);

        assert_eq!(filter_items(&items, "  ").len(), 4);
        assert!(filter_items(&items, "zz").is_empty());
    }

    #[test]
    fn test_added_countries_get_fresh_values() {
        let mut state = AppState::new(vec![Item::new("France", 33)]);
        let first = state.add_country("Peru".into());
        let second = state.add_country("Chile".into());
        assert_ne!(first, second);
        assert_ne!(first, 33);
        assert_eq!(state.countries.len(), 3);
    }
}
