use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::ai::strip_code_fences;

/// A tile on the explore page.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub slug: &'static str,
    /// Photo search keywords for the tile image.
    pub query: &'static str,
}

pub const CATEGORIES: [Category; 8] = [
    Category { name: "Beaches", slug: "beaches", query: "beach,tropical" },
    Category { name: "Mountains", slug: "mountains", query: "mountain,peak" },
    Category { name: "Vibrant Cities", slug: "vibrant-cities", query: "city,night" },
    Category { name: "Historical Sites", slug: "historical-sites", query: "ancient,ruins" },
    Category { name: "Adventure", slug: "adventure-travel", query: "adventure,hiking" },
    Category { name: "Tropical", slug: "tropical-paradise", query: "tropical,island" },
    Category { name: "Winter", slug: "winter-wonderlands", query: "winter,snow" },
    Category { name: "Cultural", slug: "cultural-hotspots", query: "culture,festival" },
];

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTile {
    pub name: &'static str,
    pub slug: &'static str,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Destination {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct DestinationList {
    #[serde(default)]
    destinations: Vec<Destination>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DestinationCard {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

pub fn destinations_prompt(category: &str) -> String {
    format!(
        r#"
    You are a travel inspiration expert. Generate a list of 8 unique and interesting travel destinations that fit the category: "{category}".
    For each destination, provide a name and a short, one-sentence description.
    Respond ONLY with a valid JSON object with a single root key "destinations".
    The value of "destinations" must be an array of objects, each with two string keys: "name" and "description".
    "#
    )
}

pub fn parse_destinations(text: &str) -> anyhow::Result<Vec<Destination>> {
    let cleaned = strip_code_fences(text);
    let list: DestinationList =
        serde_json::from_str(&cleaned).context("response does not match the destinations schema")?;
    Ok(list.destinations)
}

/// `"vibrant-cities"` → `"Vibrant Cities"`.
pub fn category_title(slug: &str) -> String {
    slug.replace('-', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_unique_categories() {
        let mut slugs: Vec<_> = CATEGORIES.iter().map(|c| c.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), 8);
    }

    #[test]
    fn title_from_slug() {
        assert_eq!(category_title("vibrant-cities"), "Vibrant Cities");
        assert_eq!(category_title("BEACHES"), "Beaches");
        assert_eq!(category_title("winter-wonderlands"), "Winter Wonderlands");
    }

    #[test]
    fn parses_destinations() {
        let text = "```json\n{\"destinations\":[{\"name\":\"Bali\",\"description\":\"Temples and surf.\"}]}\n```";
        let list = parse_destinations(text).unwrap();
        assert_eq!(
            list,
            vec![Destination {
                name: "Bali".into(),
                description: "Temples and surf.".into()
            }]
        );
    }

    #[test]
    fn destination_without_description_is_rejected() {
        assert!(parse_destinations(r#"{"destinations":[{"name":"Bali"}]}"#).is_err());
    }

    #[test]
    fn prompt_names_category() {
        assert!(destinations_prompt("beaches").contains("the category: \"beaches\""));
    }
}
