//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
fn pikachu() -> catadex_core::ItemDetail {
    use catadex_core::{AbilityEntry, ItemDetail, ItemImages, StatEntry, TypeSlot};

    ItemDetail {
        id: 25,
        name: "pikachu".to_string(),
        height: 4,
        weight: 60,
        types: vec![TypeSlot {
            slot: 1,
            type_name: "electric".to_string(),
        }],
        stats: vec![
            StatEntry {
                base_value: 35,
                effort: 0,
                stat_name: "hp".to_string(),
            },
            StatEntry {
                base_value: 90,
                effort: 2,
                stat_name: "speed".to_string(),
            },
        ],
        images: ItemImages {
            primary: Some("https://img/25.png".to_string()),
            secondary: None,
            artwork: None,
        },
        abilities: vec![
            AbilityEntry {
                name: "static".to_string(),
                is_hidden: false,
                slot: 1,
            },
            AbilityEntry {
                name: "lightning-rod".to_string(),
                is_hidden: true,
                slot: 3,
            },
        ],
    }
}

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use super::pikachu;
    use catadex_core::{FavoriteEntry, Session, UserProfile};
    use catadex_fetch::PaginationCursor;
    use chrono::Utc;

    #[test]
    fn test_progress_bar_boundary_values() {
        let formatter = TextFormatter::new(false).with_bar_width(10);

        let test_cases = vec![
            (0.0, "░░░░░░░░░░"),
            (10.0, "█░░░░░░░░░"),
            (25.0, "███░░░░░░░"), // 2.5 rounds to 3 blocks
            (50.0, "█████░░░░░"),
            (100.0, "██████████"),
            (140.0, "██████████"),
        ];

        for (percent, expected) in test_cases {
            let bar = formatter.progress_bar(percent);
            assert_eq!(bar, expected, "Failed for {percent}%");
        }
    }

    #[test]
    fn test_progress_bar_with_colors() {
        let formatter = TextFormatter::new(true);

        assert!(formatter.progress_bar(10.0).contains("\x1b[31m"), "Should be red for <20%");
        assert!(formatter.progress_bar(40.0).contains("\x1b[33m"), "Should be yellow for <50%");
        assert!(formatter.progress_bar(80.0).contains("\x1b[32m"), "Should be green for >=50%");
    }

    #[test]
    fn test_item_row() {
        let formatter = TextFormatter::new(false);
        let row = formatter.format_item_row(&pikachu());

        assert!(row.starts_with("#025 Pikachu"));
        assert!(row.ends_with("electric"));
    }

    #[test]
    fn test_card_contents() {
        let formatter = TextFormatter::new(false);
        let card = formatter.format_card(&pikachu(), true);

        assert!(card.starts_with("#025 Pikachu ★"));
        assert!(card.contains("Types:     Electric"));
        assert!(card.contains("Height:    0.4 m"));
        assert!(card.contains("Weight:    6.0 kg"));
        assert!(card.contains("Lightning rod (hidden)"));
        assert!(card.contains("Image:     https://img/25.png"));
        assert!(card.contains("HP"));
        assert!(card.contains("Total      125"));
    }

    #[test]
    fn test_card_not_favorite() {
        let formatter = TextFormatter::new(false);
        assert!(!formatter.format_card(&pikachu(), false).contains('★'));
    }

    #[test]
    fn test_list_footer() {
        let formatter = TextFormatter::new(false);
        let mut cursor = PaginationCursor::new(20);
        cursor.advance();

        let output = formatter.format_list(&[pikachu()], &cursor);
        assert!(output.contains("1 items loaded, next offset 20 (more available)"));

        cursor.mark_exhausted();
        let output = formatter.format_list(&[], &cursor);
        assert!(output.contains("end of catalog"));
    }

    #[test]
    fn test_favorites_empty_and_filled() {
        let formatter = TextFormatter::new(false);
        assert!(formatter.format_favorites(&[]).contains("No favorites yet"));

        let entry = FavoriteEntry::from(&pikachu());
        let output = formatter.format_favorites(&[entry]);
        assert!(output.contains("#025 Pikachu"));
    }

    #[test]
    fn test_session() {
        let formatter = TextFormatter::new(false);
        let session = Session {
            username: "ash".to_string(),
            profile: UserProfile {
                name: "Ash Ketchum".to_string(),
                email: "ash@pallet.town".to_string(),
                ..UserProfile::default()
            },
            signed_in_at: Utc::now(),
        };

        let output = formatter.format_session(&session);
        assert!(output.contains("Signed in as ash (Ash Ketchum)"));
        assert!(output.contains("Email:    ash@pallet.town"));
        assert!(!output.contains("Phone"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use super::pikachu;
    use catadex_fetch::PaginationCursor;

    #[test]
    fn test_format_pretty_json() {
        let formatter = JsonFormatter::new(true);

        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();

        assert!(output.contains('\n'));
        assert!(output.contains("  "));
    }

    #[test]
    fn test_format_compact_json() {
        let formatter = JsonFormatter::new(false);

        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();

        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_item_output_fields() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_item(&pikachu(), Some(true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["number"], "#025");
        assert_eq!(value["types"][0], "electric");
        assert_eq!(value["imageUrl"], "https://img/25.png");
        assert_eq!(value["abilities"][1]["hidden"], true);
        assert_eq!(value["totalBaseStats"], 125);
        assert_eq!(value["favorite"], true);
    }

    #[test]
    fn test_item_output_omits_unknown_favorite() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_item(&pikachu(), None).unwrap();
        assert!(!output.contains("favorite"));
    }

    #[test]
    fn test_browse_output() {
        let formatter = JsonFormatter::new(false);
        let mut cursor = PaginationCursor::new(1);
        cursor.advance();

        let output = formatter.format_browse(&[pikachu()], &cursor).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["loaded"], 1);
        assert_eq!(value["nextOffset"], 1);
        assert_eq!(value["hasMore"], true);
        assert_eq!(value["items"][0]["name"], "pikachu");
    }
}
